//! Integration tests for journal replay.
//!
//! These drive the public API end to end: JSON-lines journal text in,
//! ledger state, counters and snapshots out.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use std::fmt::Write as _;

use chrono::{DateTime, Duration, TimeZone, Utc};
use edengineer_ledger::{Snapshot, State};
use edengineer_operations::EngineerRegistry;
use edengineer_replay::{ApplyOutcome, ReplayConfig, Replayer, read_entries};
use edengineer_types::{EntryChange, JournalEntry, JournalEvent, ResourceKind};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Build a journal session: each entry one minute after the previous.
fn session(changes: Vec<(JournalEvent, EntryChange)>) -> Vec<JournalEntry> {
    changes
        .into_iter()
        .zip(0_i64..)
        .map(|((event, change), minute)| {
            JournalEntry::new(start() + Duration::minutes(minute), event, change)
        })
        .collect()
}

fn cargo(commodity: &str, size: i32) -> EntryChange {
    EntryChange::Cargo {
        commodity: commodity.to_owned(),
        size,
    }
}

fn material(name: &str, size: i32) -> EntryChange {
    EntryChange::Material {
        material: name.to_owned(),
        size,
    }
}

fn data(name: &str, size: i32) -> EntryChange {
    EntryChange::Data {
        data: name.to_owned(),
        size,
    }
}

fn contribution(engineer: &str) -> EntryChange {
    EntryChange::EngineerContribution {
        engineer: engineer.to_owned(),
    }
}

fn to_jsonl(entries: &[JournalEntry]) -> String {
    entries.iter().fold(String::new(), |mut out, entry| {
        writeln!(out, "{}", serde_json::to_string(entry).unwrap()).unwrap();
        out
    })
}

#[test]
fn replays_a_trading_and_unlocking_session() {
    let entries = session(vec![
        (JournalEvent::MarketBuy, cargo("Modular Terminals", 30)),
        (JournalEvent::MaterialCollected, material("Sensor Fragment", 10)),
        (JournalEvent::DataScanned, data("Classified Scan Databanks", 80)),
        (JournalEvent::EngineerContribution, contribution("Marco Qwent")),
        (JournalEvent::EngineerContribution, contribution("Ram Tah")),
        (JournalEvent::EngineerContribution, contribution("Professor Palin")),
        (JournalEvent::MarketSell, cargo("Modular Terminals", -2)),
        (JournalEvent::EngineerContribution, contribution("Felicity Farseer")),
    ]);
    let text = to_jsonl(&entries);
    let parsed = read_entries(text.as_bytes()).unwrap();
    assert_eq!(parsed, entries);

    let mut replayer = Replayer::new(EngineerRegistry::standard());
    let stats = replayer.replay(&parsed).clone();
    let state = replayer.state();

    // 30 - 25 - 2.
    assert_eq!(state.quantity(ResourceKind::Commodity, "Modular Terminals"), 3);
    assert_eq!(state.quantity(ResourceKind::Data, "Classified Scan Databanks"), 30);
    // 10 - 25 clamps to zero.
    assert_eq!(state.quantity(ResourceKind::Material, "Sensor Fragment"), 0);

    assert_eq!(stats.applied, 8);
    assert_eq!(stats.count(JournalEvent::EngineerContribution), 4);
    assert_eq!(stats.no_effect_contributions, 1);
    assert!(stats.unregistered_engineers.is_empty());
    assert_eq!(stats.duplicates, 0);
}

#[test]
fn contribution_matches_the_equivalent_direct_change() {
    let via_engineer = session(vec![
        (JournalEvent::MarketBuy, cargo("Bromellite", 120)),
        (JournalEvent::EngineerContribution, contribution("Bill Turner")),
    ]);
    let direct = session(vec![
        (JournalEvent::MarketBuy, cargo("Bromellite", 120)),
        (JournalEvent::EjectCargo, cargo("Bromellite", -50)),
    ]);

    let mut a = Replayer::new(EngineerRegistry::standard());
    a.replay(&via_engineer);
    let mut b = Replayer::new(EngineerRegistry::standard());
    b.replay(&direct);

    assert_eq!(a.state(), b.state());
}

#[test]
fn replaying_the_same_file_twice_applies_it_once() {
    let entries = session(vec![
        (JournalEvent::MiningRefined, cargo("Painite", 1)),
        (JournalEvent::MiningRefined, cargo("Painite", 1)),
    ]);

    let mut replayer = Replayer::new(EngineerRegistry::standard());
    replayer.replay(&entries);
    replayer.replay(&entries);

    assert_eq!(replayer.state().quantity(ResourceKind::Commodity, "Painite"), 2);
    assert_eq!(replayer.stats().applied, 2);
    assert_eq!(replayer.stats().duplicates, 2);
}

#[test]
fn unknown_engineer_is_counted_and_leaves_state_alone() {
    let entries = session(vec![
        (JournalEvent::MaterialCollected, material("Iron", 5)),
        (JournalEvent::EngineerContribution, contribution("Somebody New")),
    ]);

    let mut replayer = Replayer::new(EngineerRegistry::standard());
    replayer.replay(&entries);

    let mut expected = State::new();
    expected.adjust_material(&"Iron".into(), 5);
    assert_eq!(replayer.state(), &expected);
    assert_eq!(
        replayer.stats().unregistered_engineers.get("Somebody New"),
        Some(&1)
    );
}

#[test]
fn snapshot_resume_continues_where_the_session_stopped() {
    let entries = session(vec![
        (JournalEvent::Synthesis, data("Decoded Emission Data", 70)),
        (JournalEvent::EngineerContribution, contribution("Tiana Fortune")),
        (JournalEvent::DataScanned, data("Decoded Emission Data", 5)),
    ]);
    let registry = EngineerRegistry::standard();

    let mut first = Replayer::new(registry);
    first.replay(&entries[..2]);
    let raw = first.into_snapshot().to_json().unwrap();

    let snapshot = Snapshot::from_json(&raw).unwrap();
    let mut resumed = Replayer::resume(snapshot, registry);
    resumed.replay(&entries);

    assert_eq!(
        resumed.state().quantity(ResourceKind::Data, "Decoded Emission Data"),
        25
    );
    assert_eq!(resumed.stats().duplicates, 2);
    assert_eq!(resumed.stats().applied, 1);
}

#[test]
fn configured_engineer_applies_its_effect() {
    let config = ReplayConfig::parse(
        r"
engineers:
  - name: Etienne Dorn
    effect: { kind: commodity, name: Occupied Escape Pod, size: -25 }
",
    )
    .unwrap();
    let registry = config.registry().unwrap();
    let entries = session(vec![
        (JournalEvent::MissionCompleted, cargo("Occupied Escape Pod", 40)),
        (JournalEvent::EngineerContribution, contribution("Etienne Dorn")),
    ]);

    let mut replayer = Replayer::new(&registry);
    let outcomes: Vec<_> = entries.iter().map(|e| replayer.apply(e)).collect();

    assert!(outcomes.iter().all(|o| *o == ApplyOutcome::Applied));
    assert_eq!(
        replayer
            .state()
            .quantity(ResourceKind::Commodity, "Occupied Escape Pod"),
        15
    );
}

#[test]
fn summary_is_plain_json() {
    let entries = session(vec![(JournalEvent::MarketBuy, cargo("Gold", 4))]);
    let mut replayer = Replayer::new(EngineerRegistry::standard());
    replayer.replay(&entries);

    let json = serde_json::to_value(replayer.summary()).unwrap();
    assert_eq!(json["state"]["cargo"]["Gold"], 4);
    assert_eq!(json["stats"]["applied"], 1);
    assert_eq!(json["stats"]["by_event"]["MarketBuy"], 1);
}
