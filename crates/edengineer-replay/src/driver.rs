//! The replay driver.
//!
//! [`Replayer`] owns the ledger for a session and applies journal entries
//! to it strictly one at a time, in arrival order. It is the single writer:
//! every mutation goes through [`Replayer::apply`], which builds the entry's
//! operation and lends the ledger to it by `&mut`.
//!
//! Each entry id is applied at most once. Entries replayed a second time
//! (a re-read journal file, an overlapping live tail) are counted and
//! skipped. The set of applied ids is kept for the whole session and carried
//! into every snapshot, so its memory and on-disk size grow with the number
//! of entries ever applied.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use edengineer_ledger::{Snapshot, State};
use edengineer_operations::{EngineerRegistry, JournalOperation, Resolution};
use edengineer_types::{EntryId, JournalEntry};

use crate::stats::ReplayStats;

/// What happened to one entry passed to [`Replayer::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The entry's operation was applied to the ledger.
    Applied,
    /// The entry had already been applied; the ledger is unchanged.
    Duplicate,
}

/// Serializable view of the ledger and the session counters.
#[derive(Debug, Serialize)]
pub struct ReplaySummary<'a> {
    /// The ledger.
    pub state: &'a State,
    /// Session counters.
    pub stats: &'a ReplayStats,
}

/// Sequential, single-writer replay of journal entries.
#[derive(Debug)]
pub struct Replayer<'r> {
    registry: &'r EngineerRegistry,
    state: State,
    applied: BTreeSet<EntryId>,
    last_timestamp: Option<DateTime<Utc>>,
    stats: ReplayStats,
}

impl<'r> Replayer<'r> {
    /// Start a session on an empty ledger.
    pub fn new(registry: &'r EngineerRegistry) -> Self {
        Self {
            registry,
            state: State::new(),
            applied: BTreeSet::new(),
            last_timestamp: None,
            stats: ReplayStats::default(),
        }
    }

    /// Continue a session from a snapshot. Entries recorded in the
    /// snapshot will be treated as duplicates.
    pub fn resume(snapshot: Snapshot, registry: &'r EngineerRegistry) -> Self {
        debug!(
            entries = snapshot.state.len(),
            applied = snapshot.applied.len(),
            "Resuming replay from snapshot"
        );
        Self {
            registry,
            state: snapshot.state,
            applied: snapshot.applied,
            last_timestamp: snapshot.last_timestamp,
            stats: ReplayStats::default(),
        }
    }

    /// Apply one entry.
    ///
    /// Entries are applied in the order this method is called. An entry
    /// older than the newest one seen so far is still applied, but counted
    /// as out of order.
    pub fn apply(&mut self, entry: &JournalEntry) -> ApplyOutcome {
        if !self.applied.insert(entry.id) {
            debug!(id = %entry.id, event = %entry.event, "Skipping duplicate journal entry");
            self.stats.record_duplicate();
            return ApplyOutcome::Duplicate;
        }

        match self.last_timestamp {
            Some(last) if entry.timestamp < last => {
                warn!(
                    id = %entry.id,
                    timestamp = %entry.timestamp,
                    newest = %last,
                    "Journal entry arrived out of order"
                );
                self.stats.record_out_of_order();
            }
            _ => self.last_timestamp = Some(entry.timestamp),
        }

        let operation = JournalOperation::from_entry(entry, self.registry);
        if let JournalOperation::EngineerContribution(contribution) = &operation {
            match contribution.resolution() {
                Resolution::Registered => {}
                Resolution::NoEffect => self.stats.record_no_effect(),
                Resolution::Unregistered => {
                    self.stats.record_unregistered(contribution.engineer());
                }
            }
        }

        operation.mutate(&mut self.state);
        self.stats.record_applied(entry.event);
        ApplyOutcome::Applied
    }

    /// Apply every entry in order and return the session counters.
    pub fn replay<'e>(&mut self, entries: impl IntoIterator<Item = &'e JournalEntry>) -> &ReplayStats {
        for entry in entries {
            self.apply(entry);
        }
        debug!(
            applied = self.stats.applied,
            duplicates = self.stats.duplicates,
            out_of_order = self.stats.out_of_order,
            "Replay pass finished"
        );
        &self.stats
    }

    /// The ledger as of the last applied entry.
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Counters for this session.
    pub const fn stats(&self) -> &ReplayStats {
        &self.stats
    }

    /// Whether `id` has already been applied.
    pub fn has_applied(&self, id: EntryId) -> bool {
        self.applied.contains(&id)
    }

    /// Ledger and counters, ready to serialize.
    pub const fn summary(&self) -> ReplaySummary<'_> {
        ReplaySummary {
            state: &self.state,
            stats: &self.stats,
        }
    }

    /// Capture a snapshot without ending the session.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.state.clone(), self.applied.clone(), self.last_timestamp)
    }

    /// End the session, keeping everything needed to resume it.
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot::new(self.state, self.applied, self.last_timestamp)
    }

    /// End the session and take the ledger.
    pub fn into_state(self) -> State {
        self.state
    }
}
