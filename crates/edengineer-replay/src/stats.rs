//! Bookkeeping collected while replaying.

use std::collections::BTreeMap;

use serde::Serialize;

use edengineer_types::JournalEvent;

/// Counters for one replay session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    /// Entries whose operation was applied.
    pub applied: u64,
    /// Entries skipped because their id had already been applied.
    pub duplicates: u64,
    /// Applied entries whose timestamp was older than the newest seen.
    pub out_of_order: u64,
    /// Applied entries per journal classification.
    pub by_event: BTreeMap<JournalEvent, u64>,
    /// Contributions to known engineers with no inventory effect.
    pub no_effect_contributions: u64,
    /// Contributions to engineers missing from the registry, by name.
    pub unregistered_engineers: BTreeMap<String, u64>,
}

impl ReplayStats {
    pub(crate) fn record_applied(&mut self, event: JournalEvent) {
        self.applied = self.applied.saturating_add(1);
        bump(self.by_event.entry(event).or_insert(0));
    }

    pub(crate) const fn record_duplicate(&mut self) {
        self.duplicates = self.duplicates.saturating_add(1);
    }

    pub(crate) const fn record_out_of_order(&mut self) {
        self.out_of_order = self.out_of_order.saturating_add(1);
    }

    pub(crate) const fn record_no_effect(&mut self) {
        self.no_effect_contributions = self.no_effect_contributions.saturating_add(1);
    }

    pub(crate) fn record_unregistered(&mut self, engineer: &str) {
        if let Some(count) = self.unregistered_engineers.get_mut(engineer) {
            bump(count);
        } else {
            self.unregistered_engineers.insert(engineer.to_owned(), 1);
        }
    }

    /// Applied entries with the given classification.
    pub fn count(&self, event: JournalEvent) -> u64 {
        self.by_event.get(&event).copied().unwrap_or(0)
    }
}

const fn bump(count: &mut u64) {
    *count = count.saturating_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_per_event() {
        let mut stats = ReplayStats::default();
        stats.record_applied(JournalEvent::MarketBuy);
        stats.record_applied(JournalEvent::MarketBuy);
        stats.record_applied(JournalEvent::Synthesis);

        assert_eq!(stats.applied, 3);
        assert_eq!(stats.count(JournalEvent::MarketBuy), 2);
        assert_eq!(stats.count(JournalEvent::MarketSell), 0);
    }

    #[test]
    fn unregistered_engineers_are_counted_by_name() {
        let mut stats = ReplayStats::default();
        stats.record_unregistered("Nobody");
        stats.record_unregistered("Nobody");
        stats.record_unregistered("Someone");

        assert_eq!(stats.unregistered_engineers.get("Nobody").copied(), Some(2));
        assert_eq!(stats.unregistered_engineers.len(), 2);
    }
}
