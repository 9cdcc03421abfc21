use super::clock::{Clock, SystemClock};
use super::store::KeyValueStore;
use super::types::{VoteRecord, VoteState, VoteToggle};
use chrono::NaiveDate;

const KEY_PREFIX: &str = "vote:";

/// Daily upvote ledger
///
/// Holds at most one record per product. Reads never fail: a missing,
/// stale or unparseable record means "not voted". A failed write is logged
/// and the toggle result is still returned, so the caller's optimistic
/// counter stays consistent with what the user did.
///
/// Read-modify-write happens without locking; if two toggles race, the last
/// write wins.
pub struct VoteLedger<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> VoteLedger<S, SystemClock> {
    /// Ledger keyed by the local calendar day
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> VoteLedger<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// True only if the product was voted for today and not withdrawn since
    pub fn has_voted_today(&self, product_id: &str) -> bool {
        let today = self.clock.today();
        self.state_on(product_id, today).is_voted()
    }

    /// Flip today's vote for a product and return the new voted flag
    pub fn toggle_vote(&mut self, product_id: &str) -> bool {
        self.toggle(product_id).voted
    }

    /// Flip today's vote, returning the new flag with its counter delta
    pub fn toggle(&mut self, product_id: &str) -> VoteToggle {
        let today = self.clock.today();
        let current = self.state_on(product_id, today);
        let (next, record) = current.toggled(today);

        self.write(product_id, record);

        tracing::debug!(
            product_id,
            from = ?current,
            to = ?next,
            "vote toggled"
        );

        if next.is_voted() {
            VoteToggle::cast()
        } else {
            VoteToggle::withdrawn()
        }
    }

    /// Current state of a product's vote
    pub fn state(&self, product_id: &str) -> VoteState {
        self.state_on(product_id, self.clock.today())
    }

    /// The stored record, fresh or not
    pub fn record(&self, product_id: &str) -> Option<VoteRecord> {
        let raw = self.store.get(&record_key(product_id))?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(product_id, "Ignoring unreadable vote record: {}", e);
                None
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn state_on(&self, product_id: &str, today: NaiveDate) -> VoteState {
        VoteState::resolve(self.record(product_id), today)
    }

    fn write(&mut self, product_id: &str, record: VoteRecord) {
        let value = match serde_json::to_string(&record) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(product_id, "Failed to encode vote record: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(&record_key(product_id), value) {
            tracing::warn!(product_id, "Failed to persist vote: {}", e);
        }
    }
}

fn record_key(product_id: &str) -> String {
    format!("{KEY_PREFIX}{product_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::votes::clock::ManualClock;
    use crate::votes::store::MemoryStore;
    use crate::{MakerboardError, Result};
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    /// Store whose writes always fail
    #[derive(Default)]
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<()> {
            Err(MakerboardError::Store("read-only".to_string()))
        }
    }

    #[test]
    fn test_never_toggled_is_not_voted() {
        let ledger = VoteLedger::with_clock(MemoryStore::new(), ManualClock::new(day(1)));
        assert!(!ledger.has_voted_today("p1"));
        assert_eq!(ledger.state("p1"), VoteState::Unvoted);
        assert_eq!(ledger.record("p1"), None);
    }

    #[test]
    fn test_toggle_cycle() {
        let mut ledger = VoteLedger::with_clock(MemoryStore::new(), ManualClock::new(day(1)));

        assert!(ledger.toggle_vote("p1"));
        assert!(ledger.has_voted_today("p1"));
        assert!(!ledger.toggle_vote("p1"));
        assert!(!ledger.has_voted_today("p1"));
        assert!(ledger.toggle_vote("p1"));

        // One record per product, overwritten in place
        assert_eq!(ledger.store().len(), 1);
    }

    #[test]
    fn test_reads_are_idempotent() {
        let mut ledger = VoteLedger::with_clock(MemoryStore::new(), ManualClock::new(day(1)));
        ledger.toggle_vote("p1");

        for _ in 0..5 {
            assert!(ledger.has_voted_today("p1"));
        }
        assert!(!ledger.has_voted_today("p2"));
    }

    #[test]
    fn test_deltas_net_to_zero() {
        let mut ledger = VoteLedger::with_clock(MemoryStore::new(), ManualClock::new(day(1)));

        let first = ledger.toggle("p1");
        let second = ledger.toggle("p1");

        assert_eq!(first, VoteToggle::cast());
        assert_eq!(second, VoteToggle::withdrawn());
        assert_eq!(first.delta + second.delta, 0);
    }

    #[test]
    fn test_day_rollover_expires_vote() {
        let clock = ManualClock::new(day(1));
        let mut ledger = VoteLedger::with_clock(MemoryStore::new(), &clock);

        assert!(ledger.toggle_vote("p1"));
        clock.advance_day();

        assert!(!ledger.has_voted_today("p1"));
        // Stale record is ignored, not deleted
        assert_eq!(ledger.record("p1"), Some(VoteRecord::new(true, day(1))));

        // Next toggle starts a fresh record for the new day
        assert!(ledger.toggle_vote("p1"));
        assert_eq!(ledger.record("p1"), Some(VoteRecord::new(true, day(2))));
    }

    #[test]
    fn test_corrupt_record_reads_as_not_voted() {
        let mut store = MemoryStore::new();
        store
            .set("vote:p1", "not a record".to_string())
            .unwrap();
        let mut ledger = VoteLedger::with_clock(store, ManualClock::new(day(1)));

        assert!(!ledger.has_voted_today("p1"));
        assert!(ledger.toggle_vote("p1"));
    }

    #[test]
    fn test_failed_write_still_reports_toggle() {
        let mut ledger = VoteLedger::with_clock(ReadOnlyStore, ManualClock::new(day(1)));
        assert_eq!(ledger.toggle("p1"), VoteToggle::cast());
        assert!(!ledger.has_voted_today("p1"));
    }
}
