//! Daily vote ledger over the on-disk store

use chrono::NaiveDate;
use makerboard::catalog::{query_catalog, CatalogSource, FilterState, Product, StaticCatalog};
use makerboard::votes::{JsonFileStore, ManualClock, VoteLedger, VoteRecord, VoteToggle};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_toggle_cycle_returns_to_start() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::in_dir(temp_dir.path()).unwrap();
    let mut ledger = VoteLedger::with_clock(store, ManualClock::new(day(2024, 5, 1)));

    let mut votes = 10u64;
    for expected in [true, false, true, false] {
        let toggle = ledger.toggle("p1");
        assert_eq!(toggle.voted, expected);
        votes = toggle.apply_to(votes);
    }

    assert_eq!(votes, 10);
    assert!(!ledger.has_voted_today("p1"));
}

#[test]
fn test_votes_survive_reopening_the_store() {
    let temp_dir = TempDir::new().unwrap();
    let clock = ManualClock::new(day(2024, 5, 1));

    {
        let store = JsonFileStore::in_dir(temp_dir.path()).unwrap();
        let mut ledger = VoteLedger::with_clock(store, &clock);
        assert!(ledger.toggle_vote("lumen"));
    }

    let store = JsonFileStore::in_dir(temp_dir.path()).unwrap();
    let mut ledger = VoteLedger::with_clock(store, &clock);
    assert!(ledger.has_voted_today("lumen"));
    assert!(!ledger.has_voted_today("tally"));

    // A second toggle withdraws rather than double counting
    assert!(!ledger.toggle_vote("lumen"));
}

#[test]
fn test_midnight_rollover_resets_without_explicit_call() {
    let temp_dir = TempDir::new().unwrap();
    let clock = ManualClock::new(day(2024, 12, 31));
    let store = JsonFileStore::in_dir(temp_dir.path()).unwrap();
    let mut ledger = VoteLedger::with_clock(store, &clock);

    assert!(ledger.toggle_vote("p1"));
    assert!(ledger.has_voted_today("p1"));

    clock.advance_day();
    assert_eq!(clock_today(&clock), day(2025, 1, 1));
    assert!(!ledger.has_voted_today("p1"));
    assert_eq!(
        ledger.record("p1"),
        Some(VoteRecord::new(true, day(2024, 12, 31)))
    );

    assert!(ledger.toggle_vote("p1"));
    assert_eq!(
        ledger.record("p1"),
        Some(VoteRecord::new(true, day(2025, 1, 1)))
    );
}

#[test]
fn test_withdrawn_vote_on_previous_day_starts_unvoted() {
    let clock = ManualClock::new(day(2024, 2, 28));
    let temp_dir = TempDir::new().unwrap();
    let mut ledger =
        VoteLedger::with_clock(JsonFileStore::in_dir(temp_dir.path()).unwrap(), &clock);

    ledger.toggle_vote("p1");
    ledger.toggle_vote("p1");
    clock.advance_day();

    assert_eq!(ledger.toggle("p1"), VoteToggle::cast());
}

#[test]
fn test_displayed_counter_follows_toggles() {
    let catalog = StaticCatalog::bundled().unwrap();
    let products = catalog.fetch_products().into_data_or_default();
    let page = query_catalog(&products, &FilterState::new());
    let mut card: Product = page.items[0].clone();
    let start = card.votes;

    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::in_dir(temp_dir.path()).unwrap();
    let mut ledger = VoteLedger::with_clock(store, ManualClock::new(day(2024, 7, 4)));

    card.apply_vote(ledger.toggle(&card.id));
    assert_eq!(card.votes, start + 1);

    card.apply_vote(ledger.toggle(&card.id));
    assert_eq!(card.votes, start);

    // The catalog itself is untouched
    assert_eq!(page.items[0].votes, start);
}

fn clock_today(clock: &ManualClock) -> NaiveDate {
    use makerboard::votes::Clock;
    clock.today()
}
