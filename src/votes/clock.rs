use chrono::{Local, NaiveDate};
use std::cell::Cell;

/// Source of "today" for the vote ledger
///
/// The ledger asks once per operation. The day is whatever calendar day the
/// clock reports; no timezone normalisation happens beyond that.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The caller's local calendar day
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    day: Cell<NaiveDate>,
}

impl ManualClock {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day: Cell::new(day),
        }
    }

    pub fn set(&self, day: NaiveDate) {
        self.day.set(day);
    }

    /// Move to the next calendar day
    pub fn advance_day(&self) {
        if let Some(next) = self.day.get().succ_opt() {
            self.day.set(next);
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.day.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
