use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored vote for one product, valid only on the day it was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub voted: bool,
    pub day: NaiveDate,
}

impl VoteRecord {
    pub fn new(voted: bool, day: NaiveDate) -> Self {
        Self { voted, day }
    }

    /// A record only counts on the calendar day it was written
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.day == today
    }

    /// Resolve the stored record against the current day
    pub fn state_on(&self, today: NaiveDate) -> VoteState {
        if self.voted && self.is_fresh(today) {
            VoteState::VotedToday(self.day)
        } else {
            VoteState::Unvoted
        }
    }
}

/// Per-product vote state
///
/// `Unvoted --toggle--> VotedToday(day) --toggle--> Unvoted`. A
/// `VotedToday` for an earlier day is never observed: reads fall back to
/// `Unvoted` once the day has rolled over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    Unvoted,
    VotedToday(NaiveDate),
}

impl VoteState {
    /// Resolve an optional stored record; no record means not voted
    pub fn resolve(record: Option<VoteRecord>, today: NaiveDate) -> Self {
        record
            .map(|r| r.state_on(today))
            .unwrap_or(VoteState::Unvoted)
    }

    pub fn is_voted(&self) -> bool {
        matches!(self, VoteState::VotedToday(_))
    }

    /// The state after one toggle, and the record that stores it
    pub fn toggled(self, today: NaiveDate) -> (VoteState, VoteRecord) {
        match self {
            VoteState::Unvoted => (VoteState::VotedToday(today), VoteRecord::new(true, today)),
            VoteState::VotedToday(_) => (VoteState::Unvoted, VoteRecord::new(false, today)),
        }
    }
}

/// Result of a toggle: the new voted flag and the counter change to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteToggle {
    pub voted: bool,
    /// `+1` when a vote was cast, `-1` when it was withdrawn
    pub delta: i64,
}

impl VoteToggle {
    pub fn cast() -> Self {
        Self {
            voted: true,
            delta: 1,
        }
    }

    pub fn withdrawn() -> Self {
        Self {
            voted: false,
            delta: -1,
        }
    }

    /// Apply the delta to a displayed counter, never going below zero
    pub fn apply_to(&self, votes: u64) -> u64 {
        if self.delta >= 0 {
            votes.saturating_add(self.delta.unsigned_abs())
        } else {
            votes.saturating_sub(self.delta.unsigned_abs())
        }
    }
}
