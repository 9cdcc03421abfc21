//! Daily vote ledger
//!
//! One upvote per product per calendar day, stored on the local device.
//! Nothing here is shared across devices.

pub mod clock;
pub mod ledger;
pub mod store;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::VoteLedger;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use types::{VoteRecord, VoteState, VoteToggle};
