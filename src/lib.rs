//! makerboard: a product and maker directory.
//!
//! The library holds the two stateful pieces of the directory: the catalog
//! query engine (`catalog`) and the daily vote ledger (`votes`). The `cli`
//! module is the presentation layer used by the `makerboard` binary.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod votes;

pub use error::{MakerboardError, Result};
