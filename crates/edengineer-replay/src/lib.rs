//! Replay driver for the EDEngineer journal ledger.
//!
//! Reads typed journal records, turns each into a
//! [`JournalOperation`](edengineer_operations::JournalOperation) and applies
//! it to a single [`State`](edengineer_ledger::State) in arrival order.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration and environment overrides
//! - [`driver`] -- the sequential [`Replayer`]
//! - [`error`] -- [`ReplayError`]
//! - [`source`] -- parsing journal records from JSON lines
//! - [`stats`] -- per-session counters
//! - [`store`] -- snapshot files

pub mod config;
pub mod driver;
pub mod error;
pub mod source;
pub mod stats;
pub mod store;

pub use config::{ConfigError, ReplayConfig};
pub use driver::{ApplyOutcome, ReplaySummary, Replayer};
pub use error::ReplayError;
pub use source::{read_entries, read_journal};
pub use stats::ReplayStats;
pub use store::{load_snapshot, save_snapshot};
