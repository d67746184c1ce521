//! Error types for the replay driver.
//!
//! [`ReplayError`] is the top-level error returned by the driver's fallible
//! entry points and by the binary's `main`. Operation application itself
//! never fails; everything here is about getting records in and snapshots
//! out.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Top-level error for a replay session.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Reading the journal file failed.
    #[error("failed to read journal: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A journal line was not a valid typed record.
    #[error("malformed journal record on line {line}: {source}")]
    MalformedRecord {
        /// One-based line number in the journal file.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// No journal path was given on the command line or in the config.
    #[error("no journal file given; pass a path or set replay.journal_path")]
    MissingJournal,

    /// The journal path does not exist.
    #[error("journal file not found: {}", path.display())]
    JournalNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Snapshot I/O failed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: edengineer_ledger::LedgerError,
    },

    /// The configured engineer registry was invalid.
    #[error("registry error: {source}")]
    Registry {
        /// The underlying operation error.
        #[from]
        source: edengineer_operations::OperationError,
    },

    /// Writing the ledger summary failed.
    #[error("failed to write summary: {source}")]
    Output {
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
