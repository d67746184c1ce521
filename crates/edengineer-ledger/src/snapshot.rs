//! Serializable checkpoints of a replay session.
//!
//! A [`Snapshot`] carries the ledger together with the identifiers of every
//! journal entry already applied to it. Resuming from a snapshot therefore
//! keeps the at-most-once guarantee across process restarts.

use std::collections::BTreeSet;
use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use edengineer_types::EntryId;

use crate::LedgerError;
use crate::state::State;

/// Snapshot format version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A point-in-time copy of the ledger and its replay bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version, checked on load.
    pub version: u32,
    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,
    /// Timestamp of the newest entry applied before the snapshot.
    #[serde(default)]
    pub last_timestamp: Option<DateTime<Utc>>,
    /// Identifiers of every entry applied to `state`.
    ///
    /// Never pruned: the set grows by one id per applied entry for the life
    /// of the ledger, and so does the snapshot file. An id dropped from here
    /// would be applied again if its entry were replayed.
    #[serde(default)]
    pub applied: BTreeSet<EntryId>,
    /// The ledger itself.
    pub state: State,
}

impl Snapshot {
    /// Capture a snapshot of `state` now.
    pub fn new(
        state: State,
        applied: BTreeSet<EntryId>,
        last_timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            taken_at: Utc::now(),
            last_timestamp,
            applied,
            state,
        }
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot from JSON, rejecting unknown format versions.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Serialization`] on malformed JSON, or
    /// [`LedgerError::UnsupportedVersion`] if the version is not
    /// [`SNAPSHOT_VERSION`].
    pub fn from_json(raw: &str) -> Result<Self, LedgerError> {
        let snapshot: Self = serde_json::from_str(raw)?;
        snapshot.check_version()
    }

    /// Write the snapshot as JSON to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if encoding or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), LedgerError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        tracing::debug!(
            entries = self.state.len(),
            applied = self.applied.len(),
            "Wrote ledger snapshot"
        );
        Ok(())
    }

    /// Read a snapshot from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if reading or decoding fails, or the version
    /// is unsupported.
    pub fn read_from<R: Read>(reader: R) -> Result<Self, LedgerError> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        let snapshot = snapshot.check_version()?;
        tracing::debug!(
            entries = snapshot.state.len(),
            applied = snapshot.applied.len(),
            taken_at = %snapshot.taken_at,
            "Read ledger snapshot"
        );
        Ok(snapshot)
    }

    fn check_version(self) -> Result<Self, LedgerError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(self)
        } else {
            Err(LedgerError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            })
        }
    }
}
