//! Reading typed journal records.
//!
//! The input is the workspace's own serde form of [`JournalEntry`], one
//! JSON object per line. Blank lines are skipped. The game's native journal
//! format is converted to this form upstream.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use edengineer_types::JournalEntry;

use crate::error::ReplayError;

/// Parse every record from `reader`, in file order.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] if reading fails, or
/// [`ReplayError::MalformedRecord`] with the one-based line number of the
/// first line that is not a valid record.
pub fn read_entries<R: BufRead>(reader: R) -> Result<Vec<JournalEntry>, ReplayError> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str(&line).map_err(|source| ReplayError::MalformedRecord {
            line: index.saturating_add(1),
            source,
        })?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Open and parse a journal file.
///
/// # Errors
///
/// Returns [`ReplayError::JournalNotFound`] if the path does not exist,
/// otherwise the errors of [`read_entries`].
pub fn read_journal(path: &Path) -> Result<Vec<JournalEntry>, ReplayError> {
    if !path.exists() {
        return Err(ReplayError::JournalNotFound {
            path: path.to_path_buf(),
        });
    }
    let entries = read_entries(BufReader::new(File::open(path)?))?;
    tracing::info!(path = %path.display(), entries = entries.len(), "Journal loaded");
    Ok(entries)
}
