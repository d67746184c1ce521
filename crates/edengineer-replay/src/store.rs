//! Snapshot files on disk.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use edengineer_ledger::Snapshot;

use crate::error::ReplayError;

/// Read the snapshot at `path`, or `None` if there is no file yet.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] if the file exists but cannot be opened, or
/// [`ReplayError::Ledger`] if its content is not a supported snapshot.
pub fn load_snapshot(path: &Path) -> Result<Option<Snapshot>, ReplayError> {
    if !path.exists() {
        info!(path = %path.display(), "No snapshot found, starting from an empty ledger");
        return Ok(None);
    }
    let snapshot = Snapshot::read_from(BufReader::new(File::open(path)?))?;
    info!(
        path = %path.display(),
        taken_at = %snapshot.taken_at,
        "Snapshot loaded"
    );
    Ok(Some(snapshot))
}

/// Write `snapshot` to `path`, replacing any previous file.
///
/// The snapshot is written and synced to a sibling `.tmp` file first, then
/// renamed over `path`. A failed save leaves the previous snapshot intact.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] if the temporary file cannot be created,
/// synced or renamed, or [`ReplayError::Ledger`] if writing fails.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), ReplayError> {
    let staging = staging_path(path);
    let result = write_synced(&staging, snapshot)
        .and_then(|()| fs::rename(&staging, path).map_err(ReplayError::from));
    if let Err(error) = result {
        if let Err(cleanup) = fs::remove_file(&staging) {
            debug!(path = %staging.display(), error = %cleanup, "Staged snapshot not removed");
        }
        warn!(path = %path.display(), error = %error, "Snapshot save failed, previous snapshot kept");
        return Err(error);
    }
    info!(path = %path.display(), "Snapshot saved");
    Ok(())
}

fn write_synced(staging: &Path, snapshot: &Snapshot) -> Result<(), ReplayError> {
    let file = File::create(staging)?;
    snapshot.write_to(BufWriter::new(&file))?;
    file.sync_all()?;
    Ok(())
}

/// `path` with `.tmp` appended to its file name.
fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    PathBuf::from(staging)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use edengineer_ledger::State;
    use edengineer_types::{EntryId, ResourceKind, ResourceName};

    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("edengineer-store-{}-{name}", std::process::id()))
    }

    #[test]
    fn missing_snapshot_is_none() {
        let result = load_snapshot(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn saved_snapshot_loads_back() {
        let path = scratch_path("roundtrip.json");
        let mut state = State::new();
        state.adjust_material(&ResourceName::new("Iron"), 12);
        let applied = BTreeSet::from([EntryId::new()]);
        let snapshot = Snapshot::new(state, applied, None);

        assert!(save_snapshot(&path, &snapshot).is_ok());
        let loaded = load_snapshot(&path).ok().flatten();
        let _ = std::fs::remove_file(&path);

        assert_eq!(
            loaded.as_ref().map(|s| s.state.quantity(ResourceKind::Material, "Iron")),
            Some(12)
        );
        assert_eq!(loaded.map(|s| s.applied), Some(snapshot.applied));
    }

    #[test]
    fn failed_save_keeps_previous_snapshot() {
        let path = scratch_path("kept.json");
        let mut state = State::new();
        state.adjust_cargo(&ResourceName::new("Gold"), 5);
        let first = Snapshot::new(state, BTreeSet::from([EntryId::new()]), None);
        assert!(save_snapshot(&path, &first).is_ok());

        // A directory at the staging path makes the next save fail.
        let staging = staging_path(&path);
        assert!(fs::create_dir(&staging).is_ok());
        let second = Snapshot::new(State::new(), BTreeSet::new(), None);
        let failed = save_snapshot(&path, &second);

        let loaded = load_snapshot(&path).ok().flatten();
        let _ = fs::remove_dir(&staging);
        let _ = fs::remove_file(&path);

        assert!(failed.is_err());
        assert_eq!(loaded.map(|s| s.applied), Some(first.applied));
    }

    #[test]
    fn staging_path_appends_suffix() {
        assert_eq!(
            staging_path(Path::new("/var/lib/ledger.json")),
            PathBuf::from("/var/lib/ledger.json.tmp")
        );
    }
}
