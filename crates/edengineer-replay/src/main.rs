//! Command-line replay of a journal file into the inventory ledger.
//!
//! ```text
//! edengineer-replay [JOURNAL]
//! ```
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `edengineer-config.yaml` (or `EDENGINEER_CONFIG`)
//! 2. Initialize structured logging on stderr
//! 3. Build the engineer registry
//! 4. Resume from the snapshot file, if configured and present
//! 5. Replay the journal
//! 6. Save the snapshot and print the ledger summary as JSON on stdout

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;

use edengineer_replay::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE, LoggingConfig};
use edengineer_replay::{
    ReplayConfig, ReplayError, Replayer, load_snapshot, read_journal, save_snapshot,
};

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, journal input, or snapshot output
/// fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("edengineer-replay starting");
    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }

    // 3. Build the registry.
    let registry = config.registry().map_err(ReplayError::from)?;
    info!(engineers = registry.len(), "Engineer registry ready");

    // 4. Resume from snapshot.
    let journal_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.replay.journal_path.clone())
        .ok_or(ReplayError::MissingJournal)?;
    let snapshot_path = config.replay.snapshot_path.as_deref();
    let mut replayer = match snapshot_path.map(load_snapshot).transpose()?.flatten() {
        Some(snapshot) => Replayer::resume(snapshot, &registry),
        None => Replayer::new(&registry),
    };

    // 5. Replay.
    let entries = read_journal(&journal_path)?;
    let stats = replayer.replay(&entries);
    info!(
        applied = stats.applied,
        duplicates = stats.duplicates,
        out_of_order = stats.out_of_order,
        unregistered = stats.unregistered_engineers.len(),
        "Replay complete"
    );

    // 6. Persist and report.
    if let Some(path) = snapshot_path {
        save_snapshot(path, &replayer.snapshot())?;
    }
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &replayer.summary())
        .map_err(|source| ReplayError::Output { source })?;
    writeln!(stdout)?;

    Ok(())
}

/// Load configuration from the file named by `EDENGINEER_CONFIG`, else from
/// `edengineer-config.yaml` if it exists, else defaults.
fn load_config() -> Result<(ReplayConfig, Option<PathBuf>), ReplayError> {
    let config_path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
    if Path::new(&config_path).exists() {
        let config = ReplayConfig::from_file(&config_path)?;
        Ok((config, Some(config_path)))
    } else {
        let mut config = ReplayConfig::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok((config, None))
    }
}

/// Install the global `tracing` subscriber. `RUST_LOG` wins over the
/// configured filter.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
