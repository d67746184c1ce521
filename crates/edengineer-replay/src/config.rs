//! Configuration loading for the replay tool.
//!
//! The configuration lives in `edengineer-config.yaml` in the working
//! directory (or the path in `EDENGINEER_CONFIG`). Every section is
//! optional; a missing file means defaults throughout.
//!
//! ```yaml
//! logging:
//!   filter: debug
//!   json: false
//! replay:
//!   journal_path: journal.jsonl
//!   snapshot_path: ledger-snapshot.json
//! engineers:
//!   - name: Etienne Dorn
//!     effect: { kind: commodity, name: Occupied Escape Pod, size: -25 }
//!   - name: Marsha Hicks
//! ```
//!
//! `engineers` entries extend the built-in registry. Naming a built-in
//! engineer is an error. An entry without `effect` registers a contribution
//! with no inventory effect.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use edengineer_operations::{EngineerRegistry, OperationError};
use edengineer_types::ResourceKind;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "edengineer-config.yaml";

/// Environment variable that overrides the config file path.
pub const CONFIG_PATH_ENV: &str = "EDENGINEER_CONFIG";

/// Environment variable that overrides `replay.journal_path`.
pub const JOURNAL_PATH_ENV: &str = "EDENGINEER_JOURNAL";

/// Environment variable that overrides `replay.snapshot_path`.
pub const SNAPSHOT_PATH_ENV: &str = "EDENGINEER_SNAPSHOT";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level replay configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplayConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Input and output paths.
    #[serde(default)]
    pub replay: ReplaySettings,

    /// Extra or replacement engineer registry entries.
    #[serde(default)]
    pub engineers: Vec<EngineerConfig>,
}

impl ReplayConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides for the replay paths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override replay paths from a key lookup (normally the process
    /// environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(journal) = lookup(JOURNAL_PATH_ENV) {
            self.replay.journal_path = Some(PathBuf::from(journal));
        }
        if let Some(snapshot) = lookup(SNAPSHOT_PATH_ENV) {
            self.replay.snapshot_path = Some(PathBuf::from(snapshot));
        }
    }

    /// Build the engineer registry: the built-in table extended with the
    /// configured engineers.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError`] if a configured entry is invalid or names
    /// a built-in engineer.
    pub fn registry(&self) -> Result<EngineerRegistry, OperationError> {
        if self.engineers.is_empty() {
            return Ok(EngineerRegistry::standard().clone());
        }

        let extra = self
            .engineers
            .iter()
            .fold(EngineerRegistry::builder(), |builder, engineer| {
                match &engineer.effect {
                    None => builder.no_effect(engineer.name.as_str()),
                    Some(effect) => match effect.kind {
                        ResourceKind::Commodity => {
                            builder.cargo(engineer.name.as_str(), &effect.name, effect.size)
                        }
                        ResourceKind::Material => {
                            builder.material(engineer.name.as_str(), &effect.name, effect.size)
                        }
                        ResourceKind::Data => {
                            builder.data(engineer.name.as_str(), &effect.name, effect.size)
                        }
                    },
                }
            })
            .build()?;

        EngineerRegistry::standard_with(extra)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON log lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Replay input and output paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplaySettings {
    /// Journal file of typed records, one JSON object per line.
    #[serde(default)]
    pub journal_path: Option<PathBuf>,

    /// Where the ledger snapshot is read from and written to.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

/// One configured engineer registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineerConfig {
    /// The engineer's name as written in the journal.
    pub name: String,

    /// What a contribution consumes. Absent means no inventory effect.
    #[serde(default)]
    pub effect: Option<EffectConfig>,
}

/// The resource a configured contribution consumes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EffectConfig {
    /// Ledger partition of the resource.
    pub kind: ResourceKind,
    /// Resource display name.
    pub name: String,
    /// Signed size; must be negative.
    pub size: i32,
}

fn default_log_filter() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use edengineer_operations::Resolution;

    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = ReplayConfig::parse("{}").ok();
        assert_eq!(config, Some(ReplayConfig::default()));
        assert_eq!(ReplayConfig::default().logging.filter, "info");
    }

    #[test]
    fn parses_all_sections() {
        let yaml = r"
logging:
  filter: debug
  json: true
replay:
  journal_path: journal.jsonl
  snapshot_path: snapshot.json
engineers:
  - name: Etienne Dorn
    effect: { kind: commodity, name: Occupied Escape Pod, size: -25 }
  - name: Marsha Hicks
";
        let config = ReplayConfig::parse(yaml).ok().unwrap_or_default();
        assert_eq!(config.logging.filter, "debug");
        assert!(config.logging.json);
        assert_eq!(
            config.replay.journal_path.as_deref(),
            Some(Path::new("journal.jsonl"))
        );
        assert_eq!(config.engineers.len(), 2);
        assert_eq!(
            config.engineers.first().and_then(|e| e.effect.clone()),
            Some(EffectConfig {
                kind: ResourceKind::Commodity,
                name: String::from("Occupied Escape Pod"),
                size: -25,
            })
        );
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = ReplayConfig::parse("logging: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn overrides_replace_paths() {
        let mut config = ReplayConfig::default();
        config.apply_overrides(|key| match key {
            JOURNAL_PATH_ENV => Some(String::from("/tmp/journal.jsonl")),
            _ => None,
        });
        assert_eq!(
            config.replay.journal_path,
            Some(PathBuf::from("/tmp/journal.jsonl"))
        );
        assert_eq!(config.replay.snapshot_path, None);
    }

    #[test]
    fn registry_without_engineers_is_standard() {
        let registry = ReplayConfig::default().registry().ok();
        assert_eq!(registry.as_ref(), Some(EngineerRegistry::standard()));
    }

    #[test]
    fn registry_layers_configured_engineers() {
        let yaml = r"
engineers:
  - name: Etienne Dorn
    effect: { kind: commodity, name: Occupied Escape Pod, size: -25 }
  - name: Marsha Hicks
";
        let config = ReplayConfig::parse(yaml).ok().unwrap_or_default();
        let registry = config.registry().ok().unwrap_or_default();

        assert_eq!(registry.resolve("Etienne Dorn"), Resolution::Registered);
        assert_eq!(registry.resolve("Marsha Hicks"), Resolution::NoEffect);
        assert_eq!(registry.resolve("Marco Qwent"), Resolution::Registered);
    }

    #[test]
    fn registry_rejects_built_in_engineer() {
        let yaml = r"
engineers:
  - name: Marco Qwent
";
        let config = ReplayConfig::parse(yaml).ok().unwrap_or_default();
        assert!(matches!(
            config.registry(),
            Err(OperationError::ReplacesStandard { engineer }) if engineer == "Marco Qwent"
        ));
    }

    #[test]
    fn registry_rejects_positive_effect() {
        let yaml = r"
engineers:
  - name: Generous
    effect: { kind: material, name: Iron, size: 5 }
";
        let config = ReplayConfig::parse(yaml).ok().unwrap_or_default();
        assert!(matches!(
            config.registry(),
            Err(OperationError::NonConsuming { size: 5, .. })
        ));
    }
}
