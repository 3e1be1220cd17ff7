//! Application configuration.
//!
//! The configuration is loaded from `config.json` in the per-user config
//! directory.  Every field is optional; a missing file means compiled-in
//! defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "service": {
//!     "adjacency": { "left": 3, "right": 4 }
//!   },
//!   "dispatcher": {
//!     "queue_capacity": 32
//!   }
//! }
//! ```

use crate::intent::Direction;
use serde::{Deserialize, Serialize};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Every field is optional — a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Desktop service adapter settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Intent queue settings.
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
}

/// Desktop service adapter settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub adjacency: AdjacencyCodes,
}

/// The service's native codes for "adjacent desktop in direction".
///
/// This is the only place [`Direction`] is mapped to protocol numbers.  The
/// values are fixed by the external service's current contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjacencyCodes {
    pub left: i32,
    pub right: i32,
}

impl Default for AdjacencyCodes {
    fn default() -> Self {
        Self { left: 3, right: 4 }
    }
}

impl AdjacencyCodes {
    /// Native code for `direction`.
    pub fn code(&self, direction: Direction) -> i32 {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Intent queue settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Maximum pending intents.  Absent means unbounded.
    pub queue_capacity: Option<usize>,
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or fall back to defaults.
    ///
    /// A missing file is normal.  An unreadable or malformed one is logged
    /// at `warn` so a typo does not silently disable the user's settings.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!("loaded config from {}", path.display());
                config
            }
            Err(e) if e.is_missing() => {
                info!("no config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }
}

/// Per-user directory holding `config.json` and the log file.
///
/// `%APPDATA%\deskshift`, or `$XDG_CONFIG_HOME/deskshift` where `APPDATA`
/// is not set.  `None` when neither variable is available.
pub fn user_config_dir() -> Option<PathBuf> {
    ["APPDATA", "XDG_CONFIG_HOME"]
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .find(|base| !base.is_empty())
        .map(|base| PathBuf::from(base).join("deskshift"))
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// The file simply does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "service": { "adjacency": { "left": 1, "right": 2 } },
            "dispatcher": { "queue_capacity": 16 }
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.service.adjacency.code(Direction::Left), 1);
        assert_eq!(cfg.service.adjacency.code(Direction::Right), 2);
        assert_eq!(cfg.dispatcher.queue_capacity, Some(16));
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.service.adjacency, AdjacencyCodes { left: 3, right: 4 });
        assert_eq!(cfg.dispatcher.queue_capacity, None);
    }

    #[test]
    fn deserialize_partial_adjacency() {
        let json = r#"{ "service": { "adjacency": { "right": 7 } } }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.service.adjacency.left, 3);
        assert_eq!(cfg.service.adjacency.right, 7);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "service": {}, "tray": { "enabled": true } }"#;
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join(format!(
            "deskshift-missing-{}.json",
            std::process::id()
        ));
        let err = Config::load(&path).unwrap_err();
        assert!(err.is_missing());
        assert!(err.to_string().starts_with("cannot read config"));
        assert_eq!(Config::load_or_default(&path).dispatcher.queue_capacity, None);
    }

    #[test]
    fn load_reports_malformed_file() {
        let path = std::env::temp_dir().join(format!(
            "deskshift-malformed-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "dispatcher": { "queue_capacity": "many" } }"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
        assert!(!err.is_missing());
        assert_eq!(
            Config::load_or_default(&path).service.adjacency,
            AdjacencyCodes::default()
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "deskshift-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "dispatcher": { "queue_capacity": 4 } }"#).unwrap();
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.dispatcher.queue_capacity, Some(4));
        let _ = std::fs::remove_file(&path);
    }
}
