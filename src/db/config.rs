//! ORM configuration
//!
//! Loaded from a JSON file. Every field is optional:
//!
//! ```json
//! { "valuer": "reflect", "log_level": "trace" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;
use crate::valuer::ValuerKind;

/// Configuration load failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings applied by `Db::from_config`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrmConfig {
    /// Row binding strategy (default: unsafe)
    #[serde(default)]
    pub valuer: ValuerKind,

    /// Minimum log severity (default: error)
    #[serde(default)]
    pub log_level: Severity,
}

impl OrmConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse a JSON document
    ///
    /// Unknown keys and unknown valuer or level names are rejected.
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = OrmConfig::from_json("{}").unwrap();
        assert_eq!(config.valuer, ValuerKind::Unsafe);
        assert_eq!(config.log_level, Severity::Error);
        assert_eq!(config, OrmConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"valuer": "reflect", "log_level": "trace"}}"#).unwrap();

        let config = OrmConfig::load(file.path()).unwrap();
        assert_eq!(config.valuer, ValuerKind::Reflect);
        assert_eq!(config.log_level, Severity::Trace);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = OrmConfig::load(&dir.path().join("orm.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_unknown_valuer() {
        let err = OrmConfig::from_json(r#"{"valuer": "magic"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_field() {
        assert!(OrmConfig::from_json(r#"{"pool_size": 4}"#).is_err());
    }

    #[test]
    fn test_unknown_level() {
        let err = OrmConfig::from_json(r#"{"log_level": "fatal"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_round_trip() {
        let config = OrmConfig {
            valuer: ValuerKind::Reflect,
            log_level: Severity::Warn,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"valuer":"reflect","log_level":"warn"}"#);
        assert_eq!(OrmConfig::from_json(&json).unwrap(), config);
    }
}
