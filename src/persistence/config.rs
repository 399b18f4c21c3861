//! Store configuration
//!
//! Loaded from a JSON file. Every field is optional:
//!
//! ```text
//! {
//!   "database": "verse",
//!   "collection": "tag_groups",
//!   "keep_version_history": false,
//!   "store_path": "./tagvault.json"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};

use super::errors::{ConfigError, ConfigResult};

/// Where and how tag group records are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database name (default "verse")
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection name (default "tag_groups")
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Also write each saved version under its own number (default false)
    #[serde(default)]
    pub keep_version_history: bool,

    /// Backing file of the file store (default "./tagvault.json")
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_database() -> String {
    "verse".to_string()
}
fn default_collection() -> String {
    "tag_groups".to_string()
}
fn default_store_path() -> PathBuf {
    PathBuf::from("./tagvault.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            collection: default_collection(),
            keep_version_history: false,
            store_path: default_store_path(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = Self::from_json(&content)?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("namespace", config.namespace().as_str()),
                ("path", path.display().to_string().as_str()),
            ],
        );

        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: StoreConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Full namespace of the records: `<database>.<collection>`
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        validate_name("database", &self.database)?;
        validate_name("collection", &self.collection)?;

        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "store_path",
                value: String::new(),
                reason: "Must not be empty.",
            });
        }

        Ok(())
    }
}

fn validate_name(field: &'static str, value: &str) -> ConfigResult<()> {
    let reason = if value.is_empty() {
        "Must not be empty."
    } else if value.contains('.') {
        "Must not contain '.'."
    } else if value.chars().any(char::is_whitespace) {
        "Must not contain whitespace."
    } else {
        return Ok(());
    };

    Err(ConfigError::Invalid {
        field,
        value: value.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_json("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.namespace(), "verse.tag_groups");
        assert!(!config.keep_version_history);
        assert_eq!(config.store_path, PathBuf::from("./tagvault.json"));
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_json(
            r#"{"database": "world", "collection": "tags", "keep_version_history": true}"#,
        )
        .unwrap();
        assert_eq!(config.namespace(), "world.tags");
        assert!(config.keep_version_history);
    }

    #[test]
    fn test_rejects_bad_names() {
        for bad in [
            r#"{"database": ""}"#,
            r#"{"database": "a.b"}"#,
            r#"{"collection": "tag groups"}"#,
            r#"{"store_path": ""}"#,
        ] {
            let err = StoreConfig::from_json(bad).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{}", bad);
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            StoreConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"collection": "archive"}}"#).unwrap();

        let config = StoreConfig::load(file.path()).unwrap();
        assert_eq!(config.namespace(), "verse.archive");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StoreConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
