//! # Store Configuration
//!
//! Runtime settings for the persistence layer, loaded from a JSON file.
//! A missing file is not an error: every field has a default, so a fresh
//! install runs with zero setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Persistence-layer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the entity `.dat` files and the `backup/` tree.
    pub data_dir: PathBuf,

    /// Fallback tax rate applied when an invoice has no explicit Tax item.
    pub tax_rate: f64,

    /// Days between an invoice's issue date and its due date.
    pub invoice_due_days: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            data_dir: PathBuf::from("data"),
            tax_rate: innkeep_core::DEFAULT_TAX_RATE,
            invoice_due_days: innkeep_core::DEFAULT_INVOICE_DUE_DAYS,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from a JSON file, falling back to defaults when
    /// the file does not exist. A file that exists but fails to parse is a
    /// hard error; silently ignoring it would mask operator typos.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                return Ok(StoreConfig::default());
            }
            Err(err) => return Err(StoreError::io(path, err)),
        };
        let config: StoreConfig =
            serde_json::from_str(&contents).map_err(|err| StoreError::Config {
                path: path.to_path_buf(),
                detail: err.to_string(),
            })?;
        debug!(
            data_dir = %config.data_dir.display(),
            tax_rate = config.tax_rate,
            invoice_due_days = config.invoice_due_days,
            "configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_file_missing() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::load(dir.path().join("innkeep.json")).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.tax_rate, 0.10);
        assert_eq!(config.invoice_due_days, 7);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("innkeep.json");
        std::fs::write(&path, r#"{ "tax_rate": 0.075 }"#).unwrap();
        let config = StoreConfig::load(&path).unwrap();
        assert_eq!(config.tax_rate, 0.075);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.invoice_due_days, 7);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("innkeep.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = StoreConfig::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Config { .. }));
    }
}
