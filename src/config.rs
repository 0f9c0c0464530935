use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fine charged for each day a copy is kept past its due date
pub const FINE_PER_DAY: f64 = 2.0;

/// Lifetime checkouts a book needs to appear in the popular report
pub const POPULAR_THRESHOLD: u32 = 3;

/// Errors raised while loading a [`LedgerConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for this schema
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value parsed but is out of range
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Tunable ledger policy
///
/// Every field is optional in the JSON form and falls back to the defaults above.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Fine per overdue day
    pub fine_per_day: f64,
    /// Minimum lifetime checkouts for the popular report
    pub popular_threshold: u32,
    /// Start with the sample catalogue and loans
    pub seed_sample_data: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            fine_per_day: FINE_PER_DAY,
            popular_threshold: POPULAR_THRESHOLD,
            seed_sample_data: true,
        }
    }
}

impl LedgerConfig {
    /// Parse and validate a config from JSON text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or unknown fields, and
    /// `ConfigError::Invalid` when a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`LedgerConfig::from_json`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Check that every value is usable
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for a negative or non-finite fine rate, or a
    /// zero popularity threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fine_per_day.is_finite() || self.fine_per_day < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fine_per_day must be a non-negative number, got {}",
                self.fine_per_day
            )));
        }
        if self.popular_threshold == 0 {
            return Err(ConfigError::Invalid("popular_threshold must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.fine_per_day, 2.0);
        assert_eq!(config.popular_threshold, 3);
        assert!(config.seed_sample_data);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LedgerConfig::from_json(r#"{ "fine_per_day": 0.5 }"#).unwrap();
        assert_eq!(config.fine_per_day, 0.5);
        assert_eq!(config.popular_threshold, POPULAR_THRESHOLD);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = LedgerConfig::from_json(r#"{ "fine": 1.0 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(matches!(
            LedgerConfig::from_json(r#"{ "fine_per_day": -1.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LedgerConfig::from_json(r#"{ "popular_threshold": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "popular_threshold": 5, "seed_sample_data": false }"#).unwrap();

        let config = LedgerConfig::load(file.path()).unwrap();
        assert_eq!(config.popular_threshold, 5);
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = LedgerConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
