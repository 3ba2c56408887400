//! Dashboard configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed config file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Value out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Root of the JSON booking store
    pub data_dir: PathBuf,

    /// Booking API base URL; when set it replaces the JSON store
    pub api_base_url: Option<String>,

    /// HTTP request timeout
    pub request_timeout_secs: u64,

    /// Minimum lead time for offering a reschedule
    pub reschedule_threshold_minutes: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".homeaudit"),
            api_base_url: None,
            request_timeout_secs: 30,
            reschedule_threshold_minutes: 90,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = match std::fs::read_to_string(path.as_ref()) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.reschedule_threshold_minutes < 0 {
            return Err(ConfigError::Invalid(format!(
                "reschedule_threshold_minutes must not be negative, got {}",
                self.reschedule_threshold_minutes
            )));
        }
        if chrono::Duration::try_minutes(self.reschedule_threshold_minutes).is_none() {
            return Err(ConfigError::Invalid(format!(
                "reschedule_threshold_minutes out of range, got {}",
                self.reschedule_threshold_minutes
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load(dir.path().join("config.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.reschedule_threshold_minutes, 90);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_base_url": "https://api.example.com"}"#).unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.api_base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.data_dir, PathBuf::from(".homeaudit"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(DashboardConfig::load(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"reschedule_threshold_minutes": -5}"#).unwrap();
        assert!(matches!(DashboardConfig::load(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unrepresentable_threshold_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"reschedule_threshold_minutes": 9223372036854775807}"#).unwrap();
        assert!(matches!(DashboardConfig::load(&path), Err(ConfigError::Invalid(_))));
    }
}
