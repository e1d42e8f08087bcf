//! Application configuration.
//!
//! Loaded from a TOML file; every section and field has a default, so an empty file (or no
//! file at all) yields a working in-memory setup.
//!
//! ```toml
//! [storage]
//! backend = "file"
//! path = "data/fuel-swift.json"
//!
//! [auth]
//! accepted_code = "1234"
//!
//! [pricing]
//! petrol_per_litre = 105.45
//! diesel_per_litre = 95.50
//! convenience_fee = 30.0
//! gst_rate_on_fee = 0.18
//!
//! [delivery]
//! default_location = { lat = 19.0760, lng = 72.8777 }
//!
//! [logging]
//! filter = "info"
//! ```

use crate::model::GeoPoint;
use crate::pricing::Tariff;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub pricing: Tariff,
    pub delivery: DeliveryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Only read by the `file` backend.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: PathBuf::from("fuel-swift.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// The verification code every sign-in accepts.
    pub accepted_code: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            accepted_code: "1234".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Used for orders placed without a location.
    pub default_location: GeoPoint,
    pub captain_photo_url: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            default_location: GeoPoint::new(19.0760, 72.8777),
            captain_photo_url: "https://picsum.photos/seed/captain/100/100".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl std::str::FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl AppConfig {
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        content.parse()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let code = &self.auth.accepted_code;
        if code.len() != 4 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(format!(
                "auth.accepted_code must be 4 digits, got {code:?}"
            )));
        }
        if self.storage.backend == StorageBackend::File && self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.path is required for the file backend".into(),
            ));
        }
        self.pricing.validate().map_err(ConfigError::Validation)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: AppConfig = "".parse().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.auth.accepted_code, "1234");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.pricing.convenience_fee, 30.0);
    }

    #[test]
    fn sections_override_defaults() {
        let config: AppConfig = r#"
            [storage]
            backend = "file"
            path = "/tmp/state.json"

            [pricing]
            diesel_per_litre = 90.0

            [logging]
            filter = "fuel_swift=debug"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/state.json"));
        assert_eq!(config.pricing.diesel_per_litre, 90.0);
        assert_eq!(config.pricing.petrol_per_litre, 105.45);
        assert_eq!(config.logging.filter, "fuel_swift=debug");
    }

    #[test]
    fn rejects_malformed_code_and_tariff() {
        let err = "[auth]\naccepted_code = \"12a4\"".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = "[pricing]\npetrol_per_litre = 0.0".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = "[storage]\nbackend = \"redis\"".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");
        std::fs::write(&path, "[auth]\naccepted_code = \"9876\"\n").unwrap();

        let config = AppConfig::from_file(&path).await.unwrap();
        assert_eq!(config.auth.accepted_code, "9876");

        let missing = AppConfig::from_file(dir.path().join("nope.toml")).await;
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
