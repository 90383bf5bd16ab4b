//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `NOTEVAULT__`-prefixed environment variables.
//! Each sub-module represents a logical configuration section.

pub mod logging;
pub mod publish;
pub mod remote;
pub mod vault;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::publish::PublishConfig;
use self::remote::RemoteConfig;
use self::vault::VaultConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Vault layout and view settings.
    #[serde(default)]
    pub vault: VaultConfig,
    /// Remote store connection settings.
    #[serde(default)]
    pub remote: RemoteConfig,
    /// Published pages settings.
    #[serde(default)]
    pub publish: PublishConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml` (if present), the given file (if any),
    /// and environment variables prefixed with `NOTEVAULT__`.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("NOTEVAULT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.vault.root_prefix()?;
        if self.remote.base_url.trim().is_empty() {
            return Err(AppError::configuration("remote.base_url must not be empty"));
        }
        if self.remote.request_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "remote.request_timeout_seconds must be positive",
            ));
        }
        Ok(())
    }
}
