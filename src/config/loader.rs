//! Configuration Loader
//!
//! Environment-aware configuration loading. Values come from an optional
//! `config/cinelist.toml` (or `.yaml`/`.json`) file merged with
//! `CINELIST_`-prefixed environment variables, e.g.
//! `CINELIST_UPSTREAM__BEARER_TOKEN` or `CINELIST_CACHE__TTL_SECONDS`.

use super::CinelistConfig;
use crate::error::{CinelistError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Loaded configuration plus the environment it was resolved for.
pub struct ConfigManager {
    config: CinelistConfig,
    environment: String,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection.
    pub fn load() -> Result<Arc<ConfigManager>> {
        Self::load_from_file(None)
    }

    /// Load configuration from a specific file, merged with environment
    /// variable overrides. Useful for tests that must not touch globals.
    pub fn load_from_file(config_file: Option<PathBuf>) -> Result<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        let file = config_file.unwrap_or_else(|| PathBuf::from("config/cinelist"));

        debug!(
            environment = %environment,
            file = %file.display(),
            "Loading configuration"
        );

        let builder = config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix("CINELIST")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: CinelistConfig = builder
            .build()
            .map_err(|e| CinelistError::Configuration(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CinelistError::Configuration(e.to_string()))?;

        config.validate()?;

        debug!(
            ttl_seconds = config.cache.ttl_seconds,
            max_attempts = config.retry.max_attempts,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &CinelistConfig {
        &self.config
    }

    /// Get the detected environment
    pub fn environment(&self) -> &str {
        &self.environment
    }

    fn detect_environment() -> String {
        std::env::var("CINELIST_ENV")
            .or_else(|_| std::env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }
}
