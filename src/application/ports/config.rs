//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load configuration from storage.
    ///
    /// Returns an empty config when nothing has been saved yet.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist `config`, creating parent directories as needed.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Get the configuration file path.
    fn path(&self) -> PathBuf;

    /// Check if configuration file exists.
    fn exists(&self) -> bool;

    /// Write the defaults. Fails if the file already exists.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Load and validate, falling back to an empty config on any error.
    async fn load_or_empty(&self) -> AppConfig {
        match self.load().await {
            Ok(config) => match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    tracing::warn!(path = %self.path().display(), error = %e, "ignoring invalid config file");
                    AppConfig::empty()
                }
            },
            Err(e) => {
                tracing::warn!(path = %self.path().display(), error = %e, "could not load config file");
                AppConfig::empty()
            }
        }
    }
}
