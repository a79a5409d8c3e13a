//! # tm-config
//!
//! Layered configuration loading for taskmaster using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TASKMASTER_*` prefix, `__` as separator)
//! 2. Project-level `./taskmaster.toml`
//! 3. User-level `~/.config/taskmaster/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TASKMASTER_DATABASE__PATH` -> `database.path`,
//! `TASKMASTER_SCHEDULER__INTERVAL_SECS` -> `scheduler.interval_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tm_config::TmConfig;
//!
//! let config = TmConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod auth;
mod database;
mod error;
mod general;
mod scheduler;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use scheduler::SchedulerConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the project-local config file.
pub const PROJECT_CONFIG_FILE: &str = "taskmaster.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TmConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TmConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then all other sources.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TASKMASTER_").split("__"))
    }

    /// Reject values that deserialize fine but cannot work at runtime.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.auth.token_ttl_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_minutes".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        self.server.socket_addr()?;
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("taskmaster").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TmConfig::default();
        config.validate().unwrap();
        assert_eq!(config.database.path, "taskmaster.db");
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.auth.token_ttl_minutes, 30);
        assert_eq!(config.scheduler.interval_secs, 0);
        assert_eq!(config.general.default_limit, 100);
    }

    #[test]
    fn zero_ttl_rejected() {
        let mut config = TmConfig::default();
        config.auth.token_ttl_minutes = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "auth.token_ttl_minutes"
        ));
    }

    #[test]
    fn empty_database_path_rejected() {
        let mut config = TmConfig::default();
        config.database.path = "  ".into();
        assert!(config.validate().is_err());
    }
}
