//! Configuration management for RAX Auth Manager
//!
//! Loads manager settings from config.toml with environment overrides and
//! maps each protection policy to its backing credential table.

use ::config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::auth::Policy;

/// Manager configuration loaded once at startup
#[derive(Debug, Deserialize, Clone)]
pub struct ManagerConfig {
    /// Directory holding the credential tables
    pub database_dir: String,

    /// Table file name per protection policy
    pub plain_table: String,
    pub hashed_table: String,
    pub salted_plain_table: String,
    pub salted_table: String,

    /// Input limits applied when registering credentials
    pub max_username_length: usize,
    pub max_password_length: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            database_dir: "databases".to_string(),
            plain_table: "plainDB.csv".to_string(),
            hashed_table: "hashDB.csv".to_string(),
            salted_plain_table: "saltPlainDB.csv".to_string(),
            salted_table: "saltDB.csv".to_string(),
            max_username_length: 64,
            max_password_length: 512,
        }
    }
}

impl ManagerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // Try production path first, then development path
        let config_paths = vec![
            "rax-auth-manager/config", // Installed layout: rax-auth-manager/config.toml
            "config",                  // Local development: ./config.toml
        ];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(Environment::with_prefix("RAX_AUTH").separator("_"))
                .build()
            {
                Ok(settings) => {
                    let config: ManagerConfig = settings.try_deserialize()?;
                    config.validate()?;
                    return Ok(config);
                }
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            config::ConfigError::Message("no config.toml found in any known location".into())
        }))
    }

    /// Path of the credential table backing the given policy
    pub fn table_path(&self, policy: Policy) -> PathBuf {
        let file = match policy {
            Policy::Plain => &self.plain_table,
            Policy::Hashed => &self.hashed_table,
            Policy::SaltedUnhashed => &self.salted_plain_table,
            Policy::SaltedHashed => &self.salted_table,
        };
        PathBuf::from(&self.database_dir).join(file)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.database_dir.is_empty() {
            return Err(config::ConfigError::Message(
                "database_dir cannot be empty".into(),
            ));
        }

        let tables = [
            &self.plain_table,
            &self.hashed_table,
            &self.salted_plain_table,
            &self.salted_table,
        ];

        if tables.iter().any(|t| t.is_empty()) {
            return Err(config::ConfigError::Message(
                "table file names cannot be empty".into(),
            ));
        }

        if self.max_username_length == 0 {
            return Err(config::ConfigError::Message(
                "max_username_length must be greater than 0".into(),
            ));
        }

        if self.max_password_length == 0 {
            return Err(config::ConfigError::Message(
                "max_password_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ManagerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_table_path_per_policy() {
        let config = ManagerConfig::default();
        assert_eq!(
            config.table_path(Policy::Plain),
            PathBuf::from("databases/plainDB.csv")
        );
        assert_eq!(
            config.table_path(Policy::Hashed),
            PathBuf::from("databases/hashDB.csv")
        );
        assert_eq!(
            config.table_path(Policy::SaltedHashed),
            PathBuf::from("databases/saltDB.csv")
        );
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = ManagerConfig {
            max_username_length: 0,
            ..ManagerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
