//! User service configuration.

use std::env;

use common::DatabaseConfig;

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Storage backend and connection settings
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Only the full connection URL is read here (`USER_SERVICE_DATABASE_URL`,
    /// then `DATABASE_URL`). The individual `DB_*` settings are parsed by the
    /// CLI and merged on top.
    pub fn from_env() -> Self {
        let database = DatabaseConfig {
            url: env::var("USER_SERVICE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .ok(),
            ..DatabaseConfig::default()
        };

        Self { database }
    }
}
