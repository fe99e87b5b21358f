//! Shared configuration structures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, AppResult};

// =============================================================================
// Defaults
// =============================================================================

/// Default database host
pub const DEFAULT_DB_HOST: &str = "localhost";

/// Default database name
pub const DEFAULT_DB_NAME: &str = "appdb";

/// Default PostgreSQL port (development container mapping)
pub const DEFAULT_POSTGRES_PORT: u16 = 5433;

/// Default MySQL port
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Default pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default idle connections kept open
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 10;

/// Storage backend kind, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Backend {
    #[default]
    #[serde(rename = "postgres")]
    Postgres,
    #[serde(rename = "mysql")]
    MySql,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Postgres => "postgres",
            Backend::MySql => "mysql",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Backend::Postgres => DEFAULT_POSTGRES_PORT,
            Backend::MySql => DEFAULT_MYSQL_PORT,
        }
    }

    fn default_credentials(self) -> (&'static str, &'static str) {
        match self {
            Backend::Postgres => ("postgres", "postgres"),
            Backend::MySql => ("root", "password"),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Backend::Postgres),
            "mysql" => Ok(Backend::MySql),
            other => Err(format!(
                "unknown backend `{other}` (expected `postgres` or `mysql`)"
            )),
        }
    }
}

/// Transport security mode for the database connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    #[default]
    Disable,
    Prefer,
    Require,
}

impl SslMode {
    /// Query parameter carrying the mode in a connection URL for `backend`.
    pub fn query_param(self, backend: Backend) -> String {
        match backend {
            Backend::Postgres => format!("sslmode={}", self.as_str()),
            Backend::MySql => {
                let mode = match self {
                    SslMode::Disable => "DISABLED",
                    SslMode::Prefer => "PREFERRED",
                    SslMode::Require => "REQUIRED",
                };
                format!("ssl-mode={mode}")
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SslMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disable" | "disabled" => Ok(SslMode::Disable),
            "prefer" | "preferred" => Ok(SslMode::Prefer),
            "require" | "required" => Ok(SslMode::Require),
            other => Err(format!(
                "unknown ssl mode `{other}` (expected `disable`, `prefer` or `require`)"
            )),
        }
    }
}

/// Database configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub backend: Backend,
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub database: String,
    pub ssl_mode: SslMode,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    /// Full connection URL; overrides the individual fields when set
    #[serde(skip_serializing)]
    pub url: Option<String>,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl DatabaseConfig {
    /// Development defaults for `backend`.
    pub fn for_backend(backend: Backend) -> Self {
        let (user, password) = backend.default_credentials();
        Self {
            backend,
            host: DEFAULT_DB_HOST.to_string(),
            port: backend.default_port(),
            user: user.to_string(),
            password: password.to_string(),
            database: DEFAULT_DB_NAME.to_string(),
            ssl_mode: SslMode::default(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            connect_timeout_seconds: DEFAULT_CONNECT_TIMEOUT_SECONDS,
            url: None,
        }
    }

    /// Connection URL understood by the sqlx drivers.
    ///
    /// User, password and database name are percent-encoded, so reserved
    /// characters in them cannot change where the URL points.
    pub fn url(&self) -> AppResult<String> {
        if let Some(url) = &self.url {
            tracing::debug!("Using explicit database URL");
            return Ok(url.clone());
        }

        let base = format!("{}://{}:{}/", self.backend.as_str(), self.host, self.port);
        let mut url = Url::parse(&base)
            .map_err(|e| AppError::config(format!("invalid database host {:?}: {}", self.host, e)))?;

        url.set_username(&self.user)
            .map_err(|_| AppError::config("database URL cannot carry a user name"))?;
        url.set_password(Some(&self.password))
            .map_err(|_| AppError::config("database URL cannot carry a password"))?;
        url.path_segments_mut()
            .map_err(|_| AppError::config("database URL cannot carry a database name"))?
            .pop_if_empty()
            .push(&self.database);
        url.set_query(Some(&self.ssl_mode.query_param(self.backend)));

        Ok(url.to_string())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::for_backend(Backend::default())
    }
}
