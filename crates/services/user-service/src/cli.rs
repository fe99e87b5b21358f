//! CLI argument definitions.
//!
//! Connection settings come from flags or their `DB_*` environment
//! variables. Both go through the same parsers, so a malformed value is
//! rejected at startup whichever way it was given.

use clap::{Args, Parser, Subcommand};

use common::{Backend, DatabaseConfig, SslMode};

/// User management over a swappable storage backend
#[derive(Parser, Debug)]
#[command(name = "user-service")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings. Unset values keep the backend's defaults.
#[derive(Args, Debug, Default)]
pub struct DatabaseArgs {
    /// Storage backend (postgres or mysql)
    #[arg(long, global = true, env = "DB_BACKEND")]
    pub backend: Option<Backend>,

    #[arg(long, global = true, env = "DB_HOST")]
    pub host: Option<String>,

    #[arg(long, global = true, env = "DB_PORT")]
    pub port: Option<u16>,

    #[arg(long, global = true, env = "DB_USER")]
    pub user: Option<String>,

    #[arg(long, global = true, env = "DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(long, global = true, env = "DB_NAME")]
    pub database: Option<String>,

    /// TLS mode (disable, prefer or require)
    #[arg(long, global = true, env = "DB_SSLMODE")]
    pub ssl_mode: Option<SslMode>,

    /// Pool size
    #[arg(long, global = true, env = "DB_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Idle connections kept open
    #[arg(long, global = true, env = "DB_MIN_CONNECTIONS")]
    pub min_connections: Option<u32>,

    /// Connect timeout in seconds
    #[arg(long, global = true, env = "DB_CONNECT_TIMEOUT")]
    pub connect_timeout: Option<u64>,
}

impl DatabaseArgs {
    /// Merge over `config`. Choosing a different backend also switches to
    /// that backend's defaults; an explicit URL is kept.
    pub fn apply(self, config: &mut DatabaseConfig) {
        if let Some(backend) = self.backend {
            if backend != config.backend {
                let url = config.url.take();
                *config = DatabaseConfig::for_backend(backend);
                config.url = url;
            }
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(user) = self.user {
            config.user = user;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        if let Some(database) = self.database {
            config.database = database;
        }
        if let Some(ssl_mode) = self.ssl_mode {
            config.ssl_mode = ssl_mode;
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        if let Some(min) = self.min_connections {
            config.min_connections = min;
        }
        if let Some(timeout) = self.connect_timeout {
            config.connect_timeout_seconds = timeout;
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered users
    List {
        /// Print users as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register users, then list everyone
    Register {
        /// Names to register
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Create the users table if it does not exist
    Migrate,
    /// Print the table definition without connecting
    Schema,
}
