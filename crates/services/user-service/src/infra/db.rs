//! Database connection and initialization.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
    Statement,
};

use common::{AppResult, DatabaseConfig, ResultExt};

/// Database wrapper for connection management
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection pool for `config` and verify it answers.
    ///
    /// Tables are not touched here; repositories apply their own schema.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.url()?);
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options)
            .await
            .context("failed to open database")?;

        let db = Self::from_connection(connection);
        db.ping().await.context("failed to ping database")?;

        tracing::info!(
            backend = %config.backend,
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Database connected"
        );

        Ok(db)
    }

    /// Wrap an existing connection.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Get a reference to the database connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Hand the connection over to its long-lived owner.
    pub fn into_connection(self) -> DatabaseConnection {
        self.connection
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Close the connection pool.
    pub async fn close(self) -> AppResult<()> {
        self.connection
            .close()
            .await
            .context("failed to close database")
    }
}
