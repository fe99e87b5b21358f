//! User Service Library
//!
//! User registration and listing over a swappable storage backend. The
//! service depends only on the [`UserRepository`](repository::UserRepository)
//! contract; PostgreSQL and MySQL stores implement it and create their table
//! from the [`User`](domain::User) entity description when constructed.

pub mod cli;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use common::{AppResult, Backend, DatabaseConfig};
use domain::User;

use crate::infra::{Database, TableSchema};
use crate::repository::open_user_store;
use crate::service::UserManager;

/// The user service wired on top of a connected store.
pub struct AppContext {
    pub users: UserManager,
}

/// Connect to the configured backend, migrate the users table and build the
/// user service.
///
/// No service is returned if the schema cannot be applied.
pub async fn bootstrap(config: &DatabaseConfig) -> AppResult<AppContext> {
    let database = Database::connect(config).await?;
    let repo = open_user_store(config.backend, database.into_connection()).await?;

    Ok(AppContext {
        users: UserManager::new(repo),
    })
}

/// Apply the users table schema only (for CLI commands).
pub async fn run_migrations(config: &DatabaseConfig) -> AppResult<TableSchema> {
    let database = Database::connect(config).await?;
    let schema = infra::migrate::<User, _>(database.connection(), config.backend.into()).await?;
    database.close().await?;
    Ok(schema)
}

/// The users table schema for `backend`, without connecting.
pub fn preview_schema(backend: Backend) -> AppResult<TableSchema> {
    Ok(TableSchema::derive::<User>(backend.into())?)
}
