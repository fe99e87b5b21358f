//! Repository layer for data access.

mod mysql;
mod postgres;
mod user_repository;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use common::{AppResult, Backend};

pub use mysql::MySqlUserStore;
pub use postgres::PostgresUserStore;
pub use user_repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Construct the user store for `backend` on an open connection.
pub async fn open_user_store(
    backend: Backend,
    db: DatabaseConnection,
) -> AppResult<Arc<dyn UserRepository>> {
    let store: Arc<dyn UserRepository> = match backend {
        Backend::Postgres => Arc::new(PostgresUserStore::new(db).await?),
        Backend::MySql => Arc::new(MySqlUserStore::new(db).await?),
    };
    Ok(store)
}
