//! User repository contract and the SQL shared by its implementations.

use async_trait::async_trait;
use sea_orm::{DbErr, QueryResult};

use common::{AppResult, ResultExt};
use domain::{NewUser, User};

use crate::infra::Dialect;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations apply their table schema while being constructed, so a
/// value of this trait is always backed by a migrated table.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; the backend assigns the identifier
    async fn create(&self, user: NewUser) -> AppResult<()>;

    /// List every stored user, in whatever order the backend returns them.
    ///
    /// Fails as a whole if any row cannot be decoded.
    async fn get_all(&self) -> AppResult<Vec<User>>;
}

pub(crate) fn insert_sql(dialect: Dialect, table: &str) -> String {
    format!("INSERT INTO {} (name) VALUES ({})", table, dialect.placeholder(1))
}

pub(crate) fn select_all_sql(table: &str) -> String {
    format!("SELECT id, name FROM {}", table)
}

pub(crate) fn decode_users(rows: &[QueryResult]) -> AppResult<Vec<User>> {
    rows.iter()
        .map(decode_user)
        .collect::<Result<Vec<_>, _>>()
        .context("failed to scan user")
}

fn decode_user(row: &QueryResult) -> Result<User, DbErr> {
    Ok(User {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
    })
}
