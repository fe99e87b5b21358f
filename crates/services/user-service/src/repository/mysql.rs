//! MySQL user store.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use common::{AppResult, ResultExt};
use domain::{NewUser, User};

use super::user_repository::{decode_users, insert_sql, select_all_sql, UserRepository};
use crate::infra::{migrate, Dialect, TableSchema};

const DIALECT: Dialect = Dialect::MySql;

/// UserRepository backed by MySQL
pub struct MySqlUserStore {
    db: DatabaseConnection,
    schema: TableSchema,
}

impl MySqlUserStore {
    /// Create the store, applying the users table schema first.
    pub async fn new(db: DatabaseConnection) -> AppResult<Self> {
        let schema = migrate::<User, _>(&db, DIALECT)
            .await
            .context("failed to initialize mysql user store")?;

        Ok(Self { db, schema })
    }

    /// The applied table schema
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UserRepository for MySqlUserStore {
    async fn create(&self, user: NewUser) -> AppResult<()> {
        let stmt = Statement::from_sql_and_values(
            DIALECT.backend(),
            insert_sql(DIALECT, &self.schema.table),
            [user.name.into()],
        );

        let result = self
            .db
            .execute(stmt)
            .await
            .context("failed to insert user")?;

        // MySQL reports the AUTO_INCREMENT value of the inserted row
        tracing::debug!(id = result.last_insert_id(), "Inserted user");
        Ok(())
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        let rows = self
            .db
            .query_all(Statement::from_string(
                DIALECT.backend(),
                select_all_sql(&self.schema.table),
            ))
            .await
            .context("failed to query users")?;

        decode_users(&rows)
    }
}
