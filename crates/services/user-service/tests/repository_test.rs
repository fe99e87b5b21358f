//! User store tests against a mocked database connection.

use std::collections::BTreeMap;

use sea_orm::{
    DatabaseConnection, DbBackend, DbErr, MockDatabase, MockExecResult,
    Statement, Transaction, Value,
};

use common::{AppError, Backend};
use domain::{NewUser, SchemaError, User};
use user_service_lib::repository::{
    open_user_store, MySqlUserStore, PostgresUserStore, UserRepository,
};

const USERS_POSTGRES: &str =
    "CREATE TABLE IF NOT EXISTS users (id BIGSERIAL PRIMARY KEY, name TEXT);";
const USERS_MYSQL: &str =
    "CREATE TABLE IF NOT EXISTS users (id BIGINT AUTO_INCREMENT PRIMARY KEY, name TEXT);";

fn exec(last_insert_id: u64, rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id,
        rows_affected,
    }
}

fn row(id: i64, name: &str) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("id", Value::BigInt(Some(id))), ("name", Value::from(name))])
}

/// Statements executed so far; the log is emptied.
fn transaction_log(db: &DatabaseConnection) -> Vec<Transaction> {
    match db {
        DatabaseConnection::MockDatabaseConnection(conn) => {
            DatabaseConnection::MockDatabaseConnection(conn.clone()).into_transaction_log()
        }
        _ => panic!("Not mock connection"),
    }
}

fn ddl(backend: DbBackend, sql: &str) -> Transaction {
    Transaction::one(Statement::from_string(backend, sql.to_string()))
}

#[tokio::test]
async fn test_postgres_store_applies_schema_on_construction() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_results(vec![exec(0, 0)])
        .into_connection();

    let store = PostgresUserStore::new(db).await.unwrap();

    assert_eq!(store.schema().table, "users");
    assert_eq!(
        transaction_log(store.connection()),
        vec![ddl(DbBackend::Postgres, USERS_POSTGRES)]
    );
}

#[tokio::test]
async fn test_mysql_store_applies_schema_on_construction() {
    let db = MockDatabase::new(DbBackend::MySql)
        .append_exec_results(vec![exec(0, 0)])
        .into_connection();

    let store = MySqlUserStore::new(db).await.unwrap();

    assert_eq!(store.schema().columns.len(), 2);
    assert_eq!(
        transaction_log(store.connection()),
        vec![ddl(DbBackend::MySql, USERS_MYSQL)]
    );
}

#[tokio::test]
async fn test_construction_fails_when_schema_fails() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_errors(vec![DbErr::Custom("permission denied".to_string())])
        .into_connection();

    let err = PostgresUserStore::new(db).await.err().unwrap();

    assert!(matches!(err.root_cause(), AppError::Database(_)));
    assert!(err.to_string().starts_with(
        "failed to initialize postgres user store: failed to apply schema for table users"
    ));
}

#[tokio::test]
async fn test_construction_rejects_other_backend() {
    let db = MockDatabase::new(DbBackend::Postgres).into_connection();

    // Nothing is queued, so any executed statement would surface as a database error
    let err = MySqlUserStore::new(db).await.err().unwrap();

    assert!(matches!(
        err.root_cause(),
        AppError::Schema(SchemaError::BackendMismatch { .. })
    ));
}

#[tokio::test]
async fn test_postgres_create_uses_numbered_placeholder() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_results(vec![exec(0, 0), exec(0, 1)])
        .into_connection();
    let store = PostgresUserStore::new(db).await.unwrap();

    store.create(NewUser::new("Alice")).await.unwrap();

    let log = transaction_log(store.connection());
    assert_eq!(log.len(), 2);
    assert_eq!(
        log[1],
        Transaction::from_sql_and_values(
            DbBackend::Postgres,
            "INSERT INTO users (name) VALUES ($1)",
            ["Alice".into()],
        )
    );
}

#[tokio::test]
async fn test_mysql_create_uses_unnumbered_placeholder() {
    let db = MockDatabase::new(DbBackend::MySql)
        .append_exec_results(vec![exec(0, 0), exec(7, 1)])
        .into_connection();
    let store = MySqlUserStore::new(db).await.unwrap();

    store.create(NewUser::new("Bob")).await.unwrap();

    let log = transaction_log(store.connection());
    assert_eq!(
        log[1],
        Transaction::from_sql_and_values(
            DbBackend::MySql,
            "INSERT INTO users (name) VALUES (?)",
            ["Bob".into()],
        )
    );
}

#[tokio::test]
async fn test_create_surfaces_insert_error() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_results(vec![exec(0, 0)])
        .append_exec_errors(vec![DbErr::Custom("duplicate key".to_string())])
        .into_connection();
    let store = PostgresUserStore::new(db).await.unwrap();

    let err = store.create(NewUser::new("Alice")).await.unwrap_err();

    assert!(matches!(&err, AppError::Context { context, .. } if context == "failed to insert user"));
    assert!(err.to_string().contains("duplicate key"));
}

#[tokio::test]
async fn test_get_all_returns_rows() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_results(vec![exec(0, 0)])
        .append_query_results(vec![vec![row(1, "Alice"), row(2, "Bob")]])
        .into_connection();
    let store = PostgresUserStore::new(db).await.unwrap();

    let users = store.get_all().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!((users[0].id, users[0].name.as_str()), (1, "Alice"));
    assert_eq!((users[1].id, users[1].name.as_str()), (2, "Bob"));
    assert_eq!(
        transaction_log(store.connection())[1],
        ddl(DbBackend::Postgres, "SELECT id, name FROM users")
    );
}

#[tokio::test]
async fn test_get_all_on_empty_table() {
    let db = MockDatabase::new(DbBackend::MySql)
        .append_exec_results(vec![exec(0, 0)])
        .append_query_results(vec![Vec::<BTreeMap<&str, Value>>::new()])
        .into_connection();
    let store = MySqlUserStore::new(db).await.unwrap();

    let users = store.get_all().await.unwrap();

    assert!(users.is_empty());
}

#[tokio::test]
async fn test_get_all_fails_whole_read_on_bad_row() {
    let missing_name = BTreeMap::from([("id", Value::BigInt(Some(2)))]);
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_results(vec![exec(0, 0)])
        .append_query_results(vec![vec![row(1, "Alice"), missing_name, row(3, "Carol")]])
        .into_connection();
    let store = PostgresUserStore::new(db).await.unwrap();

    let result = store.get_all().await;

    let err = result.unwrap_err();
    assert!(matches!(&err, AppError::Context { context, .. } if context == "failed to scan user"));
    assert!(matches!(err.root_cause(), AppError::Database(_)));
}

#[tokio::test]
async fn test_get_all_surfaces_query_error() {
    let db = MockDatabase::new(DbBackend::MySql)
        .append_exec_results(vec![exec(0, 0)])
        .append_query_errors(vec![DbErr::Custom("connection lost".to_string())])
        .into_connection();
    let store = MySqlUserStore::new(db).await.unwrap();

    let err = store.get_all().await.unwrap_err();

    assert!(err.to_string().starts_with("failed to query users"));
}

#[tokio::test]
async fn test_open_user_store_selects_backend() {
    let db = MockDatabase::new(DbBackend::MySql)
        .append_exec_results(vec![exec(0, 0)])
        .append_query_results(vec![vec![row(1, "Alice")]])
        .into_connection();

    let store = open_user_store(Backend::MySql, db).await.unwrap();

    let users = store.get_all().await.unwrap();
    assert_eq!(users, vec![User::new(1, "Alice")]);
}

#[tokio::test]
async fn test_open_user_store_refuses_mismatched_connection() {
    let db = MockDatabase::new(DbBackend::MySql).into_connection();

    let err = open_user_store(Backend::Postgres, db).await.err().unwrap();

    assert_eq!(err.code(), "SCHEMA_ERROR");
}
