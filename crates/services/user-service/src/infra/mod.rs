//! Infrastructure layer - database connection and schema management.

mod db;
pub mod schema;

pub use db::Database;
pub use schema::{apply_schema, migrate, ColumnDef, Dialect, TableSchema};
