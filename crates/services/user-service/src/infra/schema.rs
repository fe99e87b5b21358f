//! Table creation from entity descriptions.
//!
//! Each repository derives its table from the [`Entity`] description of the
//! record it stores and applies it once while being constructed. The emitted
//! statement is `CREATE TABLE IF NOT EXISTS`, so applying it against a
//! database that already has the table changes nothing.

use std::collections::HashSet;
use std::fmt;

use sea_orm::{ConnectionTrait, DbBackend, Statement};

use common::{AppResult, Backend, ResultExt};
use domain::{Entity, FieldType, SchemaError};

/// SQL flavour a table definition and its statements are rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Postgres,
    MySql,
}

impl Dialect {
    /// Dialect of a live connection. SQLite has no column mapping.
    pub fn from_backend(backend: DbBackend) -> Result<Self, SchemaError> {
        match backend {
            DbBackend::Postgres => Ok(Dialect::Postgres),
            DbBackend::MySql => Ok(Dialect::MySql),
            DbBackend::Sqlite => Err(SchemaError::UnsupportedBackend("sqlite".to_string())),
        }
    }

    pub fn backend(self) -> DbBackend {
        match self {
            Dialect::Postgres => DbBackend::Postgres,
            Dialect::MySql => DbBackend::MySql,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
        }
    }

    /// Bind placeholder for the 1-based parameter `index`.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::MySql => "?".to_string(),
        }
    }

    /// Storage type token for a field.
    ///
    /// Integer primary keys auto-increment.
    pub fn column_type(self, ty: FieldType, primary_key: bool) -> Result<&'static str, SchemaError> {
        match (ty, self) {
            (FieldType::Integer, Dialect::Postgres) if primary_key => Ok("BIGSERIAL"),
            (FieldType::Integer, Dialect::MySql) if primary_key => Ok("BIGINT AUTO_INCREMENT"),
            (FieldType::Integer, _) => Ok("BIGINT"),
            (FieldType::Text, _) => Ok("TEXT"),
            (FieldType::Unsupported(ty), _) => Err(SchemaError::UnsupportedType { ty }),
        }
    }
}

impl From<Backend> for Dialect {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Postgres => Dialect::Postgres,
            Backend::MySql => Dialect::MySql,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One column of a derived table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: &'static str,
    pub primary_key: bool,
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.sql_type)?;
        if self.primary_key {
            f.write_str(" PRIMARY KEY")?;
        }
        Ok(())
    }
}

/// Table derived from an entity, columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Derive the table for `E` in `dialect`.
    pub fn derive<E: Entity>(dialect: Dialect) -> Result<Self, SchemaError> {
        let entity = E::TYPE_NAME;

        if E::FIELDS.is_empty() {
            return Err(SchemaError::NotARecord { entity });
        }

        let table = E::table_name();
        if !is_identifier(&table) {
            return Err(SchemaError::InvalidIdentifier {
                entity,
                identifier: table,
            });
        }

        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(E::FIELDS.len());

        for (field, column) in E::persisted_fields() {
            if !is_identifier(column) {
                return Err(SchemaError::InvalidIdentifier {
                    entity,
                    identifier: column.to_string(),
                });
            }
            if !seen.insert(column) {
                return Err(SchemaError::DuplicateColumn { entity, column });
            }

            let sql_type = dialect
                .column_type(field.ty, field.primary_key)
                .map_err(|_| SchemaError::UnsupportedField {
                    entity,
                    field: field.name,
                    ty: field.ty.name(),
                })?;

            columns.push(ColumnDef {
                name: column.to_string(),
                sql_type,
                primary_key: field.primary_key,
            });
        }

        if columns.is_empty() {
            return Err(SchemaError::NoColumns { entity });
        }
        if columns.iter().filter(|c| c.primary_key).count() > 1 {
            return Err(SchemaError::MultiplePrimaryKeys { entity });
        }

        Ok(Self { table, columns })
    }

    /// The idempotent `CREATE TABLE IF NOT EXISTS` statement.
    pub fn create_statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        format!("CREATE TABLE IF NOT EXISTS {} ({});", self.table, columns)
    }

    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.primary_key)
    }
}

/// Execute the table's creation statement.
pub async fn apply_schema<C>(db: &C, schema: &TableSchema) -> AppResult<()>
where
    C: ConnectionTrait,
{
    let sql = schema.create_statement();
    tracing::debug!(table = %schema.table, %sql, "Applying schema");

    db.execute(Statement::from_string(db.get_database_backend(), sql))
        .await
        .context(format!("failed to apply schema for table {}", schema.table))?;

    tracing::info!(table = %schema.table, "Schema applied");
    Ok(())
}

/// Derive and apply the table for `E`, checking the connection speaks `dialect`.
pub async fn migrate<E, C>(db: &C, dialect: Dialect) -> AppResult<TableSchema>
where
    E: Entity,
    C: ConnectionTrait,
{
    let actual = Dialect::from_backend(db.get_database_backend())?;
    if actual != dialect {
        return Err(SchemaError::BackendMismatch {
            expected: dialect.to_string(),
            actual: actual.to_string(),
        }
        .into());
    }

    let schema = TableSchema::derive::<E>(dialect)?;
    apply_schema(db, &schema).await?;
    Ok(schema)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
