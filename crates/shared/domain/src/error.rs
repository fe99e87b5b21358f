//! Domain-level errors.
//!
//! These errors represent business rule violations and mistakes in entity
//! definitions. They are independent of infrastructure concerns (database,
//! CLI).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

/// Structural errors raised while deriving a table from an entity description.
///
/// Every variant points at a developer mistake in an [`Entity`](crate::Entity)
/// implementation or in backend selection, and is detected when a repository
/// is constructed, before any record is read or written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The entity declares no fields at all.
    #[error("entity `{entity}` is not a record type: it declares no fields")]
    NotARecord { entity: &'static str },

    /// Every field of the entity opted out of storage.
    #[error("entity `{entity}` has no persisted columns")]
    NoColumns { entity: &'static str },

    /// A semantic field type has no storage mapping.
    #[error("unsupported field type `{ty}`")]
    UnsupportedType { ty: &'static str },

    /// A persisted field has a type with no storage mapping.
    #[error("field `{entity}.{field}` has unsupported type `{ty}`")]
    UnsupportedField {
        entity: &'static str,
        field: &'static str,
        ty: &'static str,
    },

    /// Two fields map to the same column.
    #[error("entity `{entity}` maps column `{column}` more than once")]
    DuplicateColumn {
        entity: &'static str,
        column: &'static str,
    },

    /// More than one column carries the primary-key flag.
    #[error("entity `{entity}` declares more than one primary key column")]
    MultiplePrimaryKeys { entity: &'static str },

    /// A table or column name is not a plain SQL identifier.
    #[error("entity `{entity}` uses invalid identifier `{identifier}`")]
    InvalidIdentifier {
        entity: &'static str,
        identifier: String,
    },

    /// The connected backend has no schema dialect.
    #[error("unsupported database backend `{0}`")]
    UnsupportedBackend(String),

    /// A repository was handed a connection to a different backend.
    #[error("expected a {expected} connection, got {actual}")]
    BackendMismatch { expected: String, actual: String },
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
