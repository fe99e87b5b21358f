//! Static storage descriptions for persisted record types.
//!
//! An entity lists its fields once, at compile time, together with the column
//! each field is stored in. The storage layer reads these descriptions to
//! create tables; nothing here inspects types at runtime.

use crate::constants::TABLE_NAME_SUFFIX;

/// Semantic type of a field, independent of any SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Signed 64-bit integer
    Integer,
    /// Variable-length UTF-8 text
    Text,
    /// A field whose Rust type has no storage mapping, named for diagnostics.
    Unsupported(&'static str),
}

impl FieldType {
    /// Human readable name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Text => "text",
            FieldType::Unsupported(name) => name,
        }
    }
}

/// One field of an entity and its storage metadata.
///
/// A field without a column name is not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Rust field name
    pub name: &'static str,
    /// Semantic type
    pub ty: FieldType,
    /// Storage column name (None = not persisted)
    pub column: Option<&'static str>,
    /// Whether the column is the table's primary key
    pub primary_key: bool,
}

impl Field {
    /// Describe a field that is not persisted until [`Field::column`] is set.
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            column: None,
            primary_key: false,
        }
    }

    /// Store the field in `column`.
    pub const fn column(self, column: &'static str) -> Self {
        Self {
            column: Some(column),
            ..self
        }
    }

    /// Mark the field as the primary key.
    pub const fn primary_key(self) -> Self {
        Self {
            primary_key: true,
            ..self
        }
    }

    /// Column name if the field is persisted. Empty names count as absent.
    pub fn column_name(&self) -> Option<&'static str> {
        self.column.filter(|column| !column.is_empty())
    }
}

/// A record type that can be stored in a table.
pub trait Entity {
    /// Type name the table name is derived from.
    const TYPE_NAME: &'static str;

    /// Fields in declaration order.
    const FIELDS: &'static [Field];

    /// Table name: lowercased type name plus a plain `s` suffix.
    fn table_name() -> String {
        format!("{}{}", Self::TYPE_NAME.to_lowercase(), TABLE_NAME_SUFFIX)
    }

    /// Fields that have a storage column, paired with that column, in
    /// declaration order.
    fn persisted_fields() -> Vec<(&'static Field, &'static str)> {
        Self::FIELDS
            .iter()
            .filter_map(|field| field.column_name().map(|column| (field, column)))
            .collect()
    }
}
