//! User domain entity and related types.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Field, FieldType};
use crate::error::{DomainError, DomainResult};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned identifier
    pub id: i64,
    pub name: String,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Check that a name can be registered. Only the empty name is refused.
    pub fn validate_name(name: &str) -> DomainResult<()> {
        if name.is_empty() {
            return Err(DomainError::validation("user name cannot be empty"));
        }
        Ok(())
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.id, self.name)
    }
}

impl Entity for User {
    const TYPE_NAME: &'static str = "User";
    const FIELDS: &'static [Field] = &[
        Field::new("id", FieldType::Integer).column("id").primary_key(),
        Field::new("name", FieldType::Text).column("name"),
    ];
}

/// User creation data; the identifier is assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
