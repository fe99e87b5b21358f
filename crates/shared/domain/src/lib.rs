//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Entities describe their own storage columns through the [`Entity`] trait,
//! which the storage layer turns into table definitions.

pub mod constants;
pub mod entity;
pub mod error;
pub mod user;

pub use constants::*;
pub use entity::{Entity, Field, FieldType};
pub use error::{DomainError, DomainResult, SchemaError};
pub use user::{NewUser, User};
