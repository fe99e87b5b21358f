//! Common utilities shared across services.
//!
//! This crate provides:
//! - Unified error handling with context wrapping
//! - Database configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, ResultExt};
