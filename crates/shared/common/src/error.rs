//! Unified error handling.
//!
//! Provides a single error type for every layer. Lower-layer errors are
//! wrapped with the name of the failing operation instead of being replaced,
//! so the full chain reaches the caller of the topmost operation.

use domain::{DomainError, SchemaError};
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("{0}")]
    Validation(String),

    // Entity definitions and backend selection
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    // Connection settings that cannot form a URL
    #[error("configuration error: {0}")]
    Config(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    // Operation context around a lower-layer error
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<AppError>,
    },

    // Internal
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get error code for logs and exit reporting
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Schema(_) => "SCHEMA_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Context { source, .. } => source.code(),
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The innermost error, skipping every context layer.
    pub fn root_cause(&self) -> &AppError {
        let mut current = self;
        while let AppError::Context { source, .. } = current {
            current = source;
        }
        current
    }

    /// Whether the error was raised by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self.root_cause(), AppError::Validation(_))
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for attaching operation context to errors
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> AppResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, context: impl Into<String>) -> AppResult<T> {
        self.map_err(|err| AppError::Context {
            context: context.into(),
            source: Box::new(err.into()),
        })
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
