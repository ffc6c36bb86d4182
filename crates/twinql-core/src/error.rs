//! Error types for query construction

use thiserror::Error;

/// Contract violations raised while a query is being assembled.
///
/// Every variant is raised synchronously by the call that introduced the
/// problem. Rendering a finished query never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A required field was blank or malformed
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// An alias was referenced that no FROM or JOIN clause introduced
    #[error("Unknown alias '{alias}' (in scope: {})", .allowed.join(", "))]
    UnknownAlias { alias: String, allowed: Vec<String> },

    /// A JOIN tried to introduce an alias that is already bound
    #[error("Alias '{alias}' is already in scope")]
    DuplicateAlias { alias: String },

    /// Builder configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl QueryError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type for query construction
pub type Result<T> = std::result::Result<T, QueryError>;

/// Fails with [`QueryError::InvalidArgument`] when `value` is empty or whitespace.
pub fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QueryError::invalid_argument(field, "must not be blank"));
    }
    Ok(())
}
