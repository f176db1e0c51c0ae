//! Unified error types for the Keel storage layers.

use thiserror::Error;

/// Unified error type for Keel.
///
/// Storage errors are passed through to the caller as they come out of the
/// driver. The only translation performed is for single-row lookups that
/// match nothing, which surface as [`KeelError::NotFound`] so callers can tell
/// a missing record apart from an infrastructure failure.
#[derive(Error, Debug)]
pub enum KeelError {
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Named-parameter template could not be bound
    #[error("Binding error: {0}")]
    Binding(String),

    /// Driver, connection or statement failure
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeelError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Binding(_) => "BINDING_ERROR",
            #[cfg(feature = "sqlx")]
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a binding error.
    #[must_use]
    pub fn binding<T: Into<String>>(message: T) -> Self {
        Self::Binding(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns `true` if a single-row lookup matched nothing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this error is worth retrying.
    ///
    /// The storage layer never retries on its own; this is a hint for callers
    /// that apply their own backoff policy.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self {
            #[cfg(feature = "sqlx")]
            Self::Database(err) => matches!(
                err,
                sqlx::Error::Io(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::WorkerCrashed
            ),
            _ => false,
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for KeelError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            other => Self::Database(other),
        }
    }
}

impl From<serde_json::Error> for KeelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}
