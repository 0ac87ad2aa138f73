//! Result and error types for Contar.

use thiserror::Error;

/// Result type for Contar operations
pub type ContarResult<T> = Result<T, ContarError>;

/// Errors that can occur in Contar
#[derive(Debug, Error)]
pub enum ContarError {
    /// Emit was called with a category no source is registered for
    #[error("Unknown event category: {category}")]
    UnknownCategory {
        /// Category name as supplied by the caller
        category: String,
    },

    /// Aggregate store could not be read or parsed
    #[error("Tally store unreadable at {path}: {message}")]
    StoreUnreadable {
        /// Store file path
        path: String,
        /// Underlying read or parse failure
        message: String,
    },

    /// Report directory could not be created
    #[error("Cannot create report directory {path}: {message}")]
    ReportDirFailed {
        /// Directory that could not be created
        path: String,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContarError {
    /// Unknown category error from any displayable name
    #[must_use]
    pub fn unknown_category(category: impl Into<String>) -> Self {
        Self::UnknownCategory {
            category: category.into(),
        }
    }

    /// Store read/parse failure tied to a path
    #[must_use]
    pub fn store_unreadable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StoreUnreadable {
            path: path.into(),
            message: message.into(),
        }
    }
}
