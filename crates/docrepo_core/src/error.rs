//! Error types shared by the repository facade and its handlers.

use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can surface from a repository call.
///
/// The facade never produces these itself (except [`HandlerAlreadyWired`]);
/// they are raised by capability handlers and propagated unchanged.
///
/// [`HandlerAlreadyWired`]: RepositoryError::HandlerAlreadyWired
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store could not be reached.
    #[error("connection error: {message}")]
    Connection {
        /// Description of the connectivity failure.
        message: String,
    },

    /// The caller is not allowed to perform the operation.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Description of the authorization failure.
        message: String,
    },

    /// The store did not answer in time.
    #[error("operation timed out: {message}")]
    Timeout {
        /// Description of the timed out operation.
        message: String,
    },

    /// The call's cancellation token was triggered.
    #[error("operation cancelled")]
    Cancelled,

    /// A filter could not be translated or evaluated.
    #[error("invalid filter: {message}")]
    InvalidFilter {
        /// Description of the filter problem.
        message: String,
    },

    /// An index with conflicting definition already exists.
    #[error("index conflict: {message}")]
    IndexConflict {
        /// Description of the conflict.
        message: String,
    },

    /// The named index does not exist.
    #[error("index not found: {name}")]
    IndexNotFound {
        /// Name of the missing index.
        name: String,
    },

    /// A document with the same key already exists.
    #[error("duplicate key {key} in collection {collection}")]
    DuplicateKey {
        /// Collection the insert targeted.
        collection: String,
        /// Rendered key value.
        key: String,
    },

    /// A document could not be converted to or from its stored form.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A handler was substituted after it had already been constructed.
    #[error("{capability} handler is already wired")]
    HandlerAlreadyWired {
        /// Capability family of the handler (e.g. "eraser").
        capability: &'static str,
    },
}

impl RepositoryError {
    /// Creates a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates an invalid filter error.
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }

    /// Creates an index conflict error.
    pub fn index_conflict(message: impl Into<String>) -> Self {
        Self::IndexConflict {
            message: message.into(),
        }
    }

    /// Creates an index not found error.
    pub fn index_not_found(name: impl Into<String>) -> Self {
        Self::IndexNotFound { name: name.into() }
    }

    /// Creates a duplicate key error.
    pub fn duplicate_key(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            collection: collection.into(),
            key: key.into(),
        }
    }

    /// Returns true if this error was caused by cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
