//! Per-call options: partition key and cancellation.
//!
//! Every repository entry point takes a trailing `impl Into<CallOptions>`,
//! so callers pass only the optional arguments they care about:
//!
//! ```rust,ignore
//! repo.delete_many_by(filter.clone(), ())?;                   // unpartitioned, never cancelled
//! repo.delete_many_by(filter.clone(), "tenant-a")?;           // partitioned
//! repo.delete_many_by(filter.clone(), token.clone())?;        // cancellable
//! repo.delete_many_by(filter, ("tenant-a", token))?;          // both
//! ```

use crate::error::{RepositoryError, RepositoryResult};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal shared between a caller and a handler.
///
/// Clones observe the same flag. A token created with [`none`] can never be
/// triggered.
///
/// [`none`]: CancellationToken::none
#[derive(Clone, Default)]
pub struct CancellationToken {
    flag: Option<Arc<AtomicBool>>,
}

impl CancellationToken {
    /// Creates a token that can be cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Some(Arc::new(AtomicBool::new(false))),
        }
    }

    /// Creates a token that is never cancelled.
    #[must_use]
    pub const fn none() -> Self {
        Self { flag: None }
    }

    /// Creates a token that is already cancelled.
    #[must_use]
    pub fn cancelled() -> Self {
        let token = Self::new();
        token.cancel();
        token
    }

    /// Triggers cancellation. Has no effect on a never-cancelled token.
    pub fn cancel(&self) {
        if let Some(flag) = &self.flag {
            flag.store(true, Ordering::SeqCst);
        }
    }

    /// Returns true once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Returns true if this token can never be cancelled.
    #[must_use]
    pub fn can_be_cancelled(&self) -> bool {
        self.flag.is_some()
    }

    /// Returns `Err(Cancelled)` if cancellation has been requested.
    pub fn error_if_cancelled(&self) -> RepositoryResult<()> {
        if self.is_cancelled() {
            Err(RepositoryError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.flag {
            None => write!(f, "CancellationToken(none)"),
            Some(_) => write!(f, "CancellationToken(cancelled: {})", self.is_cancelled()),
        }
    }
}

/// Optional trailing arguments of a repository call.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Partition the call is scoped to. `None` targets the unpartitioned
    /// collection.
    pub partition_key: Option<String>,
    /// Cancellation signal honoured by the handler.
    pub cancellation: CancellationToken,
}

impl CallOptions {
    /// Creates options with no partition and a never-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the partition key.
    #[must_use]
    pub fn partition(mut self, partition_key: impl Into<String>) -> Self {
        self.partition_key = Some(partition_key.into());
        self
    }

    /// Sets the cancellation token.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Returns the partition key as a string slice.
    #[must_use]
    pub fn partition_key(&self) -> Option<&str> {
        self.partition_key.as_deref()
    }

    /// Resolves the partition for a document-based call: the explicit
    /// partition key wins, otherwise the document's own.
    #[must_use]
    pub fn partition_or<'a>(&'a self, document_partition: Option<&'a str>) -> Option<&'a str> {
        self.partition_key().or(document_partition)
    }
}

impl From<()> for CallOptions {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl From<&str> for CallOptions {
    fn from(partition_key: &str) -> Self {
        Self::new().partition(partition_key)
    }
}

impl From<String> for CallOptions {
    fn from(partition_key: String) -> Self {
        Self::new().partition(partition_key)
    }
}

impl From<Option<&str>> for CallOptions {
    fn from(partition_key: Option<&str>) -> Self {
        Self {
            partition_key: partition_key.map(str::to_string),
            cancellation: CancellationToken::none(),
        }
    }
}

impl From<CancellationToken> for CallOptions {
    fn from(token: CancellationToken) -> Self {
        Self::new().cancellation(token)
    }
}

impl From<(&str, CancellationToken)> for CallOptions {
    fn from((partition_key, token): (&str, CancellationToken)) -> Self {
        Self::new().partition(partition_key).cancellation(token)
    }
}

impl From<(String, CancellationToken)> for CallOptions {
    fn from((partition_key, token): (String, CancellationToken)) -> Self {
        Self::new().partition(partition_key).cancellation(token)
    }
}
