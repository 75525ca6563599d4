//! Construct-once handler slots.

use docrepo_core::{RepositoryError, RepositoryResult};
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// Holds one capability handler, built on first use.
///
/// Each repository owns its own slots, so unrelated repositories never
/// contend. Concurrent first accesses block on the slot until the single
/// construction finishes and then share its result.
pub(crate) struct LazyHandler<H> {
    capability: &'static str,
    cell: OnceLock<H>,
}

impl<H> LazyHandler<H> {
    pub(crate) const fn new(capability: &'static str) -> Self {
        Self {
            capability,
            cell: OnceLock::new(),
        }
    }

    /// Returns the handler, building it with `build` if the slot is empty.
    pub(crate) fn get_or_wire(&self, build: impl FnOnce() -> H) -> &H {
        self.cell.get_or_init(|| {
            debug!(capability = self.capability, "wiring handler");
            build()
        })
    }

    /// Installs `handler` if the slot has not been wired yet.
    pub(crate) fn substitute(&self, handler: H) -> RepositoryResult<()> {
        self.cell
            .set(handler)
            .map_err(|_| RepositoryError::HandlerAlreadyWired {
                capability: self.capability,
            })?;
        debug!(capability = self.capability, "handler substituted");
        Ok(())
    }

    pub(crate) fn is_wired(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<H> fmt::Debug for LazyHandler<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyHandler")
            .field("capability", &self.capability)
            .field("wired", &self.is_wired())
            .finish()
    }
}
