//! Store context contract.

use crate::handler::{Creator, Eraser, IndexHandler, Reader, Updater};
use std::sync::Arc;

/// A store driver's shared connection context.
///
/// The context owns the connection or session state and knows how to build
/// a handler for each capability. A repository shares its context read-only
/// with every handler it wires; closing connections is the context's own
/// business and happens when the last `Arc` is dropped.
pub trait StoreContext: Send + Sync + 'static {
    /// Handler inserting documents.
    type Creator: Creator;
    /// Handler querying documents.
    type Reader: Reader;
    /// Handler modifying documents.
    type Updater: Updater;
    /// Handler removing documents.
    type Eraser: Eraser;
    /// Handler managing indexes.
    type IndexHandler: IndexHandler;

    /// Builds the create handler.
    fn creator(self: &Arc<Self>) -> Self::Creator;

    /// Builds the read handler.
    fn reader(self: &Arc<Self>) -> Self::Reader;

    /// Builds the update handler.
    fn updater(self: &Arc<Self>) -> Self::Updater;

    /// Builds the delete handler.
    fn eraser(self: &Arc<Self>) -> Self::Eraser;

    /// Builds the index handler.
    fn index_handler(self: &Arc<Self>) -> Self::IndexHandler;
}
