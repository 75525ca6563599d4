//! Capability handlers of the in-memory store.
//!
//! Every handler checks the call's cancellation token before touching the
//! store and resolves the physical collection from the document type and
//! partition key.

mod create;
mod delete;
mod index;
mod read;
mod update;

pub use create::MemoryCreator;
pub use delete::MemoryEraser;
pub use index::MemoryIndexHandler;
pub use read::MemoryReader;
pub use update::MemoryUpdater;
