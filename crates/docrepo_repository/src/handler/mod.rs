//! Capability handler contracts.
//!
//! Each contract covers one operation family and is implemented by a store
//! driver. Every operation has a synchronous form, which blocks for the
//! round trip, and an `_async` form. The provided async forms run the
//! synchronous path inline; drivers doing blocking I/O override them.
//!
//! Handlers receive fully normalized [`CallOptions`] and are responsible for
//! honouring an already-triggered cancellation token.
//!
//! [`CallOptions`]: docrepo_core::CallOptions

mod create;
mod delete;
mod index;
mod read;
mod update;

pub use create::Creator;
pub use delete::Eraser;
pub use index::IndexHandler;
pub use read::Reader;
pub use update::Updater;
