//! # docrepo core
//!
//! Data model shared by the docrepo facade, its handlers and store drivers.
//!
//! This crate provides:
//! - Document keys and the document contract
//! - Business entities with an in-memory ledger of local events
//! - Typed field selectors, filters and projections
//! - Index definitions
//! - Per-call options (partition key, cancellation)
//! - The error taxonomy every handler reports through
//!
//! Nothing here performs I/O.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod document;
pub mod entity;
mod error;
pub mod filter;
mod index;
mod key;
mod options;

pub use document::{
    default_collection_name, partitioned_collection_name, DefaultKeyDocument, Document,
};
pub use entity::{
    BusinessEntity, EntityBase, EventLedger, LedgerChange, LedgerFeed, LedgerNotification,
    LedgerSink, LocalEvent,
};
pub use error::{RepositoryError, RepositoryResult};
pub use filter::{CompareOp, Field, Filter, FilterExpr, Projection, ID_FIELD};
pub use index::{
    default_index_name, IndexCreationOptions, IndexKey, IndexKind, IndexModel, ID_INDEX_NAME,
};
pub use key::{DefaultKey, DocumentKey, KeyComponent, KeyGenerator};
pub use options::{CallOptions, CancellationToken};
pub use uuid::Uuid;
