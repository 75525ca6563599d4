//! # docrepo memory
//!
//! In-memory store driver for docrepo.
//!
//! This crate provides:
//! - [`MemoryStore`], a thread-safe store context holding collections in memory
//! - One handler per capability, implementing the `docrepo_repository` contracts
//! - [`MemoryConfig`] for naming and partitioning behaviour
//!
//! Filters are evaluated directly against each document's JSON form. Index
//! definitions are tracked and validated; unique indexes are enforced on
//! writes, other options are recorded only.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod handler;
mod store;

pub use config::MemoryConfig;
pub use handler::{MemoryCreator, MemoryEraser, MemoryIndexHandler, MemoryReader, MemoryUpdater};
pub use store::MemoryStore;
