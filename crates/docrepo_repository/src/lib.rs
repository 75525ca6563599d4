//! # docrepo repository
//!
//! A generic repository facade over document stores.
//!
//! This crate provides:
//! - Capability handler contracts ([`Creator`], [`Reader`], [`Updater`],
//!   [`Eraser`], [`IndexHandler`]) implemented by store drivers
//! - The [`StoreContext`] contract a driver's connection context fulfils
//! - [`Repository`], which wires handlers lazily and exposes every
//!   operation in blocking and async form, for its default key type or any
//!   other
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docrepo_repository::prelude::*;
//!
//! let repo: Repository<MemoryStore> = Repository::new(store);
//! repo.add_one(&invoice, ())?;
//! let paid = repo.count(&Filter::<Invoice>::eq("paid", true), "tenant-a")?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod context;
pub mod handler;
mod lazy;
mod repository;

pub use context::StoreContext;
pub use handler::{Creator, Eraser, IndexHandler, Reader, Updater};
pub use repository::Repository;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::StoreContext;
    pub use crate::handler::{Creator, Eraser, IndexHandler, Reader, Updater};
    pub use crate::repository::Repository;
    pub use docrepo_core::{
        BusinessEntity, CallOptions, CancellationToken, DefaultKey, Document, DocumentKey,
        EntityBase, Field, Filter, IndexCreationOptions, Projection, RepositoryError,
        RepositoryResult,
    };
}
