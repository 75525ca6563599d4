//! # docrepo testkit
//!
//! Test utilities for docrepo.
//!
//! This crate provides:
//! - Document and event fixtures with default and custom key types
//! - A recording store context that captures every delegated call
//! - Property-based test generators using proptest
//! - Opt-in log output for tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docrepo_testkit::prelude::*;
//!
//! #[test]
//! fn delete_forwards_partition() {
//!     let repo: Repository<RecordingContext> = Repository::new(RecordingContext::new());
//!     repo.delete_many_by(&Filter::<TestDoc>::all(), "eu").unwrap();
//!     assert_eq!(repo.context().calls()[0].partition_key.as_deref(), Some("eu"));
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod recording;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::init_tracing;
    pub use crate::recording::*;
    pub use docrepo_repository::prelude::*;
}

pub use fixtures::*;
pub use generators::*;
pub use recording::*;

/// Installs a `tracing` subscriber writing to the test harness.
///
/// Filtering follows `RUST_LOG` (default `warn`). Safe to call from every
/// test; only the first call installs anything.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
