//! Property-based test generators using proptest.
//!
//! Provides strategies for keys, call options, fixture documents and
//! sequences of ledger operations.

use crate::fixtures::{Nested, TestDoc, TestEvent};
use docrepo_core::{CallOptions, CancellationToken, EntityBase};
use proptest::prelude::*;
use uuid::Uuid;

/// Strategy for generating document ids.
pub fn uuid_strategy() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// Strategy for generating partition keys.
pub fn partition_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,15}").expect("Invalid regex")
}

/// Strategy for generating dotted field paths.
pub fn field_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::string::string_regex("[a-z][a-z_]{0,11}").expect("Invalid regex"),
        1..4,
    )
    .prop_map(|segments| segments.join("."))
}

/// Strategy for generating call options.
///
/// Tokens are never triggered; cancellable and never-cancelled tokens are
/// both produced.
pub fn call_options_strategy() -> impl Strategy<Value = CallOptions> {
    (prop::option::of(partition_key_strategy()), any::<bool>()).prop_map(
        |(partition, cancellable)| {
            let token = if cancellable {
                CancellationToken::new()
            } else {
                CancellationToken::none()
            };
            CallOptions {
                partition_key: partition,
                cancellation: token,
            }
        },
    )
}

/// Strategy for generating domain events.
pub fn test_event_strategy() -> impl Strategy<Value = TestEvent> {
    prop_oneof![
        1 => Just(TestEvent::Created),
        2 => "[a-z ]{0,12}".prop_map(TestEvent::ContentChanged),
        2 => (-100_i64..100).prop_map(TestEvent::ValueAdjusted),
    ]
}

/// Strategy for generating fixture documents with distinct ids.
pub fn test_doc_strategy() -> impl Strategy<Value = TestDoc> {
    (
        uuid_strategy(),
        "[a-z]{0,16}",
        any::<i64>(),
        0_i32..8,
        -1.0e6_f64..1.0e6,
    )
        .prop_map(|(id, content, value, group, amount)| {
            let mut doc = TestDoc::with_base(EntityBase::new(id))
                .content(content)
                .value(value)
                .group(group);
            doc.nested = Nested {
                some_amount: amount,
                ..Nested::default()
            };
            doc
        })
}

/// A ledger mutation.
#[derive(Debug, Clone)]
pub enum LedgerOperation {
    /// Record an event.
    Add(TestEvent),
    /// Remove the first equal event.
    Remove(TestEvent),
    /// Remove every event.
    Clear,
}

/// Strategy for generating ledger operations.
pub fn ledger_operation_strategy() -> impl Strategy<Value = LedgerOperation> {
    prop_oneof![
        4 => test_event_strategy().prop_map(LedgerOperation::Add),
        2 => test_event_strategy().prop_map(LedgerOperation::Remove),
        1 => Just(LedgerOperation::Clear),
    ]
}

/// Strategy for generating a sequence of ledger operations.
pub fn ledger_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<LedgerOperation>> {
    prop::collection::vec(ledger_operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
