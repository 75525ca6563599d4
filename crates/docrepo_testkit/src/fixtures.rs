//! Document and event fixtures.
//!
//! Field names mirror what store-level tests filter, project and index on:
//! `some_content`, `some_value`, `grouping_key` and `nested.some_date`.

use docrepo_core::{
    BusinessEntity, Document, DocumentKey, EntityBase, EventLedger, KeyComponent, KeyGenerator,
    LedgerChange, LedgerSink, LocalEvent,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain events raised by fixture documents.
#[derive(Debug, Clone, PartialEq)]
pub enum TestEvent {
    /// The document was created.
    Created,
    /// The content changed.
    ContentChanged(String),
    /// The value was adjusted by the given amount.
    ValueAdjusted(i64),
}

/// Nested sub-document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nested {
    /// ISO-8601 date string.
    pub some_date: String,
    /// Arbitrary amount.
    pub some_amount: f64,
}

impl Default for Nested {
    fn default() -> Self {
        Self {
            some_date: "2024-01-01".to_string(),
            some_amount: 0.0,
        }
    }
}

/// Document keyed by the default key type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDoc {
    /// Id and event ledger.
    #[serde(flatten)]
    pub base: EntityBase<Uuid, TestEvent>,
    /// Free text.
    pub some_content: String,
    /// Numeric value.
    pub some_value: i64,
    /// Value shared by related documents.
    pub grouping_key: i32,
    /// Nested sub-document.
    pub nested: Nested,
}

impl TestDoc {
    /// Creates a document with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base(EntityBase::generate())
    }

    /// Creates a document around an existing entity core.
    #[must_use]
    pub fn with_base(base: EntityBase<Uuid, TestEvent>) -> Self {
        Self {
            base,
            some_content: String::new(),
            some_value: 0,
            grouping_key: 0,
            nested: Nested::default(),
        }
    }

    /// Sets `some_content`.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.some_content = content.into();
        self
    }

    /// Sets `some_value`.
    #[must_use]
    pub fn value(mut self, value: i64) -> Self {
        self.some_value = value;
        self
    }

    /// Sets `grouping_key`.
    #[must_use]
    pub fn group(mut self, grouping_key: i32) -> Self {
        self.grouping_key = grouping_key;
        self
    }

    /// Returns the id.
    #[must_use]
    pub fn id(&self) -> &Uuid {
        self.base.id()
    }
}

impl Default for TestDoc {
    fn default() -> Self {
        Self::new()
    }
}

impl Document<Uuid> for TestDoc {
    fn id(&self) -> &Uuid {
        self.base.id()
    }
}

impl BusinessEntity for TestDoc {
    type Event = TestEvent;

    fn keys(&self) -> Vec<KeyComponent> {
        self.base.keys()
    }

    fn ledger(&self) -> &EventLedger<TestEvent> {
        self.base.ledger()
    }

    fn ledger_mut(&mut self) -> &mut EventLedger<TestEvent> {
        self.base.ledger_mut()
    }
}

/// Document generic over its key type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDocWithKey<K> {
    /// Id and event ledger.
    #[serde(flatten)]
    pub base: EntityBase<K, TestEvent>,
    /// Free text.
    pub some_content: String,
    /// Value shared by related documents.
    pub grouping_key: i32,
}

impl<K: DocumentKey> TestDocWithKey<K> {
    /// Creates a document with the given id.
    pub fn with_id(id: K) -> Self {
        Self {
            base: EntityBase::new(id),
            some_content: String::new(),
            grouping_key: 0,
        }
    }

    /// Creates a document with a generated id.
    #[must_use]
    pub fn generated() -> Self
    where
        K: KeyGenerator,
    {
        Self::with_id(K::generate())
    }

    /// Sets `some_content`.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.some_content = content.into();
        self
    }

    /// Sets `grouping_key`.
    #[must_use]
    pub fn group(mut self, grouping_key: i32) -> Self {
        self.grouping_key = grouping_key;
        self
    }
}

impl<K: DocumentKey> Document<K> for TestDocWithKey<K> {
    fn id(&self) -> &K {
        self.base.id()
    }
}

/// Document that routes itself to a partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionedTestDoc {
    /// Id and event ledger.
    #[serde(flatten)]
    pub base: EntityBase<Uuid, TestEvent>,
    /// Partition this document lives in.
    pub partition: String,
    /// Free text.
    pub some_content: String,
}

impl PartitionedTestDoc {
    /// Creates a document in the given partition.
    pub fn new(partition: impl Into<String>) -> Self {
        Self {
            base: EntityBase::generate(),
            partition: partition.into(),
            some_content: String::new(),
        }
    }
}

impl Document<Uuid> for PartitionedTestDoc {
    fn id(&self) -> &Uuid {
        self.base.id()
    }

    fn collection_name() -> String {
        "partitioned_docs".to_string()
    }

    fn partition_key(&self) -> Option<&str> {
        Some(&self.partition)
    }
}

/// Projection of [`TestDoc`] onto its key and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentProjection {
    /// Document key.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Projected content.
    pub some_content: String,
}

/// Ledger sink remembering every notification in order.
#[derive(Debug)]
pub struct RecordingSink<E> {
    changes: Mutex<Vec<LedgerChange<E>>>,
}

impl<E: LocalEvent> RecordingSink<E> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            changes: Mutex::new(Vec::new()),
        }
    }

    /// Returns the recorded notifications.
    pub fn changes(&self) -> Vec<LedgerChange<E>> {
        self.changes.lock().clone()
    }
}

impl<E: LocalEvent> Default for RecordingSink<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: LocalEvent> LedgerSink<E> for RecordingSink<E> {
    fn added(&self, event: &E) {
        self.changes.lock().push(LedgerChange::Added(event.clone()));
    }

    fn removed(&self, event: &E) {
        self.changes.lock().push(LedgerChange::Removed(event.clone()));
    }

    fn cleared(&self, snapshot: &[E]) {
        self.changes
            .lock()
            .push(LedgerChange::Cleared(snapshot.to_vec()));
    }
}
