//! End-to-end tests of the facade over the in-memory store.

use docrepo_core::{
    BusinessEntity, CallOptions, CancellationToken, Field, Filter, IndexCreationOptions,
    LedgerChange, Projection, RepositoryError,
};
use docrepo_memory::{MemoryConfig, MemoryStore};
use docrepo_repository::Repository;
use docrepo_testkit::{
    init_tracing, ledger_sequence_strategy, test_doc_strategy, ContentProjection, LedgerOperation,
    PartitionedTestDoc, PropTestConfig, RecordingSink, TestDoc, TestDocWithKey, TestEvent,
};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

fn repo() -> Repository<MemoryStore> {
    init_tracing();
    Repository::new(MemoryStore::new(MemoryConfig::default()))
}

fn seeded(repo: &Repository<MemoryStore>) -> Vec<TestDoc> {
    let docs: Vec<TestDoc> = (0..5)
        .map(|i| {
            TestDoc::new()
                .content(format!("content-{i}"))
                .value(i64::from(i) * 10)
                .group(i % 2)
        })
        .collect();
    repo.add_many(&docs, ()).unwrap();
    docs
}

// ============================================================================
// Create / read
// ============================================================================

#[test]
fn added_document_reads_back() {
    let repo = repo();
    let doc = TestDoc::new().content("hello").value(7);
    repo.add_one(&doc, ()).unwrap();

    let loaded: TestDoc = repo.get_by_id(doc.id(), ()).unwrap().unwrap();
    assert_eq!(loaded, doc);
    assert_eq!(loaded.keys()[0].downcast_ref::<Uuid>(), Some(doc.id()));
    assert_eq!(repo.context().document_count("testdocs"), 1);
}

#[test]
fn missing_id_reads_none() {
    let repo = repo();
    assert!(repo
        .get_by_id::<TestDoc>(&Uuid::new_v4(), ())
        .unwrap()
        .is_none());
}

#[test]
fn duplicate_key_is_rejected() {
    let repo = repo();
    let doc = TestDoc::new();
    repo.add_one(&doc, ()).unwrap();

    let err = repo.add_one(&doc, ()).unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateKey { .. }));
}

#[test]
fn add_many_stops_at_first_failure() {
    let repo = repo();
    let first = TestDoc::new();
    let third = TestDoc::new();
    let batch = vec![first.clone(), first.clone(), third.clone()];

    assert!(repo.add_many(&batch, ()).is_err());
    assert!(repo.get_by_id::<TestDoc>(first.id(), ()).unwrap().is_some());
    assert!(repo.get_by_id::<TestDoc>(third.id(), ()).unwrap().is_none());
}

#[test]
fn filtered_reads() {
    let repo = repo();
    let docs = seeded(&repo);

    let even = Filter::<TestDoc>::eq("grouping_key", 0);
    assert_eq!(repo.count(&even, ()).unwrap(), 3);
    assert_eq!(repo.get_all(&even, ()).unwrap().len(), 3);
    assert!(repo.any(&Filter::<TestDoc>::gt("some_value", 30), ()).unwrap());
    assert!(!repo.any(&Filter::<TestDoc>::gt("some_value", 40), ()).unwrap());

    let first: TestDoc = repo
        .get_one(&Filter::eq("some_content", "content-3"), ())
        .unwrap()
        .unwrap();
    assert_eq!(first.id(), docs[3].id());

    let nested = Filter::<TestDoc>::eq("nested.some_date", "2024-01-01");
    assert_eq!(repo.count(&nested, ()).unwrap(), 5);
}

#[test]
fn malformed_filter_is_rejected() {
    let repo = repo();
    let err = repo
        .count(&Filter::<TestDoc>::eq("nested..some_date", 1), ())
        .unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidFilter { .. }));
}

#[test]
fn projections() {
    let repo = repo();
    let docs = seeded(&repo);
    let projection = Projection::<TestDoc>::new(["some_content"]);

    let one: ContentProjection = repo
        .project_one(&Filter::by_id(docs[1].id()).unwrap(), &projection, ())
        .unwrap()
        .unwrap();
    assert_eq!(
        one,
        ContentProjection {
            id: *docs[1].id(),
            some_content: "content-1".to_string()
        }
    );

    let many: Vec<ContentProjection> = repo
        .project_many(&Filter::eq("grouping_key", 1), &projection, ())
        .unwrap();
    assert_eq!(many.len(), 2);
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn update_one_replaces_existing_only() {
    let repo = repo();
    let doc = TestDoc::new().content("before");
    assert!(!repo.update_one(&doc, ()).unwrap());

    repo.add_one(&doc, ()).unwrap();
    let changed = doc.clone().content("after");
    assert!(repo.update_one(&changed, ()).unwrap());

    let loaded: TestDoc = repo.get_by_id(doc.id(), ()).unwrap().unwrap();
    assert_eq!(loaded.some_content, "after");
}

#[test]
fn field_updates_count_modified_documents() {
    let repo = repo();
    seeded(&repo);

    let odd = Filter::<TestDoc>::eq("grouping_key", 1);
    assert!(repo
        .update_one_field(&odd, Field::new("some_content"), json!("patched"), ())
        .unwrap());
    assert_eq!(
        repo.count(&Filter::<TestDoc>::eq("some_content", "patched"), ())
            .unwrap(),
        1
    );

    let all = Filter::<TestDoc>::all();
    assert_eq!(
        repo.update_many_field(&all, Field::new("some_content"), json!("patched"), ())
            .unwrap(),
        4
    );
    assert_eq!(
        repo.update_many_field(&all, Field::new("nested.some_amount"), json!(1.5), ())
            .unwrap(),
        5
    );
}

#[test]
fn key_field_is_immutable() {
    let repo = repo();
    seeded(&repo);
    let err = repo
        .update_many_field(
            &Filter::<TestDoc>::all(),
            Field::id(),
            json!(Uuid::new_v4()),
            (),
        )
        .unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidFilter { .. }));
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn delete_by_id_filter_removes_once() {
    let repo = repo();
    let docs = seeded(&repo);
    let by_id = Filter::<TestDoc>::by_id(docs[0].id()).unwrap();

    assert_eq!(repo.delete_one_by(&by_id, ()).unwrap(), 1);
    assert_eq!(repo.delete_one_by(&by_id, ()).unwrap(), 0);
    assert_eq!(repo.count(&Filter::<TestDoc>::all(), ()).unwrap(), 4);
}

#[test]
fn delete_variants() {
    let repo = repo();
    let docs = seeded(&repo);

    assert_eq!(repo.delete_one(&docs[0], ()).unwrap(), 1);
    assert_eq!(repo.delete_many(&docs[..3], ()).unwrap(), 2);
    assert_eq!(
        repo.delete_many_by(&Filter::<TestDoc>::eq("some_content", "nope"), ())
            .unwrap(),
        0
    );
    assert_eq!(
        repo.delete_many_by(&Filter::<TestDoc>::all(), ()).unwrap(),
        2
    );
}

// ============================================================================
// Partitions
// ============================================================================

#[test]
fn documents_route_to_their_partition() {
    let repo = repo();
    let doc = PartitionedTestDoc::new("tenant-a");
    repo.add_one(&doc, ()).unwrap();

    let store = repo.context();
    assert_eq!(store.document_count("tenant-a-partitioned_docs"), 1);
    assert_eq!(store.document_count("partitioned_docs"), 0);

    let id = *doc.base.id();
    assert!(repo
        .get_by_id::<PartitionedTestDoc>(&id, "tenant-a")
        .unwrap()
        .is_some());
    assert!(repo
        .get_by_id::<PartitionedTestDoc>(&id, ())
        .unwrap()
        .is_none());
}

#[test]
fn explicit_partition_overrides_document_partition() {
    let repo = repo();
    let doc = PartitionedTestDoc::new("tenant-a");
    repo.add_one(&doc, "tenant-b").unwrap();

    assert_eq!(repo.context().document_count("tenant-b-partitioned_docs"), 1);
    assert_eq!(repo.delete_one(&doc, ()).unwrap(), 0);
    assert_eq!(repo.delete_one(&doc, "tenant-b").unwrap(), 1);
}

#[test]
fn partitions_are_isolated() {
    let repo = repo();
    repo.add_one(&TestDoc::new(), "eu").unwrap();
    repo.add_one(&TestDoc::new(), "us").unwrap();
    repo.add_one(&TestDoc::new(), "us").unwrap();

    let all = Filter::<TestDoc>::all();
    assert_eq!(repo.count(&all, "eu").unwrap(), 1);
    assert_eq!(repo.count(&all, "us").unwrap(), 2);
    assert_eq!(repo.count(&all, ()).unwrap(), 0);
    assert_eq!(
        repo.context().collection_names(),
        vec!["eu-testdocs".to_string(), "us-testdocs".to_string()]
    );
}

#[test]
fn writes_that_match_nothing_create_no_collections() {
    let repo = repo();
    let all = Filter::<TestDoc>::all();
    for partition in ["t1", "t2", "t3"] {
        assert_eq!(repo.delete_many_by(&all, partition).unwrap(), 0);
    }
    assert!(matches!(
        repo.drop_index::<TestDoc>("nope", "t4"),
        Err(RepositoryError::IndexNotFound { .. })
    ));
    assert_eq!(
        repo.update_many_field(&all, Field::new("some_content"), json!("x"), "t5")
            .unwrap(),
        0
    );
    assert!(!repo.update_one(&TestDoc::new(), "t6").unwrap());
    assert_eq!(repo.delete_one(&TestDoc::new(), "t7").unwrap(), 0);
    assert!(repo.context().collection_names().is_empty());
}

#[test]
fn custom_separator() {
    init_tracing();
    let repo: Repository<MemoryStore> =
        Repository::new(MemoryStore::new(MemoryConfig::new().partition_separator("::")));
    repo.add_one(&TestDoc::new(), "eu").unwrap();
    assert_eq!(repo.context().document_count("eu::testdocs"), 1);
}

// ============================================================================
// Indexes
// ============================================================================

#[test]
fn created_indexes_are_listed() {
    let repo = repo();
    let name = repo
        .create_ascending_index(Field::<TestDoc>::new("some_content"), None, ())
        .unwrap();
    assert_eq!(name, "some_content_1");

    let hashed = repo
        .create_hashed_index(Field::<TestDoc>::new("grouping_key"), None, ())
        .unwrap();
    let descending = repo
        .create_descending_index(Field::<TestDoc>::new("nested.some_date"), None, ())
        .unwrap();

    assert_eq!(
        repo.get_index_names::<TestDoc>(()).unwrap(),
        vec![
            "_id_".to_string(),
            name,
            hashed,
            descending.clone(),
        ]
    );
    assert_eq!(descending, "nested.some_date_-1");
}

#[test]
fn text_indexes() {
    let repo = repo();
    let combined = repo
        .create_combined_text_index(
            vec![
                Field::<TestDoc>::new("some_content"),
                Field::new("nested.some_date"),
            ],
            None,
            (),
        )
        .unwrap();
    assert_eq!(combined, "some_content_text_nested.some_date_text");

    let err = repo
        .create_text_index(Field::<TestDoc>::new("other"), None, ())
        .unwrap_err();
    assert!(matches!(err, RepositoryError::IndexConflict { .. }));
}

#[test]
fn recreating_an_identical_index_is_a_no_op() {
    let repo = repo();
    let field = Field::<TestDoc>::new("some_value");
    let first = repo
        .create_ascending_index(field.clone(), None, ())
        .unwrap();
    let second = repo.create_ascending_index(field, None, ()).unwrap();
    assert_eq!(first, second);
    assert_eq!(repo.get_index_names::<TestDoc>(()).unwrap().len(), 2);
}

#[test]
fn unique_index_is_enforced() {
    let repo = repo();
    repo.create_ascending_index(
        Field::<TestDoc>::new("some_content"),
        Some(IndexCreationOptions::new().name("unique_content").unique(true)),
        (),
    )
    .unwrap();

    repo.add_one(&TestDoc::new().content("same"), ()).unwrap();
    let err = repo
        .add_one(&TestDoc::new().content("same"), ())
        .unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateKey { .. }));
}

#[test]
fn dropping_indexes() {
    let repo = repo();
    let name = repo
        .create_ascending_index(Field::<TestDoc>::new("some_value"), None, ())
        .unwrap();
    repo.drop_index::<TestDoc>(&name, ()).unwrap();
    assert_eq!(
        repo.get_index_names::<TestDoc>(()).unwrap(),
        vec!["_id_".to_string()]
    );

    assert!(matches!(
        repo.drop_index::<TestDoc>(&name, ()).unwrap_err(),
        RepositoryError::IndexNotFound { .. }
    ));
    assert!(matches!(
        repo.drop_index::<TestDoc>("_id_", ()).unwrap_err(),
        RepositoryError::IndexConflict { .. }
    ));
}

// ============================================================================
// Keys, cancellation, ledger
// ============================================================================

#[test]
fn non_default_keys() {
    let repo = repo();
    let doc = TestDocWithKey::<i64>::with_id(7).content("seven");
    repo.add_one_keyed::<TestDocWithKey<i64>, i64>(&doc, ())
        .unwrap();

    let loaded = repo
        .get_by_id_keyed::<TestDocWithKey<i64>, i64>(&7, ())
        .unwrap();
    assert_eq!(loaded, Some(doc));
    assert_eq!(repo.context().document_count("testdocwithkeys"), 1);

    let string_keyed: Repository<MemoryStore, String> =
        Repository::from_shared(Arc::clone(repo.context()));
    let doc = TestDocWithKey::<String>::generated();
    string_keyed.add_one(&doc, "eu").unwrap();
    assert_eq!(
        string_keyed
            .count(&Filter::<TestDocWithKey<String>>::all(), "eu")
            .unwrap(),
        1
    );
}

#[test]
fn cancelled_calls_do_not_touch_the_store() {
    let repo = repo();
    let token = CancellationToken::new();
    token.cancel();

    let err = repo.add_one(&TestDoc::new(), token.clone()).unwrap_err();
    assert!(err.is_cancelled());
    assert!(repo.context().collection_names().is_empty());

    let options = CallOptions::new().partition("eu").cancellation(token);
    assert!(repo
        .delete_many_by(&Filter::<TestDoc>::all(), options)
        .unwrap_err()
        .is_cancelled());
}

#[test]
fn ledger_is_not_persisted() {
    let repo = repo();
    let sink = Arc::new(RecordingSink::<TestEvent>::new());
    let mut doc = TestDoc::new();
    doc.base.attach_sink(sink.clone());
    doc.add_local_event(TestEvent::Created);
    doc.add_local_event(TestEvent::ValueAdjusted(3));

    repo.add_one(&doc, ()).unwrap();
    let loaded: TestDoc = repo.get_by_id(doc.id(), ()).unwrap().unwrap();
    assert!(loaded.local_events().is_empty());

    let drained = doc.clear_local_events();
    assert_eq!(drained.len(), 2);
    assert_eq!(
        sink.changes().last(),
        Some(&LedgerChange::Cleared(vec![
            TestEvent::Created,
            TestEvent::ValueAdjusted(3)
        ]))
    );
}

#[tokio::test]
async fn async_round_trip() {
    let repo = repo();
    let doc = TestDoc::new().content("async");

    repo.add_one_async(&doc, ()).await.unwrap();
    let loaded: Option<TestDoc> = repo.get_by_id_async(doc.id(), ()).await.unwrap();
    assert_eq!(loaded.as_ref(), Some(&doc));

    let filter = Filter::<TestDoc>::by_id(doc.id()).unwrap();
    assert_eq!(repo.delete_one_by_async(&filter, ()).await.unwrap(), 1);
    assert_eq!(repo.count_async(&Filter::<TestDoc>::all(), ()).await.unwrap(), 0);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn stored_documents_read_back_unchanged(doc in test_doc_strategy()) {
        let repo = repo();
        repo.add_one(&doc, ()).unwrap();
        let loaded: Option<TestDoc> = repo.get_by_id(doc.id(), ()).unwrap();
        prop_assert_eq!(loaded, Some(doc));
    }

    #[test]
    fn ledger_matches_model_and_notifies_every_operation(
        ops in ledger_sequence_strategy(0, 24)
    ) {
        let sink = Arc::new(RecordingSink::<TestEvent>::new());
        let mut doc = TestDoc::new();
        doc.base.attach_sink(sink.clone());
        let mut model: Vec<TestEvent> = Vec::new();
        let mut expected = Vec::new();

        for op in ops {
            match op {
                LedgerOperation::Add(event) => {
                    doc.add_local_event(event.clone());
                    model.push(event.clone());
                    expected.push(LedgerChange::Added(event));
                }
                LedgerOperation::Remove(event) => {
                    let present = model.iter().position(|e| *e == event);
                    prop_assert_eq!(doc.remove_local_event(&event), present.is_some());
                    if let Some(index) = present {
                        model.remove(index);
                    }
                    expected.push(LedgerChange::Removed(event));
                }
                LedgerOperation::Clear => {
                    let drained = doc.clear_local_events();
                    prop_assert_eq!(&drained, &model);
                    model.clear();
                    expected.push(LedgerChange::Cleared(drained));
                }
            }
            prop_assert_eq!(doc.local_events(), model.as_slice());
        }
        prop_assert_eq!(sink.changes(), expected);
    }
}
