//! Facade overhead benchmarks.
//!
//! Compares calls through [`Repository`] with the same calls made directly
//! on a handler built from the store context.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docrepo_bench::{generate_docs, seeded_repository};
use docrepo_core::{CallOptions, Filter, Uuid};
use docrepo_repository::{Eraser, Reader, StoreContext};
use docrepo_testkit::TestDoc;

/// Benchmark a primary-key read through the facade and directly.
fn bench_get_by_id(c: &mut Criterion) {
    let docs = generate_docs(1_000, 10);
    let repo = seeded_repository(&docs);
    let reader = repo.context().reader();
    let id = *docs[500].id();
    let options = CallOptions::new();

    let mut group = c.benchmark_group("get_by_id");
    group.bench_function("facade", |b| {
        b.iter(|| {
            let doc: Option<TestDoc> = repo.get_by_id(black_box(&id), ()).unwrap();
            black_box(doc)
        });
    });
    group.bench_function("handler", |b| {
        b.iter(|| {
            let doc: Option<TestDoc> = reader
                .get_by_id::<TestDoc, Uuid>(black_box(&id), &options)
                .unwrap();
            black_box(doc)
        });
    });
    group.finish();
}

/// Benchmark a zero-match delete, which is dominated by dispatch cost.
fn bench_empty_delete(c: &mut Criterion) {
    let repo = seeded_repository(&generate_docs(100, 4));
    let eraser = repo.context().eraser();
    let filter = Filter::<TestDoc>::eq("grouping_key", 99);
    let options = CallOptions::new().partition("none");

    let mut group = c.benchmark_group("empty_delete");
    group.bench_function("facade", |b| {
        b.iter(|| black_box(repo.delete_many_by(black_box(&filter), "none").unwrap()));
    });
    group.bench_function("handler", |b| {
        b.iter(|| {
            black_box(
                eraser
                    .delete_many_by::<TestDoc, Uuid>(black_box(&filter), &options)
                    .unwrap(),
            )
        });
    });
    group.finish();
}

criterion_group!(benches, bench_get_by_id, bench_empty_delete);
criterion_main!(benches);
