//! In-memory store benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docrepo_bench::{generate_docs, seeded_repository};
use docrepo_core::{Field, Filter};
use docrepo_memory::{MemoryConfig, MemoryStore};
use docrepo_repository::Repository;
use docrepo_testkit::TestDoc;
use serde_json::json;

/// Benchmark batch inserts.
fn bench_add_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_many");

    for batch_size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*batch_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            batch_size,
            |b, &batch_size| {
                let docs = generate_docs(batch_size, 8);
                b.iter(|| {
                    let repo: Repository<MemoryStore> =
                        Repository::new(MemoryStore::new(MemoryConfig::default()));
                    repo.add_many(black_box(&docs), ()).unwrap();
                });
            },
        );
    }
    group.finish();
}

/// Benchmark filtered scans.
fn bench_filtered_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_scan");

    for count in [100, 1000, 10000].iter() {
        let repo = seeded_repository(&generate_docs(*count, 16));
        let filter = Filter::<TestDoc>::eq("grouping_key", 3).and(Filter::gt("some_value", 500));

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("count", count), count, |b, _| {
            b.iter(|| black_box(repo.count(black_box(&filter), ()).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("get_all", count), count, |b, _| {
            b.iter(|| {
                let docs: Vec<TestDoc> = repo.get_all(black_box(&filter), ()).unwrap();
                black_box(docs)
            });
        });
    }
    group.finish();
}

/// Benchmark multi-document field updates.
fn bench_update_many_field(c: &mut Criterion) {
    let repo = seeded_repository(&generate_docs(1_000, 4));
    let filter = Filter::<TestDoc>::eq("grouping_key", 1);
    let mut flip = false;

    c.bench_function("update_many_field", |b| {
        b.iter(|| {
            flip = !flip;
            black_box(
                repo.update_many_field(&filter, Field::new("some_content"), json!(flip), ())
                    .unwrap(),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_add_many,
    bench_filtered_scan,
    bench_update_many_field
);
criterion_main!(benches);
