//! Benchmark utilities.

use docrepo_memory::{MemoryConfig, MemoryStore};
use docrepo_repository::Repository;
use docrepo_testkit::TestDoc;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate random document content of the specified length.
pub fn random_content(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate documents spread over `groups` grouping keys.
pub fn generate_docs(count: usize, groups: i32) -> Vec<TestDoc> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            TestDoc::new()
                .content(random_content(32))
                .value(rng.gen_range(0..1_000))
                .group(rng.gen_range(0..groups.max(1)))
        })
        .collect()
}

/// Create a repository over a fresh in-memory store holding `docs`.
pub fn seeded_repository(docs: &[TestDoc]) -> Repository<MemoryStore> {
    let repo = Repository::new(MemoryStore::new(MemoryConfig::default()));
    repo.add_many(docs, ())
        .unwrap_or_else(|e| panic!("seeding failed: {e}"));
    repo
}
