use crate::store::{MemoryStore, StoredDocument};
use docrepo_core::{CallOptions, Document, DocumentKey, RepositoryResult};
use docrepo_repository::Creator;
use std::sync::Arc;
use tracing::trace;

/// Inserts documents into a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryCreator {
    store: Arc<MemoryStore>,
}

impl MemoryCreator {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    fn insert<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        let collection = self
            .store
            .resolve::<D, K>(options.partition_or(document.partition_key()));
        let stored = StoredDocument::encode::<D, K>(document)?;
        trace!(%collection, key = %stored.key, "insert");
        self.store
            .write(&collection, |c| c.insert(&collection, stored))
    }
}

impl Creator for MemoryCreator {
    fn add_one<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        self.insert::<D, K>(document, options)
    }

    /// Inserts in order and stops at the first failure; documents inserted
    /// before it stay.
    fn add_many<D, K>(&self, documents: &[D], options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        documents
            .iter()
            .try_for_each(|document| self.insert::<D, K>(document, options))
    }
}
