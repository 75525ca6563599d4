use crate::store::MemoryStore;
use docrepo_core::{CallOptions, Document, DocumentKey, Filter, RepositoryResult};
use docrepo_repository::Eraser;
use std::sync::Arc;
use tracing::trace;

/// Removes documents from a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryEraser {
    store: Arc<MemoryStore>,
}

impl MemoryEraser {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    fn remove_document<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        let key = serde_json::to_value(document.id())?;
        let collection = self
            .store
            .resolve::<D, K>(options.partition_or(document.partition_key()));
        let removed = self.store.write_existing(&collection, |c| c.remove_key(&key));
        trace!(%collection, %key, removed, "delete by key");
        Ok(removed)
    }

    fn remove_matching<D, K>(
        &self,
        filter: &Filter<D>,
        options: &CallOptions,
        limit: Option<usize>,
    ) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        filter.validate()?;
        let collection = self.store.resolve::<D, K>(options.partition_key());
        let removed = self
            .store
            .write_existing(&collection, |c| c.remove_matching(filter, limit));
        trace!(%collection, ?filter, removed, "delete by filter");
        Ok(removed)
    }
}

impl Eraser for MemoryEraser {
    fn delete_one<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        self.remove_document::<D, K>(document, options)
    }

    fn delete_one_by<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.remove_matching::<D, K>(filter, options, Some(1))
    }

    fn delete_many<D, K>(&self, documents: &[D], options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        documents.iter().try_fold(0, |removed, document| -> RepositoryResult<u64> {
            Ok(removed + self.remove_document::<D, K>(document, options)?)
        })
    }

    fn delete_many_by<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.remove_matching::<D, K>(filter, options, None)
    }
}
