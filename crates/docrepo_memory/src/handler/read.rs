use crate::store::{MemoryStore, StoredDocument};
use docrepo_core::{CallOptions, Document, DocumentKey, Filter, Projection, RepositoryResult};
use docrepo_repository::Reader;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::trace;

/// Queries a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryReader {
    store: Arc<MemoryStore>,
}

impl MemoryReader {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Clones the stored form of matching documents, up to `limit`.
    fn scan<D, K>(
        &self,
        filter: &Filter<D>,
        options: &CallOptions,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<StoredDocument>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        filter.validate()?;
        let collection = self.store.resolve::<D, K>(options.partition_key());
        trace!(%collection, ?filter, "scan");
        Ok(self.store.read(&collection, |c| {
            c.map(|c| {
                c.find(filter)
                    .take(limit.unwrap_or(usize::MAX))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
        }))
    }
}

impl Reader for MemoryReader {
    fn get_by_id<D, K>(&self, id: &K, options: &CallOptions) -> RepositoryResult<Option<D>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        let key = serde_json::to_value(id)?;
        let collection = self.store.resolve::<D, K>(options.partition_key());
        trace!(%collection, %key, "get_by_id");
        let found = self
            .store
            .read(&collection, |c| c.and_then(|c| c.get(&key).cloned()));
        found.map(|stored| stored.decode()).transpose()
    }

    fn get_one<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<Option<D>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.scan::<D, K>(filter, options, Some(1))?
            .first()
            .map(StoredDocument::decode)
            .transpose()
    }

    fn get_all<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<Vec<D>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.scan::<D, K>(filter, options, None)?
            .iter()
            .map(StoredDocument::decode)
            .collect()
    }

    fn any<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        Ok(!self.scan::<D, K>(filter, options, Some(1))?.is_empty())
    }

    fn count<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        filter.validate()?;
        let collection = self.store.resolve::<D, K>(options.partition_key());
        Ok(self
            .store
            .read(&collection, |c| c.map_or(0, |c| c.find(filter).count())) as u64)
    }

    fn project_one<D, K, P>(
        &self,
        filter: &Filter<D>,
        projection: &Projection<D>,
        options: &CallOptions,
    ) -> RepositoryResult<Option<P>>
    where
        D: Document<K>,
        K: DocumentKey,
        P: DeserializeOwned + Send + 'static,
    {
        self.scan::<D, K>(filter, options, Some(1))?
            .first()
            .map(|stored| -> RepositoryResult<P> {
                Ok(serde_json::from_value(projection.apply(&stored.body))?)
            })
            .transpose()
    }

    fn project_many<D, K, P>(
        &self,
        filter: &Filter<D>,
        projection: &Projection<D>,
        options: &CallOptions,
    ) -> RepositoryResult<Vec<P>>
    where
        D: Document<K>,
        K: DocumentKey,
        P: DeserializeOwned + Send + 'static,
    {
        self.scan::<D, K>(filter, options, None)?
            .iter()
            .map(|stored| -> RepositoryResult<P> {
                Ok(serde_json::from_value(projection.apply(&stored.body))?)
            })
            .collect()
    }
}
