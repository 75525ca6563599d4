use async_trait::async_trait;
use docrepo_core::{CallOptions, Document, DocumentKey, Filter, Projection, RepositoryResult};
use serde::de::DeserializeOwned;

/// Queries documents.
#[async_trait]
pub trait Reader: Send + Sync {
    /// Loads the document with the given key.
    fn get_by_id<D, K>(&self, id: &K, options: &CallOptions) -> RepositoryResult<Option<D>>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Loads the first document matching the filter.
    fn get_one<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<Option<D>>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Loads every document matching the filter, in store order.
    fn get_all<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<Vec<D>>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Returns whether any document matches the filter.
    fn any<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Counts documents matching the filter.
    fn count<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Projects the first matching document into `P`.
    fn project_one<D, K, P>(
        &self,
        filter: &Filter<D>,
        projection: &Projection<D>,
        options: &CallOptions,
    ) -> RepositoryResult<Option<P>>
    where
        D: Document<K>,
        K: DocumentKey,
        P: DeserializeOwned + Send + 'static;

    /// Projects every matching document into `P`.
    fn project_many<D, K, P>(
        &self,
        filter: &Filter<D>,
        projection: &Projection<D>,
        options: &CallOptions,
    ) -> RepositoryResult<Vec<P>>
    where
        D: Document<K>,
        K: DocumentKey,
        P: DeserializeOwned + Send + 'static;

    /// Asynchronous [`get_by_id`](Self::get_by_id).
    async fn get_by_id_async<D, K>(
        &self,
        id: &K,
        options: &CallOptions,
    ) -> RepositoryResult<Option<D>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.get_by_id::<D, K>(id, options)
    }

    /// Asynchronous [`get_one`](Self::get_one).
    async fn get_one_async<D, K>(
        &self,
        filter: &Filter<D>,
        options: &CallOptions,
    ) -> RepositoryResult<Option<D>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.get_one::<D, K>(filter, options)
    }

    /// Asynchronous [`get_all`](Self::get_all).
    async fn get_all_async<D, K>(
        &self,
        filter: &Filter<D>,
        options: &CallOptions,
    ) -> RepositoryResult<Vec<D>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.get_all::<D, K>(filter, options)
    }

    /// Asynchronous [`any`](Self::any).
    async fn any_async<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.any::<D, K>(filter, options)
    }

    /// Asynchronous [`count`](Self::count).
    async fn count_async<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.count::<D, K>(filter, options)
    }

    /// Asynchronous [`project_one`](Self::project_one).
    async fn project_one_async<D, K, P>(
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
        self.project_one::<D, K, P>(filter, projection, options)
    }

    /// Asynchronous [`project_many`](Self::project_many).
    async fn project_many_async<D, K, P>(
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
        self.project_many::<D, K, P>(filter, projection, options)
    }
}
