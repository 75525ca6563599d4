use async_trait::async_trait;
use docrepo_core::{CallOptions, Document, DocumentKey, Filter, RepositoryResult};

/// Removes documents.
///
/// Every operation returns the number of documents removed. A filter that
/// matches nothing removes 0 and is not an error.
#[async_trait]
pub trait Eraser: Send + Sync {
    /// Deletes the stored document with the same key as `document`.
    fn delete_one<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Deletes the first document matching the filter.
    fn delete_one_by<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Deletes the stored counterparts of the given documents.
    fn delete_many<D, K>(&self, documents: &[D], options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Deletes every document matching the filter.
    fn delete_many_by<D, K>(&self, filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Asynchronous [`delete_one`](Self::delete_one).
    async fn delete_one_async<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.delete_one::<D, K>(document, options)
    }

    /// Asynchronous [`delete_one_by`](Self::delete_one_by).
    async fn delete_one_by_async<D, K>(
        &self,
        filter: &Filter<D>,
        options: &CallOptions,
    ) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.delete_one_by::<D, K>(filter, options)
    }

    /// Asynchronous [`delete_many`](Self::delete_many).
    async fn delete_many_async<D, K>(
        &self,
        documents: &[D],
        options: &CallOptions,
    ) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.delete_many::<D, K>(documents, options)
    }

    /// Asynchronous [`delete_many_by`](Self::delete_many_by).
    async fn delete_many_by_async<D, K>(
        &self,
        filter: &Filter<D>,
        options: &CallOptions,
    ) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.delete_many_by::<D, K>(filter, options)
    }
}
