use async_trait::async_trait;
use docrepo_core::{CallOptions, Document, DocumentKey, RepositoryResult};

/// Inserts documents.
#[async_trait]
pub trait Creator: Send + Sync {
    /// Inserts one document.
    fn add_one<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Inserts several documents. Each document goes to the explicit
    /// partition if one is given, otherwise to its own.
    fn add_many<D, K>(&self, documents: &[D], options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Asynchronous [`add_one`](Self::add_one).
    async fn add_one_async<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.add_one::<D, K>(document, options)
    }

    /// Asynchronous [`add_many`](Self::add_many).
    async fn add_many_async<D, K>(
        &self,
        documents: &[D],
        options: &CallOptions,
    ) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.add_many::<D, K>(documents, options)
    }
}
