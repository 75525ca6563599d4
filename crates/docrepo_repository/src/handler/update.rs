use async_trait::async_trait;
use docrepo_core::{CallOptions, Document, DocumentKey, Field, Filter, RepositoryResult};
use serde_json::Value;

/// Modifies stored documents.
#[async_trait]
pub trait Updater: Send + Sync {
    /// Replaces the stored document that has the same key.
    ///
    /// Returns false when no such document exists.
    fn update_one<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Sets one field on the first matching document.
    fn update_one_field<D, K>(
        &self,
        filter: &Filter<D>,
        field: Field<D>,
        value: Value,
        options: &CallOptions,
    ) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Sets one field on every matching document and returns how many
    /// were modified.
    fn update_many_field<D, K>(
        &self,
        filter: &Filter<D>,
        field: Field<D>,
        value: Value,
        options: &CallOptions,
    ) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Asynchronous [`update_one`](Self::update_one).
    async fn update_one_async<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.update_one::<D, K>(document, options)
    }

    /// Asynchronous [`update_one_field`](Self::update_one_field).
    async fn update_one_field_async<D, K>(
        &self,
        filter: &Filter<D>,
        field: Field<D>,
        value: Value,
        options: &CallOptions,
    ) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.update_one_field::<D, K>(filter, field, value, options)
    }

    /// Asynchronous [`update_many_field`](Self::update_many_field).
    async fn update_many_field_async<D, K>(
        &self,
        filter: &Filter<D>,
        field: Field<D>,
        value: Value,
        options: &CallOptions,
    ) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.update_many_field::<D, K>(filter, field, value, options)
    }
}
