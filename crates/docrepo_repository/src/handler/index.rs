use async_trait::async_trait;
use docrepo_core::{CallOptions, Document, DocumentKey, Field, IndexCreationOptions, RepositoryResult};

/// Manages the indexes of a document type's collection.
///
/// Creation operations return the name of the created index, generated
/// from the fields unless the creation options carry one.
#[async_trait]
pub trait IndexHandler: Send + Sync {
    /// Creates a text index on one field.
    fn create_text_index<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Creates an ascending index on one field.
    fn create_ascending_index<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Creates a descending index on one field.
    fn create_descending_index<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Creates a hashed index on one field.
    fn create_hashed_index<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Creates a single text index spanning several fields.
    fn create_combined_text_index<D, K>(
        &self,
        fields: Vec<Field<D>>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Drops the named index.
    fn drop_index<D, K>(&self, name: &str, options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Lists index names in creation order.
    fn get_index_names<D, K>(&self, options: &CallOptions) -> RepositoryResult<Vec<String>>
    where
        D: Document<K>,
        K: DocumentKey;

    /// Asynchronous [`create_text_index`](Self::create_text_index).
    async fn create_text_index_async<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.create_text_index::<D, K>(field, index_options, options)
    }

    /// Asynchronous [`create_ascending_index`](Self::create_ascending_index).
    async fn create_ascending_index_async<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.create_ascending_index::<D, K>(field, index_options, options)
    }

    /// Asynchronous [`create_descending_index`](Self::create_descending_index).
    async fn create_descending_index_async<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.create_descending_index::<D, K>(field, index_options, options)
    }

    /// Asynchronous [`create_hashed_index`](Self::create_hashed_index).
    async fn create_hashed_index_async<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.create_hashed_index::<D, K>(field, index_options, options)
    }

    /// Asynchronous [`create_combined_text_index`](Self::create_combined_text_index).
    async fn create_combined_text_index_async<D, K>(
        &self,
        fields: Vec<Field<D>>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.create_combined_text_index::<D, K>(fields, index_options, options)
    }

    /// Asynchronous [`drop_index`](Self::drop_index).
    async fn drop_index_async<D, K>(&self, name: &str, options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.drop_index::<D, K>(name, options)
    }

    /// Asynchronous [`get_index_names`](Self::get_index_names).
    async fn get_index_names_async<D, K>(&self, options: &CallOptions) -> RepositoryResult<Vec<String>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.get_index_names::<D, K>(options)
    }
}
