use crate::store::MemoryStore;
use docrepo_core::{
    CallOptions, Document, DocumentKey, Field, IndexCreationOptions, IndexKey, IndexKind,
    IndexModel, RepositoryError, RepositoryResult, ID_INDEX_NAME,
};
use docrepo_repository::IndexHandler;
use std::sync::Arc;
use tracing::debug;

/// Manages indexes of a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryIndexHandler {
    store: Arc<MemoryStore>,
}

impl MemoryIndexHandler {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    fn create<D, K>(
        &self,
        fields: &[Field<D>],
        kind: IndexKind,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        if fields.is_empty() {
            return Err(RepositoryError::invalid_filter("an index needs at least one field"));
        }
        fields.iter().try_for_each(Field::validate)?;

        let keys = fields
            .iter()
            .map(|field| IndexKey::new(field.path(), kind))
            .collect();
        let model = IndexModel::new(keys, index_options.unwrap_or_default());
        let collection = self.store.resolve::<D, K>(options.partition_key());
        let name = self
            .store
            .write(&collection, |c| c.add_index(&collection, model))?;
        debug!(%collection, index = %name, %kind, "index created");
        Ok(name)
    }
}

impl IndexHandler for MemoryIndexHandler {
    fn create_text_index<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.create::<D, K>(&[field], IndexKind::Text, index_options, options)
    }

    fn create_ascending_index<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.create::<D, K>(&[field], IndexKind::Ascending, index_options, options)
    }

    fn create_descending_index<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.create::<D, K>(&[field], IndexKind::Descending, index_options, options)
    }

    fn create_hashed_index<D, K>(
        &self,
        field: Field<D>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.create::<D, K>(&[field], IndexKind::Hashed, index_options, options)
    }

    fn create_combined_text_index<D, K>(
        &self,
        fields: Vec<Field<D>>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.create::<D, K>(&fields, IndexKind::Text, index_options, options)
    }

    fn drop_index<D, K>(&self, name: &str, options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        let collection = self.store.resolve::<D, K>(options.partition_key());
        self.store
            .write_existing(&collection, |c| c.drop_index(&collection, name))?;
        debug!(%collection, index = name, "index dropped");
        Ok(())
    }

    fn get_index_names<D, K>(&self, options: &CallOptions) -> RepositoryResult<Vec<String>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        let collection = self.store.resolve::<D, K>(options.partition_key());
        let implicit = self.store.config().implicit_id_index;
        Ok(self.store.read(&collection, |c| match c {
            Some(c) => c.index_names(implicit),
            None => implicit
                .then(|| ID_INDEX_NAME.to_string())
                .into_iter()
                .collect(),
        }))
    }
}
