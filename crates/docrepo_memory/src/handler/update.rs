use crate::store::{MemoryStore, StoredDocument};
use docrepo_core::{
    CallOptions, Document, DocumentKey, Field, Filter, RepositoryError, RepositoryResult, ID_FIELD,
};
use docrepo_repository::Updater;
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// Modifies documents in a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryUpdater {
    store: Arc<MemoryStore>,
}

impl MemoryUpdater {
    pub(crate) fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    fn set_field<D, K>(
        &self,
        filter: &Filter<D>,
        field: &Field<D>,
        value: &Value,
        options: &CallOptions,
        limit: Option<usize>,
    ) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        filter.validate()?;
        field.validate()?;
        if field.path() == ID_FIELD || field.path().starts_with("_id.") {
            return Err(RepositoryError::invalid_filter(format!(
                "field {} is immutable",
                field.path()
            )));
        }
        let collection = self.store.resolve::<D, K>(options.partition_key());
        trace!(%collection, field = field.path(), ?limit, "set_field");
        self.store.write_existing(&collection, |c| {
            c.set_field(&collection, filter, field.path(), value, limit)
        })
    }
}

impl Updater for MemoryUpdater {
    fn update_one<D, K>(&self, document: &D, options: &CallOptions) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        options.cancellation.error_if_cancelled()?;
        let collection = self
            .store
            .resolve::<D, K>(options.partition_or(document.partition_key()));
        let stored = StoredDocument::encode::<D, K>(document)?;
        trace!(%collection, key = %stored.key, "replace");
        self.store
            .write_existing(&collection, |c| c.replace(&collection, stored))
    }

    fn update_one_field<D, K>(
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
        Ok(self.set_field::<D, K>(filter, &field, &value, options, Some(1))? > 0)
    }

    fn update_many_field<D, K>(
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
        self.set_field::<D, K>(filter, &field, &value, options, None)
    }
}
