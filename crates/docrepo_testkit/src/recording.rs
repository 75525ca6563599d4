//! A store context that records every call it receives.
//!
//! [`RecordingContext`] stands in for a real driver when a test cares about
//! what the facade delegates rather than about stored data: which handler
//! was reached, with which document and key types, and with which options.

use docrepo_core::{
    default_index_name, CallOptions, Document, DocumentKey, Field, Filter, IndexCreationOptions,
    IndexKey, IndexKind, Projection, RepositoryError, RepositoryResult, ID_INDEX_NAME,
};
use docrepo_repository::{Creator, Eraser, IndexHandler, Reader, StoreContext, Updater};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// One delegated handler call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Capability family that received the call.
    pub capability: &'static str,
    /// Handler operation name.
    pub operation: &'static str,
    /// Full type name of the document type.
    pub document_type: &'static str,
    /// Full type name of the key type.
    pub key_type: &'static str,
    /// Partition key carried by the call options.
    pub partition_key: Option<String>,
    /// Whether the call carried a cancellable token.
    pub cancellable: bool,
}

impl RecordedCall {
    /// Returns true if the call was made for document type `D` and key type `K`.
    #[must_use]
    pub fn is_for<D, K>(&self) -> bool {
        self.document_type == type_name::<D>() && self.key_type == type_name::<K>()
    }
}

/// Store context recording calls instead of touching a store.
///
/// Handlers answer with empty results, or with the configured
/// [`affected`](Self::with_affected) count for counting operations.
#[derive(Debug, Default)]
pub struct RecordingContext {
    calls: Mutex<Vec<RecordedCall>>,
    constructions: Mutex<HashMap<&'static str, usize>>,
    construction_delay: Option<Duration>,
    pending_failure: Mutex<Option<RepositoryError>>,
    affected: u64,
    indexes: Mutex<Vec<String>>,
}

impl RecordingContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every handler construction sleep for `delay`.
    #[must_use]
    pub fn with_construction_delay(mut self, delay: Duration) -> Self {
        self.construction_delay = Some(delay);
        self
    }

    /// Sets the count returned by `count`, `update_many_field` and deletes.
    #[must_use]
    pub fn with_affected(mut self, affected: u64) -> Self {
        self.affected = affected;
        self
    }

    /// Makes the next handler call fail with `error`.
    pub fn fail_next(&self, error: RepositoryError) {
        *self.pending_failure.lock() = Some(error);
    }

    /// Returns the recorded calls in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().last().cloned()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Returns how many handlers of `capability` were constructed.
    pub fn constructions(&self, capability: &str) -> usize {
        self.constructions
            .lock()
            .get(capability)
            .copied()
            .unwrap_or(0)
    }

    fn build(self: &Arc<Self>, capability: &'static str) -> RecordingHandler {
        if let Some(delay) = self.construction_delay {
            thread::sleep(delay);
        }
        *self.constructions.lock().entry(capability).or_insert(0) += 1;
        RecordingHandler {
            context: Arc::clone(self),
            capability,
        }
    }
}

impl StoreContext for RecordingContext {
    type Creator = RecordingHandler;
    type Reader = RecordingHandler;
    type Updater = RecordingHandler;
    type Eraser = RecordingHandler;
    type IndexHandler = RecordingHandler;

    fn creator(self: &Arc<Self>) -> RecordingHandler {
        self.build("creator")
    }

    fn reader(self: &Arc<Self>) -> RecordingHandler {
        self.build("reader")
    }

    fn updater(self: &Arc<Self>) -> RecordingHandler {
        self.build("updater")
    }

    fn eraser(self: &Arc<Self>) -> RecordingHandler {
        self.build("eraser")
    }

    fn index_handler(self: &Arc<Self>) -> RecordingHandler {
        self.build("index")
    }
}

/// Handler built by [`RecordingContext`] for every capability.
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    context: Arc<RecordingContext>,
    capability: &'static str,
}

impl RecordingHandler {
    /// Creates a handler for `capability` without counting a construction.
    pub fn detached(context: Arc<RecordingContext>, capability: &'static str) -> Self {
        Self {
            context,
            capability,
        }
    }

    /// Returns the capability this handler was built for.
    pub fn capability(&self) -> &'static str {
        self.capability
    }

    /// Records the call, then reports a pending failure or cancellation.
    fn record<D, K>(&self, operation: &'static str, options: &CallOptions) -> RepositoryResult<()> {
        self.context.calls.lock().push(RecordedCall {
            capability: self.capability,
            operation,
            document_type: type_name::<D>(),
            key_type: type_name::<K>(),
            partition_key: options.partition_key.clone(),
            cancellable: options.cancellation.can_be_cancelled(),
        });
        if let Some(error) = self.context.pending_failure.lock().take() {
            return Err(error);
        }
        options.cancellation.error_if_cancelled()
    }

    fn create_index<D, K>(
        &self,
        operation: &'static str,
        keys: Vec<IndexKey>,
        index_options: Option<IndexCreationOptions>,
        options: &CallOptions,
    ) -> RepositoryResult<String> {
        self.record::<D, K>(operation, options)?;
        let name = index_options
            .and_then(|o| o.name)
            .unwrap_or_else(|| default_index_name(&keys));
        self.context.indexes.lock().push(name.clone());
        Ok(name)
    }
}

impl Creator for RecordingHandler {
    fn add_one<D, K>(&self, _document: &D, options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("add_one", options)
    }

    fn add_many<D, K>(&self, _documents: &[D], options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("add_many", options)
    }
}

impl Reader for RecordingHandler {
    fn get_by_id<D, K>(&self, _id: &K, options: &CallOptions) -> RepositoryResult<Option<D>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("get_by_id", options)?;
        Ok(None)
    }

    fn get_one<D, K>(&self, _filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<Option<D>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("get_one", options)?;
        Ok(None)
    }

    fn get_all<D, K>(&self, _filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<Vec<D>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("get_all", options)?;
        Ok(Vec::new())
    }

    fn any<D, K>(&self, _filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("any", options)?;
        Ok(self.context.affected > 0)
    }

    fn count<D, K>(&self, _filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("count", options)?;
        Ok(self.context.affected)
    }

    fn project_one<D, K, P>(
        &self,
        _filter: &Filter<D>,
        _projection: &Projection<D>,
        options: &CallOptions,
    ) -> RepositoryResult<Option<P>>
    where
        D: Document<K>,
        K: DocumentKey,
        P: DeserializeOwned + Send + 'static,
    {
        self.record::<D, K>("project_one", options)?;
        Ok(None)
    }

    fn project_many<D, K, P>(
        &self,
        _filter: &Filter<D>,
        _projection: &Projection<D>,
        options: &CallOptions,
    ) -> RepositoryResult<Vec<P>>
    where
        D: Document<K>,
        K: DocumentKey,
        P: DeserializeOwned + Send + 'static,
    {
        self.record::<D, K>("project_many", options)?;
        Ok(Vec::new())
    }
}

impl Updater for RecordingHandler {
    fn update_one<D, K>(&self, _document: &D, options: &CallOptions) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("update_one", options)?;
        Ok(self.context.affected > 0)
    }

    fn update_one_field<D, K>(
        &self,
        _filter: &Filter<D>,
        _field: Field<D>,
        _value: Value,
        options: &CallOptions,
    ) -> RepositoryResult<bool>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("update_one_field", options)?;
        Ok(self.context.affected > 0)
    }

    fn update_many_field<D, K>(
        &self,
        _filter: &Filter<D>,
        _field: Field<D>,
        _value: Value,
        options: &CallOptions,
    ) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("update_many_field", options)?;
        Ok(self.context.affected)
    }
}

impl Eraser for RecordingHandler {
    fn delete_one<D, K>(&self, _document: &D, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("delete_one", options)?;
        Ok(self.context.affected.min(1))
    }

    fn delete_one_by<D, K>(&self, _filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("delete_one_by", options)?;
        Ok(self.context.affected.min(1))
    }

    fn delete_many<D, K>(&self, _documents: &[D], options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("delete_many", options)?;
        Ok(self.context.affected)
    }

    fn delete_many_by<D, K>(&self, _filter: &Filter<D>, options: &CallOptions) -> RepositoryResult<u64>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("delete_many_by", options)?;
        Ok(self.context.affected)
    }
}

impl IndexHandler for RecordingHandler {
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
        let keys = vec![IndexKey::new(field.path(), IndexKind::Text)];
        self.create_index::<D, K>("create_text_index", keys, index_options, options)
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
        let keys = vec![IndexKey::new(field.path(), IndexKind::Ascending)];
        self.create_index::<D, K>("create_ascending_index", keys, index_options, options)
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
        let keys = vec![IndexKey::new(field.path(), IndexKind::Descending)];
        self.create_index::<D, K>("create_descending_index", keys, index_options, options)
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
        let keys = vec![IndexKey::new(field.path(), IndexKind::Hashed)];
        self.create_index::<D, K>("create_hashed_index", keys, index_options, options)
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
        let keys = fields
            .iter()
            .map(|f| IndexKey::new(f.path(), IndexKind::Text))
            .collect();
        self.create_index::<D, K>("create_combined_text_index", keys, index_options, options)
    }

    fn drop_index<D, K>(&self, name: &str, options: &CallOptions) -> RepositoryResult<()>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("drop_index", options)?;
        self.context.indexes.lock().retain(|n| n != name);
        Ok(())
    }

    fn get_index_names<D, K>(&self, options: &CallOptions) -> RepositoryResult<Vec<String>>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        self.record::<D, K>("get_index_names", options)?;
        let mut names = vec![ID_INDEX_NAME.to_string()];
        names.extend(self.context.indexes.lock().iter().cloned());
        Ok(names)
    }
}
