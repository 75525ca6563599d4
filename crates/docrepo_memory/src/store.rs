//! Collections held in memory.

use crate::config::MemoryConfig;
use crate::handler::{MemoryCreator, MemoryEraser, MemoryIndexHandler, MemoryReader, MemoryUpdater};
use docrepo_core::filter::{lookup, set_path};
use docrepo_core::{
    partitioned_collection_name, Document, DocumentKey, Filter, IndexModel, RepositoryError,
    RepositoryResult, ID_FIELD, ID_INDEX_NAME,
};
use docrepo_repository::StoreContext;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A document in stored form.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StoredDocument {
    pub(crate) key: Value,
    pub(crate) body: Value,
}

impl StoredDocument {
    /// Serializes a document, writing its key to the `_id` field.
    pub(crate) fn encode<D, K>(document: &D) -> RepositoryResult<Self>
    where
        D: Document<K>,
        K: DocumentKey,
    {
        let key = serde_json::to_value(document.id())?;
        let mut body = serde_json::to_value(document)?;
        set_path(&mut body, ID_FIELD, key.clone());
        Ok(Self { key, body })
    }

    pub(crate) fn decode<T: DeserializeOwned>(&self) -> RepositoryResult<T> {
        Ok(T::deserialize(&self.body)?)
    }
}

/// Documents and index definitions of one physical collection.
#[derive(Debug, Default)]
pub(crate) struct Collection {
    documents: Vec<StoredDocument>,
    indexes: Vec<IndexModel>,
}

impl Collection {
    fn position_of(&self, key: &Value) -> Option<usize> {
        self.documents.iter().position(|d| &d.key == key)
    }

    fn matching_positions<D>(&self, filter: &Filter<D>, limit: Option<usize>) -> Vec<usize> {
        self.documents
            .iter()
            .enumerate()
            .filter(|(_, d)| filter.matches(&d.body))
            .map(|(i, _)| i)
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.documents.len()
    }

    pub(crate) fn get(&self, key: &Value) -> Option<&StoredDocument> {
        self.documents.iter().find(|d| &d.key == key)
    }

    pub(crate) fn find<'a, D>(
        &'a self,
        filter: &'a Filter<D>,
    ) -> impl Iterator<Item = &'a StoredDocument> + 'a {
        self.documents.iter().filter(move |d| filter.matches(&d.body))
    }

    pub(crate) fn insert(&mut self, collection: &str, document: StoredDocument) -> RepositoryResult<()> {
        if self.position_of(&document.key).is_some() {
            return Err(RepositoryError::duplicate_key(
                collection,
                document.key.to_string(),
            ));
        }
        self.check_unique(collection, &document.body, None)?;
        self.documents.push(document);
        Ok(())
    }

    pub(crate) fn replace(
        &mut self,
        collection: &str,
        document: StoredDocument,
    ) -> RepositoryResult<bool> {
        let Some(position) = self.position_of(&document.key) else {
            return Ok(false);
        };
        self.check_unique(collection, &document.body, Some(position))?;
        self.documents[position] = document;
        Ok(true)
    }

    /// Sets a field on matching documents and returns how many changed.
    pub(crate) fn set_field<D>(
        &mut self,
        collection: &str,
        filter: &Filter<D>,
        path: &str,
        value: &Value,
        limit: Option<usize>,
    ) -> RepositoryResult<u64> {
        let mut modified = 0;
        for position in self.matching_positions(filter, limit) {
            let mut body = self.documents[position].body.clone();
            set_path(&mut body, path, value.clone());
            if body == self.documents[position].body {
                continue;
            }
            self.check_unique(collection, &body, Some(position))?;
            self.documents[position].body = body;
            modified += 1;
        }
        Ok(modified)
    }

    pub(crate) fn remove_key(&mut self, key: &Value) -> u64 {
        match self.position_of(key) {
            Some(position) => {
                self.documents.remove(position);
                1
            }
            None => 0,
        }
    }

    pub(crate) fn remove_matching<D>(&mut self, filter: &Filter<D>, limit: Option<usize>) -> u64 {
        let positions = self.matching_positions(filter, limit);
        for position in positions.iter().rev() {
            self.documents.remove(*position);
        }
        positions.len() as u64
    }

    pub(crate) fn add_index(&mut self, collection: &str, model: IndexModel) -> RepositoryResult<String> {
        if model.name == ID_INDEX_NAME {
            return Err(RepositoryError::index_conflict(format!(
                "{ID_INDEX_NAME} is reserved in {collection}"
            )));
        }
        if let Some(existing) = self.indexes.iter().find(|i| i.name == model.name) {
            return if existing.same_definition(&model) {
                Ok(existing.name.clone())
            } else {
                Err(RepositoryError::index_conflict(format!(
                    "index {} already exists in {collection} with a different definition",
                    model.name
                )))
            };
        }
        if let Some(existing) = self.indexes.iter().find(|i| i.keys == model.keys) {
            return Err(RepositoryError::index_conflict(format!(
                "index {} in {collection} already covers these keys",
                existing.name
            )));
        }
        if model.is_text() {
            if let Some(existing) = self.indexes.iter().find(|i| i.is_text()) {
                return Err(RepositoryError::index_conflict(format!(
                    "{collection} already has text index {}",
                    existing.name
                )));
            }
        }
        if model.options.unique == Some(true) {
            let mut seen: Vec<Vec<Value>> = Vec::new();
            for document in &self.documents {
                if let Some(values) = index_values(&model, &document.body) {
                    if seen.contains(&values) {
                        return Err(RepositoryError::duplicate_key(
                            collection,
                            format!("{} {}", model.name, Value::Array(values)),
                        ));
                    }
                    seen.push(values);
                }
            }
        }
        let name = model.name.clone();
        self.indexes.push(model);
        Ok(name)
    }

    pub(crate) fn drop_index(&mut self, collection: &str, name: &str) -> RepositoryResult<()> {
        if name == ID_INDEX_NAME {
            return Err(RepositoryError::index_conflict(format!(
                "cannot drop {ID_INDEX_NAME} from {collection}"
            )));
        }
        match self.indexes.iter().position(|i| i.name == name) {
            Some(position) => {
                self.indexes.remove(position);
                Ok(())
            }
            None => Err(RepositoryError::index_not_found(name)),
        }
    }

    pub(crate) fn index_names(&self, implicit_id_index: bool) -> Vec<String> {
        implicit_id_index
            .then(|| ID_INDEX_NAME.to_string())
            .into_iter()
            .chain(self.indexes.iter().map(|i| i.name.clone()))
            .collect()
    }

    fn check_unique(
        &self,
        collection: &str,
        body: &Value,
        except: Option<usize>,
    ) -> RepositoryResult<()> {
        for model in self.indexes.iter().filter(|m| m.options.unique == Some(true)) {
            let Some(candidate) = index_values(model, body) else {
                continue;
            };
            let clash = self
                .documents
                .iter()
                .enumerate()
                .filter(|(i, _)| Some(*i) != except)
                .any(|(_, d)| index_values(model, &d.body).as_ref() == Some(&candidate));
            if clash {
                return Err(RepositoryError::duplicate_key(
                    collection,
                    format!("{} {}", model.name, Value::Array(candidate)),
                ));
            }
        }
        Ok(())
    }
}

/// Values a document contributes to an index. Missing fields count as null;
/// sparse indexes skip documents missing every key.
fn index_values(model: &IndexModel, body: &Value) -> Option<Vec<Value>> {
    let values: Vec<Option<&Value>> = model.keys.iter().map(|k| lookup(body, &k.path)).collect();
    if model.options.sparse == Some(true) && values.iter().all(Option::is_none) {
        return None;
    }
    Some(
        values
            .into_iter()
            .map(|v| v.cloned().unwrap_or(Value::Null))
            .collect(),
    )
}

/// An in-memory document store.
///
/// Collections are created on first write. The store is thread-safe and
/// meant to be shared behind an `Arc` by every handler a repository wires.
///
/// # Example
///
/// ```rust,ignore
/// use docrepo_memory::{MemoryConfig, MemoryStore};
/// use docrepo_repository::Repository;
///
/// let repo: Repository<MemoryStore> = Repository::new(MemoryStore::new(MemoryConfig::default()));
/// repo.add_one(&order, ())?;
/// assert_eq!(repo.context().document_count("orders"), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: MemoryConfig,
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(config: MemoryConfig) -> Self {
        debug!(database = %config.database_name, "opening in-memory store");
        Self {
            config,
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an empty store ready to be shared.
    #[must_use]
    pub fn shared(config: MemoryConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Returns the database name.
    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.config.database_name
    }

    /// Returns the names of all collections, sorted.
    #[must_use]
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of documents in a physical collection.
    #[must_use]
    pub fn document_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, Collection::len)
    }

    /// Removes a physical collection with its documents and indexes.
    pub fn drop_collection(&self, collection: &str) -> bool {
        let dropped = self.collections.write().remove(collection).is_some();
        if dropped {
            debug!(collection, "collection dropped");
        }
        dropped
    }

    /// Resolves the physical collection for a document type and partition.
    pub(crate) fn resolve<D, K>(&self, partition_key: Option<&str>) -> String
    where
        D: Document<K>,
        K: DocumentKey,
    {
        partitioned_collection_name(
            &<D as Document<K>>::collection_name(),
            partition_key,
            &self.config.partition_separator,
        )
    }

    /// Runs `f` against a collection, which may not exist yet.
    pub(crate) fn read<R>(&self, collection: &str, f: impl FnOnce(Option<&Collection>) -> R) -> R {
        f(self.collections.read().get(collection))
    }

    /// Runs `f` against a collection, creating it if needed.
    pub(crate) fn write<R>(&self, collection: &str, f: impl FnOnce(&mut Collection) -> R) -> R {
        let mut collections = self.collections.write();
        f(collections.entry(collection.to_string()).or_default())
    }

    /// Runs `f` against a collection without creating it. A missing
    /// collection is seen as an empty one and discarded afterwards.
    pub(crate) fn write_existing<R>(
        &self,
        collection: &str,
        f: impl FnOnce(&mut Collection) -> R,
    ) -> R {
        let mut collections = self.collections.write();
        match collections.get_mut(collection) {
            Some(existing) => f(existing),
            None => f(&mut Collection::default()),
        }
    }
}

impl StoreContext for MemoryStore {
    type Creator = MemoryCreator;
    type Reader = MemoryReader;
    type Updater = MemoryUpdater;
    type Eraser = MemoryEraser;
    type IndexHandler = MemoryIndexHandler;

    fn creator(self: &Arc<Self>) -> MemoryCreator {
        MemoryCreator::new(Arc::clone(self))
    }

    fn reader(self: &Arc<Self>) -> MemoryReader {
        MemoryReader::new(Arc::clone(self))
    }

    fn updater(self: &Arc<Self>) -> MemoryUpdater {
        MemoryUpdater::new(Arc::clone(self))
    }

    fn eraser(self: &Arc<Self>) -> MemoryEraser {
        MemoryEraser::new(Arc::clone(self))
    }

    fn index_handler(self: &Arc<Self>) -> MemoryIndexHandler {
        MemoryIndexHandler::new(Arc::clone(self))
    }
}
