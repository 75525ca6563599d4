use super::Repository;
use crate::context::StoreContext;
use crate::handler::Updater;
use docrepo_core::{CallOptions, Document, DocumentKey, Field, Filter, RepositoryResult};
use serde_json::Value;

impl<C: StoreContext, K: DocumentKey> Repository<C, K> {
    facade_ops! {
        /// Replaces the stored document that has the same key. Returns false
        /// when there is none.
        updater => fn update_one / update_one_async, update_one_keyed / update_one_keyed_async
            <D>(document: &D) -> bool;

        /// Sets `field` to `value` on the first matching document.
        updater => fn update_one_field / update_one_field_async,
            update_one_field_keyed / update_one_field_keyed_async
            <D>(filter: &Filter<D>, field: Field<D>, value: Value) -> bool;

        /// Sets `field` to `value` on every matching document and returns the
        /// number modified.
        updater => fn update_many_field / update_many_field_async,
            update_many_field_keyed / update_many_field_keyed_async
            <D>(filter: &Filter<D>, field: Field<D>, value: Value) -> u64;
    }
}
