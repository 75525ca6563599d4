use super::Repository;
use crate::context::StoreContext;
use crate::handler::Eraser;
use docrepo_core::{CallOptions, Document, DocumentKey, Filter, RepositoryResult};

impl<C: StoreContext, K: DocumentKey> Repository<C, K> {
    facade_ops! {
        /// Deletes the stored document with the same key as `document`.
        /// Returns the number removed (0 or 1).
        eraser => fn delete_one / delete_one_async, delete_one_keyed / delete_one_keyed_async
            <D>(document: &D) -> u64;

        /// Deletes the first document matching the filter.
        eraser => fn delete_one_by / delete_one_by_async,
            delete_one_by_keyed / delete_one_by_keyed_async
            <D>(filter: &Filter<D>) -> u64;

        /// Deletes the stored counterparts of `documents`.
        eraser => fn delete_many / delete_many_async, delete_many_keyed / delete_many_keyed_async
            <D>(documents: &[D]) -> u64;

        /// Deletes every document matching the filter. Matching nothing
        /// returns 0.
        eraser => fn delete_many_by / delete_many_by_async,
            delete_many_by_keyed / delete_many_by_keyed_async
            <D>(filter: &Filter<D>) -> u64;
    }
}
