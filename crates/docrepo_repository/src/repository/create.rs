use super::Repository;
use crate::context::StoreContext;
use crate::handler::Creator;
use docrepo_core::{CallOptions, Document, DocumentKey, RepositoryResult};

impl<C: StoreContext, K: DocumentKey> Repository<C, K> {
    facade_ops! {
        /// Inserts one document into its collection.
        creator => fn add_one / add_one_async, add_one_keyed / add_one_keyed_async
            <D>(document: &D) -> ();

        /// Inserts several documents.
        creator => fn add_many / add_many_async, add_many_keyed / add_many_keyed_async
            <D>(documents: &[D]) -> ();
    }
}
