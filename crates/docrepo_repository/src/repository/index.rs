use super::Repository;
use crate::context::StoreContext;
use crate::handler::IndexHandler;
use docrepo_core::{CallOptions, Document, DocumentKey, Field, IndexCreationOptions, RepositoryResult};

impl<C: StoreContext, K: DocumentKey> Repository<C, K> {
    facade_ops! {
        /// Creates a text index on `field` and returns its name.
        index_handler => fn create_text_index / create_text_index_async,
            create_text_index_keyed / create_text_index_keyed_async
            <D>(field: Field<D>, index_options: Option<IndexCreationOptions>) -> String;

        /// Creates an ascending index on `field` and returns its name.
        index_handler => fn create_ascending_index / create_ascending_index_async,
            create_ascending_index_keyed / create_ascending_index_keyed_async
            <D>(field: Field<D>, index_options: Option<IndexCreationOptions>) -> String;

        /// Creates a descending index on `field` and returns its name.
        index_handler => fn create_descending_index / create_descending_index_async,
            create_descending_index_keyed / create_descending_index_keyed_async
            <D>(field: Field<D>, index_options: Option<IndexCreationOptions>) -> String;

        /// Creates a hashed index on `field` and returns its name.
        index_handler => fn create_hashed_index / create_hashed_index_async,
            create_hashed_index_keyed / create_hashed_index_keyed_async
            <D>(field: Field<D>, index_options: Option<IndexCreationOptions>) -> String;

        /// Creates one text index over all `fields` and returns its name.
        index_handler => fn create_combined_text_index / create_combined_text_index_async,
            create_combined_text_index_keyed / create_combined_text_index_keyed_async
            <D>(fields: Vec<Field<D>>, index_options: Option<IndexCreationOptions>) -> String;

        /// Drops the named index.
        index_handler => fn drop_index / drop_index_async, drop_index_keyed / drop_index_keyed_async
            <D>(name: &str) -> ();

        /// Lists the collection's index names.
        index_handler => fn get_index_names / get_index_names_async,
            get_index_names_keyed / get_index_names_keyed_async
            <D>() -> Vec<String>;
    }
}
