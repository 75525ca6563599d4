use super::Repository;
use crate::context::StoreContext;
use crate::handler::Reader;
use docrepo_core::{
    CallOptions, DefaultKeyDocument, Document, DocumentKey, Filter, Projection, RepositoryResult,
};

impl<C: StoreContext, K: DocumentKey> Repository<C, K> {
    /// Loads the document with the given key.
    pub fn get_by_id<D>(&self, id: &K, options: impl Into<CallOptions>) -> RepositoryResult<Option<D>>
    where
        D: DefaultKeyDocument<K>,
    {
        self.get_by_id_keyed::<D, K>(id, options)
    }

    /// Asynchronous form of [`get_by_id`](Self::get_by_id).
    pub async fn get_by_id_async<D>(
        &self,
        id: &K,
        options: impl Into<CallOptions>,
    ) -> RepositoryResult<Option<D>>
    where
        D: DefaultKeyDocument<K>,
    {
        self.get_by_id_keyed_async::<D, K>(id, options).await
    }

    /// Form of [`get_by_id`](Self::get_by_id) for documents keyed by any `TK`.
    pub fn get_by_id_keyed<D, TK>(
        &self,
        id: &TK,
        options: impl Into<CallOptions>,
    ) -> RepositoryResult<Option<D>>
    where
        D: Document<TK>,
        TK: DocumentKey,
    {
        self.reader().get_by_id::<D, TK>(id, &options.into())
    }

    /// Asynchronous form of [`get_by_id_keyed`](Self::get_by_id_keyed).
    pub async fn get_by_id_keyed_async<D, TK>(
        &self,
        id: &TK,
        options: impl Into<CallOptions>,
    ) -> RepositoryResult<Option<D>>
    where
        D: Document<TK>,
        TK: DocumentKey,
    {
        let options = options.into();
        self.reader().get_by_id_async::<D, TK>(id, &options).await
    }

    facade_ops! {
        /// Loads the first document matching the filter.
        reader => fn get_one / get_one_async, get_one_keyed / get_one_keyed_async
            <D>(filter: &Filter<D>) -> Option<D>;

        /// Loads every document matching the filter.
        reader => fn get_all / get_all_async, get_all_keyed / get_all_keyed_async
            <D>(filter: &Filter<D>) -> Vec<D>;

        /// Returns whether any document matches the filter.
        reader => fn any / any_async, any_keyed / any_keyed_async
            <D>(filter: &Filter<D>) -> bool;

        /// Counts the documents matching the filter.
        reader => fn count / count_async, count_keyed / count_keyed_async
            <D>(filter: &Filter<D>) -> u64;

        /// Projects the first matching document into `P`.
        reader => fn project_one / project_one_async, project_one_keyed / project_one_keyed_async
            <D, P>(filter: &Filter<D>, projection: &Projection<D>) -> Option<P>;

        /// Projects every matching document into `P`.
        reader => fn project_many / project_many_async, project_many_keyed / project_many_keyed_async
            <D, P>(filter: &Filter<D>, projection: &Projection<D>) -> Vec<P>;
    }
}
