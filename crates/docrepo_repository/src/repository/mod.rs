//! The repository facade.
//!
//! [`Repository`] is generic over a store context and a default key type.
//! Every operation comes in four forms:
//!
//! | form | key type | call style |
//! |------|----------|------------|
//! | `op::<D>` | the repository's `K` | blocking |
//! | `op_async::<D>` | the repository's `K` | async |
//! | `op_keyed::<D, TK>` | any `TK` | blocking |
//! | `op_keyed_async::<D, TK>` | any `TK` | async |
//!
//! The last argument of every form is `impl Into<CallOptions>`; pass `()`
//! for an unpartitioned, never-cancelled call. The facade binds generic
//! parameters and normalizes options, then hands over to the capability
//! handler and returns its result untouched.

use crate::context::StoreContext;
use crate::lazy::LazyHandler;
use docrepo_core::{DefaultKey, DocumentKey, RepositoryResult};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Generates the four forms of a facade operation from one signature.
///
/// The canonical blocking form forwards to the handler method of the same
/// name, the canonical async form to its `_async` sibling. The convenience
/// forms bind the key type to the repository's `K` and accept any
/// [`DefaultKeyDocument<K>`](docrepo_core::DefaultKeyDocument).
macro_rules! facade_ops {
    ($(
        $(#[$meta:meta])*
        $handler:ident => fn $name:ident / $name_async:ident,
            $keyed:ident / $keyed_async:ident
            <$d:ident $(, $p:ident)?>($($arg:ident: $ty:ty),*) -> $ret:ty;
    )*) => {$(
        $(#[$meta])*
        pub fn $name<$d $(, $p)?>(
            &self,
            $($arg: $ty,)*
            options: impl Into<CallOptions>,
        ) -> RepositoryResult<$ret>
        where
            $d: docrepo_core::DefaultKeyDocument<K>,
            $($p: serde::de::DeserializeOwned + Send + 'static,)?
        {
            self.$keyed::<$d, K $(, $p)?>($($arg,)* options)
        }

        #[doc = concat!("Asynchronous form of [`", stringify!($name), "`](Self::", stringify!($name), ").")]
        pub async fn $name_async<$d $(, $p)?>(
            &self,
            $($arg: $ty,)*
            options: impl Into<CallOptions>,
        ) -> RepositoryResult<$ret>
        where
            $d: docrepo_core::DefaultKeyDocument<K>,
            $($p: serde::de::DeserializeOwned + Send + 'static,)?
        {
            self.$keyed_async::<$d, K $(, $p)?>($($arg,)* options).await
        }

        #[doc = concat!("Form of [`", stringify!($name), "`](Self::", stringify!($name), ") for documents keyed by any `TK`.")]
        pub fn $keyed<$d, TK $(, $p)?>(
            &self,
            $($arg: $ty,)*
            options: impl Into<CallOptions>,
        ) -> RepositoryResult<$ret>
        where
            $d: Document<TK>,
            TK: DocumentKey,
            $($p: serde::de::DeserializeOwned + Send + 'static,)?
        {
            self.$handler().$name::<$d, TK $(, $p)?>($($arg,)* &options.into())
        }

        #[doc = concat!("Asynchronous form of [`", stringify!($keyed), "`](Self::", stringify!($keyed), ").")]
        pub async fn $keyed_async<$d, TK $(, $p)?>(
            &self,
            $($arg: $ty,)*
            options: impl Into<CallOptions>,
        ) -> RepositoryResult<$ret>
        where
            $d: Document<TK>,
            TK: DocumentKey,
            $($p: serde::de::DeserializeOwned + Send + 'static,)?
        {
            let options = options.into();
            self.$handler().$name_async::<$d, TK $(, $p)?>($($arg,)* &options).await
        }
    )*};
}

mod create;
mod delete;
mod index;
mod read;
mod update;

/// Generic document repository.
///
/// Handlers are built lazily from the shared context, at most once per
/// repository, and reused for the repository's lifetime.
///
/// # Example
///
/// ```rust,ignore
/// let repo: Repository<MemoryStore> = Repository::new(MemoryStore::new(MemoryConfig::default()));
///
/// repo.add_one(&order, ())?;
/// let removed = repo.delete_one_by(Filter::<Order>::by_id(order.id())?, "tenant-a")?;
/// let names = repo.get_index_names_async::<Order>(token.clone()).await?;
/// ```
pub struct Repository<C: StoreContext, K: DocumentKey = DefaultKey> {
    context: Arc<C>,
    creator: LazyHandler<C::Creator>,
    reader: LazyHandler<C::Reader>,
    updater: LazyHandler<C::Updater>,
    eraser: LazyHandler<C::Eraser>,
    index_handler: LazyHandler<C::IndexHandler>,
    _key: PhantomData<fn() -> K>,
}

impl<C: StoreContext, K: DocumentKey> Repository<C, K> {
    /// Creates a repository owning a new context.
    pub fn new(context: C) -> Self {
        Self::from_shared(Arc::new(context))
    }

    /// Creates a repository over a context shared with other repositories.
    pub fn from_shared(context: Arc<C>) -> Self {
        Self {
            context,
            creator: LazyHandler::new("creator"),
            reader: LazyHandler::new("reader"),
            updater: LazyHandler::new("updater"),
            eraser: LazyHandler::new("eraser"),
            index_handler: LazyHandler::new("index"),
            _key: PhantomData,
        }
    }

    /// Returns the shared context.
    pub fn context(&self) -> &Arc<C> {
        &self.context
    }

    /// Returns the create handler, wiring it on first use.
    pub fn creator(&self) -> &C::Creator {
        self.creator.get_or_wire(|| self.context.creator())
    }

    /// Returns the read handler, wiring it on first use.
    pub fn reader(&self) -> &C::Reader {
        self.reader.get_or_wire(|| self.context.reader())
    }

    /// Returns the update handler, wiring it on first use.
    pub fn updater(&self) -> &C::Updater {
        self.updater.get_or_wire(|| self.context.updater())
    }

    /// Returns the delete handler, wiring it on first use.
    pub fn eraser(&self) -> &C::Eraser {
        self.eraser.get_or_wire(|| self.context.eraser())
    }

    /// Returns the index handler, wiring it on first use.
    pub fn index_handler(&self) -> &C::IndexHandler {
        self.index_handler
            .get_or_wire(|| self.context.index_handler())
    }

    /// Installs a create handler in place of the context-built one.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerAlreadyWired`] once the handler has been used or
    /// substituted.
    ///
    /// [`HandlerAlreadyWired`]: docrepo_core::RepositoryError::HandlerAlreadyWired
    pub fn set_creator(&self, handler: C::Creator) -> RepositoryResult<()> {
        self.creator.substitute(handler)
    }

    /// Installs a read handler. Fails once the handler is wired.
    pub fn set_reader(&self, handler: C::Reader) -> RepositoryResult<()> {
        self.reader.substitute(handler)
    }

    /// Installs an update handler. Fails once the handler is wired.
    pub fn set_updater(&self, handler: C::Updater) -> RepositoryResult<()> {
        self.updater.substitute(handler)
    }

    /// Installs a delete handler. Fails once the handler is wired.
    pub fn set_eraser(&self, handler: C::Eraser) -> RepositoryResult<()> {
        self.eraser.substitute(handler)
    }

    /// Installs an index handler. Fails once the handler is wired.
    pub fn set_index_handler(&self, handler: C::IndexHandler) -> RepositoryResult<()> {
        self.index_handler.substitute(handler)
    }
}

impl<C: StoreContext, K: DocumentKey> fmt::Debug for Repository<C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("key", &std::any::type_name::<K>())
            .field("creator", &self.creator)
            .field("reader", &self.reader)
            .field("updater", &self.updater)
            .field("eraser", &self.eraser)
            .field("index_handler", &self.index_handler)
            .finish_non_exhaustive()
    }
}
