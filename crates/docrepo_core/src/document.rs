//! Document contract.

use crate::key::{DefaultKey, DocumentKey};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A document stored in a collection and identified by a key of type `K`.
///
/// `K` is a trait parameter rather than an associated type so a document
/// type may be addressed through more than one key type, mirroring the
/// facade's two generic dimensions (document type and key type).
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// struct Invoice {
///     #[serde(rename = "_id")]
///     id: Uuid,
///     total: i64,
/// }
///
/// impl Document<Uuid> for Invoice {
///     fn id(&self) -> &Uuid {
///         &self.id
///     }
/// }
/// ```
pub trait Document<K: DocumentKey>: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Returns the document's key.
    fn id(&self) -> &K;

    /// Returns the name of the collection documents of this type live in.
    fn collection_name() -> String
    where
        Self: Sized,
    {
        default_collection_name::<Self>()
    }

    /// Returns the partition this particular document belongs to.
    ///
    /// Document-based calls that carry no explicit partition key are routed
    /// to this partition.
    fn partition_key(&self) -> Option<&str> {
        None
    }
}

/// Marker for documents addressable through a repository's default key.
///
/// Bounds the convenience entry points of `Repository<C, K>`, whose key
/// defaults to [`DefaultKey`]. Implemented for every `Document<K>`, so a
/// bare `D: DefaultKeyDocument` means a document keyed by [`DefaultKey`].
pub trait DefaultKeyDocument<K: DocumentKey = DefaultKey>: Document<K> {}

impl<K: DocumentKey, T: Document<K>> DefaultKeyDocument<K> for T {}

/// Derives a collection name from a type name.
///
/// Module path and generic arguments are stripped, the rest is lower-cased
/// and pluralised with a trailing `s` (unless it already ends in one).
#[must_use]
pub fn default_collection_name<T: ?Sized>() -> String {
    let lower = short_type_name::<T>().to_lowercase();
    if lower.ends_with('s') {
        lower
    } else {
        format!("{lower}s")
    }
}

/// Type name without module path or generic arguments.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Combines a partition key and a collection name into the physical
/// collection name used by partitioned stores.
#[must_use]
pub fn partitioned_collection_name(
    collection: &str,
    partition_key: Option<&str>,
    separator: &str,
) -> String {
    match partition_key {
        Some(partition) if !partition.is_empty() => format!("{partition}{separator}{collection}"),
        _ => collection.to_string(),
    }
}
