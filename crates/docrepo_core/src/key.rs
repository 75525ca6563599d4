//! Document key model.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::Arc;
use uuid::Uuid;

/// The key type used by the facade's convenience surface.
pub type DefaultKey = Uuid;

/// A type usable as a document key.
///
/// Keys are compared by value, hashed for lookups and serialized to the
/// store's document representation. Any type meeting the bounds is a key.
pub trait DocumentKey:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> DocumentKey for T where
    T: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Produces fresh, unique keys for new documents.
pub trait KeyGenerator: DocumentKey {
    /// Generates a new key.
    fn generate() -> Self;
}

impl KeyGenerator for Uuid {
    fn generate() -> Self {
        Uuid::new_v4()
    }
}

impl KeyGenerator for String {
    fn generate() -> Self {
        Uuid::new_v4().hyphenated().to_string()
    }
}

trait DynKey: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynKey) -> bool;
}

impl<K: DocumentKey> DynKey for K {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynKey) -> bool {
        other.as_any().downcast_ref::<K>() == Some(self)
    }
}

/// One component of an entity's key, with its concrete type erased.
///
/// An entity's keys are an ordered list of components so composite keys
/// can be expressed; single-key entities return exactly one.
#[derive(Clone)]
pub struct KeyComponent(Arc<dyn DynKey>);

impl KeyComponent {
    /// Wraps a key value.
    pub fn new<K: DocumentKey>(key: K) -> Self {
        Self(Arc::new(key))
    }

    /// Returns the key value if it has type `K`.
    #[must_use]
    pub fn downcast_ref<K: 'static>(&self) -> Option<&K> {
        self.0.as_any().downcast_ref::<K>()
    }
}

impl PartialEq for KeyComponent {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_ref())
    }
}

impl fmt::Debug for KeyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
