//! Index definitions.
//!
//! # Index Kinds
//!
//! - [`IndexKind::Ascending`] / [`IndexKind::Descending`]: ordered single-field indexes
//! - [`IndexKind::Hashed`]: equality lookups and hash-based sharding
//! - [`IndexKind::Text`]: full-text search; one or more fields combine into
//!   a single text index per collection

use std::fmt;
use std::time::Duration;

/// Name of the key index every collection carries.
pub const ID_INDEX_NAME: &str = "_id_";

/// Kind of a single index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Full-text index.
    Text,
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
    /// Hashed values.
    Hashed,
}

impl IndexKind {
    /// Suffix used in generated index names.
    #[must_use]
    pub const fn name_suffix(self) -> &'static str {
        match self {
            IndexKind::Text => "text",
            IndexKind::Ascending => "1",
            IndexKind::Descending => "-1",
            IndexKind::Hashed => "hashed",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_suffix())
    }
}

/// Optional settings for index creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexCreationOptions {
    /// Explicit index name. Generated from the keys when absent.
    pub name: Option<String>,
    /// Whether indexed values must be unique.
    pub unique: Option<bool>,
    /// Whether documents lacking the field are left out of the index.
    pub sparse: Option<bool>,
    /// Time-to-live for documents, measured from the indexed date field.
    pub expire_after: Option<Duration>,
    /// Whether the index is built in the background.
    pub background: Option<bool>,
}

impl IndexCreationOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the index name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets uniqueness.
    #[must_use]
    pub const fn unique(mut self, value: bool) -> Self {
        self.unique = Some(value);
        self
    }

    /// Sets sparsity.
    #[must_use]
    pub const fn sparse(mut self, value: bool) -> Self {
        self.sparse = Some(value);
        self
    }

    /// Sets the time-to-live.
    #[must_use]
    pub const fn expire_after(mut self, ttl: Duration) -> Self {
        self.expire_after = Some(ttl);
        self
    }

    /// Sets background building.
    #[must_use]
    pub const fn background(mut self, value: bool) -> Self {
        self.background = Some(value);
        self
    }
}

/// One key of an index definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexKey {
    /// Dotted field path.
    pub path: String,
    /// Kind of this key.
    pub kind: IndexKind,
}

impl IndexKey {
    /// Creates an index key.
    pub fn new(path: impl Into<String>, kind: IndexKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// A complete index definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexModel {
    /// Index name.
    pub name: String,
    /// Ordered keys.
    pub keys: Vec<IndexKey>,
    /// Creation options.
    pub options: IndexCreationOptions,
}

impl IndexModel {
    /// Creates a model, naming it from `options.name` or from its keys.
    #[must_use]
    pub fn new(keys: Vec<IndexKey>, options: IndexCreationOptions) -> Self {
        let name = options
            .name
            .clone()
            .unwrap_or_else(|| default_index_name(&keys));
        Self {
            name,
            keys,
            options,
        }
    }

    /// Returns true if any key is a text key.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.keys.iter().any(|k| k.kind == IndexKind::Text)
    }

    /// Returns true if the other model indexes the same keys with the same options.
    #[must_use]
    pub fn same_definition(&self, other: &IndexModel) -> bool {
        self.keys == other.keys && self.options == other.options
    }
}

/// Generates the conventional name for a list of index keys:
/// `field_1`, `field_-1`, `field_hashed`, `a_text_b_text`.
#[must_use]
pub fn default_index_name(keys: &[IndexKey]) -> String {
    keys.iter()
        .map(|k| format!("{}_{}", k.path, k.kind.name_suffix()))
        .collect::<Vec<_>>()
        .join("_")
}
