//! In-memory store configuration.

/// Configuration for a [`MemoryStore`](crate::MemoryStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Name reported as the database name.
    pub database_name: String,

    /// Text placed between a partition key and a collection name.
    pub partition_separator: String,

    /// Whether every collection reports the implicit `_id_` index.
    pub implicit_id_index: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            database_name: "docrepo".to_string(),
            partition_separator: "-".to_string(),
            implicit_id_index: true,
        }
    }
}

impl MemoryConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the database name.
    #[must_use]
    pub fn database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = name.into();
        self
    }

    /// Sets the partition separator.
    #[must_use]
    pub fn partition_separator(mut self, separator: impl Into<String>) -> Self {
        self.partition_separator = separator.into();
        self
    }

    /// Sets whether the implicit `_id_` index is reported.
    #[must_use]
    pub const fn implicit_id_index(mut self, value: bool) -> Self {
        self.implicit_id_index = value;
        self
    }
}
