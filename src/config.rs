//! Configuration for cachetable
//!
//! Table dimensions with sensible defaults.

/// Dimensions of a [`CacheTable`](crate::CacheTable)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------
    /// Number of buckets keys are hashed into
    pub bucket_count: usize,

    /// Maximum number of entries per bucket before the oldest is evicted
    pub bucket_capacity: usize,

    // -------------------------------------------------------------------------
    // Allocation
    // -------------------------------------------------------------------------
    /// Reserve storage for every bucket up front instead of on first insert
    pub preallocate: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bucket_count: 100,
            bucket_capacity: 20,
            preallocate: true,
        }
    }
}

impl TableConfig {
    /// Create a new config builder
    pub fn builder() -> TableConfigBuilder {
        TableConfigBuilder::default()
    }

    /// Total number of slots, or `None` if the product overflows
    pub fn capacity(&self) -> Option<usize> {
        self.bucket_count.checked_mul(self.bucket_capacity)
    }
}

/// Builder for TableConfig
#[derive(Default)]
pub struct TableConfigBuilder {
    config: TableConfig,
}

impl TableConfigBuilder {
    /// Set the number of buckets
    pub fn bucket_count(mut self, count: usize) -> Self {
        self.config.bucket_count = count;
        self
    }

    /// Set the number of slots per bucket
    pub fn bucket_capacity(mut self, capacity: usize) -> Self {
        self.config.bucket_capacity = capacity;
        self
    }

    /// Reserve every bucket's storage at construction
    pub fn preallocate(mut self, preallocate: bool) -> Self {
        self.config.preallocate = preallocate;
        self
    }

    pub fn build(self) -> TableConfig {
        self.config
    }
}
