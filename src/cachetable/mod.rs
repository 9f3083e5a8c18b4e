//! CacheTable Module
//!
//! Fixed-capacity bucketed hash table with oldest-entry eviction.
//!
//! ## Responsibilities
//! - Route every key to exactly one bucket via the one-at-a-time hash
//! - Keep each bucket at or below its slot limit
//! - Evict the oldest entry of a full bucket to admit a new key
//! - Order entries with a logical clock that tolerates wraparound
//!
//! ## Data Structure Choice
//! A boxed slice of small `Vec` chains, one per bucket:
//! - Bucket count never changes, so there is no rehash path
//! - Each chain is bounded by `bucket_capacity`, so every operation is
//!   O(bucket_capacity) and touches a single bucket
//! - Chains are unordered; delete swaps with the last slot

mod chain;
mod table;
mod timestamp;

pub use chain::{find_match_or_eviction_candidate, ChainSearch};
pub use table::CacheTable;
pub use timestamp::{age, Age, Timestamp};

/// Entry stored in a bucket chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V, T = u64> {
    key: String,
    value: V,
    created_at: T,
}

impl<V, T: Timestamp> Entry<V, T> {
    pub fn new(key: impl Into<String>, value: V, created_at: T) -> Self {
        Self {
            key: key.into(),
            value,
            created_at,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Logical time the key was admitted; unchanged by value overwrites
    pub fn created_at(&self) -> T {
        self.created_at
    }

    pub fn into_value(self) -> V {
        self.value
    }

    pub fn into_parts(self) -> (String, V, T) {
        (self.key, self.value, self.created_at)
    }
}
