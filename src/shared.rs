//! Shared CacheTable
//!
//! [`CacheTable`] itself is single-threaded. This wrapper applies the
//! locking discipline needed to share one across threads.
//!
//! ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
//!
//! - **Writes** (set/delete/compact): exclusive write lock over the whole
//!   table, which guards every chain, the logical clock and the live count
//! - **Reads** (get/len/load): shared read lock, concurrent with each other
//!
//! Values leave the lock by clone (`get_cloned`) or stay behind a guard
//! (`read`/`write`).

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cachetable::{CacheTable, Entry, Timestamp};
use crate::config::TableConfig;
use crate::error::Result;

/// Thread-safe handle around a [`CacheTable`]
#[derive(Debug)]
pub struct SharedCacheTable<V, T: Timestamp = u64> {
    inner: RwLock<CacheTable<V, T>>,
}

impl<V> SharedCacheTable<V> {
    pub fn new(bucket_count: usize, bucket_capacity: usize, preallocate: bool) -> Result<Self> {
        CacheTable::new(bucket_count, bucket_capacity, preallocate).map(Self::from_table)
    }

    pub fn with_config(config: &TableConfig) -> Result<Self> {
        CacheTable::with_config(config).map(Self::from_table)
    }
}

impl<V, T: Timestamp> SharedCacheTable<V, T> {
    pub fn from_table(table: CacheTable<V, T>) -> Self {
        Self {
            inner: RwLock::new(table),
        }
    }

    /// Shared read access to the table
    pub fn read(&self) -> RwLockReadGuard<'_, CacheTable<V, T>> {
        self.inner.read()
    }

    /// Exclusive write access to the table
    pub fn write(&self) -> RwLockWriteGuard<'_, CacheTable<V, T>> {
        self.inner.write()
    }

    pub fn set(&self, key: &str, value: V) -> bool {
        self.inner.write().set(key, value)
    }

    pub fn delete(&self, key: &str) -> Option<Entry<V, T>> {
        self.inner.write().delete(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn load(&self) -> f64 {
        self.inner.read().load()
    }

    pub fn into_inner(self) -> CacheTable<V, T> {
        self.inner.into_inner()
    }
}

impl<V: Clone, T: Timestamp> SharedCacheTable<V, T> {
    /// Clone of the value under `key`
    pub fn get_cloned(&self, key: &str) -> Option<V> {
        self.inner.read().get(key).map(|entry| entry.value().clone())
    }
}

impl<V, T: Timestamp> From<CacheTable<V, T>> for SharedCacheTable<V, T> {
    fn from(table: CacheTable<V, T>) -> Self {
        Self::from_table(table)
    }
}
