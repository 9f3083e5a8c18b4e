//! CacheTable implementation
//!
//! Fixed array of bounded chains, a table-wide logical clock and a live
//! entry count. No operation touches more than one bucket, except
//! [`CacheTable::compact`].

use std::cmp::Reverse;
use std::mem;

use super::chain::{find_match_or_eviction_candidate, ChainSearch};
use super::timestamp::{age, Timestamp};
use super::Entry;
use crate::config::TableConfig;
use crate::error::{CacheTableError, Result};
use crate::hash::bucket_index;

/// Fixed-capacity hash table that overwrites the oldest entry of a full bucket
///
/// `T` is the width of the logical clock. Whenever the clock reaches half
/// of its range the table restamps live entries densely from zero, so the
/// clock never wraps and every live stamp stays within half a lap of the
/// current time.
#[derive(Debug)]
pub struct CacheTable<V, T: Timestamp = u64> {
    /// One chain per bucket, never resized
    buckets: Box<[Vec<Entry<V, T>>]>,

    /// Max entries per chain
    bucket_capacity: usize,

    /// Next stamp to hand out
    clock: T,

    /// Sum of chain lengths
    len: usize,
}

impl<V> CacheTable<V> {
    /// Create a table of `bucket_count` buckets holding `bucket_capacity`
    /// entries each, stamped by a 64-bit clock
    ///
    /// With `preallocate`, every chain reserves its full capacity now;
    /// otherwise a chain reserves it on its first insert. Observable
    /// behavior is the same either way.
    pub fn new(bucket_count: usize, bucket_capacity: usize, preallocate: bool) -> Result<Self> {
        Self::with_timestamp(bucket_count, bucket_capacity, preallocate)
    }

    /// Create a table from a [`TableConfig`]
    pub fn with_config(config: &TableConfig) -> Result<Self> {
        Self::new(config.bucket_count, config.bucket_capacity, config.preallocate)
    }
}

impl<V, T: Timestamp> CacheTable<V, T> {
    /// Like [`CacheTable::new`], with a clock of width `T`
    ///
    /// Fails with `TimestampTooNarrow` unless the capacity is below half
    /// the clock's range.
    pub fn with_timestamp(
        bucket_count: usize,
        bucket_capacity: usize,
        preallocate: bool,
    ) -> Result<Self> {
        if bucket_count == 0 {
            return Err(CacheTableError::ZeroBucketCount);
        }
        if bucket_capacity == 0 {
            return Err(CacheTableError::ZeroBucketCapacity);
        }
        let capacity =
            bucket_count
                .checked_mul(bucket_capacity)
                .ok_or(CacheTableError::CapacityOverflow {
                    bucket_count,
                    bucket_capacity,
                })?;
        let limit = T::HALF.as_u64();
        if capacity as u64 >= limit {
            return Err(CacheTableError::TimestampTooNarrow { capacity, limit });
        }

        let buckets = (0..bucket_count)
            .map(|_| {
                if preallocate {
                    Vec::with_capacity(bucket_capacity)
                } else {
                    Vec::new()
                }
            })
            .collect();

        tracing::debug!(
            bucket_count,
            bucket_capacity,
            preallocate,
            "created cache table"
        );

        Ok(Self {
            buckets,
            bucket_capacity,
            clock: T::ZERO,
            len: 0,
        })
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Entry stored under `key`
    ///
    /// Reading does not refresh the entry's age.
    pub fn get(&self, key: &str) -> Option<&Entry<V, T>> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|entry| entry.key == key)
    }

    /// Mutable access to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_of(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| &mut entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Entry that `set(key, _)` would evict right now, if any
    ///
    /// `None` when the key is already present or its bucket has room.
    pub fn next_victim(&self, key: &str) -> Option<&Entry<V, T>> {
        let chain = &self.buckets[self.bucket_of(key)];
        if chain.len() < self.bucket_capacity {
            return None;
        }
        match find_match_or_eviction_candidate(chain, self.clock, key) {
            ChainSearch::Found(_) => None,
            ChainSearch::Missing { oldest } => oldest.map(|slot| &chain[slot]),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Store `value` under `key`
    ///
    /// An existing key keeps its stamp and only has its value replaced. A
    /// new key is stamped from the clock and appended, or overwrites the
    /// oldest entry when its bucket is full. Always succeeds.
    pub fn set(&mut self, key: &str, value: V) -> bool {
        let index = self.bucket_of(key);
        let reference = self.clock;
        let bucket_capacity = self.bucket_capacity;
        let chain = &mut self.buckets[index];

        match find_match_or_eviction_candidate(chain, reference, key) {
            ChainSearch::Found(slot) => {
                chain[slot].value = value;
                return true;
            }
            ChainSearch::Missing { oldest } => {
                let entry = Entry::new(key, value, reference);
                match oldest {
                    Some(slot) if chain.len() >= bucket_capacity => {
                        let evicted = mem::replace(&mut chain[slot], entry);
                        tracing::trace!(
                            bucket = index,
                            slot,
                            evicted = %evicted.key,
                            created_at = ?evicted.created_at,
                            "evicted oldest entry"
                        );
                    }
                    _ => {
                        if chain.capacity() == 0 {
                            chain.reserve_exact(bucket_capacity);
                        }
                        chain.push(entry);
                        self.len += 1;
                    }
                }
            }
        }

        self.clock = reference.successor();
        if self.clock >= T::HALF {
            self.compact();
        }
        true
    }

    /// Remove `key`, returning its entry
    pub fn delete(&mut self, key: &str) -> Option<Entry<V, T>> {
        let index = self.bucket_of(key);
        let chain = &mut self.buckets[index];
        let slot = chain.iter().position(|entry| entry.key == key)?;

        self.len -= 1;
        Some(chain.swap_remove(slot))
    }

    /// Restamp every live entry densely from zero, oldest first
    ///
    /// Relative age order inside each bucket is preserved and the clock is
    /// reset to the live count. `set` calls this whenever a new key brings
    /// the clock to half its range.
    pub fn compact(&mut self) {
        let reference = self.clock;
        let mut order = Vec::with_capacity(self.len);
        for (bucket, chain) in self.buckets.iter().enumerate() {
            for (slot, entry) in chain.iter().enumerate() {
                order.push((age(entry.created_at, reference), bucket, slot));
            }
        }
        order.sort_unstable_by_key(|&(entry_age, bucket, slot)| (Reverse(entry_age), bucket, slot));

        let mut stamp = T::ZERO;
        for (_, bucket, slot) in order {
            self.buckets[bucket][slot].created_at = stamp;
            stamp = stamp.successor();
        }

        tracing::debug!(
            live = self.len,
            previous_clock = ?reference,
            clock = ?stamp,
            "compacted logical clock"
        );
        self.clock = stamp;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slots, `bucket_count * bucket_capacity`
    pub fn capacity(&self) -> usize {
        self.buckets.len() * self.bucket_capacity
    }

    /// Fraction of slots in use, in `[0, 1]`
    pub fn load(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    /// Stamp the next new key will receive
    pub fn clock(&self) -> T {
        self.clock
    }

    /// Live entries in bucket order
    pub fn iter(&self) -> impl Iterator<Item = &Entry<V, T>> + '_ {
        self.buckets.iter().flat_map(|chain| chain.iter())
    }

    #[inline]
    fn bucket_of(&self, key: &str) -> usize {
        bucket_index(key, self.buckets.len())
    }
}
