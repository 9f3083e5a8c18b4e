//! Bucket chain search
//!
//! One linear pass over a chain answers both questions `set` needs: is the
//! key already here, and if not, which slot holds the oldest entry.

use super::timestamp::{age, Age, Timestamp};
use super::Entry;

/// Outcome of scanning a chain for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainSearch {
    /// The key lives at this chain index
    Found(usize),

    /// The key is absent; `oldest` is the eviction candidate (`None` for an
    /// empty chain)
    Missing { oldest: Option<usize> },
}

impl ChainSearch {
    /// Index of the match or of the eviction candidate
    pub fn index(&self) -> Option<usize> {
        match *self {
            ChainSearch::Found(index) => Some(index),
            ChainSearch::Missing { oldest } => oldest,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, ChainSearch::Found(_))
    }
}

/// Find `key` in `chain`, or the entry to evict relative to `reference`
///
/// Scans in chain order. Among non-matching entries the one with the
/// greatest [`Age`] wins; equal ages keep the lowest index.
pub fn find_match_or_eviction_candidate<V, T: Timestamp>(
    chain: &[Entry<V, T>],
    reference: T,
    key: &str,
) -> ChainSearch {
    let mut oldest: Option<(usize, Age<T>)> = None;

    for (index, entry) in chain.iter().enumerate() {
        if entry.key == key {
            return ChainSearch::Found(index);
        }
        let entry_age = age(entry.created_at, reference);
        // strict comparison keeps the lowest index on ties
        if oldest.map_or(true, |(_, best)| entry_age > best) {
            oldest = Some((index, entry_age));
        }
    }

    ChainSearch::Missing {
        oldest: oldest.map(|(index, _)| index),
    }
}
