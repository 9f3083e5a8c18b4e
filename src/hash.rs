//! Key hashing
//!
//! Bob Jenkins' one-at-a-time hash. It is only used to pick a bucket, so
//! no cryptographic property is needed; it spreads short ASCII keys well
//! and is stable for the lifetime of the process.

/// One-at-a-time hash of `key`
///
/// Mixes each `char` of the key as its Unicode scalar value, which is the
/// same as mixing bytes for ASCII keys.
pub fn one_at_a_time(key: &str) -> u32 {
    let mut h: u32 = 0;
    for c in key.chars() {
        h = h.wrapping_add(c as u32);
        h = h.wrapping_add(h << 10);
        h ^= h >> 6;
    }
    h = h.wrapping_add(h << 3);
    h ^= h >> 11;
    h = h.wrapping_add(h << 15);
    h
}

/// Bucket a key maps to in a table of `bucket_count` buckets
#[inline]
pub fn bucket_index(key: &str, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0);
    one_at_a_time(key) as usize % bucket_count
}
