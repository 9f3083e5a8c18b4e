//! Error types for cachetable
//!
//! Provides a unified error type for all operations. Lookups that miss are
//! not errors (they return `None`), and neither is eviction.

use thiserror::Error;

/// Result type alias using CacheTableError
pub type Result<T> = std::result::Result<T, CacheTableError>;

/// Unified error type for cachetable operations
#[derive(Debug, Error)]
pub enum CacheTableError {
    // -------------------------------------------------------------------------
    // Construction Errors
    // -------------------------------------------------------------------------
    #[error("bucket count must be greater than zero")]
    ZeroBucketCount,

    #[error("bucket capacity must be greater than zero")]
    ZeroBucketCapacity,

    #[error("capacity overflow: {bucket_count} buckets x {bucket_capacity} slots")]
    CapacityOverflow {
        bucket_count: usize,
        bucket_capacity: usize,
    },

    /// The logical clock is too narrow to order `capacity` live entries.
    #[error("capacity {capacity} needs a wider timestamp (must be below {limit})")]
    TimestampTooNarrow { capacity: usize, limit: u64 },

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("Command error: {0}")]
    Command(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheTableError {
    /// True for the errors raised while validating table dimensions
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            CacheTableError::ZeroBucketCount
                | CacheTableError::ZeroBucketCapacity
                | CacheTableError::CapacityOverflow { .. }
                | CacheTableError::TimestampTooNarrow { .. }
        )
    }
}
