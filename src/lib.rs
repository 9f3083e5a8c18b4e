//! # cachetable
//!
//! A fixed-capacity, in-memory key/value table with:
//! - A fixed number of buckets, each bounded to a fixed number of entries
//! - Oldest-entry eviction when a full bucket admits a new key
//! - A logical insertion clock compared with wraparound-safe arithmetic
//! - Optional single-writer/multi-reader sharing across threads
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CacheTable::get/set/delete                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ one_at_a_time(key) % bucket_count
//!                       ▼
//!   ┌────────┬────────┬────────┬────────┬────────┐
//!   │bucket 0│bucket 1│bucket 2│  ...   │bucket N│   fixed, never resized
//!   └───┬────┴────────┴────────┴────────┴────────┘
//!       │ chain of <= bucket_capacity entries
//!       ▼
//!   ┌──────────────────────────────────────────┐
//!   │ find_match_or_eviction_candidate         │
//!   │   key match  -> overwrite value in place │
//!   │   no match   -> append, or replace the   │
//!   │                 entry with greatest Age  │
//!   └──────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use cachetable::CacheTable;
//!
//! let mut table: CacheTable<i32> = CacheTable::new(1, 1, true).unwrap();
//! table.set("alpha", 10);
//! table.set("beta", 20);
//!
//! assert!(table.get("alpha").is_none());
//! assert_eq!(table.get("beta").map(|e| *e.value()), Some(20));
//! assert_eq!(table.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod hash;
pub mod cachetable;
pub mod shared;
pub mod command;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CacheTableError, Result};
pub use config::TableConfig;
pub use cachetable::{CacheTable, ChainSearch, Entry, Timestamp};
pub use shared::SharedCacheTable;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of cachetable
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
