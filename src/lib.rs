//! Memocache - A content-addressed memoizing result cache
//!
//! Deduplicates expensive computations by hashing a composite key and storing
//! serialized results in a pluggable backing store (in-memory or on-disk).

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{digest_fragments, BackingStore, Cache, DiskStore, Entry, MemoryStore, StatsSnapshot};
pub use config::Config;
pub use error::{CacheError, Result};
