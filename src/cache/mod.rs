//! Cache Module
//!
//! Content-addressed memoization of expensive computations: hash a composite
//! key, look for a stored result in a backing store, compute and store on a
//! miss.

mod disk;
mod entry;
mod hash;
mod memory;
mod registry;
mod stats;
mod store;


// Re-export public types
pub use disk::DiskStore;
pub use entry::Entry;
pub use hash::digest_fragments;
pub use memory::MemoryStore;
pub use registry::EntryRegistry;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::BackingStore;

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::config::Config;
use crate::error::Result;

// == Cache Facade ==
/// Front object tying the hasher, registry, and backing store together.
///
/// A `Cache` is shared across threads; entries come back as `Arc` handles
/// and all lookups for the same key share one handle.
#[derive(Debug)]
pub struct Cache {
    registry: EntryRegistry,
}

impl Cache {
    // == Constructors ==
    /// Opens a filesystem-backed cache rooted at `root`.
    ///
    /// # Errors
    /// Fails when the root directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = DiskStore::open(root)?;
        info!(root = %store.root().display(), "Opened cache");
        Ok(Self::with_store(Arc::new(store)))
    }

    /// Creates a cache backed by an in-memory byte map.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Creates a cache over an arbitrary backing store.
    pub fn with_store(store: Arc<dyn BackingStore>) -> Self {
        Self {
            registry: EntryRegistry::new(store),
        }
    }

    /// Opens a filesystem-backed cache with the root resolved from the
    /// environment (`CACHE_DIR`, falling back to
    /// `<home>/.cache/memocache/memoized`).
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        Self::open(config.root)
    }

    // == Global Instance ==
    /// Returns the process-wide default cache, initializing it from the
    /// environment on first use.
    pub fn global() -> Result<&'static Cache> {
        static GLOBAL: OnceLock<Cache> = OnceLock::new();

        if let Some(cache) = GLOBAL.get() {
            return Ok(cache);
        }
        // A cache that loses the init race is dropped
        let cache = Cache::from_env()?;
        Ok(GLOBAL.get_or_init(|| cache))
    }

    // == Get ==
    /// Returns the canonical entry for an ordered sequence of key fragments.
    pub fn get<S: AsRef<str>>(&self, fragments: &[S]) -> Arc<Entry> {
        self.registry.get_entry(fragments)
    }

    // == Stats ==
    /// Returns a snapshot of the hit/miss/write counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.registry.stats().snapshot()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cache_in_memory_get_or_eval() {
        let cache = Cache::in_memory();
        let entry = cache.get(&["user", "42", "profile"]);

        let value: std::result::Result<String, anyhow::Error> =
            entry.get_or_eval(|| Ok("alice".to_string()));
        assert_eq!(value.unwrap(), "alice");

        let cached: std::result::Result<String, anyhow::Error> =
            entry.get_or_eval(|| panic!("compute must not run on a hit"));
        assert_eq!(cached.unwrap(), "alice");
    }

    #[test]
    fn test_cache_open_creates_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("memoized");
        Cache::open(&root).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_cache_shared_entry_handles() {
        let cache = Cache::in_memory();
        let a = cache.get(&["k"]);
        let b = cache.get(&["k"]);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_cache_stats_flow() {
        let cache = Cache::in_memory();
        let entry = cache.get(&["k"]);

        let _: std::result::Result<u32, anyhow::Error> = entry.get_or_eval(|| Ok(7));
        let _: std::result::Result<u32, anyhow::Error> = entry.get_or_eval(|| Ok(7));

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.hits, 1);
    }
}
