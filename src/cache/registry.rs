//! Entry Registry Module
//!
//! Process-wide mapping from digest to the canonical cache entry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::cache::{digest_fragments, BackingStore, CacheStats, Entry};

// == Entry Registry ==
/// Returns the canonical [`Entry`] per digest, creating it on first request.
///
/// All concurrent lookups for the same key share one handle. Entries are
/// never removed; the map grows monotonically for the process lifetime.
#[derive(Debug)]
pub struct EntryRegistry {
    /// Store shared by all entries
    store: Arc<dyn BackingStore>,
    /// digest -> canonical entry
    entries: Mutex<HashMap<String, Arc<Entry>>>,
    /// Shared performance counters
    stats: Arc<CacheStats>,
}

impl EntryRegistry {
    // == Constructor ==
    /// Creates an empty registry over the given backing store.
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        Self {
            store,
            entries: Mutex::new(HashMap::new()),
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Returns the shared counters recorded by all entries.
    pub fn stats(&self) -> &Arc<CacheStats> {
        &self.stats
    }

    // == Get Entry ==
    /// Returns the canonical entry for the given key fragments.
    ///
    /// # Panics
    /// Panics when an existing entry under the same digest retains different
    /// key fragments. A 256-bit digest collision between distinct keys is
    /// cosmologically unlikely; observing one means memory corruption or a
    /// key mutated after hashing, neither of which is safely recoverable.
    pub fn get_entry<S: AsRef<str>>(&self, fragments: &[S]) -> Arc<Entry> {
        let digest = digest_fragments(fragments);

        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get(&digest) {
            let matches = entry.key().len() == fragments.len()
                && entry
                    .key()
                    .iter()
                    .zip(fragments.iter())
                    .all(|(a, b)| a.as_str() == b.as_ref());
            assert!(
                matches,
                "digest collision: {} maps to keys {:?} and {:?}",
                digest,
                entry.key(),
                fragments.iter().map(|f| f.as_ref()).collect::<Vec<&str>>()
            );
            return Arc::clone(entry);
        }

        debug!(%digest, "Creating cache entry");
        let key: Vec<String> = fragments.iter().map(|f| f.as_ref().to_string()).collect();
        let entry = Arc::new(Entry::new(
            key,
            digest.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.stats),
        ));
        entries.insert(digest, Arc::clone(&entry));
        entry
    }

    /// Returns the number of live entries in the registry.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;

    fn test_registry() -> EntryRegistry {
        EntryRegistry::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_registry_creates_entry_once() {
        let registry = test_registry();

        let first = registry.get_entry(&["user", "42"]);
        let second = registry.get_entry(&["user", "42"]);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_distinct_keys_distinct_entries() {
        let registry = test_registry();

        let a = registry.get_entry(&["a"]);
        let b = registry.get_entry(&["b"]);

        assert!(!Arc::ptr_eq(&a, &b));
        assert_ne!(a.digest(), b.digest());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_entry_retains_key() {
        let registry = test_registry();
        let entry = registry.get_entry(&["user", "42", "profile"]);
        assert_eq!(entry.key(), ["user", "42", "profile"]);
    }

    #[test]
    fn test_registry_empty_key() {
        let registry = test_registry();
        let entry = registry.get_entry::<&str>(&[]);
        assert!(entry.key().is_empty());
        assert_eq!(entry.digest().len(), 64);
    }

    #[test]
    #[should_panic(expected = "digest collision")]
    fn test_registry_collision_is_fatal() {
        let registry = test_registry();
        let digest = digest_fragments(&["victim"]);

        // Force-inject an entry whose retained key differs from the query
        // that hashes to the same digest
        let planted = Arc::new(Entry::new(
            vec!["impostor".to_string()],
            digest.clone(),
            Arc::new(MemoryStore::new()),
            Arc::new(CacheStats::new()),
        ));
        registry.entries.lock().unwrap().insert(digest, planted);

        registry.get_entry(&["victim"]);
    }
}
