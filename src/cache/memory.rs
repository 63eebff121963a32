//! In-Memory Store Module
//!
//! A mutex-guarded digest-to-bytes map.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::cache::BackingStore;
use crate::error::Result;

// == Memory Store ==
/// In-memory backing store.
///
/// Holds serialized bytes rather than decoded values so that the entry
/// layer's encode/decode pathway is identical across store variants.
#[derive(Debug, Default)]
pub struct MemoryStore {
    payloads: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BackingStore for MemoryStore {
    fn read(&self, digest: &str) -> Result<Option<Vec<u8>>> {
        let payloads = self.payloads.lock().unwrap();
        Ok(payloads.get(digest).cloned())
    }

    fn write(&self, digest: &str, payload: &[u8]) -> Result<()> {
        let mut payloads = self.payloads.lock().unwrap();
        payloads.insert(digest.to_string(), payload.to_vec());
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.read("deadbeef").unwrap(), None);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.write("deadbeef", b"payload").unwrap();
        assert_eq!(store.read("deadbeef").unwrap(), Some(b"payload".to_vec()));
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();
        store.write("deadbeef", b"first").unwrap();
        store.write("deadbeef", b"second").unwrap();
        assert_eq!(store.read("deadbeef").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn test_memory_store_distinct_digests() {
        let store = MemoryStore::new();
        store.write("aa", b"one").unwrap();
        store.write("bb", b"two").unwrap();
        assert_eq!(store.read("aa").unwrap(), Some(b"one".to_vec()));
        assert_eq!(store.read("bb").unwrap(), Some(b"two".to_vec()));
    }
}
