//! Cache Entry Module
//!
//! The per-key handle exposing the get-or-compute contract.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{BackingStore, CacheStats};
use crate::error::{CacheError, Result};

// == Payload Envelope ==
/// On-disk wrapper around the caller's payload.
///
/// Embedding the key fragments lets a read verify that the stored payload
/// was written for this entry's key; a mismatch (a lucky digest collision or
/// foreign file dropped into the cache root) degrades to a soft miss instead
/// of returning the wrong value.
#[derive(Deserialize)]
struct Envelope<T> {
    key: Vec<String>,
    value: T,
}

/// Borrowed counterpart of [`Envelope`] used when serializing.
#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    key: &'a [String],
    value: &'a T,
}

// == Cache Entry ==
/// Handle for a single cached value, shared across callers via the registry.
///
/// All read-side failures (absence, I/O errors, decode failures, key
/// mismatches) are soft: they are logged and reported as a miss so the
/// caller recomputes. Write-side failures are logged and swallowed; a cache
/// that cannot persist degrades to computing every time.
#[derive(Debug)]
pub struct Entry {
    /// Originating key fragments, retained for collision detection
    key: Vec<String>,
    /// Hex digest of the key; the backing store locator
    digest: String,
    /// Store shared by all entries
    store: Arc<dyn BackingStore>,
    /// Shared performance counters
    stats: Arc<CacheStats>,
    /// Serializes writes for this entry to prevent torn payloads
    write_lock: Mutex<()>,
}

impl Entry {
    // == Constructor ==
    pub(crate) fn new(
        key: Vec<String>,
        digest: String,
        store: Arc<dyn BackingStore>,
        stats: Arc<CacheStats>,
    ) -> Self {
        Self {
            key,
            digest,
            store,
            stats,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the key fragments this entry was created for.
    pub fn key(&self) -> &[String] {
        &self.key
    }

    /// Returns the hex digest identifying this entry in the backing store.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    // == Read ==
    /// Attempts to load and decode the cached payload.
    ///
    /// Returns `None` on absence or on any read/decode anomaly; anomalies
    /// are logged at warning level and never surfaced as errors.
    pub fn read<T: DeserializeOwned>(&self) -> Option<T> {
        let bytes = match self.store.read(&self.digest) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(digest = %self.digest, "Cache miss");
                self.stats.record_miss();
                return None;
            }
            Err(err) => {
                warn!(digest = %self.digest, error = %err, "Cache read failed, treating as miss");
                self.stats.record_miss();
                return None;
            }
        };

        let envelope: Envelope<T> = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(
                    digest = %self.digest,
                    error = %err,
                    "Cached payload is corrupt, treating as miss"
                );
                self.stats.record_miss();
                return None;
            }
        };

        if envelope.key != self.key {
            warn!(
                digest = %self.digest,
                stored_key = ?envelope.key,
                "Cached payload was written for a different key, treating as miss"
            );
            self.stats.record_miss();
            return None;
        }

        debug!(digest = %self.digest, "Cache hit");
        self.stats.record_hit();
        Some(envelope.value)
    }

    // == Set ==
    /// Encodes the value and writes it to the backing store.
    ///
    /// Failures are logged and swallowed; future lookups will recompute.
    pub fn set<T: Serialize>(&self, value: &T) {
        match self.try_set(value) {
            Ok(()) => self.stats.record_write(),
            Err(err) => {
                self.stats.record_write_failure();
                warn!(digest = %self.digest, error = %err, "Failed to persist cache entry");
            }
        }
    }

    fn try_set<T: Serialize>(&self, value: &T) -> Result<()> {
        let envelope = EnvelopeRef {
            key: &self.key,
            value,
        };
        let bytes = serde_json::to_vec(&envelope).map_err(|source| CacheError::Encode {
            digest: self.digest.clone(),
            source,
        })?;

        // One writer per entry at a time; concurrent entries are independent
        let _guard = self.write_lock.lock().unwrap();
        self.store.write(&self.digest, &bytes)
    }

    // == Get Or Eval ==
    /// Returns the cached value, computing and storing it on a miss.
    ///
    /// # Behavior
    /// 1. A successful read returns the cached value; `compute` never runs.
    /// 2. On a miss, `compute` runs. Its error is returned unchanged and
    ///    nothing is written.
    /// 3. A computed value is stored best-effort and returned regardless of
    ///    the store outcome.
    ///
    /// Two callers racing on a miss for the same key may both compute; the
    /// last writer wins. Callers that need cancellation handle it inside
    /// `compute`.
    pub fn get_or_eval<T, E, F>(&self, compute: F) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        if let Some(value) = self.read() {
            return Ok(value);
        }

        let value = compute()?;
        self.set(&value);
        Ok(value)
    }
}
