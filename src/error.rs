//! Error types for the memoizing cache
//!
//! Provides unified error handling using thiserror.
//!
//! Only construction failures are surfaced to callers as `CacheError`; read,
//! decode, and write anomalies on individual entries are logged at warning
//! level and degrade to recomputation instead.

use std::path::PathBuf;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the memoizing cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cache root directory could not be created or accessed
    #[error("Failed to create cache root {path}: {source}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CACHE_DIR is unset and no home directory could be determined
    #[error("Cannot determine cache root: CACHE_DIR is unset and no home directory was found")]
    NoHomeDirectory,

    /// An entry could not be read from the backing store
    #[error("Failed to read entry {digest}: {source}")]
    Read {
        digest: String,
        #[source]
        source: std::io::Error,
    },

    /// An entry could not be written to the backing store
    #[error("Failed to write entry {digest}: {source}")]
    Write {
        digest: String,
        #[source]
        source: std::io::Error,
    },

    /// A payload could not be serialized
    #[error("Failed to encode payload for entry {digest}: {source}")]
    Encode {
        digest: String,
        #[source]
        source: serde_json::Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the memoizing cache.
pub type Result<T> = std::result::Result<T, CacheError>;
