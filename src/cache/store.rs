//! Backing Store Module
//!
//! Defines the persistence strategy shared by all cache entries.

use std::fmt::Debug;

use crate::error::Result;

// == Backing Store Trait ==
/// A byte-keyed persistence strategy addressed by hex digest.
///
/// Implementations must be safe to share across threads; each guards its own
/// internal state. After a successful `write(d, b)`, `read(d)` returns
/// exactly `b` until the next write to `d`.
pub trait BackingStore: Debug + Send + Sync {
    /// Reads the payload stored under `digest`.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))` when the payload exists
    /// - `Ok(None)` when no payload is stored under the digest
    /// - `Err` on an I/O failure; callers treat this as a soft miss
    fn read(&self, digest: &str) -> Result<Option<Vec<u8>>>;

    /// Creates or overwrites the payload stored under `digest`.
    fn write(&self, digest: &str, payload: &[u8]) -> Result<()>;
}
