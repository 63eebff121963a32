//! Configuration Module
//!
//! Handles cache root directory selection from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::{CacheError, Result};

/// Environment variable overriding the cache root directory.
pub const CACHE_DIR_ENV: &str = "CACHE_DIR";

/// Application name used in the default cache root path.
pub const APP_NAME: &str = "memocache";

/// Cache configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for the on-disk cache
    pub root: PathBuf,
}

impl Config {
    // == Constructor ==
    /// Creates a Config with an explicit cache root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // == From Environment ==
    /// Creates a Config by resolving the cache root from the environment.
    ///
    /// # Selection Order
    /// 1. `CACHE_DIR` environment variable, if set and non-empty
    /// 2. `<home>/.cache/memocache/memoized`
    ///
    /// # Errors
    /// Returns [`CacheError::NoHomeDirectory`] when `CACHE_DIR` is unset and
    /// the home directory cannot be determined.
    pub fn from_env() -> Result<Self> {
        if let Some(dir) = env::var(CACHE_DIR_ENV).ok().filter(|v| !v.is_empty()) {
            return Ok(Self::new(dir));
        }

        let home = dirs::home_dir().ok_or(CacheError::NoHomeDirectory)?;
        Ok(Self::new(home.join(".cache").join(APP_NAME).join("memoized")))
    }
}
