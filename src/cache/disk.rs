//! Disk Store Module
//!
//! A filesystem-backed store whose files are named by hex digest.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::cache::BackingStore;
use crate::error::{CacheError, Result};

// == Disk Store ==
/// Filesystem backing store.
///
/// Each payload lives in a single file directly under the root directory,
/// named by its 64-character hex digest. There are no subdirectories, no
/// sidecar metadata, and no lock files. Individual reads and writes rely on
/// OS file atomicity; a torn file left by a crashed writer surfaces as a
/// decode failure at the entry layer and is recomputed.
#[derive(Debug)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    // == Constructor ==
    /// Opens a DiskStore rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns [`CacheError::RootUnavailable`] when the root directory cannot
    /// be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| CacheError::RootUnavailable {
            path: root.clone(),
            source,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Mode on a pre-existing directory is left as-is
            let _ = fs::set_permissions(&root, fs::Permissions::from_mode(0o755));
        }

        trace!(root = %root.display(), "Opened disk store");
        Ok(Self { root })
    }

    /// Returns the root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file path holding the payload for `digest`.
    fn payload_path(&self, digest: &str) -> PathBuf {
        self.root.join(digest)
    }
}

impl BackingStore for DiskStore {
    fn read(&self, digest: &str) -> Result<Option<Vec<u8>>> {
        let path = self.payload_path(digest);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Read {
                digest: digest.to_string(),
                source,
            }),
        }
    }

    fn write(&self, digest: &str, payload: &[u8]) -> Result<()> {
        let path = self.payload_path(digest);
        fs::write(&path, payload).map_err(|source| CacheError::Write {
            digest: digest.to_string(),
            source,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o644));
        }

        Ok(())
    }
}
