//! Key Hasher Module
//!
//! Reduces an ordered sequence of key fragments to a fixed-width digest used
//! as the storage identifier.

use sha2::{Digest, Sha256};

// == Digest Fragments ==
/// Hashes an ordered sequence of key fragments into a 64-character lowercase
/// hex SHA-256 digest.
///
/// Each fragment is framed by a little-endian `u64` length prefix before its
/// bytes, so the encoding is injective: `["ab", "c"]` and `["a", "bc"]`
/// produce different digests, as do fragments containing NUL bytes. Fragment
/// order is significant. The empty sequence hashes the empty input and is a
/// valid key.
pub fn digest_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut hasher = Sha256::new();
    for fragment in fragments {
        let bytes = fragment.as_ref().as_bytes();
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    format!("{:x}", hasher.finalize())
}
