//! SHA-256 content digests.

use sha2::{Digest, Sha256};

/// Hashes `data` with SHA-256 and returns the lowercase hex digest.
///
/// Accepts anything byte-like, so `&str`, `String`, `&[u8]` and `Vec<u8>` all
/// hash their UTF-8 / raw bytes. The result is always 64 characters.
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    let digest = Sha256::digest(data.as_ref());
    hex::encode(digest)
}
