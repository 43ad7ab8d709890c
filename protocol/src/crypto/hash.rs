//! # Hashing Utilities
//!
//! SHA-256, and nothing else. Transaction hashes are SHA-256 of the
//! canonical string, and the ECDSA signature scheme runs SHA-256 again
//! internally over that digest. One hash function means one thing to audit.

use sha2::{Digest, Sha256};

use crate::config::HASH_OUTPUT_LENGTH;

/// Compute the SHA-256 hash of the input data as a fixed-size array.
///
/// # Example
///
/// ```
/// use tally_protocol::crypto::sha256;
///
/// let hash = sha256(b"tally");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Lowercase hex of the SHA-256 digest. Handy for logs and CLI output.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
