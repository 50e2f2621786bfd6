//! # Hashing Utilities
//!
//! The ledger stores digests as lowercase hex strings rather than byte
//! arrays. Hex is what ends up in logs, in the CLI, and in any external
//! record of a hash, and comparing strings keeps the validation paths
//! free of encode/decode steps.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of `data` as a lowercase hex string.
///
/// # Example
///
/// ```
/// use simple_chain::crypto::sha256_hex;
///
/// let digest = sha256_hex(b"");
/// assert_eq!(
///     digest,
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Hash several byte slices as if they had been concatenated.
///
/// Preimages in the ledger are always plain concatenations of text parts
/// (`timestamp || data`, `prev_hash || payload_hash`, ...). Feeding them
/// into the hasher one by one gives the same digest without building the
/// joined string first.
pub fn sha256_hex_multi(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}
