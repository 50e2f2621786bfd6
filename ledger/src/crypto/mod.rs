//! # Cryptographic Primitives
//!
//! One hash function, one encoding: SHA-256, rendered as lowercase hex.
//! Every digest the ledger stores or compares is produced here.

pub mod hash;

pub use hash::{sha256_hex, sha256_hex_multi};
