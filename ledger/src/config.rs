//! # Ledger Constants
//!
//! Values that leak into digests live here. Changing any of them changes
//! every hash the ledger produces, so treat them as frozen.

/// Name of the digest algorithm, for logs and `version` output.
pub const HASH_ALGORITHM: &str = "SHA-256";

/// Length of a hex-encoded digest. SHA-256 is 32 bytes, 64 hex characters.
pub const HASH_HEX_LENGTH: usize = 64;

/// Text substituted for an absent link when a digest preimage is built.
///
/// The first record of a block and the first block of a chain have no
/// predecessor. Their preimages still start with this literal, so external
/// tools that recorded hashes produced the same way keep verifying.
pub const NO_LINK: &str = "None";

/// Number of characters of a record's payload shown in its display form.
pub const RECORD_PREVIEW_CHARS: usize = 20;

/// Ledger library version.
pub const LEDGER_VERSION: &str = env!("CARGO_PKG_VERSION");
