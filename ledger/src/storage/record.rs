//! # Records
//!
//! A record is the smallest unit the ledger stores: a text payload plus two
//! digests.
//!
//! ```text
//! payload_hash = SHA-256( repr(created_at) || data )
//! hash         = SHA-256( prev_hash or "None" || payload_hash )
//! ```
//!
//! `payload_hash` is fixed at construction and fingerprints the content.
//! `hash` is fixed at seal time and additionally commits to the record that
//! came before it inside the same block. A record goes through
//! `new → link → seal` exactly once; `link` after `seal` is rejected.

use std::fmt;

use serde::Serialize;

use super::error::RecordError;
use crate::config::{NO_LINK, RECORD_PREVIEW_CHARS};
use crate::crypto::sha256_hex_multi;
use crate::time;

/// A single payload in a block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    pub(crate) data: String,
    pub(crate) created_at: f64,
    pub(crate) size: usize,
    pub(crate) payload_hash: String,
    pub(crate) prev_hash: Option<String>,
    pub(crate) hash: Option<String>,
}

impl Record {
    /// Create a record stamped with the current time.
    pub fn new(data: impl Into<String>) -> Self {
        Self::with_timestamp(data, time::now())
    }

    /// Create a record with an explicit creation time.
    ///
    /// Useful for replaying records captured elsewhere, where the timestamp
    /// is part of a digest that must be reproduced exactly.
    pub fn with_timestamp(data: impl Into<String>, created_at: f64) -> Self {
        let data = data.into();
        let payload_hash = hash_payload(created_at, &data);
        Record {
            size: data.len(),
            data,
            created_at,
            payload_hash,
            prev_hash: None,
            hash: None,
        }
    }

    /// Point this record at its predecessor in the block.
    ///
    /// # Errors
    ///
    /// [`RecordError::AlreadySealed`] if the record has been sealed. The
    /// link is part of the sealed digest, so changing it afterwards would
    /// silently invalidate the record.
    pub fn link(&mut self, predecessor: &Record) -> Result<(), RecordError> {
        if self.is_sealed() {
            return Err(RecordError::AlreadySealed {
                record: self.to_string(),
            });
        }
        self.prev_hash = predecessor.hash.clone();
        Ok(())
    }

    /// Fix the record digest from the current link and payload hash.
    pub fn seal(&mut self) {
        self.hash = Some(hash_record(self.prev_hash.as_deref(), &self.payload_hash));
    }

    /// Re-derive both digests and compare them with the stored values.
    ///
    /// An unsealed record only has its payload digest checked.
    ///
    /// # Errors
    ///
    /// [`RecordError::PayloadHashMismatch`] when the content was changed
    /// after construction, [`RecordError::HashMismatch`] when the link or
    /// payload digest was changed after sealing.
    pub fn validate(&self) -> Result<(), RecordError> {
        let computed = hash_payload(self.created_at, &self.data);
        if self.payload_hash != computed {
            return Err(RecordError::PayloadHashMismatch {
                record: self.to_string(),
                stored: self.payload_hash.clone(),
                computed,
            });
        }

        if let Some(stored) = &self.hash {
            let computed = hash_record(self.prev_hash.as_deref(), &self.payload_hash);
            if *stored != computed {
                return Err(RecordError::HashMismatch {
                    record: self.to_string(),
                    stored: stored.clone(),
                    computed,
                });
            }
        }

        Ok(())
    }

    /// The payload text.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Creation time in fractional UNIX seconds.
    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    /// Payload length in UTF-8 bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }

    pub fn prev_hash(&self) -> Option<&str> {
        self.prev_hash.as_deref()
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn is_sealed(&self) -> bool {
        self.hash.is_some()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.data.chars().take(RECORD_PREVIEW_CHARS).collect();
        write!(
            f,
            "Record<hash: {}, prev_hash: {}, data: {}>",
            self.hash.as_deref().unwrap_or(NO_LINK),
            self.prev_hash.as_deref().unwrap_or(NO_LINK),
            preview
        )
    }
}

/// `SHA-256(repr(created_at) || data)`
fn hash_payload(created_at: f64, data: &str) -> String {
    sha256_hex_multi(&[time::repr(created_at).as_bytes(), data.as_bytes()])
}

/// `SHA-256((prev_hash or "None") || payload_hash)`
fn hash_record(prev_hash: Option<&str>, payload_hash: &str) -> String {
    sha256_hex_multi(&[
        prev_hash.unwrap_or(NO_LINK).as_bytes(),
        payload_hash.as_bytes(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::sha256_hex;

    const TS: f64 = 1602252778.7426066;

    #[test]
    fn new_record_keeps_data() {
        for data in ["1", "hello", "EOF", "你好"] {
            let record = Record::new(data);
            assert_eq!(record.data(), data);
            assert!(!record.is_sealed());
            assert!(record.prev_hash().is_none());
        }
    }

    #[test]
    fn payload_hash_known_vectors() {
        let cases = [
            (
                "1",
                "1fad31b7d2f429da09dd01a1b549e3baa6087d7b62c1c56a6f0dc5ab4376c1db",
            ),
            (
                "hello",
                "adfa45c763c427eab42db377e3371f4ddd460870dc45cf3b19705730ac49da5f",
            ),
            (
                "你好",
                "35ec626cfa627bf4d63b8ac362f37698667fe0210c34f594ef05eb8bf88219a6",
            ),
        ];
        for (data, expected) in cases {
            let record = Record::with_timestamp(data, TS);
            assert_eq!(record.payload_hash(), expected, "data = {data:?}");
        }
    }

    #[test]
    fn payload_hash_is_timestamp_then_data() {
        let mut record = Record::with_timestamp("hello", TS);
        record.seal();
        assert_eq!(
            record.payload_hash(),
            sha256_hex(b"1602252778.7426066hello")
        );
    }

    #[test]
    fn size_counts_utf8_bytes() {
        assert_eq!(Record::new("hello").size(), 5);
        assert_eq!(Record::new("你好").size(), 6);
    }

    #[test]
    fn unlinked_seal_uses_none_sentinel() {
        let mut record = Record::with_timestamp("hello", TS);
        record.seal();
        let expected = sha256_hex(format!("None{}", record.payload_hash()).as_bytes());
        assert_eq!(record.hash(), Some(expected.as_str()));
    }

    #[test]
    fn linked_seal_uses_predecessor_hash() {
        let mut first = Record::with_timestamp("a", TS);
        first.seal();
        let mut second = Record::with_timestamp("b", TS);
        second.link(&first).unwrap();
        second.seal();

        assert_eq!(second.prev_hash(), first.hash());
        let expected = sha256_hex(
            format!("{}{}", first.hash().unwrap(), second.payload_hash()).as_bytes(),
        );
        assert_eq!(second.hash(), Some(expected.as_str()));
    }

    #[test]
    fn validate_fresh_and_sealed() {
        let mut record = Record::new("fresh");
        assert!(record.validate().is_ok());
        record.seal();
        assert!(record.validate().is_ok());
        // Sealing twice with unchanged inputs is idempotent.
        let hash = record.hash().map(str::to_owned);
        record.seal();
        assert_eq!(record.hash().map(str::to_owned), hash);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn relink_after_seal_is_rejected() {
        let mut first = Record::new("a");
        first.seal();
        let mut second = Record::new("b");
        second.seal();

        let err = second.link(&first).unwrap_err();
        assert!(matches!(err, RecordError::AlreadySealed { .. }));
        assert!(second.prev_hash().is_none());
    }

    #[test]
    fn tampered_data_fails_payload_check() {
        let mut record = Record::new("original");
        record.seal();
        record.data = "forged".into();

        match record.validate() {
            Err(RecordError::PayloadHashMismatch { record, .. }) => {
                assert!(record.contains("forged"));
            }
            other => panic!("expected payload mismatch, got {other:?}"),
        }
    }

    #[test]
    fn tampered_link_fails_hash_check() {
        let mut record = Record::new("payload");
        record.seal();
        record.prev_hash = Some("00".repeat(32));

        assert!(matches!(
            record.validate(),
            Err(RecordError::HashMismatch { .. })
        ));
    }

    #[test]
    fn display_truncates_payload() {
        let record = Record::new("abcdefghijklmnopqrstuvwxyz");
        let shown = record.to_string();
        assert!(shown.contains("data: abcdefghijklmnopqrst>"));
        assert!(shown.starts_with("Record<hash: None, prev_hash: None"));
    }
}
