//! # Block Structure
//!
//! A block is an ordered group of records plus a link to the previous block.
//!
//! ## Block Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  prev_hash: Option<String>  (previous block)│
//! │  sealed_at: Option<f64>     (seal time)     │
//! │  hash:      Option<String>  (block digest)  │
//! ├─────────────────────────────────────────────┤
//! │  records: Vec<Record>                       │
//! │  ├── #0  prev_hash = None                   │
//! │  ├── #1  prev_hash = #0.hash                │
//! │  └── #n  prev_hash = #n-1.hash              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Hash Computation
//!
//! The block hash covers `prev_hash || repr(sealed_at) || last_record.hash`.
//! Earlier records are not hashed into the block directly; they are pinned
//! through the record-to-record links, each of which flows into the last
//! record's hash.
//!
//! Known weakness: because only the last record's digest is committed, the
//! block digest offers no protection of its own for earlier records. Block
//! validation re-checks every record and every link to cover that.

use std::fmt;

use serde::Serialize;

use super::error::{BlockError, RecordError};
use super::record::Record;
use crate::config::NO_LINK;
use crate::crypto::sha256_hex_multi;
use crate::time;

/// An ordered group of records; open until sealed, then appendable to a chain.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Block {
    pub(crate) records: Vec<Record>,
    pub(crate) prev_hash: Option<String>,
    pub(crate) sealed_at: Option<f64>,
    pub(crate) hash: Option<String>,
}

impl Block {
    /// An open, empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a block from records, appending each in order.
    ///
    /// # Errors
    ///
    /// The first [`RecordError`] raised by [`Block::append_record`].
    pub fn with_records<I>(records: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut block = Block::new();
        for record in records {
            block.append_record(record)?;
        }
        Ok(block)
    }

    /// Link, seal, validate and then store `record`.
    ///
    /// The first record of a block has no predecessor: a link it picked up
    /// elsewhere is dropped before sealing, and a sealed record carrying
    /// one is rejected with [`RecordError::StrayLink`].
    ///
    /// The block never holds an unvalidated record: on any failure the
    /// record is dropped and the block is left as it was.
    pub fn append_record(&mut self, mut record: Record) -> Result<(), RecordError> {
        match self.records.last() {
            Some(last) => record.link(last)?,
            None if record.prev_hash.is_some() => {
                if record.is_sealed() {
                    return Err(RecordError::StrayLink {
                        record: record.to_string(),
                    });
                }
                record.prev_hash = None;
            }
            None => {}
        }
        record.seal();
        record.validate()?;

        tracing::debug!(
            index = self.records.len(),
            hash = record.hash().unwrap_or(NO_LINK),
            "record appended"
        );
        self.records.push(record);
        Ok(())
    }

    /// Point this block at its predecessor in the chain.
    pub fn link_to_chain(&mut self, predecessor: &Block) {
        self.prev_hash = predecessor.hash.clone();
    }

    /// Seal the block with the current time.
    ///
    /// # Errors
    ///
    /// [`BlockError::Empty`] if the block holds no records.
    pub fn seal(&mut self) -> Result<(), BlockError> {
        self.seal_at(time::now())
    }

    /// Seal the block with an explicit seal time.
    pub fn seal_at(&mut self, sealed_at: f64) -> Result<(), BlockError> {
        let last_hash = self.last_record_hash()?.to_owned();
        self.hash = Some(hash_block(self.prev_hash.as_deref(), sealed_at, &last_hash));
        self.sealed_at = Some(sealed_at);
        Ok(())
    }

    /// Check every record, every record-to-record link (the first record must
    /// not link anywhere) and, once sealed, the block digest itself. Never
    /// mutates.
    pub fn validate(&self) -> Result<(), BlockError> {
        for (index, record) in self.records.iter().enumerate() {
            if !record.is_sealed() {
                return Err(BlockError::UnsealedRecord { index });
            }
            record
                .validate()
                .map_err(|source| BlockError::InvalidRecord { index, source })?;

            let expected = match index {
                0 => None,
                _ => self.records[index - 1].hash(),
            };
            if record.prev_hash() != expected {
                return Err(BlockError::BrokenLink {
                    index,
                    expected: expected.map(str::to_owned),
                    found: record.prev_hash().map(str::to_owned),
                });
            }
        }

        if let (Some(stored), Some(sealed_at)) = (&self.hash, self.sealed_at) {
            let computed = hash_block(
                self.prev_hash.as_deref(),
                sealed_at,
                self.last_record_hash()?,
            );
            if *stored != computed {
                return Err(BlockError::HashMismatch {
                    stored: stored.clone(),
                    computed,
                });
            }
        }

        Ok(())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn last_record(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn prev_hash(&self) -> Option<&str> {
        self.prev_hash.as_deref()
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Seal time in fractional UNIX seconds, if sealed.
    pub fn sealed_at(&self) -> Option<f64> {
        self.sealed_at
    }

    pub fn is_sealed(&self) -> bool {
        self.hash.is_some()
    }

    fn last_record_hash(&self) -> Result<&str, BlockError> {
        let index = self.records.len().checked_sub(1).ok_or(BlockError::Empty)?;
        self.records[index]
            .hash()
            .ok_or(BlockError::UnsealedRecord { index })
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sealed_at = self
            .sealed_at
            .map(time::repr)
            .unwrap_or_else(|| NO_LINK.to_string());
        write!(
            f,
            "Block<hash: {}, prev_hash: {}, records: {}, sealed_at: {}>",
            self.hash.as_deref().unwrap_or(NO_LINK),
            self.prev_hash.as_deref().unwrap_or(NO_LINK),
            self.records.len(),
            sealed_at,
        )
    }
}

/// `SHA-256((prev_hash or "None") || repr(sealed_at) || last_record_hash)`
fn hash_block(prev_hash: Option<&str>, sealed_at: f64, last_record_hash: &str) -> String {
    sha256_hex_multi(&[
        prev_hash.unwrap_or(NO_LINK).as_bytes(),
        time::repr(sealed_at).as_bytes(),
        last_record_hash.as_bytes(),
    ])
}
