//! Error types for the record store.
//!
//! Failures nest by scope: a [`RecordError`] is wrapped into a
//! [`BlockError`] carrying the record's index, which is wrapped into a
//! [`ChainError`] carrying the block's height. The full `source()` chain
//! therefore points from "the chain is broken" down to "this record's
//! payload no longer matches its hash".

use thiserror::Error;

/// A single record failed validation or was used out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The payload digest no longer matches `(created_at, data)`.
    #[error("invalid payload hash in record: {record}")]
    PayloadHashMismatch {
        /// Display form of the offending record.
        record: String,
        /// Digest stored at construction.
        stored: String,
        /// Digest recomputed from the current content.
        computed: String,
    },

    /// The record digest no longer matches `(prev_hash, payload_hash)`.
    #[error("invalid record hash in record: {record}")]
    HashMismatch {
        /// Display form of the offending record.
        record: String,
        /// Digest stored at seal time.
        stored: String,
        /// Digest recomputed from the current link and payload.
        computed: String,
    },

    /// The first record of a block was sealed over a link to a predecessor.
    #[error("first record of a block cannot link to a predecessor: {record}")]
    StrayLink {
        /// Display form of the offending record.
        record: String,
    },

    /// `link` was called after `seal`.
    #[error("record is already sealed and cannot be re-linked: {record}")]
    AlreadySealed {
        /// Display form of the offending record.
        record: String,
    },
}

/// A block failed validation or could not be sealed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// A record inside the block failed its own validation.
    #[error("record #{index} failed validation: {source}")]
    InvalidRecord {
        /// Position of the record inside the block.
        index: usize,
        /// Underlying record failure.
        #[source]
        source: RecordError,
    },

    /// A record's `prev_hash` does not match the hash of the record before it.
    #[error("record #{index} has an invalid link: expected {expected:?}, found {found:?}")]
    BrokenLink {
        /// Position of the record inside the block.
        index: usize,
        /// Hash of the preceding record.
        expected: Option<String>,
        /// `prev_hash` actually stored on the record.
        found: Option<String>,
    },

    /// A record inside the block was never sealed.
    #[error("record #{index} is not sealed")]
    UnsealedRecord {
        /// Position of the record inside the block.
        index: usize,
    },

    /// Attempted to seal a block without records.
    #[error("cannot seal a block with no records")]
    Empty,

    /// The block's own digest no longer matches its link, seal time and last record.
    #[error("block hash mismatch: stored={stored}, computed={computed}")]
    HashMismatch {
        /// Digest stored at seal time.
        stored: String,
        /// Digest recomputed from the current state.
        computed: String,
    },
}

/// The chain failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// A block failed its own validation.
    #[error("chain invalid at height {height}: {source}")]
    InvalidBlock {
        /// Height of the failing block.
        height: usize,
        /// Underlying block failure.
        #[source]
        source: BlockError,
    },

    /// A block's `prev_hash` does not match the hash of the block before it.
    #[error("chain invalid at height {height}: expected prev_hash {expected:?}, found {found:?}")]
    BrokenLink {
        /// Height of the failing block.
        height: usize,
        /// Hash of the preceding block.
        expected: Option<String>,
        /// `prev_hash` actually stored on the block.
        found: Option<String>,
    },
}

impl BlockError {
    /// Index of the record that caused the failure, if a record did.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            BlockError::InvalidRecord { index, .. }
            | BlockError::BrokenLink { index, .. }
            | BlockError::UnsealedRecord { index } => Some(*index),
            BlockError::Empty | BlockError::HashMismatch { .. } => None,
        }
    }
}

impl ChainError {
    /// Height of the block where validation stopped.
    pub fn height(&self) -> usize {
        match self {
            ChainError::InvalidBlock { height, .. } | ChainError::BrokenLink { height, .. } => {
                *height
            }
        }
    }

    /// The record-level failure at the bottom of this error, if any.
    pub fn record_error(&self) -> Option<&RecordError> {
        match self {
            ChainError::InvalidBlock {
                source: BlockError::InvalidRecord { source, .. },
                ..
            } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn record_failure() -> RecordError {
        RecordError::PayloadHashMismatch {
            record: "Record<...>".into(),
            stored: "aa".into(),
            computed: "bb".into(),
        }
    }

    #[test]
    fn test_source_chain_reaches_record() {
        let err = ChainError::InvalidBlock {
            height: 3,
            source: BlockError::InvalidRecord {
                index: 1,
                source: record_failure(),
            },
        };

        let block = err.source().expect("block cause");
        let record = block.source().expect("record cause");
        assert!(record.to_string().contains("invalid payload hash"));
        assert_eq!(err.height(), 3);
        assert_eq!(err.record_error(), Some(&record_failure()));
    }

    #[test]
    fn test_messages_carry_position() {
        let err = BlockError::InvalidRecord {
            index: 4,
            source: record_failure(),
        };
        assert!(err.to_string().starts_with("record #4 failed validation"));
        assert_eq!(err.record_index(), Some(4));
        assert_eq!(BlockError::Empty.record_index(), None);

        let err = ChainError::BrokenLink {
            height: 2,
            expected: Some("aa".into()),
            found: None,
        };
        assert!(err.to_string().contains("height 2"));
        assert!(err.record_error().is_none());
    }
}
