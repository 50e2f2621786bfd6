//! In-memory chain management with validation.
//!
//! The chain only grows. Each appended block is linked to the current tip,
//! sealed, and validated before it is stored; nothing already in the chain
//! is ever replaced or removed.

use std::fmt;

use serde::Serialize;

use super::block::Block;
use super::error::{BlockError, ChainError};
use crate::config::NO_LINK;

/// Ordered chain of sealed, validated blocks.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Chain {
    pub(crate) blocks: Vec<Block>,
}

impl Chain {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `block` to the tip, seal it, validate it and append it.
    ///
    /// The first block of a chain never links anywhere; a `prev_hash` it
    /// carries in is cleared before sealing.
    ///
    /// # Errors
    ///
    /// [`BlockError::Empty`] for a block without records, or whatever
    /// [`Block::validate`] reports. The chain is unchanged on error.
    pub fn append_block(&mut self, mut block: Block) -> Result<(), BlockError> {
        let height = self.blocks.len();
        match self.blocks.last() {
            Some(tip) => block.link_to_chain(tip),
            None => block.prev_hash = None,
        }
        block.seal()?;
        if let Err(e) = block.validate() {
            tracing::warn!(height, error = %e, "rejected block");
            return Err(e);
        }

        tracing::debug!(
            height,
            records = block.len(),
            hash = block.hash().unwrap_or(NO_LINK),
            "block appended"
        );
        self.blocks.push(block);
        Ok(())
    }

    /// Validate every block in order, plus every block-to-block link. The
    /// block at height 0 must not link anywhere.
    ///
    /// Stops at the first failure; the error carries the block height.
    pub fn validate(&self) -> Result<(), ChainError> {
        for (height, block) in self.blocks.iter().enumerate() {
            if let Err(source) = block.validate() {
                let e = ChainError::InvalidBlock { height, source };
                tracing::warn!(height, error = %e, "chain validation failed");
                return Err(e);
            }

            let expected = match height {
                0 => None,
                _ => self.blocks[height - 1].hash(),
            };
            if block.prev_hash() != expected {
                let e = ChainError::BrokenLink {
                    height,
                    expected: expected.map(str::to_owned),
                    found: block.prev_hash().map(str::to_owned),
                };
                tracing::warn!(height, error = %e, "chain validation failed");
                return Err(e);
            }
        }

        tracing::debug!(height = self.blocks.len(), "chain validated");
        Ok(())
    }

    /// Number of blocks in the chain.
    pub fn height(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The block at `height` (zero-based), if any.
    pub fn block(&self, height: usize) -> Option<&Block> {
        self.blocks.get(height)
    }

    /// Returns the latest block, if any.
    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Total number of records across all blocks.
    pub fn record_count(&self) -> usize {
        self.blocks.iter().map(Block::len).sum()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chain<blocks: {}>", self.blocks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Record, RecordError};

    fn chain_of(blocks: usize) -> Chain {
        let mut chain = Chain::new();
        for i in 0..blocks {
            let block = Block::with_records([
                Record::new(format!("block {i} a")),
                Record::new(format!("block {i} b")),
            ])
            .unwrap();
            chain.append_block(block).unwrap();
        }
        chain
    }

    #[test]
    fn empty_chain_validates() {
        let chain = Chain::new();
        assert!(chain.is_empty());
        assert!(chain.tip().is_none());
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn blocks_link_in_order() {
        let chain = chain_of(4);
        assert_eq!(chain.height(), 4);
        assert_eq!(chain.record_count(), 8);
        assert!(chain.blocks[0].prev_hash().is_none());
        for i in 1..chain.height() {
            assert_eq!(chain.blocks[i].prev_hash(), chain.blocks[i - 1].hash());
        }
        assert!(chain.blocks.iter().all(Block::is_sealed));
    }

    #[test]
    fn validate_is_idempotent() {
        let chain = chain_of(3);
        let before = chain.clone();
        for _ in 0..5 {
            assert!(chain.validate().is_ok());
        }
        assert_eq!(chain, before);
    }

    #[test]
    fn empty_block_is_rejected_without_mutation() {
        let mut chain = chain_of(1);
        assert_eq!(chain.append_block(Block::new()), Err(BlockError::Empty));
        assert_eq!(chain.height(), 1);
    }

    #[test]
    fn overwritten_prev_hash_fails_at_height_two() {
        let mut chain = chain_of(3);
        chain.blocks[2].prev_hash = Some("00".repeat(32));

        let err = chain.validate().unwrap_err();
        assert_eq!(err.height(), 2);
        assert!(matches!(
            err,
            ChainError::InvalidBlock {
                source: BlockError::HashMismatch { .. },
                ..
            }
        ));
    }

    #[test]
    fn resealed_forgery_still_breaks_link() {
        let mut chain = chain_of(3);
        chain.blocks[2].prev_hash = Some("00".repeat(32));
        chain.blocks[2].seal().unwrap();

        match chain.validate() {
            Err(ChainError::BrokenLink {
                height,
                expected,
                found,
            }) => {
                assert_eq!(height, 2);
                assert_eq!(expected.as_deref(), chain.blocks[1].hash());
                assert_eq!(found, Some("00".repeat(32)));
            }
            other => panic!("expected broken link, got {other:?}"),
        }
    }

    #[test]
    fn genesis_drops_foreign_link() {
        let other = chain_of(1);
        let mut block = Block::with_records([Record::new("genesis")]).unwrap();
        block.link_to_chain(other.tip().unwrap());
        assert!(block.prev_hash().is_some());

        let mut chain = Chain::new();
        chain.append_block(block).unwrap();
        assert!(chain.blocks[0].prev_hash().is_none());
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn linked_genesis_fails_at_height_zero() {
        let mut chain = chain_of(2);
        chain.blocks[0].prev_hash = Some("cd".repeat(32));
        chain.blocks[0].seal().unwrap();

        match chain.validate() {
            Err(ChainError::BrokenLink {
                height,
                expected,
                found,
            }) => {
                assert_eq!(height, 0);
                assert!(expected.is_none());
                assert_eq!(found, Some("cd".repeat(32)));
            }
            other => panic!("expected broken link, got {other:?}"),
        }
    }

    #[test]
    fn tampered_record_surfaces_at_every_level() {
        let mut chain = chain_of(3);
        chain.blocks[1].records[0].data = "forged".into();

        let record_err = chain.blocks[1].records[0].validate().unwrap_err();
        assert!(matches!(record_err, RecordError::PayloadHashMismatch { .. }));

        let block_err = chain.blocks[1].validate().unwrap_err();
        assert_eq!(block_err.record_index(), Some(0));

        let chain_err = chain.validate().unwrap_err();
        assert_eq!(chain_err.height(), 1);
        assert_eq!(chain_err.record_error(), Some(&record_err));
    }

    #[test]
    fn first_failure_wins() {
        let mut chain = chain_of(4);
        chain.blocks[3].records[0].data = "late".into();
        chain.blocks[1].records[1].data = "early".into();

        assert_eq!(chain.validate().unwrap_err().height(), 1);
    }

    #[test]
    fn indexed_lookup() {
        let chain = chain_of(2);
        assert_eq!(chain.block(1), chain.tip());
        assert!(chain.block(2).is_none());
        assert_eq!(chain.to_string(), "Chain<blocks: 2>");
    }
}
