//! The caller-facing workflow: one chain plus the block currently being
//! filled.
//!
//! Callers never juggle blocks themselves. They add messages, decide when
//! the open block is done, and ask for validation.

use serde::Serialize;

use super::block::Block;
use super::chain::Chain;
use super::error::{BlockError, ChainError, RecordError};
use super::record::Record;

/// A chain together with its open block.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Ledger {
    chain: Chain,
    pending: Block,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the open block.
    pub fn append_message(&mut self, data: impl Into<String>) -> Result<(), RecordError> {
        self.pending.append_record(Record::new(data))
    }

    /// Append the open block to the chain and start a fresh one.
    ///
    /// Returns the height of the newly appended block.
    ///
    /// # Errors
    ///
    /// [`BlockError::Empty`] if no message was added since the last seal.
    /// On any error the open block keeps its records.
    pub fn seal_block(&mut self) -> Result<usize, BlockError> {
        if self.pending.is_empty() {
            return Err(BlockError::Empty);
        }
        self.chain.append_block(self.pending.clone())?;
        self.pending = Block::new();

        let height = self.chain.height() - 1;
        tracing::info!(height, "block sealed");
        Ok(height)
    }

    /// Validate the whole chain. The open block is not part of the chain yet.
    pub fn validate(&self) -> Result<(), ChainError> {
        self.chain.validate()
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// The open block.
    pub fn pending(&self) -> &Block {
        &self.pending
    }

    pub fn into_chain(self) -> Chain {
        self.chain
    }
}
