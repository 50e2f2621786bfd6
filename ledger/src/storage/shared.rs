//! Shared handle to a chain for multi-threaded callers.
//!
//! Appends mutate sequential state and are serialized behind the write
//! lock. Validation and lookups only take the read lock, so any number of
//! them can run at once while no append is in flight.

use std::sync::Arc;

use parking_lot::RwLock;

use super::block::Block;
use super::chain::Chain;
use super::error::{BlockError, ChainError};

/// Cloneable, thread-safe handle to a single [`Chain`].
#[derive(Clone, Debug, Default)]
pub struct SharedChain {
    inner: Arc<RwLock<Chain>>,
}

impl SharedChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append under the write lock. See [`Chain::append_block`].
    ///
    /// Returns the height of the appended block.
    pub fn append_block(&self, block: Block) -> Result<usize, BlockError> {
        let mut chain = self.inner.write();
        chain.append_block(block)?;
        Ok(chain.height() - 1)
    }

    /// Validate under the read lock. See [`Chain::validate`].
    pub fn validate(&self) -> Result<(), ChainError> {
        self.inner.read().validate()
    }

    pub fn height(&self) -> usize {
        self.inner.read().height()
    }

    /// Clone of the block at `height`.
    pub fn block(&self, height: usize) -> Option<Block> {
        self.inner.read().block(height).cloned()
    }

    /// Run `f` against the chain while holding the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Chain) -> R) -> R {
        f(&self.inner.read())
    }

    /// Point-in-time copy of the whole chain.
    pub fn snapshot(&self) -> Chain {
        self.inner.read().clone()
    }
}

impl From<Chain> for SharedChain {
    fn from(chain: Chain) -> Self {
        SharedChain {
            inner: Arc::new(RwLock::new(chain)),
        }
    }
}
