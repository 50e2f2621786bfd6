//! # Storage Module
//!
//! The record store itself. Everything lives in memory; nothing here
//! touches the disk or the network.
//!
//! ## Architecture
//!
//! ```text
//! record.rs — Record: payload, payload hash, link, seal, validate
//! block.rs  — Block: ordered records, block hash, block validation
//! chain.rs  — Chain: ordered blocks, whole-chain validation
//! ledger.rs — Ledger: chain + open block, the caller-facing workflow
//! shared.rs — SharedChain: single-writer / multi-reader handle
//! error.rs  — RecordError ⊂ BlockError ⊂ ChainError
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! Record ──append_record──▶ Block ──append_block──▶ Chain
//!   link → seal → validate     link → seal → validate
//! ```
//!
//! Every append either commits completely or leaves the target untouched.

pub mod block;
pub mod chain;
pub mod error;
pub mod ledger;
pub mod record;
pub mod shared;

pub use block::Block;
pub use chain::Chain;
pub use error::{BlockError, ChainError, RecordError};
pub use ledger::Ledger;
pub use record::Record;
pub use shared::SharedChain;
