// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # simple-chain — Core Library
//!
//! A minimal append-only ledger. Every record commits to the record before
//! it, every block commits to its last record and to the block before it,
//! and the chain can re-derive all of that on demand to prove nothing was
//! touched after the fact.
//!
//! There is no consensus, no proof-of-work, no networking and no disk
//! format. It is the integrity engine and nothing else: a single writer,
//! in memory, SHA-256 all the way down.
//!
//! ## Architecture
//!
//! - **crypto** — SHA-256 hex digests. The only hash function in the crate.
//! - **time** — Timestamp capture and the exact decimal form fed into digests.
//! - **storage** — Records, blocks, the chain, and the error taxonomy.
//! - **config** — Constants that are part of the digest contract.
//!
//! ## Quick tour
//!
//! ```
//! use simple_chain::storage::{Block, Chain, Record};
//!
//! let mut block = Block::new();
//! block.append_record(Record::new("first")).unwrap();
//! block.append_record(Record::new("second")).unwrap();
//!
//! let mut chain = Chain::new();
//! chain.append_block(block).unwrap();
//! assert!(chain.validate().is_ok());
//! ```

pub mod config;
pub mod crypto;
pub mod storage;
pub mod time;

pub use storage::{Block, BlockError, Chain, ChainError, Ledger, Record, RecordError, SharedChain};
