//! # CLI Interface
//!
//! Defines the command-line argument structure for `simple-chain` using
//! `clap` derive. Supports three subcommands: `interactive` (the default),
//! `demo`, and `version`.

use clap::{Parser, Subcommand};

/// Interactive driver for the simple-chain ledger.
///
/// Builds an in-memory chain from messages typed at a prompt, shows blocks,
/// and validates the chain end to end. Nothing is written to disk.
#[derive(Parser, Debug)]
#[command(
    name = "simple-chain",
    about = "Append-only hash-chained message ledger",
    version,
    propagate_version = true
)]
pub struct SimpleChainCli {
    /// Log filter used when `RUST_LOG` is not set.
    ///
    /// Logs go to stderr; the menu and command output go to stdout.
    #[arg(long, global = true, env = "SIMPLE_CHAIN_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "SIMPLE_CHAIN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute. Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the numbered action menu.
    Interactive,
    /// Build a sample chain, validate it, and print it.
    Demo(DemoArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `demo` subcommand.
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Number of blocks to append.
    #[arg(long, short = 'b', default_value_t = 3)]
    pub blocks: usize,

    /// Number of messages per block.
    #[arg(long, short = 'm', default_value_t = 2)]
    pub messages: usize,

    /// Print the chain as JSON instead of the human-readable listing.
    #[arg(long)]
    pub json: bool,
}
