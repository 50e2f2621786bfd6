// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # simple-chain
//!
//! Entry point for the `simple-chain` binary. Parses CLI arguments,
//! initializes logging, and dispatches to a subcommand:
//!
//! - `interactive` — the numbered action menu (default)
//! - `demo`        — build, validate and print a sample chain
//! - `version`     — print build version information

mod cli;
mod logging;
mod menu;
mod render;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use simple_chain::config::{HASH_ALGORITHM, LEDGER_VERSION};
use simple_chain::storage::Ledger;

use cli::{Commands, DemoArgs, SimpleChainCli};
use logging::LogFormat;
use menu::Menu;

fn main() -> Result<()> {
    let cli = SimpleChainCli::parse();
    logging::init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format));

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => run_interactive(),
        Commands::Demo(args) => run_demo(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Runs the menu on stdin/stdout until the user quits.
fn run_interactive() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(stdin.lock(), stdout.lock()).run()
}

/// Builds `blocks × messages` records through the ledger workflow,
/// validates the result, and prints it.
fn run_demo(args: DemoArgs) -> Result<()> {
    tracing::info!(blocks = args.blocks, messages = args.messages, "building demo chain");

    let mut ledger = Ledger::new();
    for b in 0..args.blocks {
        for m in 0..args.messages {
            ledger
                .append_message(format!("block {b} message {m}"))
                .with_context(|| format!("failed to add message {m} to block {b}"))?;
        }
        ledger
            .seal_block()
            .with_context(|| format!("failed to append block {b}"))?;
    }
    ledger
        .validate()
        .context("demo chain failed integrity validation")?;

    let chain = ledger.chain();
    if args.json {
        let json = serde_json::to_string_pretty(chain).context("failed to serialize chain")?;
        println!("{json}");
    } else {
        println!("{chain}");
        for (height, block) in chain.blocks().iter().enumerate() {
            print!("{}", render::describe_block(height, block));
        }
        println!("Chain passed integrity validation.");
    }
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("simple-chain {}", env!("CARGO_PKG_VERSION"));
    println!("ledger       {}", LEDGER_VERSION);
    println!("digest       {}", HASH_ALGORITHM);
}
