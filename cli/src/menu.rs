//! # Interactive Menu
//!
//! The numbered action loop that drives a [`Ledger`]:
//!
//! ```text
//! 1  add a message to the open block
//! 2  append the open block to the chain
//! 3  show the whole chain
//! 4  show one block by height
//! 5  validate the chain
//! *  quit
//! ```
//!
//! Generic over its input and output so tests can script a session.
//! A failed validation ends the session with an error.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use simple_chain::storage::Ledger;

use crate::render;

const BANNER: &str = "\
Basic ledger operations. Pick an action:

    add a message to the open block   (1)
    append the open block to chain    (2)
    show the whole chain              (3)
    show one block                    (4)
    validate chain integrity          (5)
    quit                              (anything else)

A failed integrity check ends the session.
";

const SEPARATOR: &str = "----------------";

/// A scripted or interactive menu session over one ledger.
pub struct Menu<R, W> {
    input: R,
    output: W,
    ledger: Ledger,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Menu {
            input,
            output,
            ledger: Ledger::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{BANNER}")?;

        loop {
            writeln!(self.output)?;
            let Some(choice) = self.prompt("Choose an action: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.add_message()?,
                "2" => self.append_block()?,
                "3" => self.show_chain()?,
                "4" => self.show_block()?,
                "5" => self.validate()?,
                _ => break,
            }
        }

        tracing::info!(height = self.ledger.chain().height(), "menu session ended");
        Ok(())
    }

    fn add_message(&mut self) -> Result<()> {
        let Some(text) = self.prompt("Enter your message and press Enter: ")? else {
            return Ok(());
        };
        match self.ledger.append_message(text) {
            Ok(()) => writeln!(
                self.output,
                "Message added ({} in open block).",
                self.ledger.pending().len()
            )?,
            Err(e) => writeln!(self.output, "Message rejected: {e}")?,
        }
        Ok(())
    }

    fn append_block(&mut self) -> Result<()> {
        if self.ledger.pending().is_empty() {
            writeln!(self.output, "The open block is empty; add a message first.")?;
            return Ok(());
        }
        match self.ledger.seal_block() {
            Ok(height) => writeln!(self.output, "Block appended at height {height}.")?,
            Err(e) => writeln!(self.output, "Block rejected: {e}")?,
        }
        Ok(())
    }

    fn show_chain(&mut self) -> Result<()> {
        for block in self.ledger.chain().blocks() {
            writeln!(self.output, "{block}")?;
            writeln!(self.output, "{SEPARATOR}")?;
        }
        Ok(())
    }

    fn show_block(&mut self) -> Result<()> {
        let Some(raw) = self.prompt("Block height: ")? else {
            return Ok(());
        };
        let chain = self.ledger.chain();
        let found = raw
            .parse::<usize>()
            .ok()
            .and_then(|height| chain.block(height).map(|block| (height, block)));
        match found {
            Some((height, block)) => {
                write!(self.output, "{}", render::describe_block(height, block))?
            }
            None => writeln!(
                self.output,
                "No block at height {raw:?} (chain has {} blocks).",
                chain.height()
            )?,
        }
        Ok(())
    }

    fn validate(&mut self) -> Result<()> {
        self.ledger
            .validate()
            .context("chain failed integrity validation")?;
        writeln!(self.output, "Chain passed integrity validation.")?;
        Ok(())
    }

    /// Print `label`, read one line, and return it trimmed of the line ending.
    /// Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
