//! Human-readable views of blocks for the menu and the demo.

use std::fmt::Write as _;

use simple_chain::storage::Block;
use simple_chain::time;

/// Format a fractional UNIX timestamp as RFC 3339, falling back to the raw
/// number when chrono cannot represent it.
pub fn timestamp(ts: f64) -> String {
    time::to_datetime(ts)
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Micros, true))
        .unwrap_or_else(|| time::repr(ts))
}

/// Multi-line description of a block and all of its records.
pub fn describe_block(height: usize, block: &Block) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Block #{height}");
    let _ = writeln!(out, "  hash      : {}", block.hash().unwrap_or("None"));
    let _ = writeln!(out, "  prev_hash : {}", block.prev_hash().unwrap_or("None"));
    let _ = writeln!(
        out,
        "  sealed_at : {}",
        block.sealed_at().map(timestamp).unwrap_or_else(|| "open".to_string())
    );
    let _ = writeln!(out, "  records   : {}", block.len());
    for (i, record) in block.records().iter().enumerate() {
        let _ = writeln!(
            out,
            "    #{i} [{}] ({} bytes) {}",
            timestamp(record.created_at()),
            record.size(),
            record.data()
        );
        let _ = writeln!(out, "       hash: {}", record.hash().unwrap_or("None"));
    }
    out
}
