//! # Timestamps
//!
//! Records and blocks carry wall-clock timestamps as fractional UNIX
//! seconds (`f64`). The decimal text of that number is part of the digest
//! preimage, so the rendering rule below is a contract, not a cosmetic.

use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as fractional seconds since the UNIX epoch.
///
/// A clock set before 1970 yields `0.0` instead of failing.
pub fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Render a timestamp the way it appears inside digest preimages.
///
/// Uses the shortest decimal that round-trips to the same `f64`, and always
/// keeps a fractional part: `1602252778.7426066` stays as is, while an
/// integral `1602252778` becomes `1602252778.0`.
pub fn repr(ts: f64) -> String {
    if ts.is_finite() && ts.fract() == 0.0 {
        format!("{:.1}", ts)
    } else {
        format!("{}", ts)
    }
}

/// Convert a fractional UNIX timestamp into a UTC datetime for display.
///
/// Returns `None` for values chrono cannot represent (NaN, infinities,
/// or dates outside its supported range).
pub fn to_datetime(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let secs = ts.floor();
    let nanos = ((ts - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::<Utc>::from_timestamp(secs as i64, nanos)
}
