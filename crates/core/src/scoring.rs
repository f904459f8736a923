//! Scoring module - line-clear points and gravity speed
//!
//! Both rules key off the same difficulty step: one level per 10 cleared lines.
//! - A lock awards `(level + 1) << cleared`, so every extra simultaneous row
//!   doubles the value (a lock that clears nothing still earns `level + 1`).
//! - The gravity period halves with every level, down to a fixed floor.

use crate::types::{BASE_DROP_PERIOD_NS, LINES_PER_LEVEL, MIN_DROP_PERIOD_NS};

/// Level for a lines-cleared total (0-based)
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL
}

/// Points awarded by one lock.
///
/// `lines_before`: lines cleared before this lock.
/// `cleared`: full rows removed by this lock (0-4 in play).
pub fn lock_score(lines_before: u32, cleared: u32) -> u32 {
    let multiplier = level_for_lines(lines_before).saturating_add(1);
    multiplier.checked_shl(cleared).unwrap_or(u32::MAX)
}

/// Gravity period for a lines-cleared total, in nanoseconds.
///
/// `BASE_DROP_PERIOD_NS >> level`, never below `MIN_DROP_PERIOD_NS`.
pub fn drop_period_ns(lines: u32) -> u64 {
    let level = level_for_lines(lines);
    BASE_DROP_PERIOD_NS
        .checked_shr(level)
        .unwrap_or(0)
        .max(MIN_DROP_PERIOD_NS)
}
