//! Scoring and pacing rules.
//!
//! Free functions over plain numbers so the tables are testable without a
//! session. The session applies them and owns the running totals.

use crate::types::{
    BASE_FALL_DELAY, FALL_DELAY_STEP, LINES_PER_LEVEL, MAX_LEVEL, MIN_FALL_DELAY, SCORE_DOUBLE,
    SCORE_SINGLE, SCORE_TETRIS, SCORE_TRIPLE,
};

/// Base points for a batch of cleared rows, before level scaling. Counts
/// above four cannot happen with tetromino geometry but are still priced.
pub fn line_clear_score(rows: usize) -> u32 {
    match rows {
        0 => 0,
        1 => SCORE_SINGLE,
        2 => SCORE_DOUBLE,
        3 => SCORE_TRIPLE,
        4 => SCORE_TETRIS,
        n => SCORE_SINGLE * n as u32,
    }
}

/// Points actually awarded for a clear: base score times current level.
pub fn scaled_line_score(rows: usize, level: u32) -> u32 {
    line_clear_score(rows) * level
}

/// Drop bonus: 1 point per soft-dropped row, 2 per hard-dropped row.
pub fn drop_score(rows: u32, hard: bool) -> u32 {
    if hard {
        rows * 2
    } else {
        rows
    }
}

/// Level for a total line count: one level per ten lines, starting at 1,
/// capped at the maximum.
pub fn level_for_lines(lines: u32) -> u32 {
    (lines / LINES_PER_LEVEL + 1).min(MAX_LEVEL)
}

/// Seconds between gravity steps: each level past the first shaves a
/// fixed step off the base delay, floored at the minimum.
pub fn fall_delay(base: f32, level: u32) -> f32 {
    (base - level.saturating_sub(1) as f32 * FALL_DELAY_STEP).max(MIN_FALL_DELAY)
}

/// Fall delay at a level, from the default base.
pub fn fall_delay_for_level(level: u32) -> f32 {
    fall_delay(BASE_FALL_DELAY, level)
}
