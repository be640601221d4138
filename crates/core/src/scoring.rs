//! Scoring module - time bonus applied when the board is cleared
//!
//! Every matched pair is worth [`BASE_MATCH_SCORE`](crate::types::BASE_MATCH_SCORE).
//! Clearing the board quickly multiplies the accumulated score:
//!
//! | Elapsed (s) | Multiplier |
//! |-------------|------------|
//! | 0-20 | 3.0 |
//! | 21-30 | 2.5 |
//! | 31-45 | 2.0 |
//! | 46-60 | 1.5 |
//! | 61+ | 1.0 |

use crate::types::TIME_LIMIT_SECS;

/// Seconds used so far given the seconds left on the clock
pub fn elapsed_secs(time_remaining: u32) -> u32 {
    TIME_LIMIT_SECS.saturating_sub(time_remaining)
}

/// Multiplier for a win after `elapsed` seconds
pub fn time_bonus_multiplier(elapsed: u32) -> f64 {
    match elapsed {
        0..=20 => 3.0,
        21..=30 => 2.5,
        31..=45 => 2.0,
        46..=60 => 1.5,
        _ => 1.0,
    }
}

/// Final score for a win: `score * multiplier`, truncated
pub fn apply_time_bonus(score: u32, elapsed: u32) -> u32 {
    (f64::from(score) * time_bonus_multiplier(elapsed)) as u32
}
