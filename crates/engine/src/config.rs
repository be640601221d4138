//! Engine configuration.
//!
//! Defaults mirror the game constants in `concentration-types`. Every delay can
//! be overridden from the environment (and set to zero for deterministic runs):
//!
//! - `CONCENTRATION_SEED`: deck shuffle seed (default: wall clock)
//! - `CONCENTRATION_FLIP_SETTLE_MS`
//! - `CONCENTRATION_REVEAL_MS`
//! - `CONCENTRATION_NO_MATCH_MS`
//! - `CONCENTRATION_STUDY_MS`
//! - `CONCENTRATION_TICK_MS`

use std::time::Duration;

use crate::types::{
    BASE_MATCH_SCORE, FLIP_SETTLE_MS, NO_MATCH_FLIP_BACK_MS, REVEAL_MS, STUDY_PHASE_MS, TICK_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deck shuffle seed; `None` seeds from the clock
    pub seed: Option<u32>,
    pub flip_settle: Duration,
    pub reveal: Duration,
    pub no_match_flip_back: Duration,
    pub study_phase: Duration,
    pub tick: Duration,
    pub base_match_score: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            flip_settle: Duration::from_millis(FLIP_SETTLE_MS),
            reveal: Duration::from_millis(REVEAL_MS),
            no_match_flip_back: Duration::from_millis(NO_MATCH_FLIP_BACK_MS),
            study_phase: Duration::from_millis(STUDY_PHASE_MS),
            tick: Duration::from_millis(TICK_MS),
            base_match_score: BASE_MATCH_SCORE,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            seed: env_parse("CONCENTRATION_SEED"),
            flip_settle: env_millis("CONCENTRATION_FLIP_SETTLE_MS").unwrap_or(defaults.flip_settle),
            reveal: env_millis("CONCENTRATION_REVEAL_MS").unwrap_or(defaults.reveal),
            no_match_flip_back: env_millis("CONCENTRATION_NO_MATCH_MS")
                .unwrap_or(defaults.no_match_flip_back),
            study_phase: env_millis("CONCENTRATION_STUDY_MS").unwrap_or(defaults.study_phase),
            tick: env_millis("CONCENTRATION_TICK_MS")
                .filter(|d| !d.is_zero())
                .unwrap_or(defaults.tick),
            base_match_score: defaults.base_match_score,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Zero every turn-pacing delay (the countdown tick is kept)
    pub fn without_delays(mut self) -> Self {
        self.flip_settle = Duration::ZERO;
        self.reveal = Duration::ZERO;
        self.no_match_flip_back = Duration::ZERO;
        self.study_phase = Duration::ZERO;
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_millis(key: &str) -> Option<Duration> {
    env_parse::<u64>(key).map(Duration::from_millis)
}
