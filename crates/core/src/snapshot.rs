use crate::card::Card;
use crate::scoring::elapsed_secs;
use crate::types::{TIME_LIMIT_SECS, TIME_WARNING_SECS};

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// All cards revealed for memorising; input is ignored
    #[default]
    Studying,
    Playing,
    Over,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Studying => "studying",
            Phase::Playing => "playing",
            Phase::Over => "over",
        }
    }
}

/// Read-only view of a session, published after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub game_id: u64,
    pub cards: Vec<Card>,
    pub score: u32,
    pub flips: u32,
    pub time_remaining: u32,
    pub is_game_over: bool,
    pub game_won: bool,
    pub phase: Phase,
    pub timer_started: bool,
    pub timer_running: bool,
}

impl SessionSnapshot {
    pub fn time_elapsed(&self) -> u32 {
        elapsed_secs(self.time_remaining)
    }

    pub fn time_running_low(&self) -> bool {
        self.time_remaining <= TIME_WARNING_SECS
    }

    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count() / 2
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing && !self.is_game_over
    }

    /// Started but not currently counting down
    pub fn paused(&self) -> bool {
        self.timer_started && !self.timer_running && !self.is_game_over
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            game_id: 0,
            cards: Vec::new(),
            score: 0,
            flips: 0,
            time_remaining: TIME_LIMIT_SECS,
            is_game_over: false,
            game_won: false,
            phase: Phase::Studying,
            timer_started: false,
            timer_running: false,
        }
    }
}
