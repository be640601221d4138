//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game. All
//! types are plain data with no external dependencies, so they can be used by
//! the engine, the persistence layer, and the terminal front-end alike.
//!
//! # Board Dimensions
//!
//! The board is a fixed 5x4 grid:
//!
//! - **Pairs**: 10 (one per [`Symbol`])
//! - **Cards**: 20 (positions 0-19, row-major)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds unless noted otherwise:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FLIP_SETTLE_MS` | 600 | Pause before a two-card turn is evaluated |
//! | `REVEAL_MS` | 800 | Pause letting the player see both cards |
//! | `NO_MATCH_FLIP_BACK_MS` | 800 | Delay before mismatched cards turn back over |
//! | `STUDY_PHASE_MS` | 3000 | Full reveal at the start of every game |
//! | `TICK_MS` | 1000 | Countdown timer period |
//! | `TIME_LIMIT_SECS` | 90 | Seconds on the clock at game start (seconds) |
//!
//! # Examples
//!
//! ```
//! use concentration_types::{GameAction, Direction, Symbol, DECK_SIZE, PAIR_COUNT};
//!
//! assert_eq!(Symbol::ALL.len(), PAIR_COUNT);
//! assert_eq!(DECK_SIZE, PAIR_COUNT * 2);
//!
//! assert_eq!(Symbol::Fox.emoji(), "🦊");
//!
//! let action = GameAction::Move(Direction::Left);
//! assert_eq!(action.as_str(), "moveLeft");
//! ```

/// Number of distinct pairs on the board
pub const PAIR_COUNT: usize = 10;

/// Number of cards on the board (two per pair)
pub const DECK_SIZE: usize = PAIR_COUNT * 2;

/// Grid columns
pub const GRID_COLUMNS: usize = 5;

/// Grid rows
pub const GRID_ROWS: usize = 4;

/// Seconds on the countdown clock when a game starts
pub const TIME_LIMIT_SECS: u32 = 90;

/// Remaining seconds at which the clock is shown as running low
pub const TIME_WARNING_SECS: u32 = 10;

/// Points awarded for every matched pair (before the time bonus)
pub const BASE_MATCH_SCORE: u32 = 10;

/// Flip animation settle time before a turn is evaluated
pub const FLIP_SETTLE_MS: u64 = 600;

/// Time both cards of a turn stay visible before the turn resolves
pub const REVEAL_MS: u64 = 800;

/// Time mismatched cards stay visible before turning back over
pub const NO_MATCH_FLIP_BACK_MS: u64 = 800;

/// Length of the study phase at the start of every game
pub const STUDY_PHASE_MS: u64 = 3000;

/// Countdown timer period
pub const TICK_MS: u64 = 1000;

/// Face values printed on the cards
///
/// Each symbol appears on exactly two cards of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Dog,
    Cat,
    Mouse,
    Hamster,
    Rabbit,
    Fox,
    Bear,
    Panda,
    Koala,
    Tiger,
}

impl Symbol {
    /// Every symbol, in deck-building order
    pub const ALL: [Symbol; PAIR_COUNT] = [
        Symbol::Dog,
        Symbol::Cat,
        Symbol::Mouse,
        Symbol::Hamster,
        Symbol::Rabbit,
        Symbol::Fox,
        Symbol::Bear,
        Symbol::Panda,
        Symbol::Koala,
        Symbol::Tiger,
    ];

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Dog => "dog",
            Symbol::Cat => "cat",
            Symbol::Mouse => "mouse",
            Symbol::Hamster => "hamster",
            Symbol::Rabbit => "rabbit",
            Symbol::Fox => "fox",
            Symbol::Bear => "bear",
            Symbol::Panda => "panda",
            Symbol::Koala => "koala",
            Symbol::Tiger => "tiger",
        }
    }

    /// Emoji drawn on the card face
    pub fn emoji(&self) -> &'static str {
        match self {
            Symbol::Dog => "🐶",
            Symbol::Cat => "🐱",
            Symbol::Mouse => "🐭",
            Symbol::Hamster => "🐹",
            Symbol::Rabbit => "🐰",
            Symbol::Fox => "🦊",
            Symbol::Bear => "🐻",
            Symbol::Panda => "🐼",
            Symbol::Koala => "🐨",
            Symbol::Tiger => "🐯",
        }
    }
}

/// Sound cues emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    CardFlip,
    Match,
    NoMatch,
    Win,
    Lose,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::CardFlip => "cardFlip",
            SoundEffect::Match => "match",
            SoundEffect::NoMatch => "noMatch",
            SoundEffect::Win => "win",
            SoundEffect::Lose => "lose",
        }
    }
}

/// Haptic cues emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapticKind {
    Success,
    Error,
    Light,
}

impl HapticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HapticKind::Success => "success",
            HapticKind::Error => "error",
            HapticKind::Light => "light",
        }
    }
}

/// Cursor movement direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Player actions produced by the front-end
///
/// Human input maps onto these; the runner translates them into session
/// commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the grid cursor one cell
    Move(Direction),
    /// Flip the card under the cursor
    Flip,
    /// Abandon the current game and deal a new one
    NewGame,
    /// Pause or resume the countdown
    TogglePause,
    /// Delete the saved stats of the last game
    ResetStats,
}

impl GameAction {
    /// Convert to camelCase string (used in logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(Direction::Up) => "moveUp",
            GameAction::Move(Direction::Down) => "moveDown",
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::Flip => "flip",
            GameAction::NewGame => "newGame",
            GameAction::TogglePause => "togglePause",
            GameAction::ResetStats => "resetStats",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_geometry_holds_every_card() {
        assert_eq!(GRID_COLUMNS * GRID_ROWS, DECK_SIZE);
        assert_eq!(Symbol::ALL.len(), PAIR_COUNT);
    }

    #[test]
    fn turn_timing_defaults() {
        assert_eq!(FLIP_SETTLE_MS, 600);
        assert_eq!(REVEAL_MS, 800);
        assert_eq!(NO_MATCH_FLIP_BACK_MS, 800);
        assert_eq!(STUDY_PHASE_MS, 3000);
        assert_eq!(TIME_LIMIT_SECS, 90);
        assert_eq!(BASE_MATCH_SCORE, 10);
    }

    #[test]
    fn symbols_have_distinct_faces() {
        let names: std::collections::HashSet<_> = Symbol::ALL.iter().map(|s| s.as_str()).collect();
        let emoji: std::collections::HashSet<_> = Symbol::ALL.iter().map(|s| s.emoji()).collect();
        assert_eq!(names.len(), PAIR_COUNT);
        assert_eq!(emoji.len(), PAIR_COUNT);
        assert!(Symbol::ALL.iter().all(|s| s.emoji().chars().count() == 1));
    }
}
