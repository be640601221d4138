//! Core game model - pure, deterministic, and testable
//!
//! This crate contains the card deck model and the scoring rules. It has
//! **no dependencies** on the async runtime, terminal, or file system, making it:
//!
//! - **Deterministic**: Same seed produces the same deal
//! - **Testable**: Plain values with unit tests for every rule
//! - **Portable**: Usable from the engine, benches, and the terminal view
//!
//! # Module Structure
//!
//! - [`card`]: Card identity, pair identity, face-up / matched flags
//! - [`deck`]: 20-card shuffled deck with lookup helpers
//! - [`rng`]: Seedable LCG with Fisher-Yates shuffle
//! - [`scoring`]: Time bonus applied when the board is cleared
//! - [`snapshot`]: Read-only session view published to observers
//! - [`stats`]: Summary stats persisted after each game
//!
//! # Example
//!
//! ```
//! use concentration_core::{Deck, SimpleRng, apply_time_bonus};
//!
//! let deck = Deck::shuffled(&mut SimpleRng::new(12345));
//! assert_eq!(deck.len(), 20);
//!
//! let first = deck.cards()[0];
//! let partner = deck.partner_of(first.id).unwrap();
//! assert_eq!(first.symbol, partner.symbol);
//!
//! // Clearing the board in 18 seconds triples the score.
//! assert_eq!(apply_time_bonus(100, 18), 300);
//! ```

pub mod card;
pub mod deck;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod stats;

pub use concentration_types as types;

// Re-export commonly used types for convenience
pub use card::{Card, CardId, PairId};
pub use deck::Deck;
pub use rng::SimpleRng;
pub use scoring::{apply_time_bonus, elapsed_secs, time_bonus_multiplier};
pub use snapshot::{Phase, SessionSnapshot};
pub use stats::GameStats;
