//! Card model.

use std::fmt;

use uuid::Uuid;

use crate::types::Symbol;

/// Unique identity of a single card.
///
/// Ids are never reused across games, so a callback holding an id from a
/// replaced deck simply fails to find its card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity shared by the two cards of a matching pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(Uuid);

impl PairId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PairId {
    fn default() -> Self {
        Self::new()
    }
}

/// A card on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub pair_id: PairId,
    pub symbol: Symbol,
    pub face_up: bool,
    pub matched: bool,
    /// Board slot, 0..DECK_SIZE in row-major order
    pub position: usize,
}

impl Card {
    /// Create a face-down, unmatched card with a fresh id
    pub fn new(symbol: Symbol, pair_id: PairId, position: usize) -> Self {
        Self {
            id: CardId::new(),
            pair_id,
            symbol,
            face_up: false,
            matched: false,
            position,
        }
    }

    /// Face-down and still in play
    pub fn is_selectable(&self) -> bool {
        !self.face_up && !self.matched
    }

    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.pair_id == other.pair_id
    }

    /// Lock the card face-up for the rest of the game
    pub fn mark_matched(&mut self) {
        self.matched = true;
        self.face_up = true;
    }
}
