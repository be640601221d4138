//! Deck module - the 20-card board
//!
//! A deck is dealt by pairing every [`Symbol`] twice, shuffling the cards, and
//! then renumbering `position` so it always matches the order on the board.

use crate::card::{Card, CardId, PairId};
use crate::rng::SimpleRng;
use crate::types::{Symbol, DECK_SIZE};

/// Ordered collection of exactly [`DECK_SIZE`] cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Deal a new shuffled deck
    pub fn shuffled(rng: &mut SimpleRng) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for (index, symbol) in Symbol::ALL.iter().enumerate() {
            let pair_id = PairId::new();
            cards.push(Card::new(*symbol, pair_id, index * 2));
            cards.push(Card::new(*symbol, pair_id, index * 2 + 1));
        }

        rng.shuffle(&mut cards);

        for (position, card) in cards.iter_mut().enumerate() {
            card.position = position;
        }

        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    /// Card at a board position
    pub fn at(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// The card sharing `id`'s pair identity
    pub fn partner_of(&self, id: CardId) -> Option<&Card> {
        let card = self.get(id)?;
        self.cards.iter().find(|c| card.pairs_with(c))
    }

    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|c| c.matched)
    }

    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count()
    }

    /// Turn every card face-up (study phase)
    pub fn reveal_all(&mut self) {
        for card in &mut self.cards {
            card.face_up = true;
        }
    }

    /// Turn every unmatched card face-down
    pub fn hide_unmatched(&mut self) {
        for card in self.cards.iter_mut().filter(|c| !c.matched) {
            card.face_up = false;
        }
    }
}
