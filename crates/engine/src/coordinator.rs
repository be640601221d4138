//! Turn coordinator - the single authority over in-flight selections
//!
//! A turn starts with the first accepted card and ends when a second card has
//! been held up for the settle and reveal delays. At most one turn is ever in
//! flight: while two cards are pending, or while the turn is being paced, every
//! further selection is rejected.
//!
//! The coordinator knows nothing about faces. A completed turn is reported as
//! [`TurnResult::Matched`] together with the two card ids; the caller owns the
//! cards and decides whether they actually pair up.
//!
//! # Concurrency
//!
//! State lives behind a mutex that is only held for short read-modify-write
//! sections and never across an await. [`TurnCoordinator::select`] admits the
//! card while the caller is still on the stack; the returned future only waits
//! out the pacing delays and then clears the turn.
//!
//! [`TurnCoordinator::reset`] bumps a generation counter. A turn whose delays
//! finish after a reset reports [`TurnResult::Abandoned`] and leaves the newer
//! state alone.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use arrayvec::ArrayVec;
use tracing::trace;

use crate::config::EngineConfig;
use crate::core::{Card, CardId};

/// Outcome of a selection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    /// First card of a turn recorded
    Selected,
    /// Second card held up for the full delay; the caller compares the pair
    Matched {
        base_score: u32,
        first: CardId,
        second: CardId,
    },
    /// Reserved for coordinators that compare faces themselves
    NoMatch,
    /// A turn is already being resolved
    Busy,
    /// The card is already pending in this turn
    AlreadySelected,
    /// The turn was discarded by a reset while it was being paced
    Abandoned,
}

/// Pending ids, bounded at two
pub type Selection = ArrayVec<CardId, 2>;

#[derive(Debug, Default)]
struct TurnState {
    processing: bool,
    selected: Selection,
    generation: u64,
}

/// Result of the synchronous admission step
enum Admission {
    Done(TurnResult),
    Resolve { generation: u64 },
}

#[derive(Debug, Clone, Copy)]
struct TurnTiming {
    flip_settle: Duration,
    reveal: Duration,
    base_score: u32,
}

/// Cheaply cloneable handle; clones share the same turn state.
#[derive(Debug, Clone)]
pub struct TurnCoordinator {
    state: Arc<Mutex<TurnState>>,
    timing: TurnTiming,
}

fn lock(state: &Mutex<TurnState>) -> MutexGuard<'_, TurnState> {
    // Every critical section leaves the state consistent, so a poisoned
    // lock is still safe to use.
    state.lock().unwrap_or_else(|e| e.into_inner())
}

impl TurnCoordinator {
    pub fn new(flip_settle: Duration, reveal: Duration, base_score: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(TurnState::default())),
            timing: TurnTiming {
                flip_settle,
                reveal,
                base_score,
            },
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.flip_settle, config.reveal, config.base_match_score)
    }

    /// Whether `card_id` may be flipped right now. Pure query.
    pub fn can_select(&self, card_id: CardId, cards: &[Card]) -> bool {
        let state = lock(&self.state);

        if state.processing {
            return false;
        }

        let Some(card) = cards.iter().find(|c| c.id == card_id) else {
            return false;
        };
        if !card.is_selectable() {
            return false;
        }

        !state.selected.contains(&card_id) && !state.selected.is_full()
    }

    /// Offer a card to the current turn.
    ///
    /// The card is recorded (or rejected) before this returns. Awaiting the
    /// future yields the outcome; for the second card of a turn that takes the
    /// settle and reveal delays. Dropping the future abandons only the pacing;
    /// the turn stays busy until the next [`reset`](Self::reset).
    pub fn select(&self, card_id: CardId) -> impl Future<Output = TurnResult> + Send + 'static {
        let admission = self.admit(card_id);
        let state = Arc::clone(&self.state);
        let timing = self.timing;

        async move {
            let generation = match admission {
                Admission::Done(result) => return result,
                Admission::Resolve { generation } => generation,
            };

            tokio::time::sleep(timing.flip_settle).await;
            tokio::time::sleep(timing.reveal).await;

            let mut turn = lock(&state);
            if turn.generation != generation {
                trace!(generation, "turn superseded by reset");
                return TurnResult::Abandoned;
            }

            let result = match turn.selected.as_slice() {
                [first, second] => TurnResult::Matched {
                    base_score: timing.base_score,
                    first: *first,
                    second: *second,
                },
                _ => TurnResult::Abandoned,
            };
            turn.selected.clear();
            turn.processing = false;
            result
        }
    }

    fn admit(&self, card_id: CardId) -> Admission {
        let mut state = lock(&self.state);

        if state.processing {
            return Admission::Done(TurnResult::Busy);
        }
        if state.selected.contains(&card_id) {
            return Admission::Done(TurnResult::AlreadySelected);
        }
        if state.selected.try_push(card_id).is_err() {
            return Admission::Done(TurnResult::Busy);
        }

        if state.selected.is_full() {
            state.processing = true;
            Admission::Resolve {
                generation: state.generation,
            }
        } else {
            Admission::Done(TurnResult::Selected)
        }
    }

    /// Drop any pending or in-flight turn.
    pub fn reset(&self) {
        let mut state = lock(&self.state);
        state.processing = false;
        state.selected.clear();
        state.generation = state.generation.wrapping_add(1);
    }

    /// Ids pending in the current turn, in selection order
    pub fn selected(&self) -> Selection {
        lock(&self.state).selected.clone()
    }

    pub fn is_processing(&self) -> bool {
        lock(&self.state).processing
    }
}

impl Default for TurnCoordinator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
