//! Game session - owns the deck, the score, and the clock
//!
//! A session is confined to a single task. It is the only code that mutates
//! card visibility, score, flips, or remaining time. Work that has to wait
//! (turn pacing, flipping mismatched cards back, ending the study phase, clock
//! ticks) runs in spawned tasks that post a [`SessionEvent`] back to the owning
//! task instead of touching the session directly.
//!
//! # Lifecycle
//!
//! ```text
//! setup_new_game ──► Studying ──(study delay)──► Playing ──► Over
//!        ▲                                                   │
//!        └───────────────────────────────────────────────────┘
//! ```
//!
//! - **Studying**: every card is face-up, input is ignored, the clock is idle
//! - **Playing**: the clock starts on the first accepted flip
//! - **Over**: stats are frozen (the win bonus is applied once on entry)
//!
//! # Stale Callbacks
//!
//! Every deferred task is tied to the game's cancellation token and carries the
//! game id it was scheduled for. Starting a new game cancels the old token, and
//! any event that still arrives for an older game id is ignored. Card lookups
//! that miss (ids from a replaced deck) are no-ops as well.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::coordinator::{TurnCoordinator, TurnResult};
use crate::core::{
    apply_time_bonus, elapsed_secs, CardId, Deck, GameStats, Phase, SessionSnapshot, SimpleRng,
};
use crate::feedback::Feedback;
use crate::store::StatsStore;
use crate::timer::TimerLoop;
use crate::types::{HapticKind, SoundEffect, TIME_LIMIT_SECS};

/// Deferred work reporting back to the session task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The coordinator finished with a selection
    TurnResolved { game_id: u64, result: TurnResult },
    /// Mismatched cards have been visible long enough
    FlipBack { game_id: u64, cards: [CardId; 2] },
    /// The study phase is over
    StudyOver { game_id: u64 },
    /// One clock period elapsed
    Tick { game_id: u64 },
}

impl SessionEvent {
    pub fn game_id(&self) -> u64 {
        match self {
            SessionEvent::TurnResolved { game_id, .. }
            | SessionEvent::FlipBack { game_id, .. }
            | SessionEvent::StudyOver { game_id }
            | SessionEvent::Tick { game_id } => *game_id,
        }
    }
}

/// Live score and clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub score: u32,
    pub flips: u32,
    pub time_remaining: u32,
    pub is_game_over: bool,
    pub game_won: bool,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            score: 0,
            flips: 0,
            time_remaining: TIME_LIMIT_SECS,
            is_game_over: false,
            game_won: false,
        }
    }
}

pub struct GameSession {
    config: EngineConfig,
    deck: Deck,
    stats: SessionStats,
    phase: Phase,
    timer_started: bool,
    game_id: u64,
    rng: SimpleRng,
    coordinator: TurnCoordinator,
    timer: TimerLoop,
    root_token: CancellationToken,
    game_token: CancellationToken,
    events: mpsc::UnboundedSender<SessionEvent>,
    feedback: Arc<dyn Feedback>,
    store: Arc<dyn StatsStore>,
    observers: watch::Sender<SessionSnapshot>,
}

impl GameSession {
    /// Create an idle session. Call [`setup_new_game`](Self::setup_new_game)
    /// (from inside a tokio runtime) to deal the first game.
    ///
    /// The returned receiver carries the session's deferred events; feed each
    /// one back through [`handle_event`](Self::handle_event).
    pub fn new(
        config: EngineConfig,
        feedback: Arc<dyn Feedback>,
        store: Arc<dyn StatsStore>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let rng = config.seed.map(SimpleRng::new).unwrap_or_else(SimpleRng::from_clock);
        let root_token = CancellationToken::new();
        let game_token = root_token.child_token();
        let deck = Deck::shuffled(&mut rng.clone());
        let (observers, _) = watch::channel(SessionSnapshot::default());

        let session = Self {
            coordinator: TurnCoordinator::from_config(&config),
            timer: TimerLoop::new(config.tick),
            config,
            deck,
            stats: SessionStats::default(),
            phase: Phase::Studying,
            timer_started: false,
            game_id: 0,
            rng,
            root_token,
            game_token,
            events,
            feedback,
            store,
            observers,
        };
        (session, events_rx)
    }

    pub fn cards(&self) -> &Deck {
        &self.deck
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn flips(&self) -> u32 {
        self.stats.flips
    }

    pub fn time_remaining(&self) -> u32 {
        self.stats.time_remaining
    }

    pub fn is_game_over(&self) -> bool {
        self.stats.is_game_over
    }

    pub fn game_won(&self) -> bool {
        self.stats.game_won
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    pub fn coordinator(&self) -> &TurnCoordinator {
        &self.coordinator
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game_id: self.game_id,
            cards: self.deck.cards().to_vec(),
            score: self.stats.score,
            flips: self.stats.flips,
            time_remaining: self.stats.time_remaining,
            is_game_over: self.stats.is_game_over,
            game_won: self.stats.game_won,
            phase: self.phase,
            timer_started: self.timer_started,
            timer_running: self.timer.is_running(),
        }
    }

    /// Observe every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.observers.subscribe()
    }

    fn publish(&self) {
        self.observers.send_replace(self.snapshot());
    }

    /// Deal a new game, abandoning whatever the previous one had in flight.
    pub fn setup_new_game(&mut self) {
        self.game_token.cancel();
        self.game_token = self.root_token.child_token();
        self.timer.reset();

        self.stats = SessionStats::default();
        self.timer_started = false;
        self.game_id = self.game_id.wrapping_add(1);
        self.deck = Deck::shuffled(&mut self.rng);
        self.coordinator.reset();

        self.deck.reveal_all();
        self.phase = Phase::Studying;
        self.schedule(self.config.study_phase, SessionEvent::StudyOver {
            game_id: self.game_id,
        });

        info!(game_id = self.game_id, "new game dealt");
        self.publish();
    }

    /// Player picked a card.
    pub fn select_card(&mut self, card_id: CardId) {
        if self.phase != Phase::Playing || self.stats.is_game_over {
            trace!(%card_id, phase = self.phase.as_str(), "selection ignored outside play");
            return;
        }
        if !self.coordinator.can_select(card_id, self.deck.cards()) {
            trace!(%card_id, "selection rejected");
            return;
        }

        if !self.timer_started {
            self.timer_started = true;
            self.timer
                .start(self.game_id, self.events.clone(), &self.game_token);
        }

        let Some(card) = self.deck.get_mut(card_id) else {
            return;
        };
        card.face_up = true;
        self.stats.flips += 1;

        let turn = self.coordinator.select(card_id);
        let token = self.game_token.clone();
        let events = self.events.clone();
        let game_id = self.game_id;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                result = turn => {
                    let _ = events.send(SessionEvent::TurnResolved { game_id, result });
                }
            }
        });

        self.publish();
    }

    /// Apply a deferred event. Events from an older game are dropped.
    pub fn handle_event(&mut self, event: SessionEvent) {
        if event.game_id() != self.game_id {
            trace!(stale = event.game_id(), current = self.game_id, "stale event dropped");
            return;
        }

        match event {
            SessionEvent::TurnResolved { result, .. } => self.apply_turn_result(result),
            SessionEvent::FlipBack { cards, .. } => self.flip_back(cards),
            SessionEvent::StudyOver { .. } => self.end_study_phase(),
            SessionEvent::Tick { .. } => self.tick(),
        }
        self.publish();
    }

    fn apply_turn_result(&mut self, result: TurnResult) {
        if self.stats.is_game_over {
            return;
        }

        match result {
            TurnResult::Selected => {
                self.feedback.play(SoundEffect::CardFlip);
                self.feedback.haptic(HapticKind::Light);
            }
            TurnResult::Matched {
                base_score,
                first,
                second,
            } => {
                let (Some(a), Some(b)) = (self.deck.get(first), self.deck.get(second)) else {
                    return;
                };
                if a.pairs_with(b) {
                    self.handle_match(first, second, base_score);
                } else {
                    self.handle_no_match([first, second]);
                }
            }
            TurnResult::NoMatch
            | TurnResult::Busy
            | TurnResult::AlreadySelected
            | TurnResult::Abandoned => {
                trace!(?result, "turn result needs no action");
            }
        }
    }

    /// Lock a resolved pair face-up and score it.
    pub fn handle_match(&mut self, first: CardId, second: CardId, base_score: u32) {
        for id in [first, second] {
            if let Some(card) = self.deck.get_mut(id) {
                card.mark_matched();
            }
        }
        self.stats.score += base_score;
        self.feedback.play(SoundEffect::Match);
        self.feedback.haptic(HapticKind::Success);
        debug!(score = self.stats.score, matched = self.deck.matched_count(), "pair matched");

        if self.deck.all_matched() {
            self.end_game(true);
        }
    }

    /// Leave a mismatched pair visible briefly, then turn it back over.
    pub fn handle_no_match(&mut self, cards: [CardId; 2]) {
        self.feedback.play(SoundEffect::NoMatch);
        self.feedback.haptic(HapticKind::Error);
        self.schedule(self.config.no_match_flip_back, SessionEvent::FlipBack {
            game_id: self.game_id,
            cards,
        });
    }

    fn flip_back(&mut self, cards: [CardId; 2]) {
        for id in cards {
            match self.deck.get_mut(id) {
                Some(card) if !card.matched => card.face_up = false,
                Some(_) => {}
                None => trace!(%id, "flip-back for unknown card"),
            }
        }
    }

    fn end_study_phase(&mut self) {
        if self.phase != Phase::Studying {
            return;
        }
        self.deck.hide_unmatched();
        self.phase = Phase::Playing;
        debug!(game_id = self.game_id, "study phase over");
    }

    fn tick(&mut self) {
        if self.stats.is_game_over || !self.timer_started {
            return;
        }
        self.stats.time_remaining = self.stats.time_remaining.saturating_sub(1);
        if self.stats.time_remaining == 0 {
            self.end_game(false);
        }
    }

    /// Freeze the game, apply the win bonus, and persist summary stats.
    pub fn end_game(&mut self, won: bool) {
        if self.stats.is_game_over {
            return;
        }

        self.stats.is_game_over = true;
        self.stats.game_won = won;
        self.phase = Phase::Over;
        self.timer.stop();

        let elapsed = elapsed_secs(self.stats.time_remaining);
        if won {
            self.stats.score = apply_time_bonus(self.stats.score, elapsed);
            self.feedback.play(SoundEffect::Win);
            self.feedback.haptic(HapticKind::Success);
        } else {
            self.feedback.play(SoundEffect::Lose);
            self.feedback.haptic(HapticKind::Error);
        }
        info!(
            won,
            score = self.stats.score,
            flips = self.stats.flips,
            elapsed,
            "game over"
        );

        let stats = GameStats {
            score: self.stats.score,
            flips: self.stats.flips,
            time_elapsed: elapsed,
            is_complete: self.stats.is_game_over,
        };
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(e) = store.save(&stats).await {
                warn!(error = %e, "failed to save game stats");
            }
        });
    }

    /// Stop the clock without losing time (app backgrounded).
    pub fn pause_timer(&mut self) {
        self.timer.stop();
        self.publish();
    }

    /// Restart the clock if this game already started it and is still running.
    pub fn resume_timer(&mut self) {
        if self.timer_started && !self.stats.is_game_over && self.stats.time_remaining > 0 {
            self.timer
                .start(self.game_id, self.events.clone(), &self.game_token);
        }
        self.publish();
    }

    /// Cancel every deferred task and the clock.
    pub fn shutdown(&mut self) {
        self.root_token.cancel();
        self.timer.stop();
    }

    fn schedule(&self, delay: Duration, event: SessionEvent) {
        let token = self.game_token.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = events.send(event);
                }
            }
        });
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.root_token.cancel();
    }
}
