//! End-to-end session scenarios driven through the session handle.
//!
//! All tests run on a paused tokio clock, so the settle, reveal, flip-back,
//! study, and tick delays complete instantly in virtual time.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use concentration::core::{Card, CardId, GameStats, Phase, SessionSnapshot};
use concentration::engine::{spawn_session, EngineConfig, Feedback, SessionHandle};
use concentration::store::{MemoryStatsStore, StatsStore};
use concentration::types::{HapticKind, SoundEffect};

#[derive(Default)]
struct RecordingFeedback {
    sounds: Mutex<Vec<SoundEffect>>,
    haptics: Mutex<Vec<HapticKind>>,
}

impl RecordingFeedback {
    fn sounds(&self) -> Vec<SoundEffect> {
        self.sounds.lock().unwrap().clone()
    }

    fn haptics(&self) -> Vec<HapticKind> {
        self.haptics.lock().unwrap().clone()
    }
}

impl Feedback for RecordingFeedback {
    fn play(&self, sound: SoundEffect) {
        self.sounds.lock().unwrap().push(sound);
    }

    fn haptic(&self, kind: HapticKind) {
        self.haptics.lock().unwrap().push(kind);
    }
}

struct Harness {
    handle: SessionHandle,
    rx: watch::Receiver<SessionSnapshot>,
    feedback: Arc<RecordingFeedback>,
    store: Arc<MemoryStatsStore>,
}

impl Harness {
    fn spawn() -> Self {
        let feedback = Arc::new(RecordingFeedback::default());
        let store = Arc::new(MemoryStatsStore::new());
        let (handle, _task) = spawn_session(
            EngineConfig::default().with_seed(42),
            feedback.clone(),
            store.clone(),
        );
        let rx = handle.subscribe();
        Self {
            handle,
            rx,
            feedback,
            store,
        }
    }

    async fn wait_for(&mut self, pred: impl FnMut(&SessionSnapshot) -> bool) -> SessionSnapshot {
        tokio::time::timeout(Duration::from_secs(600), self.rx.wait_for(pred))
            .await
            .expect("session never reached the expected state")
            .unwrap()
            .clone()
    }

    async fn playing(&mut self) -> SessionSnapshot {
        self.wait_for(|s| s.phase == Phase::Playing).await
    }
}

fn card(snap: &SessionSnapshot, id: CardId) -> Card {
    *snap.cards.iter().find(|c| c.id == id).unwrap()
}

fn pairs(snap: &SessionSnapshot) -> Vec<(CardId, CardId)> {
    let mut out = Vec::new();
    for (i, a) in snap.cards.iter().enumerate() {
        if let Some(b) = snap.cards[i + 1..].iter().find(|b| b.pair_id == a.pair_id) {
            out.push((a.id, b.id));
        }
    }
    out
}

fn mismatch(snap: &SessionSnapshot) -> (CardId, CardId) {
    let a = snap.cards[0];
    let c = snap.cards.iter().find(|c| c.pair_id != a.pair_id).unwrap();
    (a.id, c.id)
}

#[tokio::test(start_paused = true)]
async fn study_phase_blocks_input() {
    let mut h = Harness::spawn();
    let snap = h.wait_for(|s| s.game_id == 1).await;
    assert_eq!(snap.phase, Phase::Studying);
    assert!(snap.cards.iter().all(|c| c.face_up));

    h.handle.select_card(snap.cards[0].id).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let snap = h.handle.snapshot();
    assert_eq!(snap.phase, Phase::Studying);
    assert_eq!(snap.flips, 0);
    assert!(!snap.timer_started);
}

#[tokio::test(start_paused = true)]
async fn matching_pair_scores_and_stays_face_up() {
    let mut h = Harness::spawn();
    let snap = h.playing().await;
    let (a, b) = pairs(&snap)[0];

    h.handle.select_card(a).unwrap();
    h.handle.select_card(b).unwrap();

    let snap = h.wait_for(|s| s.score == 10).await;
    assert_eq!(snap.flips, 2);
    for id in [a, b] {
        let c = card(&snap, id);
        assert!(c.matched);
        assert!(c.face_up);
    }
    assert!(!snap.is_game_over);
    assert_eq!(
        h.feedback.sounds(),
        vec![SoundEffect::CardFlip, SoundEffect::Match]
    );
    assert_eq!(
        h.feedback.haptics(),
        vec![HapticKind::Light, HapticKind::Success]
    );
}

#[tokio::test(start_paused = true)]
async fn mismatch_flips_back_after_delays() {
    let mut h = Harness::spawn();
    let snap = h.playing().await;
    let (a, c) = mismatch(&snap);

    let started = Instant::now();
    h.handle.select_card(a).unwrap();
    h.handle.select_card(c).unwrap();

    let snap = h
        .wait_for(|s| s.flips == 2 && card(s, a).face_up && card(s, c).face_up)
        .await;
    assert_eq!(snap.score, 0);

    let snap = h
        .wait_for(|s| !card(s, a).face_up && !card(s, c).face_up)
        .await;
    // settle + reveal + flip-back
    assert!(started.elapsed() >= Duration::from_millis(2200));
    assert_eq!(snap.score, 0);
    assert_eq!(snap.flips, 2);
    assert!(!card(&snap, a).matched);
    assert!(h.feedback.sounds().contains(&SoundEffect::NoMatch));
    assert!(h.feedback.haptics().contains(&HapticKind::Error));
}

#[tokio::test(start_paused = true)]
async fn third_card_is_rejected_while_turn_resolves() {
    let mut h = Harness::spawn();
    let snap = h.playing().await;
    let (a, c) = mismatch(&snap);
    let d = snap
        .cards
        .iter()
        .find(|x| x.id != a && x.id != c)
        .unwrap()
        .id;

    h.handle.select_card(a).unwrap();
    h.handle.select_card(c).unwrap();
    h.handle.select_card(d).unwrap();

    let snap = h.wait_for(|s| s.flips >= 2).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let snap_later = h.handle.snapshot();

    for s in [&snap, &snap_later] {
        assert_eq!(s.flips, 2);
        assert!(!card(s, d).face_up);
    }
}

#[tokio::test(start_paused = true)]
async fn clearing_the_board_wins_with_time_bonus() {
    let mut h = Harness::spawn();
    let snap = h.playing().await;

    for (i, (a, b)) in pairs(&snap).into_iter().enumerate() {
        h.handle.select_card(a).unwrap();
        h.handle.select_card(b).unwrap();
        let target = 10 * (i as u32 + 1);
        h.wait_for(|s| s.score >= target || s.is_game_over).await;
    }

    let snap = h.wait_for(|s| s.is_game_over).await;
    assert!(snap.game_won);
    assert_eq!(snap.phase, Phase::Over);
    assert_eq!(snap.flips, 20);
    assert_eq!(snap.matched_pairs(), 10);
    // 10 turns of 1.4s each: under 20s elapsed, so x3.
    assert_eq!(snap.score, 300);
    assert!(!snap.timer_running);

    let sounds = h.feedback.sounds();
    assert_eq!(sounds.last(), Some(&SoundEffect::Win));
    assert_eq!(sounds.iter().filter(|s| **s == SoundEffect::Match).count(), 10);

    while h.store.save_count() == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let saved = h.store.load().await.unwrap();
    assert_eq!(saved.score, 300);
    assert_eq!(saved.flips, 20);
    assert_eq!(saved.time_elapsed, snap.time_elapsed());
    assert!(saved.is_complete);
}

#[tokio::test(start_paused = true)]
async fn clock_running_out_loses() {
    let mut h = Harness::spawn();
    let snap = h.playing().await;
    let (a, _) = pairs(&snap)[0];

    h.handle.select_card(a).unwrap();
    let snap = h.wait_for(|s| s.is_game_over).await;

    assert!(!snap.game_won);
    assert_eq!(snap.time_remaining, 0);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.flips, 1);
    assert_eq!(h.feedback.sounds().last(), Some(&SoundEffect::Lose));

    // Frozen after game over.
    let (b, c) = pairs(&snap)[1];
    h.handle.select_card(b).unwrap();
    h.handle.select_card(c).unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(h.handle.snapshot().flips, 1);

    while h.store.save_count() == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(
        h.store.load().await,
        Some(GameStats {
            score: 0,
            flips: 1,
            time_elapsed: 90,
            is_complete: true,
        })
    );
}

#[tokio::test(start_paused = true)]
async fn new_game_mid_turn_starts_clean() {
    let mut h = Harness::spawn();
    let snap = h.playing().await;
    let (a, c) = mismatch(&snap);

    h.handle.select_card(a).unwrap();
    h.handle.select_card(c).unwrap();
    h.wait_for(|s| s.flips == 2).await;

    h.handle.new_game().unwrap();
    let fresh = h.wait_for(|s| s.game_id == 2).await;
    assert_eq!(fresh.flips, 0);
    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.time_remaining, 90);
    assert!(!fresh.timer_started);
    assert_ne!(fresh.cards[0].id, snap.cards[0].id);

    // Callbacks from the abandoned turn never touch the new deck.
    let snap = h.playing().await;
    assert!(snap.cards.iter().all(|c| !c.face_up && !c.matched));

    let first = snap.cards[0].id;
    h.handle.select_card(first).unwrap();
    let snap = h.wait_for(|s| s.flips == 1).await;
    assert!(card(&snap, first).face_up);
}

#[tokio::test(start_paused = true)]
async fn pause_holds_the_clock() {
    let mut h = Harness::spawn();
    let snap = h.playing().await;

    h.handle.select_card(snap.cards[0].id).unwrap();
    h.wait_for(|s| s.timer_running).await;
    tokio::time::sleep(Duration::from_millis(2500)).await;

    h.handle.pause_timer().unwrap();
    let paused = h.wait_for(|s| s.paused()).await;
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(h.handle.snapshot().time_remaining, paused.time_remaining);

    // Half a second of the interrupted period remains.
    h.handle.resume_timer().unwrap();
    h.wait_for(|s| s.timer_running).await;
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(
        h.handle.snapshot().time_remaining,
        paused.time_remaining - 1
    );
}

#[tokio::test(start_paused = true)]
async fn rapid_pause_resume_keeps_counting_down() {
    let mut h = Harness::spawn();
    let snap = h.playing().await;

    h.handle.select_card(snap.cards[0].id).unwrap();
    h.wait_for(|s| s.timer_running).await;

    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(930)).await;
        h.handle.pause_timer().unwrap();
        h.wait_for(|s| s.paused()).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        h.handle.resume_timer().unwrap();
        h.wait_for(|s| s.timer_running).await;
    }

    // 18.6s of unpaused play
    assert_eq!(h.handle.snapshot().time_remaining, 90 - 18);
}

#[tokio::test]
async fn zero_delays_resolve_without_virtual_time() {
    let (handle, task) = spawn_session(
        EngineConfig::default().with_seed(3).without_delays(),
        Arc::new(concentration::engine::SilentFeedback),
        Arc::new(MemoryStatsStore::new()),
    );
    let mut rx = handle.subscribe();
    let snap = rx.wait_for(|s| s.phase == Phase::Playing).await.unwrap().clone();
    let (a, c) = mismatch(&snap);
    let (p, q) = pairs(&snap)
        .into_iter()
        .find(|(p, q)| ![a, c].contains(p) && ![a, c].contains(q))
        .unwrap();

    handle.select_card(a).unwrap();
    handle.select_card(c).unwrap();
    let snap = rx
        .wait_for(|s| s.flips == 2 && !card(s, a).face_up && !card(s, c).face_up)
        .await
        .unwrap()
        .clone();
    assert_eq!(snap.score, 0);

    handle.select_card(p).unwrap();
    handle.select_card(q).unwrap();
    let snap = rx.wait_for(|s| s.score == 10).await.unwrap().clone();
    assert_eq!(snap.flips, 4);

    handle.shutdown().unwrap();
    task.await.unwrap();
}
