//! Session runtime.
//!
//! Runs a [`GameSession`] on its own task and bridges callers to it through
//! channels. Any number of [`SessionHandle`] clones may send commands; every
//! mutation is published as a [`SessionSnapshot`] on a watch channel.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::core::{CardId, SessionSnapshot};
use crate::error::EngineError;
use crate::feedback::Feedback;
use crate::session::GameSession;
use crate::store::StatsStore;

/// Command delivered to the session task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    SelectCard(CardId),
    NewGame,
    PauseTimer,
    ResumeTimer,
    Shutdown,
}

/// Cloneable front door to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    fn send(&self, command: SessionCommand) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .map_err(|_| EngineError::SessionClosed)
    }

    pub fn select_card(&self, card_id: CardId) -> Result<(), EngineError> {
        self.send(SessionCommand::SelectCard(card_id))
    }

    pub fn new_game(&self) -> Result<(), EngineError> {
        self.send(SessionCommand::NewGame)
    }

    pub fn pause_timer(&self) -> Result<(), EngineError> {
        self.send(SessionCommand::PauseTimer)
    }

    pub fn resume_timer(&self) -> Result<(), EngineError> {
        self.send(SessionCommand::ResumeTimer)
    }

    /// Ask the session task to stop. Await its `JoinHandle` to wait for it.
    pub fn shutdown(&self) -> Result<(), EngineError> {
        self.send(SessionCommand::Shutdown)
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }
}

/// Deal the first game and run the session until shutdown.
///
/// Must be called from within a tokio runtime.
pub fn spawn_session(
    config: EngineConfig,
    feedback: Arc<dyn Feedback>,
    store: Arc<dyn StatsStore>,
) -> (SessionHandle, JoinHandle<()>) {
    let (mut session, mut events) = GameSession::new(config, feedback, store);
    let (commands, mut command_rx) = mpsc::unbounded_channel();
    let snapshots = session.subscribe();

    let task = tokio::spawn(async move {
        session.setup_new_game();

        loop {
            tokio::select! {
                command = command_rx.recv() => match command {
                    Some(SessionCommand::SelectCard(card_id)) => session.select_card(card_id),
                    Some(SessionCommand::NewGame) => session.setup_new_game(),
                    Some(SessionCommand::PauseTimer) => session.pause_timer(),
                    Some(SessionCommand::ResumeTimer) => session.resume_timer(),
                    Some(SessionCommand::Shutdown) => break,
                    None => {
                        debug!("all session handles dropped");
                        break;
                    }
                },
                Some(event) = events.recv() => session.handle_event(event),
            }
        }

        session.shutdown();
        info!(game_id = session.game_id(), "session stopped");
    });

    (
        SessionHandle {
            commands,
            snapshots,
        },
        task,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;
    use crate::feedback::SilentFeedback;
    use crate::store::MemoryStatsStore;
    use std::time::Duration;

    fn spawn() -> (SessionHandle, JoinHandle<()>) {
        spawn_session(
            EngineConfig::default().with_seed(7),
            Arc::new(SilentFeedback),
            Arc::new(MemoryStatsStore::new()),
        )
    }

    async fn wait_for<F>(rx: &mut watch::Receiver<SessionSnapshot>, pred: F) -> SessionSnapshot
    where
        F: FnMut(&SessionSnapshot) -> bool,
    {
        rx.wait_for(pred).await.unwrap().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn first_game_is_dealt_on_spawn() {
        let (handle, _task) = spawn();
        let mut rx = handle.subscribe();

        let snap = wait_for(&mut rx, |s| s.game_id == 1).await;
        assert_eq!(snap.phase, Phase::Studying);
        assert_eq!(snap.cards.len(), 20);

        let snap = wait_for(&mut rx, |s| s.phase == Phase::Playing).await;
        assert!(snap.cards.iter().all(|c| !c.face_up));
    }

    #[tokio::test(start_paused = true)]
    async fn commands_flow_through_handle() {
        let (handle, _task) = spawn();
        let mut rx = handle.subscribe();
        let snap = wait_for(&mut rx, |s| s.phase == Phase::Playing).await;

        handle.select_card(snap.cards[0].id).unwrap();
        let snap = wait_for(&mut rx, |s| s.flips == 1).await;
        assert!(snap.timer_running);

        handle.pause_timer().unwrap();
        let snap = wait_for(&mut rx, |s| s.paused()).await;
        assert_eq!(snap.time_remaining, 90);

        handle.resume_timer().unwrap();
        wait_for(&mut rx, |s| s.timer_running).await;

        handle.new_game().unwrap();
        let snap = wait_for(&mut rx, |s| s.game_id == 2).await;
        assert_eq!(snap.flips, 0);
        assert!(!snap.timer_started);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_closes_handle() {
        let (handle, task) = spawn();
        handle.shutdown().unwrap();
        task.await.unwrap();

        assert_eq!(handle.new_game(), Err(EngineError::SessionClosed));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_all_handles_stops_session() {
        let (handle, task) = spawn();
        drop(handle);
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
    }
}
