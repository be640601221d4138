//! Terminal concentration runner (default binary).
//!
//! The session runs as a task on a tokio runtime; this thread owns the
//! terminal. It polls crossterm for input, forwards actions through the
//! session handle, and redraws from the latest snapshot.

use std::fs::File;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use concentration::engine::{spawn_session, EngineConfig, LogFeedback, SessionHandle};
use concentration::input::{handle_key_event, should_quit, GridCursor};
use concentration::store::{store_from_env, StatsStore};
use concentration::term::{BoardView, FrameBuffer, Hud, TerminalRenderer, Viewport};
use concentration::types::GameAction;

const FRAME: Duration = Duration::from_millis(50);
/// Delay before re-reading the store after a game ends
const RELOAD_DELAY: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    init_logging()?;

    let rt = Runtime::new().context("failed to create tokio runtime")?;
    let config = EngineConfig::from_env();
    let store = store_from_env();
    info!(?config, "starting concentration");

    let (handle, task) = {
        let _guard = rt.enter();
        spawn_session(config, Arc::new(LogFeedback), Arc::clone(&store))
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &rt, &handle, store.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();
    let _ = handle.shutdown();
    let _ = rt.block_on(task);
    result
}

/// Logs go to `CONCENTRATION_LOG_PATH` when set; stdout belongs to the UI.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("CONCENTRATION_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to open log file {}", path.to_string_lossy()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    rt: &Runtime,
    handle: &SessionHandle,
    store: &dyn StatsStore,
) -> Result<()> {
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut cursor = GridCursor::new();
    let mut hud = Hud {
        last_game: rt.block_on(store.load()),
        ..Hud::default()
    };

    // Pause requested with `p`, as opposed to a focus loss.
    let mut user_paused = false;
    let mut seen_over = false;
    let mut reload_at: Option<Instant> = None;

    loop {
        let snap = handle.snapshot();

        if snap.is_game_over && !seen_over {
            reload_at = Some(Instant::now() + RELOAD_DELAY);
        }
        seen_over = snap.is_game_over;
        if reload_at.is_some_and(|at| Instant::now() >= at) {
            reload_at = None;
            hud.last_game = rt.block_on(store.load());
        }

        hud.cursor = Some(cursor.position());
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &hud, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        if !event::poll(FRAME)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                hud.notice = None;
                debug!(action = action.as_str(), "key action");

                match action {
                    GameAction::Move(direction) => cursor.move_by(direction),
                    GameAction::Flip => {
                        if let Some(card) = snap.cards.iter().find(|c| c.position == cursor.position()) {
                            handle.select_card(card.id)?;
                        }
                    }
                    GameAction::NewGame => {
                        handle.new_game()?;
                        cursor.reset();
                        user_paused = false;
                    }
                    GameAction::TogglePause => {
                        if snap.paused() {
                            handle.resume_timer()?;
                            user_paused = false;
                        } else if snap.timer_running {
                            handle.pause_timer()?;
                            user_paused = true;
                        }
                    }
                    GameAction::ResetStats => match rt.block_on(store.clear()) {
                        Ok(()) => {
                            hud.last_game = None;
                            hud.notice = Some("Saved stats cleared.".to_string());
                        }
                        Err(e) => {
                            warn!(error = %e, "failed to clear saved stats");
                            hud.notice = Some("Could not clear saved stats.".to_string());
                        }
                    },
                }
            }
            Event::FocusLost => handle.pause_timer()?,
            Event::FocusGained if !user_paused => handle.resume_timer()?,
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
