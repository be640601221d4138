//! Game engine - turn pacing, session state, and the countdown clock
//!
//! The engine turns player input into game state over time. It builds on the
//! pure model in `concentration-core` and adds everything that depends on a
//! clock:
//!
//! - [`coordinator`]: admits card selections and paces each two-card turn
//! - [`session`]: owns the deck and stats, applies turn results, ends games
//! - [`timer`]: one-second ticker that can be paused and resumed
//! - [`runtime`]: runs a session on its own task behind a cloneable handle
//! - [`feedback`]: sound and haptic cues raised by the session
//! - [`config`]: delays and seed, overridable from the environment
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use concentration_engine::{spawn_session, EngineConfig, LogFeedback};
//! use concentration_engine::store::MemoryStatsStore;
//!
//! # async fn demo() {
//! let (handle, task) = spawn_session(
//!     EngineConfig::from_env(),
//!     Arc::new(LogFeedback),
//!     Arc::new(MemoryStatsStore::new()),
//! );
//!
//! let mut snapshots = handle.subscribe();
//! let snap = snapshots.wait_for(|s| s.playable()).await.unwrap().clone();
//! handle.select_card(snap.cards[0].id).unwrap();
//!
//! handle.shutdown().unwrap();
//! task.await.unwrap();
//! # }
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod feedback;
pub mod runtime;
pub mod session;
pub mod timer;

pub use concentration_core as core;
pub use concentration_store as store;
pub use concentration_types as types;

pub use config::EngineConfig;
pub use coordinator::{Selection, TurnCoordinator, TurnResult};
pub use error::EngineError;
pub use feedback::{Feedback, LogFeedback, SilentFeedback};
pub use runtime::{spawn_session, SessionCommand, SessionHandle};
pub use session::{GameSession, SessionEvent, SessionStats};
pub use timer::TimerLoop;
