//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and tracks the
//! keyboard cursor on the card grid. Nothing here knows about the session; the
//! front-end decides what each action does.

pub mod cursor;
pub mod map;

pub use concentration_types as types;

pub use cursor::GridCursor;
pub use map::{handle_key_event, should_quit};
