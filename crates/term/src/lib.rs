//! Terminal front-end rendering.
//!
//! A small game-oriented rendering layer: [`view`] turns a session snapshot
//! into a [`FrameBuffer`] of styled cells (pure, unit-tested), and
//! [`renderer`] flushes frames to the terminal with crossterm.

pub mod fb;
pub mod renderer;
pub mod view;

pub use concentration_core as core;
pub use concentration_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{format_clock, BoardView, Hud, Viewport};
