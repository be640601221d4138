//! Concentration (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests, and benches can write `concentration::{core,engine,store,...}`.

pub use concentration_core as core;
pub use concentration_engine as engine;
pub use concentration_input as input;
pub use concentration_store as store;
pub use concentration_term as term;
pub use concentration_types as types;
