//! Store module - persistence gateway for end-of-game stats
//!
//! Only a compact summary of the last finished game is persisted
//! ([`GameStats`](crate::core::GameStats)): score, flips, elapsed seconds and
//! whether the game completed. Nothing about the live board is ever saved.
//!
//! # Encoding
//!
//! Stats are serialized as JSON and gzip-compressed before being written to a
//! single fixed file. See [`codec`].
//!
//! # Failure Policy
//!
//! Persistence is best-effort:
//!
//! - `save` and `clear` report a [`StoreError`]; callers log it and move on
//! - `load` never fails: a missing, unreadable or corrupt file reads as `None`
//!
//! # Environment Variables
//!
//! - `CONCENTRATION_STATS_PATH`: override the stats file location
//!   (default: `<data dir>/concentration/concentration_game.dat`)
//! - `CONCENTRATION_STATS_DISABLED`: set to "1" or "true" to keep stats in memory only

pub mod codec;
pub mod error;
pub mod file;
pub mod memory;

pub use concentration_core as core;

pub use error::StoreError;
pub use file::FileStatsStore;
pub use memory::MemoryStatsStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::GameStats;

/// Persistence gateway for summary stats.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Overwrite the stored snapshot.
    async fn save(&self, stats: &GameStats) -> Result<(), StoreError>;

    /// Last stored snapshot, or `None` if absent or unreadable.
    async fn load(&self) -> Option<GameStats>;

    /// Forget the stored snapshot.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Check if on-disk stats are disabled via environment
pub fn is_disabled() -> bool {
    std::env::var("CONCENTRATION_STATS_DISABLED")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Build the store selected by the environment.
pub fn store_from_env() -> Arc<dyn StatsStore> {
    if is_disabled() {
        tracing::info!("stats persistence disabled, keeping stats in memory");
        return Arc::new(MemoryStatsStore::new());
    }
    Arc::new(FileStatsStore::from_env())
}
