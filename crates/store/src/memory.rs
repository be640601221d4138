use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::GameStats;
use crate::{StatsStore, StoreError};

/// Process-local store, used when disk persistence is disabled and in tests.
#[derive(Debug, Default)]
pub struct MemoryStatsStore {
    slot: Mutex<Option<GameStats>>,
    saves: Mutex<u32>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls so far
    pub fn save_count(&self) -> u32 {
        *self.saves.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl StatsStore for MemoryStatsStore {
    async fn save(&self, stats: &GameStats) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(*stats);
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }

    async fn load(&self) -> Option<GameStats> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).take();
        Ok(())
    }
}
