use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::codec;
use crate::core::GameStats;
use crate::{StatsStore, StoreError};

/// File name used under the platform data directory
pub const STATS_FILE_NAME: &str = "concentration_game.dat";

/// Stats persisted to a single gzip file.
#[derive(Debug, Clone)]
pub struct FileStatsStore {
    path: PathBuf,
}

impl FileStatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create from `CONCENTRATION_STATS_PATH`, falling back to the default location
    pub fn from_env() -> Self {
        let path = std::env::var("CONCENTRATION_STATS_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_path);
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `<data dir>/concentration/concentration_game.dat`, or the working directory
/// when the platform has no data directory.
pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("concentration").join(STATS_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(STATS_FILE_NAME))
}

#[async_trait]
impl StatsStore for FileStatsStore {
    async fn save(&self, stats: &GameStats) -> Result<(), StoreError> {
        let bytes = codec::encode(stats)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), score = stats.score, "saved game stats");
        Ok(())
    }

    async fn load(&self) -> Option<GameStats> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read game stats");
                return None;
            }
        };
        match codec::decode(&bytes) {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt game stats");
                None
            }
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
