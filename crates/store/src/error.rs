use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stats file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stats encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
