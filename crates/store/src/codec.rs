//! Wire format for persisted stats: gzip-compressed JSON.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::core::GameStats;
use crate::error::StoreError;

pub fn encode(stats: &GameStats) -> Result<Vec<u8>, StoreError> {
    let json = serde_json::to_vec(stats)?;
    let mut encoder = GzEncoder::new(Vec::with_capacity(json.len()), Compression::default());
    encoder.write_all(&json)?;
    Ok(encoder.finish()?)
}

pub fn decode(bytes: &[u8]) -> Result<GameStats, StoreError> {
    let mut json = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut json)?;
    Ok(serde_json::from_slice(&json)?)
}
