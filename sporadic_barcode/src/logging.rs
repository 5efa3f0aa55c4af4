use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::BarcodeConfig;
use crate::error::{BarcodeError, ReplayError};
use crate::hash::fnv1a32;
use crate::pattern::generate_bars;
use crate::types::Bar;

/// One recorded generation: enough to regenerate and compare.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternLog {
    pub seed_hash: u32,
    pub config: BarcodeConfig,
    pub bars: Vec<Bar>,
}

impl PatternLog {
    /// Stores the sanitized config: JSON cannot carry NaN or infinity.
    pub fn record(cfg: &BarcodeConfig) -> Self {
        let config = cfg.sanitized();
        let bars = generate_bars(&config);
        Self { seed_hash: fnv1a32(&config.seed), config, bars }
    }

    pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string(self) }
    pub fn from_json(s: &str) -> serde_json::Result<Self> { serde_json::from_str(s) }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternBook {
    pub logs: Vec<PatternLog>,
}

impl PatternBook {
    pub fn push(&mut self, log: PatternLog) { self.logs.push(log); }

    pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string_pretty(self) }
    pub fn from_json(s: &str) -> serde_json::Result<Self> { serde_json::from_str(s) }
}

pub fn replay_pattern(log: &PatternLog) -> Result<(), ReplayError> {
    let actual = fnv1a32(&log.config.seed);
    if actual != log.seed_hash {
        return Err(ReplayError::SeedHashMismatch { expected: log.seed_hash, actual });
    }
    let bars = generate_bars(&log.config);
    if let Some(index) = log.bars.iter().zip(&bars).position(|(a, b)| a != b) {
        return Err(ReplayError::BarMismatch { index });
    }
    if bars.len() != log.bars.len() {
        return Err(ReplayError::LengthMismatch { expected: log.bars.len(), actual: bars.len() });
    }
    Ok(())
}

/// Replays every log; returns how many passed or the first failure.
pub fn replay_book(book: &PatternBook) -> Result<usize, BarcodeError> {
    for log in &book.logs {
        replay_pattern(log).map_err(|source| BarcodeError::Replay { seed: log.config.seed.clone(), source })?;
    }
    tracing::info!(logs = book.logs.len(), "replayed pattern book");
    Ok(book.logs.len())
}

pub fn load_book(path: impl AsRef<Path>) -> Result<PatternBook, BarcodeError> {
    let content = fs::read_to_string(path)?;
    Ok(PatternBook::from_json(&content)?)
}

/// Missing files start an empty book.
pub fn load_or_new_book(path: impl AsRef<Path>) -> Result<PatternBook, BarcodeError> {
    let path = path.as_ref();
    if path.exists() { load_book(path) } else { Ok(PatternBook::default()) }
}

pub fn save_book(book: &PatternBook, path: impl AsRef<Path>) -> Result<(), BarcodeError> {
    fs::write(path, book.to_json()?)?;
    Ok(())
}
