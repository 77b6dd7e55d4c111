//! Backends that keep the single high score value
//!
//! The game only ever needs one integer to survive between runs. The file
//! store writes it as a small JSON document; the memory store backs
//! `--no-persist` and tests.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::error::Result;

/// Storage for the best score ever reached
pub trait HighScoreStore: Send {
    /// Read the stored value; a store that has never been written reads as 0
    fn read(&self) -> Result<u32>;

    /// Replace the stored value
    fn write(&mut self, score: u32) -> Result<()>;
}

/// On-disk layout of the high score file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// High score kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn read(&self) -> Result<u32> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(record.high_score)
    }

    fn write(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// High score held in memory only
///
/// Clones share the same slot, so a test can keep one handle and give the
/// other to the game.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Arc<AtomicU32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(score: u32) -> Self {
        Self {
            value: Arc::new(AtomicU32::new(score)),
        }
    }

    pub fn get(&self) -> u32 {
        self.value.load(Ordering::SeqCst)
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self) -> Result<u32> {
        Ok(self.get())
    }

    fn write(&mut self, score: u32) -> Result<()> {
        self.value.store(score, Ordering::SeqCst);
        Ok(())
    }
}
