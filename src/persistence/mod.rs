//! High score persistence
//!
//! The only state that outlives a process run. The simulation core calls
//! into it at game over; everything else about a session is discarded.

pub mod error;
pub mod high_score;
pub mod store;

pub use error::{Result, StoreError};
pub use high_score::HighScore;
pub use store::{HighScoreStore, JsonFileStore, MemoryStore};
