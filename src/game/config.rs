use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::action::Direction;

/// Width and height of the square play field
pub const GRID_SIZE: i32 = 30;

/// Points for one food item before the difficulty multiplier
pub const BASE_FOOD_SCORE: u32 = 10;

/// Canonical starting snake, head first
pub const INITIAL_SNAKE: [(i32, i32); 3] = [(10, 10), (9, 10), (8, 10)];

pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Difficulty level, bound to a tick interval and a score multiplier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Period between two simulation ticks
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(200),
            Self::Medium => Duration::from_millis(150),
            Self::Hard => Duration::from_millis(100),
        }
    }

    pub fn score_multiplier(&self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    /// Points awarded for one food item at this level
    pub fn food_score(&self) -> u32 {
        BASE_FOOD_SCORE * self.score_multiplier()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime options of the terminal host
///
/// Grid size, tick intervals and multipliers are fixed; only the host's
/// surroundings are configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Difficulty of the first session
    pub difficulty: Difficulty,
    /// Where the high score is kept; `None` keeps it in memory only
    pub high_score_path: Option<PathBuf>,
    /// Render period in milliseconds
    pub frame_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            high_score_path: Some(PathBuf::from("snake_high_score.json")),
            frame_interval_ms: 33,
        }
    }
}

impl GameConfig {
    pub fn new(difficulty: Difficulty, high_score_path: Option<PathBuf>) -> Self {
        Self {
            difficulty,
            high_score_path,
            ..Default::default()
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
