use serde::{Deserialize, Serialize};

use super::config::Difficulty;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        let (dx, dy) = self.delta();
        let (ox, oy) = other.delta();
        (ox == -dx && oy == dy && dx != 0) || (oy == -dy && ox == dx && dy != 0)
    }

    /// Returns the unit vector (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Builds a direction from a unit vector, if it is one
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Discrete request delivered by an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Buffer a direction change for the next tick
    Move(Direction),
    TogglePause,
    Start,
    Reset,
    SetDifficulty(Difficulty),
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Move(direction)
    }
}
