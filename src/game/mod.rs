//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A session (`GameState`) is an owned value; `GameEngine` advances it one tick at a time.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{Difficulty, GRID_SIZE, GameConfig};
pub use engine::{GameEngine, TickOutcome};
pub use state::{CollisionType, GameSnapshot, GameState, Lifecycle, Position, Snake};
