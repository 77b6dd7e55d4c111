//! Grid Snake - a single-player snake on a fixed 30x30 grid
//!
//! This library provides:
//! - Core simulation (game module): session state, tick engine, direction rules
//! - Tick driver (driver module): cancellable scheduler and the session controller
//! - High score persistence (persistence module)
//! - Terminal front end (input, render, metrics and modes modules)

pub mod driver;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
