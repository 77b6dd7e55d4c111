//! Tick driver: the periodic scheduler and the controller that owns a session
//! and keeps the scheduler in step with it.

pub mod controller;
pub mod scheduler;

pub use controller::{DriverTick, GameController};
pub use scheduler::{Scheduler, TickCallback, TokioScheduler};
