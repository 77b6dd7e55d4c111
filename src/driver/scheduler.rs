//! Cancellable periodic task
//!
//! The tick driver is modelled as a small interface: schedule a callback at a
//! fixed period, cancel it, schedule again with a different period. Swapping
//! the interval is always cancel-then-schedule.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Callback fired once per period
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// A periodic driver that can be stopped and restarted
pub trait Scheduler {
    /// Start firing `callback` every `period`, first after one full period.
    /// Any previously scheduled callback is cancelled first.
    fn schedule(&mut self, period: Duration, callback: TickCallback);

    /// Stop firing; a no-op when nothing is scheduled
    fn cancel(&mut self);

    fn is_scheduled(&self) -> bool;
}

/// Scheduler backed by a spawned tokio task
///
/// Must be used from within a tokio runtime. Dropping it cancels the task.
#[derive(Debug, Default)]
pub struct TokioScheduler {
    task: Option<JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, period: Duration, mut callback: TickCallback) {
        self.cancel();

        let task = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            // Late ticks push the schedule back instead of bursting
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                callback();
            }
        });
        self.task = Some(task);
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_scheduled(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
