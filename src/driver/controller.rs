use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use super::scheduler::Scheduler;
use crate::game::{
    Command, Difficulty, GameEngine, GameSnapshot, GameState, Lifecycle, TickOutcome,
};
use crate::persistence::HighScore;

/// Tick request emitted by a scheduled driver
///
/// Tagged with the generation of the driver that produced it, so ticks still
/// queued when a driver is cancelled are recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverTick {
    generation: u64,
}

/// Owns the live session and keeps the tick driver in step with it
///
/// Every command and every tick is followed by a check of the (running,
/// interval) pair; when it changes the driver is cancelled and, if the
/// session is running, scheduled again at the new interval.
pub struct GameController<S: Scheduler> {
    engine: GameEngine,
    state: GameState,
    high_score: HighScore,
    scheduler: S,
    ticks: UnboundedSender<DriverTick>,
    generation: u64,
    active_interval: Option<Duration>,
}

impl<S: Scheduler> GameController<S> {
    pub fn new(
        mut engine: GameEngine,
        difficulty: Difficulty,
        high_score: HighScore,
        scheduler: S,
        ticks: UnboundedSender<DriverTick>,
    ) -> Self {
        let state = engine.new_session(difficulty);

        Self {
            engine,
            state,
            high_score,
            scheduler,
            ticks,
            generation: 0,
            active_interval: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.get()
    }

    /// Consistent copy of the session for one frame
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot(self.high_score.get())
    }

    /// Interval of the running driver, if any
    pub fn driver_interval(&self) -> Option<Duration> {
        self.active_interval
    }

    /// Apply one input command
    pub fn apply(&mut self, command: Command) {
        let before = self.state.lifecycle();

        match command {
            Command::Move(direction) => {
                if !self.state.request_direction(direction) {
                    debug!(?direction, "ignored reversing direction request");
                }
            }
            Command::TogglePause => self.state.toggle_pause(),
            Command::Start => self.state.start(),
            Command::Reset => self.state = self.engine.reset(&self.state),
            Command::SetDifficulty(difficulty) => {
                debug!(%difficulty, "difficulty changed");
                self.state.set_difficulty(difficulty);
            }
        }

        let after = self.state.lifecycle();
        if before == Lifecycle::Ready && after == Lifecycle::Playing {
            info!(difficulty = %self.state.difficulty, "game started");
        }

        self.sync_driver();
    }

    /// Run the simulation for a tick delivered by the driver
    pub fn on_tick(&mut self, tick: DriverTick) -> TickOutcome {
        if tick.generation != self.generation || self.active_interval.is_none() {
            return TickOutcome::Idle;
        }

        let outcome = self.engine.tick(&mut self.state, &mut self.high_score);
        self.sync_driver();
        outcome
    }

    /// Stop the driver for good
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.generation += 1;
        self.active_interval = None;
    }

    fn sync_driver(&mut self) {
        let wanted = self
            .state
            .is_running()
            .then(|| self.state.difficulty.tick_interval());
        if wanted == self.active_interval {
            return;
        }

        self.scheduler.cancel();
        self.generation += 1;

        if let Some(period) = wanted {
            let ticks = self.ticks.clone();
            let tick = DriverTick {
                generation: self.generation,
            };
            self.scheduler.schedule(
                period,
                Box::new(move || {
                    // Receiver gone means the host is shutting down
                    let _ = ticks.send(tick);
                }),
            );
        }

        debug!(interval = ?wanted, generation = self.generation, "tick driver restarted");
        self.active_interval = wanted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::scheduler::TickCallback;
    use crate::game::{Direction, Position};
    use crate::persistence::MemoryStore;
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    /// Scheduler driven by hand from the test
    #[derive(Default)]
    struct ManualScheduler {
        callback: Option<TickCallback>,
        schedules: Vec<Duration>,
        cancels: usize,
    }

    impl ManualScheduler {
        fn fire(&mut self) {
            if let Some(callback) = self.callback.as_mut() {
                callback();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&mut self, period: Duration, callback: TickCallback) {
            self.callback = Some(callback);
            self.schedules.push(period);
        }

        fn cancel(&mut self) {
            self.callback = None;
            self.cancels += 1;
        }

        fn is_scheduled(&self) -> bool {
            self.callback.is_some()
        }
    }

    fn setup(
        difficulty: Difficulty,
    ) -> (
        GameController<ManualScheduler>,
        UnboundedReceiver<DriverTick>,
        MemoryStore,
    ) {
        let (tx, rx) = unbounded_channel();
        let store = MemoryStore::new();
        let high_score = HighScore::load(Box::new(store.clone()));
        let controller = GameController::new(
            GameEngine::with_seed(11),
            difficulty,
            high_score,
            ManualScheduler::default(),
            tx,
        );
        (controller, rx, store)
    }

    /// Fire the driver once and feed the resulting tick back
    fn step(
        controller: &mut GameController<ManualScheduler>,
        rx: &mut UnboundedReceiver<DriverTick>,
    ) -> TickOutcome {
        controller.scheduler.fire();
        match rx.try_recv() {
            Ok(tick) => controller.on_tick(tick),
            Err(_) => TickOutcome::Idle,
        }
    }

    #[test]
    fn test_start_schedules_driver_at_difficulty_interval() {
        let (mut controller, _rx, _) = setup(Difficulty::Hard);
        assert_eq!(controller.driver_interval(), None);

        controller.apply(Command::Start);
        assert_eq!(
            controller.driver_interval(),
            Some(Duration::from_millis(100))
        );
        assert_eq!(controller.scheduler.schedules, vec![Duration::from_millis(100)]);
    }

    #[test]
    fn test_pause_cancels_and_resume_reschedules() {
        let (mut controller, _rx, _) = setup(Difficulty::Medium);
        controller.apply(Command::Start);

        controller.apply(Command::TogglePause);
        assert_eq!(controller.driver_interval(), None);
        assert!(!controller.scheduler.is_scheduled());
        let cancels = controller.scheduler.cancels;

        controller.apply(Command::TogglePause);
        assert!(controller.scheduler.is_scheduled());
        assert_eq!(controller.scheduler.schedules.len(), 2);

        // Commands that leave the driver key unchanged do not restart it
        controller.apply(Command::Move(Direction::Up));
        controller.apply(Command::Start);
        assert_eq!(controller.scheduler.cancels, cancels + 1);
        assert_eq!(controller.scheduler.schedules.len(), 2);
    }

    #[test]
    fn test_stale_tick_is_dropped() {
        let (mut controller, mut rx, _) = setup(Difficulty::Medium);
        controller.apply(Command::Start);

        // Tick queued by the old driver, then the session is paused and resumed
        controller.scheduler.fire();
        let stale = rx.try_recv().unwrap();
        controller.apply(Command::TogglePause);
        controller.apply(Command::TogglePause);

        let head = controller.state().snake.head();
        assert_eq!(controller.on_tick(stale), TickOutcome::Idle);
        assert_eq!(controller.state().snake.head(), head);

        assert!(matches!(
            step(&mut controller, &mut rx),
            TickOutcome::Moved | TickOutcome::Ate { .. }
        ));
    }

    #[test]
    fn test_difficulty_change_stops_play() {
        let (mut controller, mut rx, _) = setup(Difficulty::Easy);
        controller.apply(Command::Start);
        step(&mut controller, &mut rx);

        controller.apply(Command::SetDifficulty(Difficulty::Hard));
        assert_eq!(controller.state().lifecycle(), Lifecycle::Ready);
        assert_eq!(controller.driver_interval(), None);

        controller.apply(Command::Start);
        assert_eq!(
            controller.driver_interval(),
            Some(Duration::from_millis(100))
        );
    }

    #[test]
    fn test_direction_applies_on_next_tick() {
        let (mut controller, mut rx, _) = setup(Difficulty::Medium);
        controller.apply(Command::Start);

        controller.apply(Command::Move(Direction::Left));
        controller.apply(Command::Move(Direction::Up));
        assert_eq!(controller.state().snake.head(), Position::new(10, 10));

        step(&mut controller, &mut rx);
        assert_eq!(controller.state().snake.head(), Position::new(10, 9));
    }

    #[test]
    fn test_game_over_stops_driver_and_records_score() {
        let (mut controller, mut rx, store) = setup(Difficulty::Hard);
        controller.apply(Command::Start);
        controller.apply(Command::Move(Direction::Up));

        let mut outcome = TickOutcome::Idle;
        for _ in 0..11 {
            outcome = step(&mut controller, &mut rx);
        }

        assert!(matches!(outcome, TickOutcome::GameOver { .. }));
        assert_eq!(controller.driver_interval(), None);
        assert!(!controller.scheduler.is_scheduled());
        assert_eq!(controller.high_score(), controller.state().score);
        assert_eq!(store.get(), controller.state().score);

        // No further ticks while over
        assert_eq!(step(&mut controller, &mut rx), TickOutcome::Idle);
    }

    #[test]
    fn test_reset_after_game_over() {
        let (mut controller, mut rx, _) = setup(Difficulty::Hard);
        controller.apply(Command::Start);
        controller.apply(Command::Move(Direction::Up));
        for _ in 0..11 {
            step(&mut controller, &mut rx);
        }
        assert_eq!(controller.state().lifecycle(), Lifecycle::GameOver);

        controller.apply(Command::Start);
        assert_eq!(controller.state().lifecycle(), Lifecycle::GameOver);

        controller.apply(Command::Reset);
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.lifecycle(), Lifecycle::Ready);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.difficulty, Difficulty::Hard);
        assert_eq!(snapshot.snake.len(), 3);
    }

    #[test]
    fn test_shutdown_cancels_driver() {
        let (mut controller, mut rx, _) = setup(Difficulty::Medium);
        controller.apply(Command::Start);
        controller.scheduler.fire();
        let queued = rx.try_recv().unwrap();

        controller.shutdown();
        assert!(!controller.scheduler.is_scheduled());
        assert_eq!(controller.on_tick(queued), TickOutcome::Idle);
    }
}
