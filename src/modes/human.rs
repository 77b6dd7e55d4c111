use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::time::interval;
use tracing::info;

use crate::driver::{DriverTick, GameController, TokioScheduler};
use crate::game::{Command, GameConfig, GameEngine, Lifecycle, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persistence::{HighScore, HighScoreStore, JsonFileStore, MemoryStore};
use crate::render::Renderer;

pub struct HumanMode {
    config: GameConfig,
    controller: GameController<TokioScheduler>,
    ticks: UnboundedReceiver<DriverTick>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    /// Build the host; must be called inside a tokio runtime
    pub fn new(config: GameConfig) -> Self {
        let store: Box<dyn HighScoreStore> = match &config.high_score_path {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        let high_score = HighScore::load(store);

        let (tick_tx, ticks) = unbounded_channel();
        let controller = GameController::new(
            GameEngine::new(),
            config.difficulty,
            high_score,
            TokioScheduler::new(),
            tick_tx,
        );

        Self {
            config,
            controller,
            ticks,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            difficulty = %self.config.difficulty,
            high_score = self.controller.high_score(),
            "session host started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;
        self.controller.shutdown();

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut render_timer = interval(self.config.frame_interval());

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Tick from the scheduled driver
                Some(tick) = self.ticks.recv() => {
                    let outcome = self.controller.on_tick(tick);
                    if matches!(outcome, TickOutcome::GameOver { .. }) {
                        self.metrics.on_game_over();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.controller.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            self.metrics.track(self.controller.state().lifecycle());

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Game(command) => self.apply(command),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn apply(&mut self, command: Command) {
        let lifecycle = self.controller.state().lifecycle();

        // Steering only means something once a game is under way
        if matches!(command, Command::Move(_))
            && !matches!(lifecycle, Lifecycle::Playing | Lifecycle::Paused)
        {
            return;
        }

        self.controller.apply(command);

        if command == Command::Reset {
            self.metrics.on_reset();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
