use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::config::{Difficulty, GRID_SIZE};
use super::state::{CollisionType, GameState, Position, Snake};
use crate::persistence::HighScore;

/// Number of cells on the grid
const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// What a single tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session not running; nothing changed
    Idle,
    /// Snake moved one cell without eating
    Moved,
    /// Snake ate and grew; carries the points awarded
    Ate { points: u32 },
    /// Session ended
    GameOver {
        collision: CollisionType,
        new_high_score: bool,
    },
}

/// Advances sessions and owns the randomness for food placement
pub struct GameEngine {
    rng: StdRng,
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with reproducible food placement
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fresh Ready session, keeping the difficulty of `previous`
    pub fn reset(&mut self, previous: &GameState) -> GameState {
        self.new_session(previous.difficulty)
    }

    /// Fresh Ready session at the given difficulty
    pub fn new_session(&mut self, difficulty: Difficulty) -> GameState {
        let snake = Snake::initial();
        let food = self.random_free_cell(&snake);
        GameState::new(snake, food, difficulty)
    }

    /// Execute one tick of the game
    pub fn tick(&mut self, state: &mut GameState, high_score: &mut HighScore) -> TickOutcome {
        if !state.is_running() {
            return TickOutcome::Idle;
        }

        let direction = state
            .pending_direction
            .take()
            .unwrap_or(state.snake.direction);
        let new_head = state.snake.head().moved_in_direction(direction);

        if let Some(collision) = Self::check_collision(state, new_head) {
            return Self::finish(state, collision, high_score);
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);
        state.snake.direction = direction;

        if !ate_food {
            return TickOutcome::Moved;
        }

        let points = state.difficulty.food_score();
        state.score += points;
        // A full grid has nowhere left to put food; it stays under the head
        if let Some(food) = self.spawn_food(&state.snake) {
            state.food = food;
        }
        TickOutcome::Ate { points }
    }

    /// Check if the new head position causes a collision
    fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
        if !pos.is_on_grid() {
            return Some(CollisionType::Wall);
        }

        // Against the body before the tail moves away
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn finish(
        state: &mut GameState,
        collision: CollisionType,
        high_score: &mut HighScore,
    ) -> TickOutcome {
        state.over = true;
        state.playing = false;

        let new_high_score = high_score.record(state.score);
        info!(
            score = state.score,
            length = state.snake.len(),
            ?collision,
            new_high_score,
            "game over"
        );

        TickOutcome::GameOver {
            collision,
            new_high_score,
        }
    }

    /// Pick a random cell not covered by the snake, or `None` if the grid is full
    pub fn spawn_food(&mut self, snake: &Snake) -> Option<Position> {
        if snake.len() >= CELL_COUNT {
            return None;
        }
        Some(self.random_free_cell(snake))
    }

    /// Rejection sampling; the caller guarantees at least one free cell
    fn random_free_cell(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..GRID_SIZE);
            let y = self.rng.gen_range(0..GRID_SIZE);
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
