use super::action::Direction;
use super::config::{Difficulty, GRID_SIZE, INITIAL_DIRECTION, INITIAL_SNAKE};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn is_on_grid(&self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Committed direction, the reference for the reversal rule
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Create a snake from explicit cells, head first
    pub fn from_cells<I, P>(cells: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        Self {
            body: cells.into_iter().map(Into::into).collect(),
            direction,
        }
    }

    /// The canonical three-cell snake every session starts with
    pub fn initial() -> Self {
        Self::from_cells(INITIAL_SNAKE, INITIAL_DIRECTION)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if position collides with any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance onto `new_head`, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Where a session is in its lifecycle, derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Ready,
    Playing,
    Paused,
    GameOver,
}

impl Lifecycle {
    pub fn from_flags(playing: bool, paused: bool, over: bool) -> Self {
        if over {
            Self::GameOver
        } else if !playing {
            Self::Ready
        } else if paused {
            Self::Paused
        } else {
            Self::Playing
        }
    }
}

/// One game session: the single authoritative state the engine mutates
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Latest accepted direction request, consumed by the next tick
    pub pending_direction: Option<Direction>,
    pub score: u32,
    pub difficulty: Difficulty,
    pub playing: bool,
    pub paused: bool,
    pub over: bool,
}

impl GameState {
    /// Create a session in the Ready state
    pub fn new(snake: Snake, food: Position, difficulty: Difficulty) -> Self {
        Self {
            snake,
            food,
            pending_direction: None,
            score: 0,
            difficulty,
            playing: false,
            paused: false,
            over: false,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_flags(self.playing, self.paused, self.over)
    }

    /// True while ticks should advance the snake
    pub fn is_running(&self) -> bool {
        self.playing && !self.paused && !self.over
    }

    /// Begin play; a finished session has to be reset first
    pub fn start(&mut self) {
        if self.playing || self.over {
            return;
        }
        self.playing = true;
        self.paused = false;
        self.over = false;
    }

    /// Toggle the pause flag while a game is in progress
    pub fn toggle_pause(&mut self) {
        if self.playing && !self.over {
            self.paused = !self.paused;
        }
    }

    /// Switch difficulty; this always stops active play
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.playing = false;
        self.paused = false;
    }

    /// Buffer a direction for the next tick, last request wins
    ///
    /// A request reversing the committed direction is dropped and leaves any
    /// earlier pending request in place. Returns whether it was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.snake.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Direction the next tick will move in
    pub fn next_direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.snake.direction)
    }

    /// Owned copy for renderers, built between ticks
    pub fn snapshot(&self, high_score: u32) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.body.clone(),
            food: self.food,
            score: self.score,
            high_score,
            difficulty: self.difficulty,
            playing: self.playing,
            paused: self.paused,
            over: self.over,
        }
    }
}

/// Read-only view of a session handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub high_score: u32,
    pub difficulty: Difficulty,
    pub playing: bool,
    pub paused: bool,
    pub over: bool,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_flags(self.playing, self.paused, self.over)
    }
}
