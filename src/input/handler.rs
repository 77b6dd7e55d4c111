use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Difficulty, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Game(Command::Move(Direction::Up)),
            KeyCode::Down => KeyAction::Game(Command::Move(Direction::Down)),
            KeyCode::Left => KeyAction::Game(Command::Move(Direction::Left)),
            KeyCode::Right => KeyAction::Game(Command::Move(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Game(Command::Move(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Game(Command::Move(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Game(Command::Move(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Game(Command::Move(Direction::Right))
            }

            // Session controls
            KeyCode::Enter => KeyAction::Game(Command::Start),
            KeyCode::Char(' ') => KeyAction::Game(Command::TogglePause),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Game(Command::Reset),

            // Difficulty
            KeyCode::Char('1') => KeyAction::Game(Command::SetDifficulty(Difficulty::Easy)),
            KeyCode::Char('2') => KeyAction::Game(Command::SetDifficulty(Difficulty::Medium)),
            KeyCode::Char('3') => KeyAction::Game(Command::SetDifficulty(Difficulty::Hard)),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
