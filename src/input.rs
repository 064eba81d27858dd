use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::direction::ArrowKey;
use crate::level::level_count;

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(ArrowKey),
    /// Start from the title screen, or play again after game over.
    Confirm,
    Pause,
    SelectLevel(u32),
    Quit,
}

/// Translates a terminal key press into a game input.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(GameInput::Direction(ArrowKey::Left)),
        KeyCode::Right => Some(GameInput::Direction(ArrowKey::Right)),
        KeyCode::Up => Some(GameInput::Direction(ArrowKey::Up)),
        KeyCode::Down => Some(GameInput::Direction(ArrowKey::Down)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Confirm),
        KeyCode::Char('p' | 'P') => Some(GameInput::Pause),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Char(digit @ '1'..='9') => digit
            .to_digit(10)
            .filter(|level| *level <= level_count())
            .map(GameInput::SelectLevel),
        _ => None,
    }
}

/// Waits up to `timeout` for one key press and maps it.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key_event(key)),
        _ => Ok(None),
    }
}
