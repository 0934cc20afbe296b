//! Keyboard mapping
//!
//! Key names follow `KeyboardEvent.key`.

use crate::sim::{Direction, TickInput};

/// A game command produced by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Move(Direction),
}

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        " " | "Spacebar" => Some(Command::TogglePause),
        "ArrowUp" => Some(Command::Move(Direction::Up)),
        "ArrowDown" => Some(Command::Move(Direction::Down)),
        "ArrowLeft" => Some(Command::Move(Direction::Left)),
        "ArrowRight" => Some(Command::Move(Direction::Right)),
        _ => None,
    }
}

impl Command {
    /// Queue this command for the next tick
    pub fn apply(self, input: &mut TickInput) {
        match self {
            Command::TogglePause => input.toggle_pause = !input.toggle_pause,
            Command::Move(direction) => input.moves.push(direction),
        }
    }
}
