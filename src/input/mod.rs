//! # Input Module
//!
//! Non-blocking keyboard polling for the game loop.

use crate::game::Direction;
use macroquad::prelude::*;

/// Player input types that can be processed by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move one tile in a direction
    Move(Direction),
    /// Throw the level away and start the next wave
    Regenerate,
    /// Quit the game
    Quit,
}

impl PlayerInput {
    /// Maps a typed character to an input, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, PlayerInput};
    ///
    /// assert_eq!(PlayerInput::from_char('W'), Some(PlayerInput::Move(Direction::North)));
    /// assert_eq!(PlayerInput::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<PlayerInput> {
        match c.to_ascii_lowercase() {
            'w' => Some(PlayerInput::Move(Direction::North)),
            's' => Some(PlayerInput::Move(Direction::South)),
            'a' => Some(PlayerInput::Move(Direction::West)),
            'd' => Some(PlayerInput::Move(Direction::East)),
            'e' => Some(PlayerInput::Regenerate),
            'q' => Some(PlayerInput::Quit),
            _ => None,
        }
    }
}

/// Input handler for processing player commands.
///
/// Polls macroquad once per frame. Absence of a key press is a valid
/// "no move" result, never a wait.
pub struct InputHandler {
    /// Whether the arrow keys move the player alongside WASD
    pub arrow_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self {
            arrow_keys_enabled: true,
        }
    }

    /// Gets the input pressed this frame, if any.
    ///
    /// Typed characters go through [`PlayerInput::from_char`]; Escape and the
    /// arrow keys are read as key codes since they produce no character.
    pub fn get_input(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(PlayerInput::Quit);
        }
        if let Some(input) = get_char_pressed().and_then(PlayerInput::from_char) {
            return Some(input);
        }
        if !self.arrow_keys_enabled {
            return None;
        }

        [
            (KeyCode::Up, Direction::North),
            (KeyCode::Down, Direction::South),
            (KeyCode::Left, Direction::West),
            (KeyCode::Right, Direction::East),
        ]
        .into_iter()
        .find(|&(key, _)| is_key_pressed(key))
        .map(|(_, direction)| PlayerInput::Move(direction))
    }
}
