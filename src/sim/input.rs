//! Resolved input snapshot
//!
//! The host captures raw key events and keeps an [`InputState`] of what is held
//! right now; the simulation only ever reads that snapshot.

use serde::{Deserialize, Serialize};

/// Abstract input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputCode {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    Dash,
    Special,
}

impl InputCode {
    pub const ALL: [InputCode; 7] = [
        InputCode::MoveUp,
        InputCode::MoveDown,
        InputCode::MoveLeft,
        InputCode::MoveRight,
        InputCode::Fire,
        InputCode::Dash,
        InputCode::Special,
    ];

    /// Map a browser `KeyboardEvent.code` to an action
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(InputCode::MoveUp),
            "ArrowDown" | "KeyS" => Some(InputCode::MoveDown),
            "ArrowLeft" | "KeyA" => Some(InputCode::MoveLeft),
            "ArrowRight" | "KeyD" => Some(InputCode::MoveRight),
            "Space" => Some(InputCode::Fire),
            "ShiftLeft" | "ShiftRight" => Some(InputCode::Dash),
            "KeyQ" => Some(InputCode::Special),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Which actions are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pressed: [bool; 7],
}

impl InputState {
    pub fn is_pressed(&self, code: InputCode) -> bool {
        self.pressed[code.index()]
    }

    pub fn set(&mut self, code: InputCode, pressed: bool) {
        self.pressed[code.index()] = pressed;
    }

    /// Builder-style variant of [`InputState::set`]
    pub fn with(mut self, code: InputCode) -> Self {
        self.set(code, true);
        self
    }

    /// Apply a raw key event; unknown keys are ignored
    pub fn apply_key(&mut self, key_code: &str, pressed: bool) -> bool {
        match InputCode::from_key_code(key_code) {
            Some(code) => {
                self.set(code, pressed);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.pressed = [false; 7];
    }

    pub fn any(&self) -> bool {
        self.pressed.iter().any(|&p| p)
    }
}
