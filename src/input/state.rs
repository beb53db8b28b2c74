//! Input state management
//!
//! Maps macroquad's raw keyboard/mouse state to game actions, and converts
//! the held movement keys into the flags the movement sampler consumes.

use macroquad::prelude::*;
use crate::game::movement::MoveFlags;
use super::Action;

/// Keyboard + mouse input, sampled once per frame.
pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Check if an action's key is currently held down.
    pub fn action_down(&self, action: Action) -> bool {
        match action {
            Action::MoveForward => is_key_down(KeyCode::W),
            Action::MoveBackward => is_key_down(KeyCode::S),
            Action::MoveLeft => is_key_down(KeyCode::A),
            Action::MoveRight => is_key_down(KeyCode::D),
            Action::Run => is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            Action::Engage => is_key_down(KeyCode::Space),
            Action::Restart => is_key_down(KeyCode::R),
            Action::Quit => is_key_down(KeyCode::Q),
        }
    }

    /// Check if an action's key was just pressed this frame.
    pub fn action_pressed(&self, action: Action) -> bool {
        match action {
            Action::MoveForward => is_key_pressed(KeyCode::W),
            Action::MoveBackward => is_key_pressed(KeyCode::S),
            Action::MoveLeft => is_key_pressed(KeyCode::A),
            Action::MoveRight => is_key_pressed(KeyCode::D),
            Action::Run => is_key_pressed(KeyCode::LeftShift),
            Action::Engage => is_key_pressed(KeyCode::Space),
            Action::Restart => is_key_pressed(KeyCode::R),
            Action::Quit => is_key_pressed(KeyCode::Q),
        }
    }

    /// The held movement keys as sampler flags.
    pub fn move_flags(&self) -> MoveFlags {
        MoveFlags {
            forward: self.action_down(Action::MoveForward),
            backward: self.action_down(Action::MoveBackward),
            left: self.action_down(Action::MoveLeft),
            right: self.action_down(Action::MoveRight),
            run: self.action_down(Action::Run),
        }
    }

    /// Was the swing/interact button just clicked?
    pub fn swing_pressed(&self) -> bool {
        is_mouse_button_pressed(MouseButton::Left)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
