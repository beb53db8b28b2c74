//! Input handling
//!
//! Action-based keyboard and mouse input. Raw key codes live here so the
//! rest of the game talks in actions, not keys.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
