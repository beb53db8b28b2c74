//! Game action definitions
//!
//! Classic FPS keyboard layout:
//! - WASD = move
//! - Shift = run
//! - Space = take/resume control (grabs the cursor)
//! - Escape = release the cursor (pause)
//! - Left mouse = swing/interact

/// All actions that can be triggered by input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (WASD)
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,

    // Modifiers
    Run, // Shift - doubles movement speed

    // Control flow
    Engage,  // Space - grab the cursor, start/resume play
    Restart, // R - on the game-over screen
    Quit,    // Q - on the game-over screen
}
