//! RAGE ROOM: a first-person smashing game
//!
//! Grab the hammer off the lobby table, open the first door, and destroy
//! every breakable inside before the clock runs out. Four rooms, each
//! harder than the last. Miss one timer and the session is over.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod game;
mod hud;
mod input;
mod scene;
mod world;

use macroquad::prelude::*;
use app::AppState;
use world::{load_rooms_or_default, ConfigError};

/// Optional room-sequence override, read from the working directory
const ROOMS_FILE: &str = "rooms.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("RAGE ROOM v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// All-or-nothing startup: config load, validation, world construction.
/// Any failure here means the game does not start.
fn init() -> Result<AppState, ConfigError> {
    let rooms = load_rooms_or_default(ROOMS_FILE)?;
    // Wall-clock millis as spawn seed; low bit set so xorshift never sees zero
    let seed = (get_time() * 1000.0) as u32 | 1;
    Ok(AppState::new(rooms, seed))
}

#[macroquad::main(window_conf)]
async fn main() {
    match init() {
        Ok(mut app) => {
            println!("=== RAGE ROOM v{} ===", VERSION);
            loop {
                clear_background(BLACK);
                app.frame(get_frame_time());
                if app.should_quit {
                    break;
                }
                next_frame().await;
            }
        }
        Err(e) => {
            eprintln!("Failed to start: {}", e);
            error_screen(e).await;
        }
    }
}

/// Blocking error screen for startup failures. The game never runs; the
/// player reads the reason and quits.
async fn error_screen(error: ConfigError) {
    let detail = error.to_string();
    loop {
        clear_background(Color::from_rgba(25, 8, 8, 255));

        let sw = screen_width();
        let title = "RAGE ROOM failed to start";
        let tdims = measure_text(title, None, 36, 1.0);
        draw_text(title, (sw - tdims.width) / 2.0, 160.0, 36.0, Color::from_rgba(235, 90, 80, 255));

        let ddims = measure_text(&detail, None, 20, 1.0);
        draw_text(&detail, (sw - ddims.width) / 2.0, 220.0, 20.0, Color::from_rgba(220, 220, 225, 255));

        let hint = "Press Escape to quit";
        let hdims = measure_text(hint, None, 20, 1.0);
        draw_text(hint, (sw - hdims.width) / 2.0, 280.0, 20.0, Color::from_rgba(160, 160, 170, 255));

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        next_frame().await;
    }
}
