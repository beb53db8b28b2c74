//! HUD and overlays
//!
//! Immediate-mode 2D text and panels over the 3D view: the room/timer/
//! score readouts, transient toast messages, the controls overlay shown
//! while the cursor is free, and the terminal win/lose modal.

use macroquad::prelude::*;
use crate::game::session::MSG_OUT_OF_TIME;
use crate::game::{GameSession, SessionOutcome};

/// A transient message with its remaining display time.
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub remaining: f32,
}

/// What the player chose on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverChoice {
    None,
    Restart,
    Exit,
}

pub struct Hud {
    toasts: Vec<Toast>,
}

impl Hud {
    pub fn new() -> Self {
        Self { toasts: Vec::new() }
    }

    /// Queue a toast for the given number of seconds.
    pub fn push(&mut self, text: impl Into<String>, seconds: f32) {
        self.toasts.push(Toast {
            text: text.into(),
            remaining: seconds,
        });
    }

    /// Age toasts and drop the expired ones.
    pub fn update(&mut self, dt: f32) {
        for toast in &mut self.toasts {
            toast.remaining -= dt;
        }
        self.toasts.retain(|t| t.remaining > 0.0);
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn active_toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// In-game readouts: room, clock, score, crosshair, toasts.
    pub fn draw_playing(&self, session: &GameSession) {
        let sw = screen_width();
        let sh = screen_height();

        // Room and difficulty, top left
        if let Some(config) = session.current_config() {
            let label = format!(
                "ROOM {} / {}  [{}]",
                config.number,
                session.rooms().len(),
                config.difficulty.label()
            );
            draw_text(&label, 16.0, 28.0, 22.0, Color::from_rgba(220, 220, 225, 255));
        }

        // Clock, top center, only while a room is active
        if let Some(secs) = session.seconds_left() {
            let clock = format_clock(secs);
            let dims = measure_text(&clock, None, 34, 1.0);
            let color = if secs <= 10 {
                Color::from_rgba(235, 70, 60, 255)
            } else {
                Color::from_rgba(235, 235, 240, 255)
            };
            draw_text(&clock, (sw - dims.width) / 2.0, 36.0, 34.0, color);

            if let Some(remaining) = session.remaining() {
                let left = format!("{} left", remaining);
                let ldims = measure_text(&left, None, 18, 1.0);
                draw_text(
                    &left,
                    (sw - ldims.width) / 2.0,
                    58.0,
                    18.0,
                    Color::from_rgba(180, 180, 190, 255),
                );
            }
        }

        // Score, top right
        let score = format!("SCORE {}", session.score);
        let dims = measure_text(&score, None, 22, 1.0);
        draw_text(&score, sw - dims.width - 16.0, 28.0, 22.0, Color::from_rgba(220, 220, 225, 255));

        // Crosshair
        let cx = sw / 2.0;
        let cy = sh / 2.0;
        let c = Color::from_rgba(240, 240, 240, 200);
        draw_line(cx - 7.0, cy, cx - 2.0, cy, 2.0, c);
        draw_line(cx + 2.0, cy, cx + 7.0, cy, 2.0, c);
        draw_line(cx, cy - 7.0, cx, cy - 2.0, 2.0, c);
        draw_line(cx, cy + 2.0, cx, cy + 7.0, 2.0, c);

        // Toasts, stacked above the bottom edge
        for (i, toast) in self.active_toasts().iter().enumerate() {
            let dims = measure_text(&toast.text, None, 24, 1.0);
            let y = sh - 80.0 - i as f32 * 34.0;
            draw_rectangle(
                (sw - dims.width) / 2.0 - 12.0,
                y - 24.0,
                dims.width + 24.0,
                34.0,
                Color::from_rgba(10, 10, 14, 190),
            );
            draw_text(
                &toast.text,
                (sw - dims.width) / 2.0,
                y,
                24.0,
                Color::from_rgba(240, 220, 130, 255),
            );
        }
    }

    /// Controls overlay shown while the cursor is free.
    pub fn draw_controls(&self) {
        let sw = screen_width();
        let sh = screen_height();

        draw_rectangle(0.0, 0.0, sw, sh, Color::from_rgba(5, 5, 10, 160));

        let lines = [
            ("RAGE ROOM", 48.0),
            ("", 20.0),
            ("WASD - move    Shift - run", 24.0),
            ("Mouse - look    Click - swing", 24.0),
            ("Escape - pause", 24.0),
            ("", 20.0),
            ("Grab the hammer, open a door,", 24.0),
            ("smash everything before the clock runs out.", 24.0),
            ("", 20.0),
            ("Press SPACE to play", 30.0),
        ];

        let mut y = sh * 0.28;
        for (line, size) in lines {
            if !line.is_empty() {
                let dims = measure_text(line, None, size as u16, 1.0);
                draw_text(line, (sw - dims.width) / 2.0, y, size, Color::from_rgba(235, 235, 240, 255));
            }
            y += size * 1.35;
        }
    }

    /// Terminal win/lose modal. Blocks the game behind it and offers
    /// exactly two actions. Returns what the player clicked, if anything.
    pub fn draw_game_over(&self, session: &GameSession) -> GameOverChoice {
        let sw = screen_width();
        let sh = screen_height();

        draw_rectangle(0.0, 0.0, sw, sh, Color::from_rgba(5, 5, 10, 210));

        let (title, color) = match session.outcome {
            Some(SessionOutcome::Won) => ("ALL ROOMS CLEARED!", Color::from_rgba(120, 230, 130, 255)),
            Some(SessionOutcome::OutOfTime) => (MSG_OUT_OF_TIME, Color::from_rgba(235, 80, 70, 255)),
            None => ("", WHITE),
        };

        let dims = measure_text(title, None, 48, 1.0);
        draw_text(title, (sw - dims.width) / 2.0, sh * 0.35, 48.0, color);

        let score = format!("Final score: {}", session.score);
        let sdims = measure_text(&score, None, 28, 1.0);
        draw_text(&score, (sw - sdims.width) / 2.0, sh * 0.35 + 48.0, 28.0, Color::from_rgba(225, 225, 230, 255));

        let bw = 220.0;
        let bh = 48.0;
        let gap = 30.0;
        let y = sh * 0.55;
        let restart = button("Restart  [R]", (sw - gap) / 2.0 - bw, y, bw, bh);
        let exit = button("Exit  [Q]", (sw + gap) / 2.0, y, bw, bh);

        if restart {
            GameOverChoice::Restart
        } else if exit {
            GameOverChoice::Exit
        } else {
            GameOverChoice::None
        }
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple immediate-mode button. True on click.
fn button(label: &str, x: f32, y: f32, w: f32, h: f32) -> bool {
    let (mx, my) = mouse_position();
    let hovered = mx >= x && mx <= x + w && my >= y && my <= y + h;

    let fill = if hovered {
        Color::from_rgba(70, 70, 85, 255)
    } else {
        Color::from_rgba(40, 40, 50, 255)
    };
    draw_rectangle(x, y, w, h, fill);
    draw_rectangle_lines(x, y, w, h, 2.0, Color::from_rgba(150, 150, 160, 255));

    let dims = measure_text(label, None, 24, 1.0);
    draw_text(
        label,
        x + (w - dims.width) / 2.0,
        y + h / 2.0 + dims.height / 2.0,
        24.0,
        Color::from_rgba(235, 235, 240, 255),
    );

    hovered && is_mouse_button_pressed(MouseButton::Left)
}

/// mm:ss with zero padding.
pub fn format_clock(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(120), "02:00");
        assert_eq!(format_clock(3599), "59:59");
    }

    #[test]
    fn test_toast_expires_after_its_duration() {
        let mut hud = Hud::new();
        hud.push("smash!", 1.0);
        assert_eq!(hud.active_toasts().len(), 1);

        hud.update(0.5);
        assert_eq!(hud.active_toasts().len(), 1);

        hud.update(0.6);
        assert!(hud.active_toasts().is_empty());
    }

    #[test]
    fn test_toasts_expire_independently() {
        let mut hud = Hud::new();
        hud.push("short", 0.5);
        hud.push("long", 3.0);

        hud.update(1.0);
        assert_eq!(hud.active_toasts().len(), 1);
        assert_eq!(hud.active_toasts()[0].text, "long");
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut hud = Hud::new();
        hud.push("a", 5.0);
        hud.push("b", 5.0);
        hud.clear();
        assert!(hud.active_toasts().is_empty());
    }
}
