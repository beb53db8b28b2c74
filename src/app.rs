//! Application state and screen flow
//!
//! Three screens: the controls overlay (cursor free), play (cursor
//! grabbed), and the terminal game-over modal. All per-session state hangs
//! off one `AppState`; restarting drops the session and builds a fresh one
//! instead of resetting fields in place.

use macroquad::prelude::*;
use crate::game::interact::resolve_click;
use crate::game::movement::{self, Player};
use crate::game::particles::{ParticlePool, ShatterDef, BURST_COUNT};
use crate::game::session::HINT_SECS;
use crate::game::event::OutcomeEvent;
use crate::game::GameSession;
use crate::hud::{GameOverChoice, Hud};
use crate::input::{Action, InputState};
use crate::scene::{draw_scene, Lighting};
use crate::world::{Layout, RoomConfig};

/// Which screen sits in front of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Controls overlay; cursor free
    Controls,
    /// In the room, cursor grabbed
    Playing,
    /// Terminal win/lose modal
    GameOver,
}

pub struct AppState {
    pub screen: Screen,
    pub session: GameSession,
    pub layout: Layout,
    pub player: Player,
    pub hud: Hud,
    pub particles: ParticlePool,
    pub lighting: Lighting,
    pub input: InputState,
    /// Set by the exit control; the main loop breaks on it
    pub should_quit: bool,

    rooms: Vec<RoomConfig>,
    seed: u32,
}

impl AppState {
    pub fn new(rooms: Vec<RoomConfig>, seed: u32) -> Self {
        let layout = Layout::new(rooms.len());
        let session = GameSession::new(rooms.clone(), &layout, seed);
        let player = Player::new(layout.player_start);

        Self {
            screen: Screen::Controls,
            session,
            layout,
            player,
            hud: Hud::new(),
            particles: ParticlePool::new(),
            lighting: Lighting::new(),
            input: InputState::new(),
            should_quit: false,
            rooms,
            seed,
        }
    }

    /// Drop the session and start over: fresh world, zero score, hammer
    /// back on the table, player back at the door. Shows the controls
    /// overlay again.
    pub fn restart(&mut self) {
        self.seed = self.seed.wrapping_mul(31).wrapping_add(7);
        self.session = GameSession::new(self.rooms.clone(), &self.layout, self.seed);
        self.player = Player::new(self.layout.player_start);
        self.hud.clear();
        self.particles.clear();
        self.screen = Screen::Controls;
    }

    /// One frame: input, simulation, event fan-out, drawing.
    pub fn frame(&mut self, dt: f32) {
        match self.screen {
            Screen::Controls => self.frame_controls(),
            Screen::Playing => self.frame_playing(dt),
            Screen::GameOver => {}
        }

        self.fan_out_events();
        self.session.events.clear_all();

        self.lighting.update(dt);
        self.particles.update(dt);
        self.hud.update(dt);

        // The 3D scene draws on every screen; overlays go on top
        draw_scene(
            &self.layout,
            &self.session,
            &self.player,
            &self.lighting,
            &self.particles,
        );

        match self.screen {
            Screen::Controls => self.hud.draw_controls(),
            Screen::Playing => self.hud.draw_playing(&self.session),
            Screen::GameOver => {
                self.hud.draw_playing(&self.session);
                let mut choice = self.hud.draw_game_over(&self.session);
                if self.input.action_pressed(Action::Restart) {
                    choice = GameOverChoice::Restart;
                }
                if self.input.action_pressed(Action::Quit) {
                    choice = GameOverChoice::Exit;
                }
                match choice {
                    GameOverChoice::Restart => self.restart(),
                    GameOverChoice::Exit => self.should_quit = true,
                    GameOverChoice::None => {}
                }
            }
        }
    }

    fn frame_controls(&mut self) {
        if self.input.action_pressed(Action::Engage) {
            set_cursor_grab(true);
            show_mouse(false);
            // Swallow the accumulated delta so the view doesn't jump
            let _ = mouse_delta_position();
            self.screen = Screen::Playing;
        }
    }

    fn frame_playing(&mut self, dt: f32) {
        // Native stand-in for the browser's escape-releases-pointer-lock
        if is_key_pressed(KeyCode::Escape) {
            set_cursor_grab(false);
            show_mouse(true);
            self.screen = Screen::Controls;
            return;
        }

        self.player.look(mouse_delta_position());

        // Solid set for this frame: architecture plus closed doors
        let mut solids: Vec<_> = self.layout.slabs.iter().map(|s| s.aabb).collect();
        solids.extend(self.session.world.closed_door_bounds());
        movement::update(&mut self.player, self.input.move_flags(), dt, &solids);

        if self.input.swing_pressed() {
            resolve_click(&mut self.session, &self.layout, &self.player);
        }

        self.session.tick(dt);

        if self.session.is_over() {
            set_cursor_grab(false);
            show_mouse(true);
            self.screen = Screen::GameOver;
        }
    }

    /// Turn this frame's events into toasts and debris.
    fn fan_out_events(&mut self) {
        for smash in self.session.events.smashes.drain() {
            self.particles
                .spawn_burst(&ShatterDef::for_prop(smash.kind), smash.position, BURST_COUNT);
            self.hud.push(format!("{} +{}", smash.kind.label(), smash.points), 1.0);
        }
        for hint in self.session.events.hints.drain() {
            self.hud.push(hint.text, hint.seconds);
        }
        for opened in self.session.events.doors_opened.drain() {
            self.hud.push(
                format!("Room {} unlocked! Smash everything!", opened.room),
                HINT_SECS,
            );
        }
        for outcome in self.session.events.outcomes.drain() {
            if let OutcomeEvent::RoomCleared { room } = outcome {
                self.hud.push(format!("Room {} cleared!", room), HINT_SECS);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::standard_rooms;

    #[test]
    fn test_new_app_shows_controls() {
        let app = AppState::new(standard_rooms(), 5);
        assert_eq!(app.screen, Screen::Controls);
        assert!(!app.should_quit);
        assert_eq!(app.session.score, 0);
    }

    #[test]
    fn test_restart_resets_session_and_player() {
        let mut app = AppState::new(standard_rooms(), 5);
        app.session.has_hammer = true;
        app.session.score = 450;
        app.player.position.x += 3.0;
        app.screen = Screen::GameOver;

        app.restart();

        assert_eq!(app.screen, Screen::Controls);
        assert_eq!(app.session.score, 0);
        assert_eq!(app.session.current_room, 1);
        assert!(!app.session.has_hammer);
        assert_eq!(app.player.position, app.layout.player_start);
    }

    #[test]
    fn test_restart_reseeds_spawns() {
        let mut app = AppState::new(standard_rooms(), 5);
        let seed_before = app.seed;
        app.restart();
        assert_ne!(app.seed, seed_before);
    }
}
