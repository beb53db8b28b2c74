//! Scene rendering
//!
//! Immediate-mode 3D drawing of the whole building: wall slabs, door
//! leaves, props, the hammer, and the debris pool. The same boxes the
//! collision sampler uses are what get drawn, so the visible world and the
//! solid world cannot drift apart.
//!
//! Lighting is faked the PS1 way: a per-frame flicker level multiplies
//! every surface color, standing in for the hanging work lights buzzing
//! over each chamber.

use macroquad::prelude::*;
use crate::game::components::{EntityKind, PropKind};
use crate::game::movement::Player;
use crate::game::particles::ParticlePool;
use crate::game::ray::Aabb;
use crate::game::spawn::SpawnRng;
use crate::game::GameSession;
use crate::world::{Difficulty, Layout, SurfaceKind};

/// Per-frame light flicker. Drifts on a slow sine with a small random
/// jitter on top, clamped so the room never drops into darkness.
pub struct Lighting {
    phase: f32,
    jitter: SpawnRng,
    /// Current brightness multiplier, roughly 0.85..1.0
    pub level: f32,
}

impl Lighting {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            jitter: SpawnRng::new(0xf11c),
            level: 1.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.phase += dt;
        let hum = (self.phase * 11.0).sin() * 0.04;
        let spike = self.jitter.range(-0.03, 0.03);
        self.level = (0.93 + hum + spike).clamp(0.85, 1.0);
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::new()
    }
}

fn shade(base: Color, level: f32) -> Color {
    Color::new(base.r * level, base.g * level, base.b * level, base.a)
}

fn prop_color(kind: PropKind) -> Color {
    match kind {
        PropKind::Bottle => Color::new(0.45, 0.75, 0.5, 1.0),
        PropKind::Vase => Color::new(0.8, 0.45, 0.25, 1.0),
        PropKind::Television => Color::new(0.25, 0.25, 0.3, 1.0),
    }
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::new(0.3, 0.75, 0.35, 1.0),
        Difficulty::Medium => Color::new(0.85, 0.75, 0.25, 1.0),
        Difficulty::Hard => Color::new(0.9, 0.5, 0.2, 1.0),
        Difficulty::Expert => Color::new(0.85, 0.2, 0.2, 1.0),
    }
}

fn draw_box(aabb: &Aabb, color: Color, outline: bool) {
    draw_cube(aabb.center, aabb.size(), None, color);
    if outline {
        draw_cube_wires(aabb.center, aabb.size(), Color::new(0.05, 0.05, 0.07, 1.0));
    }
}

/// Draw one frame of the 3D scene from the player's eye.
pub fn draw_scene(
    layout: &Layout,
    session: &GameSession,
    player: &Player,
    lighting: &Lighting,
    particles: &ParticlePool,
) {
    set_camera(&Camera3D {
        position: player.position,
        target: player.position + player.look_dir(),
        up: vec3(0.0, 1.0, 0.0),
        ..Default::default()
    });

    let level = lighting.level;

    // Static architecture
    for slab in &layout.slabs {
        let (color, outline) = match slab.kind {
            SurfaceKind::Wall => (Color::new(0.5, 0.5, 0.52, 1.0), true),
            SurfaceKind::Floor => (Color::new(0.33, 0.33, 0.35, 1.0), false),
            SurfaceKind::Ceiling => (Color::new(0.4, 0.4, 0.43, 1.0), false),
            SurfaceKind::Furniture => (Color::new(0.45, 0.3, 0.18, 1.0), true),
            SurfaceKind::Sign { room } => {
                let difficulty = session
                    .rooms()
                    .get(room - 1)
                    .map(|c| c.difficulty)
                    .unwrap_or(Difficulty::Easy);
                (difficulty_color(difficulty), true)
            }
        };
        draw_box(&slab.aabb, shade(color, level), outline);
    }

    // Dynamic entities
    for (entity, kind, aabb) in session.world.entities() {
        match kind {
            EntityKind::Hammer => draw_hammer_at(&aabb, level),
            EntityKind::Door { .. } => {
                let open = session
                    .world
                    .doors
                    .get(entity)
                    .map_or(false, |d| d.open);
                if !open {
                    draw_box(&aabb, shade(Color::new(0.4, 0.26, 0.13, 1.0), level), true);
                }
            }
            EntityKind::Breakable { prop } => {
                draw_box(&aabb, shade(prop_color(prop), level), true);
            }
            EntityKind::Static => {}
        }
    }

    particles.draw();

    // View-model: the held hammer bobs at the bottom right of the view
    if session.has_hammer {
        draw_held_hammer(player, level);
    }

    set_default_camera();
}

fn draw_hammer_at(aabb: &Aabb, level: f32) {
    // Handle standing up, head across the top
    let handle = Aabb::new(
        aabb.center - vec3(0.0, 0.0, 0.06),
        vec3(0.03, aabb.half.y, 0.03),
    );
    let head = Aabb::new(
        aabb.center + vec3(0.0, aabb.half.y - 0.06, 0.0),
        vec3(0.08, 0.06, aabb.half.z),
    );
    draw_box(&handle, shade(Color::new(0.55, 0.4, 0.2, 1.0), level), false);
    draw_box(&head, shade(Color::new(0.35, 0.35, 0.4, 1.0), level), true);
}

fn draw_held_hammer(player: &Player, level: f32) {
    let base = player.position
        + player.look_dir() * 0.7
        + player.right_xz() * 0.28
        - vec3(0.0, 0.22, 0.0);
    draw_cube(
        base,
        vec3(0.04, 0.3, 0.04),
        None,
        shade(Color::new(0.55, 0.4, 0.2, 1.0), level),
    );
    draw_cube(
        base + vec3(0.0, 0.17, 0.0),
        vec3(0.1, 0.08, 0.16),
        None,
        shade(Color::new(0.35, 0.35, 0.4, 1.0), level),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flicker_stays_in_band() {
        let mut lighting = Lighting::new();
        for _ in 0..600 {
            lighting.update(1.0 / 60.0);
            assert!(lighting.level >= 0.85 && lighting.level <= 1.0);
        }
    }

    #[test]
    fn test_flicker_actually_moves() {
        let mut lighting = Lighting::new();
        let mut seen = Vec::new();
        for _ in 0..60 {
            lighting.update(1.0 / 60.0);
            seen.push(lighting.level);
        }
        let min = seen.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = seen.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!(max - min > 0.01);
    }
}
