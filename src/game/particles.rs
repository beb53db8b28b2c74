//! Shatter particles
//!
//! A fixed-size pool of debris flecks burst out of every smashed prop.
//! Particles are purely visual: they drift, fall, fade, and expire on
//! their own within a second. Nothing reads them back into game state.

use macroquad::prelude::{draw_cube, vec3, Color, Vec3};
use super::components::PropKind;
use super::spawn::SpawnRng;

/// Maximum live particles across all bursts
pub const MAX_PARTICLES: usize = 256;
/// Every shatter fleck is gone within this long
pub const SHATTER_LIFE_SECS: f32 = 1.0;
/// Flecks per burst
pub const BURST_COUNT: usize = 18;
/// Downward pull on debris, units per second squared
const DEBRIS_GRAVITY: f32 = 9.0;

/// A single fleck in the pool.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining life in seconds
    pub life: f32,
    /// Total lifetime (for fade interpolation)
    pub max_life: f32,
    pub color_start: Color,
    pub color_end: Color,
    /// Cube edge length
    pub size: f32,
    pub alive: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            life: 0.0,
            max_life: 1.0,
            color_start: Color::new(1.0, 1.0, 1.0, 1.0),
            color_end: Color::new(0.5, 0.5, 0.5, 1.0),
            size: 0.05,
            alive: false,
        }
    }
}

/// Burst parameters per prop type.
#[derive(Debug, Clone, Copy)]
pub struct ShatterDef {
    pub speed_min: f32,
    pub speed_max: f32,
    /// Spread half-angle in radians from straight up
    pub spread: f32,
    pub color_start: Color,
    pub color_end: Color,
    pub size: f32,
}

impl ShatterDef {
    /// Debris look per prop: glass shards, terracotta chips, sparks.
    pub fn for_prop(kind: PropKind) -> Self {
        match kind {
            PropKind::Bottle => Self {
                speed_min: 1.5,
                speed_max: 4.0,
                spread: 1.2,
                color_start: Color::new(0.55, 0.85, 0.6, 1.0),
                color_end: Color::new(0.2, 0.4, 0.25, 1.0),
                size: 0.04,
            },
            PropKind::Vase => Self {
                speed_min: 1.0,
                speed_max: 3.0,
                spread: 1.0,
                color_start: Color::new(0.85, 0.5, 0.3, 1.0),
                color_end: Color::new(0.45, 0.25, 0.15, 1.0),
                size: 0.06,
            },
            PropKind::Television => Self {
                speed_min: 2.0,
                speed_max: 5.0,
                spread: 0.9,
                color_start: Color::new(1.0, 0.95, 0.7, 1.0),
                color_end: Color::new(0.3, 0.3, 0.35, 1.0),
                size: 0.05,
            },
        }
    }
}

/// The pool of live flecks.
pub struct ParticlePool {
    pub particles: [Particle; MAX_PARTICLES],
    rng: SpawnRng,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self {
            particles: [Particle::default(); MAX_PARTICLES],
            rng: SpawnRng::new(0x5eed),
        }
    }

    fn find_free_slot(&self) -> Option<usize> {
        self.particles.iter().position(|p| !p.alive)
    }

    /// Spawn one burst of debris at a smash point.
    pub fn spawn_burst(&mut self, def: &ShatterDef, origin: Vec3, count: usize) {
        for _ in 0..count {
            let Some(idx) = self.find_free_slot() else {
                return; // Pool exhausted; oldest bursts are about to free slots anyway
            };

            let speed = self.rng.range(def.speed_min, def.speed_max);
            let life = self.rng.range(SHATTER_LIFE_SECS * 0.4, SHATTER_LIFE_SECS);

            // Random direction within a cone around straight up
            let theta = self.rng.range(0.0, std::f32::consts::TAU);
            let phi = self.rng.range(0.0, def.spread);
            let sin_phi = phi.sin();
            let velocity = vec3(
                sin_phi * theta.cos() * speed,
                phi.cos() * speed,
                sin_phi * theta.sin() * speed,
            );

            self.particles[idx] = Particle {
                position: origin,
                velocity,
                life,
                max_life: life,
                color_start: def.color_start,
                color_end: def.color_end,
                size: def.size,
                alive: true,
            };
        }
    }

    /// Advance all live flecks, expiring the spent ones.
    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.particles {
            if !particle.alive {
                continue;
            }

            particle.life -= dt;
            if particle.life <= 0.0 {
                particle.alive = false;
                continue;
            }

            particle.velocity.y -= DEBRIS_GRAVITY * dt;
            particle.position += particle.velocity * dt;
        }
    }

    /// Draw all live flecks as small cubes.
    pub fn draw(&self) {
        for particle in &self.particles {
            if !particle.alive {
                continue;
            }
            let t = 1.0 - (particle.life / particle.max_life);
            let color = lerp_color(particle.color_start, particle.color_end, t);
            draw_cube(
                particle.position,
                vec3(particle.size, particle.size, particle.size),
                None,
                color,
            );
        }
    }

    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }

    /// Kill everything (session restart).
    pub fn clear(&mut self) {
        for p in &mut self.particles {
            p.alive = false;
        }
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}
