//! First-person movement and collision sampling
//!
//! No physics integration: each frame turns the held movement keys into a
//! planar displacement, then corrects the new position with ray samples:
//! a downward ray keeps the eye at standing height above the floor, and
//! four cardinal rays push the camera out of walls before it can clip
//! through them.

use macroquad::prelude::{vec2, vec3, Vec2, Vec3};
use crate::world::EYE_HEIGHT;
use super::ray::{ray_floor_distance, ray_nearest, Aabb, Ray};

/// Walking speed in units per second
pub const WALK_SPEED: f32 = 3.0;
/// Speed multiplier while the run modifier is held
pub const RUN_MULTIPLIER: f32 = 2.0;
/// Minimum distance kept between the eye and any wall
pub const CLEARANCE: f32 = 0.35;
/// Mouse-look sensitivity (radians per reported delta unit)
pub const LOOK_SENSITIVITY: f32 = 1.6;

/// The player's eye: position plus view angles.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub position: Vec3,
    /// Rotation around Y; 0 faces -Z, into the building
    pub yaw: f32,
    /// Up/down look, clamped short of straight vertical
    pub pitch: f32,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Full 3D view direction (for interaction rays and the camera target).
    pub fn look_dir(&self) -> Vec3 {
        vec3(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Forward on the ground plane (movement ignores pitch).
    pub fn forward_xz(&self) -> Vec3 {
        vec3(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Right on the ground plane.
    pub fn right_xz(&self) -> Vec3 {
        vec3(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Apply a mouse-look delta.
    pub fn look(&mut self, delta: Vec2) {
        self.yaw += delta.x * LOOK_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * LOOK_SENSITIVITY).clamp(-1.5, 1.5);
    }
}

/// The four directional keys plus the run modifier, sampled per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
}

impl MoveFlags {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Advance the player one frame: displace, then correct against floor and
/// walls. `solids` is everything currently impassable: wall slabs,
/// furniture, and closed door leaves.
pub fn update(player: &mut Player, flags: MoveFlags, dt: f32, solids: &[Aabb]) {
    // Planar displacement from key state
    if flags.any() {
        let mut dir = vec2(0.0, 0.0);
        if flags.forward {
            dir.y += 1.0;
        }
        if flags.backward {
            dir.y -= 1.0;
        }
        if flags.right {
            dir.x += 1.0;
        }
        if flags.left {
            dir.x -= 1.0;
        }
        // Opposed keys cancel to a zero vector; don't normalize that
        let dir = dir.normalize_or_zero();

        let speed = if flags.run {
            WALK_SPEED * RUN_MULTIPLIER
        } else {
            WALK_SPEED
        };
        let step = (player.forward_xz() * dir.y + player.right_xz() * dir.x) * speed * dt;
        player.position += step;
    }

    // Floor sample: keep the eye at standing height above the floor plane
    let down = Ray::new(player.position, vec3(0.0, -1.0, 0.0));
    if let Some(dist) = ray_floor_distance(&down, 0.0) {
        if dist < EYE_HEIGHT {
            player.position.y = EYE_HEIGHT;
        }
    } else {
        // Eye at or below the floor plane; snap back up
        player.position.y = EYE_HEIGHT;
    }

    // Wall samples: four cardinal rays, push back along the hit normal
    let cardinal = [
        vec3(1.0, 0.0, 0.0),
        vec3(-1.0, 0.0, 0.0),
        vec3(0.0, 0.0, 1.0),
        vec3(0.0, 0.0, -1.0),
    ];
    for dir in cardinal {
        let ray = Ray::new(player.position, dir);
        if let Some((_, hit)) = ray_nearest(&ray, solids.iter()) {
            if hit.t < CLEARANCE {
                player.position += hit.normal * (CLEARANCE - hit.t);
            }
        }
    }
}
