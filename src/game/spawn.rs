//! Breakable registry population
//!
//! Fills a room with its configured number of props the moment its door
//! opens. Placement uses a deterministic xorshift PRNG owned by the
//! session: seedable, no external entropy, so tests can pin layouts.

use macroquad::prelude::vec3;
use crate::world::Chamber;
use super::components::PropKind;
use super::entity::Entity;
use super::world::World;

/// Fast xorshift PRNG (deterministic).
pub struct SpawnRng {
    state: u32,
}

impl SpawnRng {
    pub fn new(seed: u32) -> Self {
        Self {
            // Xorshift gets stuck at zero
            state: if seed == 0 { 0x9e37_79b9 } else { seed },
        }
    }

    fn next_random(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        (self.state as f32) / (u32::MAX as f32)
    }

    /// Random float in [min, max].
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_random() * (max - min)
    }
}

/// Spawn exactly `count` breakables at random positions on the chamber
/// floor, cycling through the prop palette so every room mixes all three
/// point values. Returns the spawned entities.
pub fn populate_room(
    world: &mut World,
    chamber: &Chamber,
    room: usize,
    count: u32,
    rng: &mut SpawnRng,
) -> Vec<Entity> {
    let bounds = chamber.spawn_bounds();
    let min = bounds.min();
    let max = bounds.max();
    let floor_y = chamber.floor_y();

    (0..count)
        .map(|i| {
            let kind = PropKind::ALL[i as usize % PropKind::ALL.len()];
            let (_, hy, _) = kind.half_extents();
            let position = vec3(
                rng.range(min.x, max.x),
                floor_y + hy,
                rng.range(min.z, max.z),
            );
            world.spawn_prop(kind, room, position)
        })
        .collect()
}
