//! Static scene layout
//!
//! The building is a straight run of chambers: a lobby holding the hammer,
//! then one chamber per configured room, each sealed off by a door in the
//! dividing wall. Every solid surface is an axis-aligned slab shared by
//! drawing and collision, so the walls the player sees are exactly the
//! walls the movement sampler pushes against.
//!
//! Dimensions follow the original room: 10 wide, 8 tall, 10 deep, with the
//! player's eye at 1.6.

use macroquad::prelude::{vec3, Vec3};
use crate::game::ray::Aabb;

/// Interior width of a chamber (x axis)
pub const CHAMBER_WIDTH: f32 = 10.0;
/// Interior height of a chamber (y axis)
pub const CHAMBER_HEIGHT: f32 = 8.0;
/// Interior depth of a chamber (z axis)
pub const CHAMBER_DEPTH: f32 = 10.0;
/// Wall slab thickness
pub const WALL_THICKNESS: f32 = 0.2;
/// Camera height above the floor
pub const EYE_HEIGHT: f32 = 1.6;
/// Doorway opening size
pub const DOOR_WIDTH: f32 = 1.6;
pub const DOOR_HEIGHT: f32 = 2.6;
/// Breakables keep this far from chamber walls
pub const SPAWN_MARGIN: f32 = 1.0;

/// What a slab is, for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Wall,
    Floor,
    Ceiling,
    Furniture,
    /// Difficulty sign beside a room door
    Sign { room: usize },
}

/// One static solid box.
#[derive(Debug, Clone, Copy)]
pub struct Slab {
    pub aabb: Aabb,
    pub kind: SurfaceKind,
}

/// A chamber's interior volume. Index 0 is the lobby, 1.. are smash rooms.
#[derive(Debug, Clone, Copy)]
pub struct Chamber {
    pub index: usize,
    pub interior: Aabb,
}

impl Chamber {
    /// Where breakables may spawn: the floor area inset by the wall margin.
    pub fn spawn_bounds(&self) -> Aabb {
        let half = self.interior.half;
        Aabb::new(
            self.interior.center,
            vec3(half.x - SPAWN_MARGIN, half.y, half.z - SPAWN_MARGIN),
        )
    }

    /// Floor height inside this chamber.
    pub fn floor_y(&self) -> f32 {
        self.interior.center.y - self.interior.half.y
    }
}

/// The door leaf position for a room. The leaf itself is a world entity;
/// the layout only says where it hangs.
#[derive(Debug, Clone, Copy)]
pub struct Doorway {
    pub room: usize,
    pub leaf: Aabb,
}

/// The whole static scene.
pub struct Layout {
    pub slabs: Vec<Slab>,
    pub chambers: Vec<Chamber>,
    pub doorways: Vec<Doorway>,
    pub player_start: Vec3,
    /// The hammer's world-placed box, resting on the lobby table
    pub hammer_rest: Aabb,
}

impl Layout {
    /// Build the building for the given number of smash rooms.
    pub fn new(room_count: usize) -> Self {
        let hw = CHAMBER_WIDTH / 2.0;
        let hh = CHAMBER_HEIGHT / 2.0;
        let ht = WALL_THICKNESS / 2.0;
        let chamber_count = room_count + 1; // lobby + rooms
        let total_depth = chamber_count as f32 * CHAMBER_DEPTH;
        // Chamber i interior spans z in [front - (i+1)*DEPTH, front - i*DEPTH]
        let front_z = CHAMBER_DEPTH / 2.0;
        let back_z = front_z - total_depth;
        let mid_z = (front_z + back_z) / 2.0;

        let mut slabs = Vec::new();

        // Floor and ceiling run the full building
        slabs.push(Slab {
            aabb: Aabb::new(
                vec3(0.0, -ht, mid_z),
                vec3(hw + WALL_THICKNESS, ht, total_depth / 2.0 + WALL_THICKNESS),
            ),
            kind: SurfaceKind::Floor,
        });
        slabs.push(Slab {
            aabb: Aabb::new(
                vec3(0.0, CHAMBER_HEIGHT + ht, mid_z),
                vec3(hw + WALL_THICKNESS, ht, total_depth / 2.0 + WALL_THICKNESS),
            ),
            kind: SurfaceKind::Ceiling,
        });

        // Side walls
        for side in [-1.0f32, 1.0] {
            slabs.push(Slab {
                aabb: Aabb::new(
                    vec3(side * (hw + ht), hh, mid_z),
                    vec3(ht, hh, total_depth / 2.0 + WALL_THICKNESS),
                ),
                kind: SurfaceKind::Wall,
            });
        }

        // Lobby front wall and far end wall
        slabs.push(Slab {
            aabb: Aabb::new(vec3(0.0, hh, front_z + ht), vec3(hw, hh, ht)),
            kind: SurfaceKind::Wall,
        });
        slabs.push(Slab {
            aabb: Aabb::new(vec3(0.0, hh, back_z - ht), vec3(hw, hh, ht)),
            kind: SurfaceKind::Wall,
        });

        // Dividing walls with doorway openings, one per room
        let mut doorways = Vec::new();
        let dhw = DOOR_WIDTH / 2.0;
        for room in 1..=room_count {
            let wall_z = front_z - room as f32 * CHAMBER_DEPTH;

            // Left and right of the opening
            let flank_hw = (hw - dhw) / 2.0;
            for side in [-1.0f32, 1.0] {
                slabs.push(Slab {
                    aabb: Aabb::new(
                        vec3(side * (dhw + flank_hw), hh, wall_z),
                        vec3(flank_hw, hh, ht),
                    ),
                    kind: SurfaceKind::Wall,
                });
            }
            // Header above the opening
            let header_hh = (CHAMBER_HEIGHT - DOOR_HEIGHT) / 2.0;
            slabs.push(Slab {
                aabb: Aabb::new(
                    vec3(0.0, DOOR_HEIGHT + header_hh, wall_z),
                    vec3(dhw, header_hh, ht),
                ),
                kind: SurfaceKind::Wall,
            });

            // Difficulty sign on the approach side of the wall
            slabs.push(Slab {
                aabb: Aabb::new(
                    vec3(dhw + 1.2, 2.2, wall_z + ht + 0.05),
                    vec3(0.7, 0.4, 0.05),
                ),
                kind: SurfaceKind::Sign { room },
            });

            // The leaf fills the opening; spawned as a door entity
            doorways.push(Doorway {
                room,
                leaf: Aabb::new(
                    vec3(0.0, DOOR_HEIGHT / 2.0, wall_z),
                    vec3(dhw, DOOR_HEIGHT / 2.0, ht),
                ),
            });
        }

        // Chamber interiors
        let chambers = (0..chamber_count)
            .map(|i| {
                let center_z = front_z - (i as f32 + 0.5) * CHAMBER_DEPTH;
                Chamber {
                    index: i,
                    interior: Aabb::new(
                        vec3(0.0, hh, center_z),
                        vec3(hw, hh, CHAMBER_DEPTH / 2.0),
                    ),
                }
            })
            .collect();

        // Lobby table with the hammer on top
        let table = Aabb::new(vec3(1.5, 0.45, 2.0), vec3(0.6, 0.45, 0.4));
        slabs.push(Slab {
            aabb: table,
            kind: SurfaceKind::Furniture,
        });
        let hammer_rest = Aabb::new(vec3(1.5, 0.9 + 0.18, 2.0), vec3(0.12, 0.18, 0.3));

        Self {
            slabs,
            chambers,
            doorways,
            player_start: vec3(0.0, EYE_HEIGHT, 3.0),
            hammer_rest,
        }
    }

    /// The chamber a smash room occupies (room 1 is chamber 1, after the lobby).
    pub fn room_chamber(&self, room: usize) -> Option<&Chamber> {
        self.chambers.get(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chamber_count() {
        let layout = Layout::new(4);
        assert_eq!(layout.chambers.len(), 5);
        assert_eq!(layout.doorways.len(), 4);
    }

    #[test]
    fn test_lobby_contains_player_start_and_hammer() {
        let layout = Layout::new(4);
        let lobby = &layout.chambers[0];
        assert!(lobby.interior.contains(layout.player_start));
        assert!(lobby.interior.contains(layout.hammer_rest.center));
    }

    #[test]
    fn test_room_chambers_line_up_behind_their_doors() {
        let layout = Layout::new(4);
        for doorway in &layout.doorways {
            let chamber = layout.room_chamber(doorway.room).unwrap();
            // The chamber sits just past the door (further along -z)
            assert!(chamber.interior.center.z < doorway.leaf.center.z);
            assert!((doorway.leaf.center.z - chamber.interior.center.z - CHAMBER_DEPTH / 2.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_spawn_bounds_keep_margin() {
        let layout = Layout::new(4);
        let chamber = layout.room_chamber(1).unwrap();
        let bounds = chamber.spawn_bounds();
        assert!(bounds.half.x <= chamber.interior.half.x - SPAWN_MARGIN + 0.001);
        assert!(bounds.half.z <= chamber.interior.half.z - SPAWN_MARGIN + 0.001);
    }

    #[test]
    fn test_doorway_spans_opening() {
        let layout = Layout::new(1);
        let leaf = layout.doorways[0].leaf;
        assert!((leaf.size().x - DOOR_WIDTH).abs() < 0.001);
        assert!((leaf.size().y - DOOR_HEIGHT).abs() < 0.001);
    }
}
