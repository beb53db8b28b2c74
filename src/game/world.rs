//! Game world
//!
//! The World owns every dynamic entity (the hammer, the door leaves, and
//! whatever breakables the current room holds) along with their component
//! storage. Static architecture lives in the layout; the world only tracks
//! things that can change or disappear during a session.

use macroquad::prelude::Vec3;
use super::entity::{Entity, EntityAllocator};
use super::component::ComponentStorage;
use super::components::{DoorState, EntityKind, Prop, PropKind};
use super::ray::Aabb;

pub struct World {
    entities: EntityAllocator,

    /// What each entity is (always present for alive entities)
    pub kinds: ComponentStorage<EntityKind>,

    /// World-space bounding box (always present for alive entities)
    pub bounds: ComponentStorage<Aabb>,

    /// Breakable data
    pub props: ComponentStorage<Prop>,

    /// Door data
    pub doors: ComponentStorage<DoorState>,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            kinds: ComponentStorage::new(),
            bounds: ComponentStorage::new(),
            props: ComponentStorage::new(),
            doors: ComponentStorage::new(),
        }
    }

    // =========================================================================
    // Entity management
    // =========================================================================

    /// Spawn an entity with its kind and bounds.
    pub fn spawn(&mut self, kind: EntityKind, aabb: Aabb) -> Entity {
        let entity = self.entities.allocate();
        self.kinds.insert(entity, kind);
        self.bounds.insert(entity, aabb);
        entity
    }

    /// Despawn an entity, clearing all its components.
    /// Returns true if it was alive.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.entities.free(entity) {
            return false;
        }
        let idx = entity.index();
        self.kinds.clear_slot(idx);
        self.bounds.clear_slot(idx);
        self.props.clear_slot(idx);
        self.doors.clear_slot(idx);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn alive_count(&self) -> u32 {
        self.entities.alive_count()
    }

    // =========================================================================
    // Spawn helpers
    // =========================================================================

    /// Spawn the world-placed hammer.
    pub fn spawn_hammer(&mut self, rest: Aabb) -> Entity {
        self.spawn(EntityKind::Hammer, rest)
    }

    /// Spawn a closed door leaf for a room.
    pub fn spawn_door(&mut self, room: usize, leaf: Aabb) -> Entity {
        let entity = self.spawn(EntityKind::Door { room }, leaf);
        self.doors.insert(entity, DoorState::closed(room));
        entity
    }

    /// Spawn a breakable prop standing at the given floor position.
    pub fn spawn_prop(&mut self, kind: PropKind, room: usize, position: Vec3) -> Entity {
        let (hx, hy, hz) = kind.half_extents();
        let aabb = Aabb::new(position, Vec3::new(hx, hy, hz));
        let entity = self.spawn(EntityKind::Breakable { prop: kind }, aabb);
        self.props.insert(entity, Prop { kind, room });
        entity
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Iterate alive entities with their kinds and bounds.
    pub fn entities(&self) -> impl Iterator<Item = (Entity, EntityKind, Aabb)> + '_ {
        self.kinds.iter().filter_map(move |(idx, kind)| {
            let entity = self.entities.entity_for_index(idx);
            let aabb = *self.bounds.get(entity)?;
            Some((entity, *kind, aabb))
        })
    }

    /// The door entity gating a room, if any.
    pub fn door_for_room(&self, room: usize) -> Option<Entity> {
        self.doors
            .iter()
            .find(|(_, d)| d.room == room)
            .map(|(idx, _)| self.entities.entity_for_index(idx))
    }

    /// Is the given room's door open?
    pub fn door_open(&self, room: usize) -> bool {
        self.doors.iter().any(|(_, d)| d.room == room && d.open)
    }

    /// Mark a door open. Open leaves stop being drawn, solid, or clickable.
    pub fn open_door(&mut self, entity: Entity) {
        if let Some(door) = self.doors.get_mut(entity) {
            door.open = true;
        }
    }

    /// Number of breakables still standing in a room.
    pub fn breakables_in_room(&self, room: usize) -> usize {
        self.props.iter().filter(|(_, p)| p.room == room).count()
    }

    /// Entities a click ray may hit: the hammer, closed doors, breakables.
    pub fn click_targets(&self) -> Vec<(Entity, Aabb)> {
        self.entities()
            .filter(|(entity, kind, _)| match kind {
                EntityKind::Hammer | EntityKind::Breakable { .. } => true,
                EntityKind::Door { .. } => self
                    .doors
                    .get(*entity)
                    .map_or(false, |d| !d.open),
                EntityKind::Static => false,
            })
            .map(|(entity, _, aabb)| (entity, aabb))
            .collect()
    }

    /// Bounds of door leaves that are still closed (solid for movement).
    pub fn closed_door_bounds(&self) -> Vec<Aabb> {
        self.entities()
            .filter(|(entity, kind, _)| {
                matches!(kind, EntityKind::Door { .. })
                    && self.doors.get(*entity).map_or(false, |d| !d.open)
            })
            .map(|(_, _, aabb)| aabb)
            .collect()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
