//! Game session and room state machine
//!
//! `GameSession` is the single owner of everything a play-through mutates:
//! the entity world, the score, hammer possession, and the phase of the
//! current room. It is created when a session starts and dropped whole on
//! restart; there is no ambient state to reset field by field.
//!
//! The countdown is data inside `RoomPhase::Active`, advanced by `tick`
//! from the frame loop. Leaving the phase destroys the countdown with it,
//! so there is no timer handle to cancel and nothing to orphan.

use crate::world::{Layout, RoomConfig};
use super::components::EntityKind;
use super::entity::Entity;
use super::event::{DoorOpenedEvent, Events, HammerTakenEvent, HintEvent, OutcomeEvent, SmashEvent};
use super::spawn::{populate_room, SpawnRng};
use super::world::World;

pub const MSG_NEED_HAMMER: &str = "You need the hammer first";
pub const MSG_WRONG_ROOM: &str = "Finish the current room first";
pub const MSG_OUT_OF_TIME: &str = "Out of time";
pub const MSG_HAMMER_TAKEN: &str = "Hammer acquired. Open the first door!";

/// How long guidance toasts stay up
pub const HINT_SECS: f32 = 2.5;

/// Phase of the room the player is working toward or inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoomPhase {
    /// Door not yet opened
    Locked,
    /// Door opened, clock running
    Active {
        seconds_left: u32,
        /// Sub-second accumulator feeding the countdown
        tick_accum: f32,
        /// Breakables still standing
        remaining: u32,
    },
    /// Last room cleared (terminal win phase; intermediate rooms advance
    /// straight to the next `Locked`)
    Complete,
    /// Clock ran out (terminal)
    Failed,
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Won,
    OutOfTime,
}

pub struct GameSession {
    pub world: World,
    pub events: Events,
    rooms: Vec<RoomConfig>,

    /// The room the player is currently gated on (1-based)
    pub current_room: usize,
    pub phase: RoomPhase,
    pub has_hammer: bool,
    pub score: u32,
    pub outcome: Option<SessionOutcome>,

    rng: SpawnRng,
}

impl GameSession {
    /// Start a fresh session: hammer on the lobby table, every door closed,
    /// room 1 locked, score zero.
    pub fn new(rooms: Vec<RoomConfig>, layout: &Layout, seed: u32) -> Self {
        let mut world = World::new();
        world.spawn_hammer(layout.hammer_rest);
        for doorway in &layout.doorways {
            world.spawn_door(doorway.room, doorway.leaf);
        }

        Self {
            world,
            events: Events::new(),
            rooms,
            current_room: 1,
            phase: RoomPhase::Locked,
            has_hammer: false,
            score: 0,
            outcome: None,
            rng: SpawnRng::new(seed),
        }
    }

    pub fn rooms(&self) -> &[RoomConfig] {
        &self.rooms
    }

    pub fn current_config(&self) -> Option<&RoomConfig> {
        self.rooms.get(self.current_room - 1)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Seconds left on the active clock, if one is running.
    pub fn seconds_left(&self) -> Option<u32> {
        match self.phase {
            RoomPhase::Active { seconds_left, .. } => Some(seconds_left),
            _ => None,
        }
    }

    /// Breakables still standing in the active room, if one is running.
    pub fn remaining(&self) -> Option<u32> {
        match self.phase {
            RoomPhase::Active { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    // =========================================================================
    // Interactions (called by the resolver, one per click)
    // =========================================================================

    /// Pick up the world-placed hammer. Happens at most once per session.
    pub fn pick_up_hammer(&mut self, entity: Entity) {
        if self.is_over() || self.has_hammer {
            return;
        }
        let Some(aabb) = self.world.bounds.get(entity).copied() else {
            return;
        };
        if !matches!(self.world.kinds.get(entity), Some(EntityKind::Hammer)) {
            return;
        }

        self.world.despawn(entity);
        self.has_hammer = true;
        self.events.hammer_taken.send(HammerTakenEvent {
            position: aabb.center,
        });
        self.events.hints.send(HintEvent {
            text: MSG_HAMMER_TAKEN,
            seconds: HINT_SECS,
        });
    }

    /// Interact with a door leaf. Opens it and activates the room when the
    /// player holds the hammer and the door gates the current room;
    /// otherwise emits a guidance hint and changes nothing.
    pub fn interact_door(&mut self, entity: Entity, layout: &Layout) {
        if self.is_over() {
            return;
        }
        let Some(door) = self.world.doors.get(entity).copied() else {
            return;
        };
        if door.open {
            return;
        }

        if !self.has_hammer {
            self.events.hints.send(HintEvent {
                text: MSG_NEED_HAMMER,
                seconds: HINT_SECS,
            });
            return;
        }
        if door.room != self.current_room {
            self.events.hints.send(HintEvent {
                text: MSG_WRONG_ROOM,
                seconds: HINT_SECS,
            });
            return;
        }
        if self.phase != RoomPhase::Locked {
            return;
        }

        let Some(config) = self.current_config().copied() else {
            return;
        };
        let Some(chamber) = layout.room_chamber(door.room).copied() else {
            return;
        };

        self.world.open_door(entity);
        populate_room(
            &mut self.world,
            &chamber,
            door.room,
            config.breakable_count,
            &mut self.rng,
        );
        self.phase = RoomPhase::Active {
            seconds_left: config.time_limit_secs,
            tick_accum: 0.0,
            remaining: config.breakable_count,
        };
        self.events.doors_opened.send(DoorOpenedEvent { room: door.room });
    }

    /// Smash a breakable. Only valid with the hammer in hand while the
    /// prop's room is active; the remaining count strictly decreases and
    /// never passes zero.
    pub fn smash(&mut self, entity: Entity) {
        if self.is_over() || !self.has_hammer {
            return;
        }
        let RoomPhase::Active { seconds_left, tick_accum, remaining } = self.phase else {
            return;
        };
        if !self.world.is_alive(entity) {
            return;
        }
        let Some(prop) = self.world.props.get(entity).copied() else {
            return;
        };
        if prop.room != self.current_room || remaining == 0 {
            return;
        }
        let Some(aabb) = self.world.bounds.get(entity).copied() else {
            return;
        };

        self.world.despawn(entity);
        let points = prop.kind.point_value();
        self.score += points;
        self.events.smashes.send(SmashEvent {
            position: aabb.center,
            kind: prop.kind,
            points,
        });

        let remaining = remaining - 1;
        if remaining == 0 {
            self.complete_room();
        } else {
            self.phase = RoomPhase::Active { seconds_left, tick_accum, remaining };
        }
    }

    fn complete_room(&mut self) {
        let room = self.current_room;
        self.events.outcomes.send(OutcomeEvent::RoomCleared { room });

        if room == self.rooms.len() {
            self.phase = RoomPhase::Complete;
            self.outcome = Some(SessionOutcome::Won);
            self.events.outcomes.send(OutcomeEvent::SessionWon);
        } else {
            self.current_room = room + 1;
            self.phase = RoomPhase::Locked;
        }
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// Advance the countdown. Called once per frame with the frame delta;
    /// whole seconds are peeled off the accumulator. Hitting zero with
    /// props still standing fails the session.
    pub fn tick(&mut self, dt: f32) {
        if self.is_over() {
            return;
        }
        let RoomPhase::Active { mut seconds_left, mut tick_accum, remaining } = self.phase else {
            return;
        };

        tick_accum += dt;
        while tick_accum >= 1.0 && seconds_left > 0 {
            tick_accum -= 1.0;
            seconds_left -= 1;
        }

        if seconds_left == 0 && remaining > 0 {
            let room = self.current_room;
            self.phase = RoomPhase::Failed;
            self.outcome = Some(SessionOutcome::OutOfTime);
            self.events.outcomes.send(OutcomeEvent::OutOfTime { room });
        } else {
            self.phase = RoomPhase::Active { seconds_left, tick_accum, remaining };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::standard_rooms;

    fn fresh_session() -> (GameSession, Layout) {
        let rooms = standard_rooms();
        let layout = Layout::new(rooms.len());
        (GameSession::new(rooms, &layout, 1234), layout)
    }

    fn grab_hammer(session: &mut GameSession) {
        let hammer = session
            .world
            .entities()
            .find(|(_, kind, _)| matches!(kind, EntityKind::Hammer))
            .map(|(e, _, _)| e)
            .unwrap();
        session.pick_up_hammer(hammer);
    }

    fn open_current_door(session: &mut GameSession, layout: &Layout) {
        let door = session.world.door_for_room(session.current_room).unwrap();
        session.interact_door(door, layout);
    }

    fn standing_props(session: &GameSession) -> Vec<Entity> {
        session
            .world
            .entities()
            .filter(|(_, kind, _)| matches!(kind, EntityKind::Breakable { .. }))
            .map(|(e, _, _)| e)
            .collect()
    }

    #[test]
    fn test_fresh_session_state() {
        let (session, _) = fresh_session();
        assert_eq!(session.current_room, 1);
        assert_eq!(session.phase, RoomPhase::Locked);
        assert_eq!(session.score, 0);
        assert!(!session.has_hammer);
        assert!(!session.is_over());
    }

    #[test]
    fn test_hammer_pickup_is_once_only() {
        let (mut session, _) = fresh_session();
        grab_hammer(&mut session);
        assert!(session.has_hammer);
        assert_eq!(session.events.hammer_taken.len(), 1);

        // The world-placed hammer is gone; nothing left to pick up
        let hammers = session
            .world
            .entities()
            .filter(|(_, kind, _)| matches!(kind, EntityKind::Hammer))
            .count();
        assert_eq!(hammers, 0);
    }

    #[test]
    fn test_entering_a_room_arms_timer_and_count() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);
        open_current_door(&mut session, &layout);

        let config = session.rooms()[0];
        assert_eq!(session.seconds_left(), Some(config.time_limit_secs));
        assert_eq!(session.remaining(), Some(config.breakable_count));
        assert_eq!(
            session.world.breakables_in_room(1) as u32,
            config.breakable_count
        );
        assert!(session.world.door_open(1));
        assert_eq!(session.events.doors_opened.len(), 1);
    }

    #[test]
    fn test_every_room_arms_from_its_own_config() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);

        for config in session.rooms().to_vec() {
            assert_eq!(session.current_room, config.number);
            open_current_door(&mut session, &layout);
            assert_eq!(session.seconds_left(), Some(config.time_limit_secs));
            assert_eq!(session.remaining(), Some(config.breakable_count));

            for prop in standing_props(&session) {
                session.smash(prop);
            }
        }
        assert_eq!(session.outcome, Some(SessionOutcome::Won));
    }

    #[test]
    fn test_door_without_hammer_hints_and_stays_put() {
        let (mut session, layout) = fresh_session();
        open_current_door(&mut session, &layout);

        assert_eq!(session.current_room, 1);
        assert_eq!(session.phase, RoomPhase::Locked);
        assert!(!session.world.door_open(1));
        let hints: Vec<_> = session.events.hints.iter().collect();
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].text, MSG_NEED_HAMMER);
    }

    #[test]
    fn test_wrong_room_door_hints_and_stays_put() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);
        session.events.clear_all();

        let door_two = session.world.door_for_room(2).unwrap();
        session.interact_door(door_two, &layout);

        assert_eq!(session.current_room, 1);
        assert_eq!(session.phase, RoomPhase::Locked);
        assert!(!session.world.door_open(2));
        let hints: Vec<_> = session.events.hints.iter().collect();
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].text, MSG_WRONG_ROOM);
    }

    #[test]
    fn test_smash_decrements_and_scores() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);
        open_current_door(&mut session, &layout);

        let before = session.remaining().unwrap();
        let prop = standing_props(&session)[0];
        let points = session.world.props.get(prop).unwrap().kind.point_value();

        session.smash(prop);

        assert_eq!(session.remaining(), Some(before - 1));
        assert_eq!(session.score, points);
        assert_eq!(session.events.smashes.len(), 1);
    }

    #[test]
    fn test_smashing_the_same_prop_twice_counts_once() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);
        open_current_door(&mut session, &layout);

        let before = session.remaining().unwrap();
        let prop = standing_props(&session)[0];
        session.smash(prop);
        session.smash(prop); // Stale entity: slot freed, generation bumped

        assert_eq!(session.remaining(), Some(before - 1));
    }

    #[test]
    fn test_clearing_room_one_locks_room_two() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);
        open_current_door(&mut session, &layout);

        // Room 1 ships as 120 seconds for 10 objects
        assert_eq!(session.seconds_left(), Some(120));
        assert_eq!(session.remaining(), Some(10));

        for prop in standing_props(&session) {
            session.smash(prop);
        }

        assert_eq!(session.current_room, 2);
        assert_eq!(session.phase, RoomPhase::Locked);
        assert!(!session.is_over());
        assert!(session
            .events
            .outcomes
            .iter()
            .any(|o| *o == OutcomeEvent::RoomCleared { room: 1 }));
    }

    #[test]
    fn test_clearing_last_room_wins_session() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);

        for _ in 0..session.rooms().len() {
            open_current_door(&mut session, &layout);
            for prop in standing_props(&session) {
                session.smash(prop);
            }
        }

        assert_eq!(session.phase, RoomPhase::Complete);
        assert_eq!(session.outcome, Some(SessionOutcome::Won));
        assert!(session
            .events
            .outcomes
            .iter()
            .any(|o| *o == OutcomeEvent::SessionWon));
    }

    #[test]
    fn test_countdown_peels_whole_seconds() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);
        open_current_door(&mut session, &layout);

        session.tick(0.5);
        assert_eq!(session.seconds_left(), Some(120));
        session.tick(0.6);
        assert_eq!(session.seconds_left(), Some(119));
        session.tick(2.0);
        assert_eq!(session.seconds_left(), Some(117));
    }

    #[test]
    fn test_timeout_fails_session_with_props_standing() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);
        open_current_door(&mut session, &layout);

        // Smash all but three, then let the clock die
        let props = standing_props(&session);
        for prop in &props[..props.len() - 3] {
            session.smash(*prop);
        }
        session.tick(120.0);

        assert_eq!(session.phase, RoomPhase::Failed);
        assert_eq!(session.outcome, Some(SessionOutcome::OutOfTime));
        assert!(session
            .events
            .outcomes
            .iter()
            .any(|o| *o == OutcomeEvent::OutOfTime { room: 1 }));
    }

    #[test]
    fn test_no_smashing_after_failure() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);
        open_current_door(&mut session, &layout);
        session.tick(120.0);
        assert!(session.is_over());

        let score_before = session.score;
        for prop in standing_props(&session) {
            session.smash(prop);
        }
        assert_eq!(session.score, score_before);
        assert_eq!(session.phase, RoomPhase::Failed);
    }

    #[test]
    fn test_no_door_opens_after_failure() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);
        open_current_door(&mut session, &layout);
        session.tick(120.0);

        let door_two = session.world.door_for_room(2).unwrap();
        session.interact_door(door_two, &layout);
        assert!(!session.world.door_open(2));
    }

    #[test]
    fn test_clock_does_not_run_while_locked() {
        let (mut session, _) = fresh_session();
        grab_hammer(&mut session);
        session.tick(500.0);
        assert_eq!(session.phase, RoomPhase::Locked);
        assert!(!session.is_over());
    }

    #[test]
    fn test_restart_is_a_fresh_session() {
        let (mut session, layout) = fresh_session();
        grab_hammer(&mut session);
        open_current_door(&mut session, &layout);
        session.tick(120.0);
        assert!(session.is_over());

        // Restart = drop and rebuild
        let (session, _) = fresh_session();
        assert_eq!(session.score, 0);
        assert_eq!(session.current_room, 1);
        assert!(!session.has_hammer);
        assert_eq!(session.phase, RoomPhase::Locked);
        assert!(!session.world.door_open(1));
    }
}
