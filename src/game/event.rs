//! Event queues
//!
//! Events decouple the session from its observers. A smash is detected by
//! the resolver, scored by the session, shown by the HUD, and burst into
//! particles by the scene. Each consumer reads the queue without knowing
//! about the others. Queues are drained during the frame and cleared at its
//! end.

use macroquad::prelude::Vec3;
use super::components::PropKind;

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue).
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue).
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all game events.
pub struct Events {
    /// A prop was smashed
    pub smashes: EventQueue<SmashEvent>,

    /// A room door was opened (room activated)
    pub doors_opened: EventQueue<DoorOpenedEvent>,

    /// The hammer changed hands (world-placed to player-held)
    pub hammer_taken: EventQueue<HammerTakenEvent>,

    /// User-guidance hints (wrong door, no hammer yet)
    pub hints: EventQueue<HintEvent>,

    /// Room cleared / failed / session won
    pub outcomes: EventQueue<OutcomeEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self {
            smashes: EventQueue::new(),
            doors_opened: EventQueue::new(),
            hammer_taken: EventQueue::new(),
            hints: EventQueue::new(),
            outcomes: EventQueue::new(),
        }
    }

    /// Clear all queues. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.smashes.clear();
        self.doors_opened.clear();
        self.hammer_taken.clear();
        self.hints.clear();
        self.outcomes.clear();
    }
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// A prop was smashed.
#[derive(Debug, Clone, Copy)]
pub struct SmashEvent {
    /// Where it stood (for the shatter burst)
    pub position: Vec3,
    pub kind: PropKind,
    /// Points awarded
    pub points: u32,
}

/// A room door was opened and the room went active.
#[derive(Debug, Clone, Copy)]
pub struct DoorOpenedEvent {
    pub room: usize,
}

/// The hammer was picked up.
#[derive(Debug, Clone, Copy)]
pub struct HammerTakenEvent {
    pub position: Vec3,
}

/// A transient user-facing hint.
#[derive(Debug, Clone, Copy)]
pub struct HintEvent {
    pub text: &'static str,
    /// How long the toast should stay up
    pub seconds: f32,
}

/// Terminal and per-room outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeEvent {
    RoomCleared { room: usize },
    OutOfTime { room: usize },
    SessionWon,
}
