//! Scene entity components
//!
//! Components are plain data; behavior lives in the session and the
//! resolver. The old prototype tagged objects with loose boolean properties
//! and dispatched on whichever happened to be set; here every entity carries
//! exactly one `EntityKind`, and interaction dispatch is an exhaustive
//! match, so a misspelled tag is a compile error instead of a silent no-op.

/// What an entity is, for interaction dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// The one hammer, world-placed until picked up
    Hammer,
    /// A door leaf gating the given room number (1-based)
    Door { room: usize },
    /// A smashable prop
    Breakable { prop: PropKind },
    /// Solid scenery: tables, signs. Clicks pass through to nothing.
    Static,
}

/// The breakable palette. Point values are fixed per object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    Bottle,
    Vase,
    Television,
}

impl PropKind {
    pub const ALL: [PropKind; 3] = [PropKind::Bottle, PropKind::Vase, PropKind::Television];

    /// Score awarded when this prop is smashed.
    pub fn point_value(&self) -> u32 {
        match self {
            PropKind::Bottle => 100,
            PropKind::Vase => 150,
            PropKind::Television => 200,
        }
    }

    /// Half extents of the prop's collision/draw box.
    pub fn half_extents(&self) -> (f32, f32, f32) {
        match self {
            PropKind::Bottle => (0.12, 0.35, 0.12),
            PropKind::Vase => (0.25, 0.4, 0.25),
            PropKind::Television => (0.45, 0.35, 0.35),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropKind::Bottle => "bottle",
            PropKind::Vase => "vase",
            PropKind::Television => "television",
        }
    }
}

/// Per-prop data for breakables.
#[derive(Debug, Clone, Copy)]
pub struct Prop {
    pub kind: PropKind,
    /// Room this prop belongs to (1-based)
    pub room: usize,
}

/// Door state. A closed leaf is solid and drawable; an open one is neither.
#[derive(Debug, Clone, Copy)]
pub struct DoorState {
    /// Room number this door gates (1-based)
    pub room: usize,
    pub open: bool,
}

impl DoorState {
    pub fn closed(room: usize) -> Self {
        Self { room, open: false }
    }
}
