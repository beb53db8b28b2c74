//! Static world data: chamber layout and the room progression config.

pub mod config;
pub mod layout;

pub use config::{ConfigError, Difficulty, RoomConfig, load_rooms_or_default, standard_rooms, validate_rooms};
pub use layout::{Chamber, Doorway, Layout, Slab, SurfaceKind, EYE_HEIGHT};
