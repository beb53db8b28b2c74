//! Game Foundation Module
//!
//! A lightweight ECS-inspired core for the rage room. Inspired by Bevy's
//! patterns but cut down to exactly what a one-hammer smash game needs.
//!
//! Key concepts:
//! - Entity: generational index for safe references to despawnable props
//! - Component: plain data structs attached to entities
//! - World: container for all entities and their components
//! - Events: decoupled communication between systems
//! - GameSession: the one owner of a play-through's mutable state
//!
//! Design philosophy:
//! - Simple over flexible (we know what game we're making)
//! - State lives in values, not handles (the countdown is data inside the
//!   active phase, so leaving the phase tears it down)

// Allow unused code - parts of the foundation API are exercised by tests only
#![allow(dead_code)]

pub mod entity;
pub mod component;
pub mod components;
pub mod world;
pub mod event;
pub mod ray;
pub mod spawn;
pub mod session;
pub mod movement;
pub mod interact;
pub mod particles;

// Re-export main types
pub use entity::Entity;
pub use world::World;
pub use event::Events;
pub use session::{GameSession, RoomPhase, SessionOutcome};
