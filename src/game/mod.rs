//! Game Foundation Module
//!
//! A small fixed-capacity ECS and the arcade game built on it.
//!
//! Key concepts:
//! - Entity: Generational index for safe entity references
//! - Component: Plain data values attached to entities, one bit per kind
//! - World: Container for all entities and their components, with bitmask
//!   queries
//! - System: One stage of the per-tick pipeline
//! - Event: Decoupled communication from systems back to the session
//!
//! Design philosophy:
//! - Simple over flexible (we know what game we're making)
//! - Fixed capacities, no allocation churn per tick
//! - Host services (drawing, sound) behind traits so the simulation runs
//!   headless in tests

pub mod component;
pub mod components;
pub mod entity;
pub mod error;
pub mod event;
pub mod host;
pub mod registry;
pub mod runtime;
pub mod sprite;
pub mod systems;
pub mod world;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use host::{AudioPlayer, DisplaySurface, SilentAudio, SoundCue};
pub use runtime::{InputState, Session};
pub use sprite::SpriteImage;
pub use world::World;
