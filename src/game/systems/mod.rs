//! Systems
//!
//! Each system is a small struct run once per tick against the world. They
//! run serially in a fixed order owned by the session, so every mutation is
//! visible to the systems after it in the same tick.

use super::error::EcsError;
use super::event::Events;
use super::host::{AudioPlayer, DisplaySurface};
use super::World;

mod collision;
mod flicker;
mod movement;
mod rendering;
mod scrolling;
mod spawn;

pub use collision::CollisionSystem;
pub use flicker::FlickerSystem;
pub use movement::MovementSystem;
pub use rendering::RenderingSystem;
pub use scrolling::ScrollingSystem;
pub use spawn::{SpawnSettings, SpawnSystem};

/// Visible play area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// Shared "current difficulty speed": drives the background scroll rate and
/// the fall velocity range of new obstacles. Grows without bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyState {
    /// Pixels per second
    pub speed: f32,
    /// Pixels per second, per second
    pub ramp_rate: f32,
}

impl DifficultyState {
    pub fn new(speed: f32, ramp_rate: f32) -> Self {
        Self { speed, ramp_rate }
    }

    pub fn ramp(&mut self, dt: f32) {
        self.speed += self.ramp_rate * dt;
    }
}

/// Everything a system may touch besides the world, for one tick.
pub struct TickContext<'a> {
    /// Seconds since the previous tick (any positive value)
    pub dt: f32,
    pub bounds: Bounds,
    pub difficulty: &'a mut DifficultyState,
    pub events: &'a mut Events,
    /// Shown in the HUD
    pub score: u32,
    pub audio: &'a mut dyn AudioPlayer,
    pub display: &'a mut dyn DisplaySurface,
}

/// One stage of the per-tick pipeline.
pub trait System {
    fn name(&self) -> &'static str;

    fn run(&mut self, world: &mut World, ctx: &mut TickContext<'_>) -> Result<(), EcsError>;
}
