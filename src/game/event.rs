//! Event System
//!
//! Systems report what happened during a tick through event queues instead
//! of reaching into session state:
//! 1. Collision system detects a hit → sends HitEvent
//! 2. Movement system despawns an obstacle below the window → sends OffscreenEvent
//! 3. The session reads both after the systems ran (hit count, score), then clears

use super::entity::Entity;

/// A queue for events of a single type.
/// Events are collected during the tick and drained by the session.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    #[cfg(test)]
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    #[cfg(test)]
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
#[derive(Debug, Default)]
pub struct Events {
    /// Obstacle hit the ship
    pub hits: EventQueue<HitEvent>,

    /// Entity fell past the bottom of the window and was destroyed
    pub offscreen: EventQueue<OffscreenEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Call at end of tick.
    pub fn clear_all(&mut self) {
        self.hits.clear();
        self.offscreen.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// An obstacle collided with the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitEvent {
    pub ship: Entity,
    /// Already destroyed when the event is read
    pub obstacle: Entity,
    pub damage: i32,
    /// Ship hp after the hit
    pub remaining_hp: i32,
}

/// An entity left the window through the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffscreenEvent {
    /// Already destroyed when the event is read
    pub entity: Entity,
}
