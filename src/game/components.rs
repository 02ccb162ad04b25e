//! Game Components
//!
//! Plain data attached to entities. Behavior lives in the systems.

use std::sync::Arc;

use super::sprite::{CollisionMask, SpriteImage};

// =============================================================================
// Physics / Movement
// =============================================================================

/// World position in pixels, y grows downward
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Velocity in pixels per second
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Drawable image with a pixel collision mask. Immutable after construction;
/// clones share the same pixels.
#[derive(Debug, Clone)]
pub struct Sprite {
    image: Arc<SpriteImage>,
}

impl Sprite {
    pub fn new(image: Arc<SpriteImage>) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &SpriteImage {
        &self.image
    }

    /// (width, height) in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    pub fn mask(&self) -> &CollisionMask {
        self.image.mask()
    }
}

/// Marks the scrolling background tile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Background;

/// Blink countdown after a hit. Removed when it reaches zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flicker {
    /// Seconds left
    pub remaining: f32,
}

impl Flicker {
    pub fn new(duration: f32) -> Self {
        Self { remaining: duration }
    }

    /// Drawn on even 100ms windows, hidden on odd ones.
    pub fn is_visible(&self) -> bool {
        ((self.remaining * 10.0).floor() as i64).rem_euclid(2) == 0
    }
}

// =============================================================================
// Combat
// =============================================================================

/// Hit points of the player ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
}

impl Health {
    pub fn new(hp: i32) -> Self {
        Self { hp }
    }

    /// Apply damage and return the remaining hp. Overkill goes negative.
    pub fn damage(&mut self, amount: i32) -> i32 {
        self.hp -= amount;
        self.hp
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// Damage an obstacle deals on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub amount: i32,
}

impl Damage {
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_subtracts() {
        let mut health = Health::new(2);
        assert_eq!(health.damage(1), 1);
        assert!(!health.is_dead());
        assert_eq!(health.damage(5), -4);
        assert!(health.is_dead());
    }

    #[test]
    fn test_flicker_blinks_every_100ms() {
        assert!(Flicker::new(0.60).is_visible()); // floor(6.0) = 6
        assert!(!Flicker::new(0.55).is_visible()); // floor(5.5) = 5
        assert!(Flicker::new(0.45).is_visible()); // 4
        assert!(!Flicker::new(0.15).is_visible()); // 1
        assert!(Flicker::new(0.05).is_visible()); // 0
    }
}
