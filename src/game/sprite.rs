//! Sprite Images and Pixel Collision Masks
//!
//! A [`SpriteImage`] is decoded RGBA pixels plus a per-pixel collision mask
//! derived from the alpha channel. Images are immutable once built and are
//! shared between sprites through `Arc`.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique image IDs (display surfaces key GPU
/// textures on this)
static IMAGE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Alpha values above this count as solid for collisions.
pub const ALPHA_THRESHOLD: u8 = 127;

/// One bit per pixel: is this pixel solid?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    /// Row-major, `width * height` entries
    solid: Vec<bool>,
}

impl CollisionMask {
    /// Build a mask from tightly packed RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Self {
        let solid = rgba
            .chunks_exact(4)
            .take((width * height) as usize)
            .map(|px| px[3] > ALPHA_THRESHOLD)
            .collect();
        Self { width, height, solid }
    }

    /// Is the pixel at (x, y) solid? Out-of-bounds is never solid.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.solid[(y as u32 * self.width + x as u32) as usize]
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    /// Does `other`, placed at `offset` relative to this mask's top-left
    /// corner, share at least one solid pixel with this mask?
    pub fn overlaps(&self, other: &CollisionMask, offset: (i32, i32)) -> bool {
        let (ox, oy) = offset;

        // Intersection of the two rectangles in this mask's coordinates
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + other.width as i32).min(self.width as i32);
        let y1 = (oy + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        (y0..y1).any(|y| (x0..x1).any(|x| self.get(x, y) && other.get(x - ox, y - oy)))
    }
}

/// Decoded, immutable sprite pixels.
#[derive(Debug)]
pub struct SpriteImage {
    id: u64,
    width: u32,
    height: u32,
    /// RGBA8, row-major
    rgba: Vec<u8>,
    mask: CollisionMask,
}

impl SpriteImage {
    /// Wrap raw RGBA8 pixels. `rgba.len()` must be `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(rgba.len(), (width * height * 4) as usize);
        let mask = CollisionMask::from_rgba(width, height, &rgba);
        Self {
            id: IMAGE_ID_COUNTER.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            rgba,
            mask,
        }
    }

    /// Stable unique ID for this image (used as a texture cache key).
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn mask(&self) -> &CollisionMask {
        &self.mask
    }
}
