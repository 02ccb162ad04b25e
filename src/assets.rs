//! Sprite Assets
//!
//! Decodes sprite sheets from disk with the `image` crate and hands out
//! `Sprite` components at whatever square size the game asks for. Scaled
//! images are cached per size, so a hundred obstacles of the same size share
//! one pixel buffer (and one GPU texture).
//!
//! A missing or undecodable file is not fatal: the game logs a warning and
//! substitutes a generated placeholder of the same role.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{GenericImageView, Rgba, RgbaImage};
use log::{debug, info, warn};
use thiserror::Error;

use crate::config::GameConfig;
use crate::game::components::Sprite;
use crate::game::sprite::SpriteImage;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// A decoded source image plus its scaled variants.
#[derive(Debug, Clone)]
pub struct SpriteAsset {
    name: String,
    source: Arc<RgbaImage>,
    cache: HashMap<(u32, u32), Arc<SpriteImage>>,
}

impl SpriteAsset {
    pub fn from_image(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            source: Arc::new(image),
            cache: HashMap::new(),
        }
    }

    /// Decode an image file (PNG, JPEG or BMP).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| AssetError::Decode {
            path: path.display().to_string(),
            source,
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let (width, height) = image.dimensions();
        info!("Loaded {} ({}x{})", path.display(), width, height);
        Ok(Self::from_image(name, image.to_rgba8()))
    }

    /// Load `path`, or fall back to `fallback()` with a warning.
    pub fn load_or<P: AsRef<Path>>(path: P, fallback: impl FnOnce() -> Self) -> Self {
        match Self::load(path) {
            Ok(asset) => asset,
            Err(e) => {
                warn!("{}; using placeholder", e);
                fallback()
            }
        }
    }

    /// Filled ellipse on a transparent background, so the corners are not
    /// solid for collision.
    pub fn placeholder(name: &str, width: u32, height: u32, color: [u8; 4]) -> Self {
        let (rx, ry) = (width as f32 / 2.0, height as f32 / 2.0);
        let image = RgbaImage::from_fn(width, height, |x, y| {
            let dx = (x as f32 + 0.5 - rx) / rx;
            let dy = (y as f32 + 0.5 - ry) / ry;
            if dx * dx + dy * dy <= 1.0 {
                Rgba(color)
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        Self::from_image(name, image)
    }

    /// Upward-pointing triangle, the stand-in for the player ship.
    pub fn placeholder_ship(width: u32, height: u32, color: [u8; 4]) -> Self {
        let half = width as f32 / 2.0;
        let image = RgbaImage::from_fn(width, height, |x, y| {
            let reach = half * (y as f32 + 1.0) / height as f32;
            if (x as f32 + 0.5 - half).abs() <= reach {
                Rgba(color)
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        Self::from_image("ship", image)
    }

    /// Opaque dark tile with a sprinkling of stars.
    pub fn placeholder_starfield(width: u32, height: u32) -> Self {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            // Cheap integer hash, stable across runs
            let h = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)) % 97;
            if h == 0 {
                Rgba([230, 230, 255, 255])
            } else {
                Rgba([8, 8, 24, 255])
            }
        });
        Self::from_image("starfield", image)
    }

    #[cfg(test)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// (width, height) of the source image
    pub fn source_size(&self) -> (u32, u32) {
        self.source.dimensions()
    }

    /// A sprite at `size`, or at the source size when `None`.
    pub fn sprite(&mut self, size: Option<(u32, u32)>) -> Sprite {
        let size = size.unwrap_or_else(|| self.source_size());
        let source = &self.source;
        let name = &self.name;
        let image = self.cache.entry(size).or_insert_with(|| {
            debug!("Scaling sprite {} to {}x{}", name, size.0, size.1);
            let scaled = if source.dimensions() == size {
                (**source).clone()
            } else {
                imageops::resize(&**source, size.0, size.1, FilterType::Nearest)
            };
            Arc::new(SpriteImage::from_rgba(size.0, size.1, scaled.into_raw()))
        });
        Sprite::new(Arc::clone(image))
    }
}

/// Every image a session needs.
#[derive(Debug, Clone)]
pub struct GameAssets {
    pub ship: Sprite,
    pub background: Sprite,
    pub obstacles: Vec<SpriteAsset>,
}

impl GameAssets {
    /// Load every sprite named in the config, substituting placeholders for
    /// files that fail to load.
    pub fn load(config: &GameConfig) -> Self {
        let paths = &config.assets;
        let ship_size = config.ship.size;
        let tile = config.background.tile_size;

        let mut ship = SpriteAsset::load_or(&paths.ship, || {
            SpriteAsset::placeholder_ship(ship_size, ship_size, [170, 90, 230, 255])
        });
        let mut background =
            SpriteAsset::load_or(&paths.background, || SpriteAsset::placeholder_starfield(tile, tile));

        let mut obstacles: Vec<SpriteAsset> = paths
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, path)| {
                SpriteAsset::load_or(path, || {
                    SpriteAsset::placeholder(&format!("obstacle{}", i), 64, 64, placeholder_tint(i))
                })
            })
            .collect();
        if obstacles.is_empty() {
            warn!("No obstacle sprites configured; using a placeholder");
            obstacles.push(SpriteAsset::placeholder("obstacle", 64, 64, placeholder_tint(0)));
        }

        Self {
            ship: ship.sprite(Some((ship_size, ship_size))),
            background: background.sprite(Some((tile, tile))),
            obstacles,
        }
    }

    /// Generated sprites only; no file access.
    pub fn placeholders(config: &GameConfig) -> Self {
        let ship_size = config.ship.size;
        let tile = config.background.tile_size;
        Self {
            ship: SpriteAsset::placeholder_ship(ship_size, ship_size, [170, 90, 230, 255]).sprite(None),
            background: SpriteAsset::placeholder_starfield(tile, tile).sprite(None),
            obstacles: vec![SpriteAsset::placeholder("obstacle", 64, 64, placeholder_tint(0))],
        }
    }
}

fn placeholder_tint(index: usize) -> [u8; 4] {
    const TINTS: [[u8; 4]; 3] = [[150, 100, 60, 255], [120, 120, 130, 255], [190, 60, 50, 255]];
    TINTS[index % TINTS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_corners_are_transparent() {
        let mut asset = SpriteAsset::placeholder("rock", 20, 20, [255, 0, 0, 255]);
        let sprite = asset.sprite(None);
        let mask = sprite.mask();

        assert!(!mask.get(0, 0));
        assert!(!mask.get(19, 19));
        assert!(mask.get(10, 10));
    }

    #[test]
    fn test_scaled_sprites_are_cached() {
        let mut asset = SpriteAsset::placeholder("rock", 16, 16, [255, 0, 0, 255]);

        let a = asset.sprite(Some((32, 32)));
        let b = asset.sprite(Some((32, 32)));
        let c = asset.sprite(Some((48, 48)));

        assert_eq!(a.image().id(), b.image().id());
        assert_ne!(a.image().id(), c.image().id());
        assert_eq!(c.size(), (48, 48));
        assert_eq!(asset.source_size(), (16, 16));
    }

    #[test]
    fn test_load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        let mut img = RgbaImage::new(4, 2);
        img.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        img.save(&path).unwrap();

        let mut asset = SpriteAsset::load(&path).unwrap();
        assert_eq!(asset.name(), "dot");

        let sprite = asset.sprite(None);
        assert_eq!(sprite.size(), (4, 2));
        assert_eq!(sprite.mask().count(), 1);
        assert!(sprite.mask().get(1, 1));
    }

    #[test]
    fn test_missing_file_falls_back() {
        assert!(matches!(
            SpriteAsset::load("does/not/exist.png"),
            Err(AssetError::Decode { .. })
        ));

        let asset = SpriteAsset::load_or("does/not/exist.png", || SpriteAsset::placeholder_starfield(8, 8));
        assert_eq!(asset.name(), "starfield");
    }

    #[test]
    fn test_game_assets_use_configured_sizes() {
        let mut config = GameConfig::default();
        config.assets.ship = "missing/ship.png".to_string();
        config.assets.background = "missing/bg.png".to_string();
        config.assets.obstacles = vec!["missing/a.png".to_string(), "missing/b.png".to_string()];

        let assets = GameAssets::load(&config);

        assert_eq!(assets.ship.size(), (config.ship.size, config.ship.size));
        let tile = config.background.tile_size;
        assert_eq!(assets.background.size(), (tile, tile));
        assert_eq!(assets.obstacles.len(), 2);
        // Background tiles are fully opaque
        assert_eq!(assets.background.mask().count(), (tile * tile) as usize);
    }
}
