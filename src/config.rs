//! Game configuration
//!
//! Tunables live in an optional RON file (`assets/config.ron`). Every section
//! is `#[serde(default)]`, so a file only needs the values it overrides and a
//! missing file means "all defaults". Only the app shell reads this file; the
//! simulation receives plain values.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default location of the config file, relative to the working directory
pub const CONFIG_PATH: &str = "assets/config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub ship: ShipConfig,
    pub background: BackgroundConfig,
    pub difficulty: DifficultyConfig,
    pub spawn: SpawnConfig,
    pub collision: CollisionConfig,
    pub audio: AudioConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frame pacing target; 0 disables the limiter
    pub target_fps: u32,
    /// Longest dt handed to the simulation, in seconds
    pub max_frame_time: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub hp: i32,
    /// Square sprite size in pixels
    pub size: u32,
    /// Horizontal speed in pixels per second
    pub speed: f32,
    /// Distance from the bottom of the window to the ship's top edge
    pub bottom_margin: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Square tile size in pixels
    pub tile_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    /// Starting scroll / fall speed, pixels per second
    pub initial_speed: f32,
    /// Speed gained per second of play
    pub ramp_rate: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Chance of spawning one obstacle on any tick
    pub probability: f64,
    pub min_size: u32,
    pub max_size: u32,
    /// Spawn height, above the top edge
    pub start_y: f32,
    pub damage: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Seconds the ship blinks after a hit
    pub flicker_duration: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub music_volume: f32,
    pub sfx_volume: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub ship: String,
    pub background: String,
    /// One entry per obstacle sprite variant
    pub obstacles: Vec<String>,
    pub music: String,
    pub hit_sound: String,
    pub game_over_sound: String,
    /// TTF font for the HUD; macroquad's built-in font when None
    pub font: Option<String>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "INVADE SPACERS".to_string(),
            width: 600,
            height: 800,
            target_fps: 60,
            max_frame_time: 0.25,
        }
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            hp: 5,
            size: 86,
            speed: 200.0,
            bottom_margin: 120.0,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self { tile_size: 128 }
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            initial_speed: 60.0,
            ramp_rate: 2.0,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            probability: 0.015,
            min_size: 40,
            max_size: 96,
            start_y: -100.0,
            damage: 1,
        }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { flicker_duration: 0.6 }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            music_volume: 0.6,
            sfx_volume: 0.8,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            ship: "assets/ships/purple.png".to_string(),
            background: "assets/backgrounds/Space_Stars6.png".to_string(),
            obstacles: vec![
                "assets/ships/brown.png".to_string(),
                "assets/asteroids/rock.png".to_string(),
            ],
            music: "assets/sounds/music.ogg".to_string(),
            hit_sound: "assets/sounds/hit.wav".to_string(),
            game_over_sound: "assets/sounds/game_over.wav".to_string(),
            font: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_ron(&fs::read_to_string(path)?)
    }

    /// Load the config file, falling back to defaults if it is missing or
    /// broken.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write the config as pretty RON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        let text = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Reject values the simulation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window must be non-empty, got {}x{}",
                self.window.width, self.window.height
            ));
        }
        if !(0.0..=1.0).contains(&self.spawn.probability) {
            return invalid(format!(
                "spawn.probability must be within 0..=1, got {}",
                self.spawn.probability
            ));
        }
        if self.spawn.min_size == 0 || self.spawn.min_size > self.spawn.max_size {
            return invalid(format!(
                "spawn sizes must satisfy 0 < min <= max, got {}..{}",
                self.spawn.min_size, self.spawn.max_size
            ));
        }
        if self.spawn.max_size >= self.window.width {
            return invalid(format!(
                "spawn.max_size {} does not fit a {} px wide window",
                self.spawn.max_size, self.window.width
            ));
        }
        if self.ship.size == 0 || self.background.tile_size == 0 {
            return invalid("ship.size and background.tile_size must be positive".to_string());
        }
        for (name, value) in [
            ("difficulty.initial_speed", self.difficulty.initial_speed),
            ("difficulty.ramp_rate", self.difficulty.ramp_rate),
            ("ship.speed", self.ship.speed),
            ("collision.flicker_duration", self.collision.flicker_duration),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{} must be finite and non-negative, got {}", name, value));
            }
        }
        if self.spawn.damage < 0 {
            return invalid(format!("spawn.damage must be non-negative, got {}", self.spawn.damage));
        }
        if self.window.max_frame_time <= 0.0 {
            return invalid(format!(
                "window.max_frame_time must be positive, got {}",
                self.window.max_frame_time
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = GameConfig::from_ron("(spawn: (probability: 0.5), ship: (hp: 3))").unwrap();
        assert_eq!(config.spawn.probability, 0.5);
        assert_eq!(config.spawn.max_size, SpawnConfig::default().max_size);
        assert_eq!(config.ship.hp, 3);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_ron("(spawn: (probability: 1.5))"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_ron("(spawn: (min_size: 50, max_size: 10))"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(GameConfig::from_ron("(window: ("), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_bad_difficulty_and_damage() {
        for text in [
            "(difficulty: (ramp_rate: -1.0))",
            "(difficulty: (initial_speed: -60.0))",
            "(spawn: (damage: -2))",
        ] {
            assert!(
                matches!(GameConfig::from_ron(text), Err(ConfigError::Invalid(_))),
                "accepted {}",
                text
            );
        }

        let mut config = GameConfig::default();
        config.difficulty.initial_speed = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.difficulty.ramp_rate = f32::INFINITY;
        assert!(config.validate().is_err());

        // Zero is a flat difficulty curve and harmless obstacles
        let config = GameConfig::from_ron("(difficulty: (ramp_rate: 0.0), spawn: (damage: 0))").unwrap();
        assert_eq!(config.difficulty.ramp_rate, 0.0);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");

        let mut config = GameConfig::default();
        config.difficulty.ramp_rate = 7.5;
        config.assets.font = Some("fonts/hud.ttf".to_string());
        config.save(&path).unwrap();

        assert_eq!(GameConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        assert_eq!(GameConfig::load_or_default(&missing), GameConfig::default());

        let broken = dir.path().join("broken.ron");
        fs::write(&broken, "not ron at all").unwrap();
        assert_eq!(GameConfig::load_or_default(&broken), GameConfig::default());
    }
}
