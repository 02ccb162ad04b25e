//! Macroquad host adapters
//!
//! Implements the game's display and audio traits on top of macroquad, polls
//! the keyboard, and paces frames.

use std::collections::HashMap;

use log::{info, warn};
use macroquad::audio::{load_sound, play_sound, stop_sound, PlaySoundParams, Sound};
use macroquad::prelude::*;

use crate::config::{AssetConfig, AudioConfig};
use crate::game::{AudioPlayer, DisplaySurface, InputState, SoundCue, SpriteImage};

/// Draws onto the macroquad window, uploading each sprite image to the GPU
/// the first time it is blitted.
pub struct MacroquadDisplay {
    textures: HashMap<u64, Texture2D>,
    font: Option<Font>,
}

impl MacroquadDisplay {
    pub fn new(font: Option<Font>) -> Self {
        Self {
            textures: HashMap::new(),
            font,
        }
    }

    fn texture_for(&mut self, image: &SpriteImage) -> &Texture2D {
        self.textures.entry(image.id()).or_insert_with(|| {
            let texture = Texture2D::from_rgba8(image.width() as u16, image.height() as u16, image.rgba());
            texture.set_filter(FilterMode::Nearest);
            texture
        })
    }
}

impl DisplaySurface for MacroquadDisplay {
    fn clear(&mut self, color: Color) {
        clear_background(color);
    }

    fn blit(&mut self, image: &SpriteImage, x: f32, y: f32) {
        let texture = self.texture_for(image);
        draw_texture(texture, x, y, WHITE);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        draw_text_ex(
            text,
            x,
            y,
            TextParams {
                font: self.font.as_ref(),
                font_size: size as u16,
                color,
                ..Default::default()
            },
        );
    }

    fn present(&mut self) {
        // macroquad swaps buffers in next_frame(), awaited by the main loop
    }
}

/// Plays the sounds that loaded successfully; missing cues are silent.
pub struct MacroquadAudio {
    sounds: HashMap<SoundCue, Sound>,
    music_volume: f32,
    sfx_volume: f32,
}

impl MacroquadAudio {
    /// Load every cue named in the asset config.
    pub async fn load(audio: &AudioConfig, assets: &AssetConfig) -> Self {
        let mut sounds = HashMap::new();
        for cue in SoundCue::ALL {
            let path = match cue {
                SoundCue::Music => &assets.music,
                SoundCue::Hit => &assets.hit_sound,
                SoundCue::GameOver => &assets.game_over_sound,
            };
            match load_sound(path).await {
                Ok(sound) => {
                    info!("Loaded {:?} sound from {}", cue, path);
                    sounds.insert(cue, sound);
                }
                Err(e) => warn!("Failed to load {:?} sound {}: {}, it will be silent", cue, path, e),
            }
        }
        Self {
            sounds,
            music_volume: audio.music_volume,
            sfx_volume: audio.sfx_volume,
        }
    }
}

impl AudioPlayer for MacroquadAudio {
    fn play(&mut self, cue: SoundCue, looped: bool) {
        let Some(sound) = self.sounds.get(&cue) else {
            return;
        };
        let volume = match cue {
            SoundCue::Music => self.music_volume,
            SoundCue::Hit | SoundCue::GameOver => self.sfx_volume,
        };
        play_sound(sound, PlaySoundParams { looped, volume });
    }

    fn stop(&mut self, cue: SoundCue) {
        if let Some(sound) = self.sounds.get(&cue) {
            stop_sound(sound);
        }
    }
}

/// Read the keyboard for this frame.
pub fn poll_input() -> InputState {
    InputState {
        left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::Q) || is_key_down(KeyCode::A),
        right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        confirm: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter),
        quit: is_key_pressed(KeyCode::Escape),
    }
}

/// Holds each frame to a target duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePacer {
    /// Target frame time in seconds (None = unlocked)
    frame_time: Option<f64>,
}

impl FramePacer {
    /// `fps == 0` disables pacing.
    pub fn new(fps: u32) -> Self {
        Self {
            frame_time: (fps > 0).then(|| 1.0 / fps as f64),
        }
    }

    #[cfg(test)]
    pub fn frame_time(&self) -> Option<f64> {
        self.frame_time
    }

    /// Block until `frame_start + frame_time`.
    pub fn wait(&self, frame_start: f64) {
        let Some(target_frame_time) = self.frame_time else {
            return;
        };
        if get_time() - frame_start >= target_frame_time {
            return;
        }

        // Native: use sleep for bulk, then spin-wait for precision
        #[cfg(not(target_arch = "wasm32"))]
        {
            let spin_margin = 0.002; // 2ms
            while get_time() - frame_start + spin_margin < target_frame_time {
                std::thread::sleep(std::time::Duration::from_millis(1));
            }
            while get_time() - frame_start < target_frame_time {
                std::hint::spin_loop();
            }
        }
        // WASM: just spin-wait (no thread::sleep available)
        #[cfg(target_arch = "wasm32")]
        {
            while get_time() - frame_start < target_frame_time {
                std::hint::spin_loop();
            }
        }
    }
}
