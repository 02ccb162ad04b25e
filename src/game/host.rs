//! Host Collaborators
//!
//! The simulation never touches the window, the audio device or the font
//! renderer directly. It talks to these traits; `platform.rs` implements them
//! on top of macroquad and the tests implement them with recorders.

use macroquad::color::Color;

use super::sprite::SpriteImage;

/// Something a frame can be drawn onto.
pub trait DisplaySurface {
    /// Fill the whole frame with one color.
    fn clear(&mut self, color: Color);

    /// Draw an image with its top-left corner at (x, y).
    fn blit(&mut self, image: &SpriteImage, x: f32, y: f32);

    /// Draw text with its baseline-left at (x, y).
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);

    /// The frame is complete.
    fn present(&mut self);
}

/// Sounds the game can cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Background music, looped while a session runs
    Music,
    /// Ship took damage and survived
    Hit,
    /// Ship was destroyed
    GameOver,
}

impl SoundCue {
    pub const ALL: [SoundCue; 3] = [SoundCue::Music, SoundCue::Hit, SoundCue::GameOver];
}

/// Plays previously loaded sounds.
pub trait AudioPlayer {
    fn play(&mut self, cue: SoundCue, looped: bool);
    fn stop(&mut self, cue: SoundCue);
}

/// Audio sink that drops everything (no audio device, or muted in config).
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play(&mut self, _cue: SoundCue, _looped: bool) {}
    fn stop(&mut self, _cue: SoundCue) {}
}
