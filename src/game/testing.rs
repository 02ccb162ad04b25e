//! Test doubles shared by the system and session tests.

use std::sync::Arc;

use macroquad::color::Color;

use super::components::Sprite;
use super::error::EcsError;
use super::event::Events;
use super::host::{AudioPlayer, DisplaySurface, SoundCue};
use super::sprite::SpriteImage;
use super::systems::{Bounds, DifficultyState, System, TickContext};
use super::World;

/// Fully opaque `width` x `height` sprite.
pub fn solid_sprite(width: u32, height: u32) -> Sprite {
    let rgba = vec![255u8; (width * height * 4) as usize];
    Sprite::new(Arc::new(SpriteImage::from_rgba(width, height, rgba)))
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Blit { image: u64, x: f32, y: f32 },
    Text(String),
    Present,
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub calls: Vec<DrawCall>,
    pub frames: usize,
}

impl RecordingDisplay {
    /// Positions `image` was drawn at, in draw order.
    pub fn blits_of(&self, image: u64) -> Vec<(f32, f32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Blit { image: id, x, y } if *id == image => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl DisplaySurface for RecordingDisplay {
    fn clear(&mut self, _color: Color) {
        self.calls.push(DrawCall::Clear);
    }

    fn blit(&mut self, image: &SpriteImage, x: f32, y: f32) {
        self.calls.push(DrawCall::Blit { image: image.id(), x, y });
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _color: Color) {
        self.calls.push(DrawCall::Text(text.to_string()));
    }

    fn present(&mut self) {
        self.calls.push(DrawCall::Present);
        self.frames += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub plays: Vec<(SoundCue, bool)>,
    pub stops: Vec<SoundCue>,
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, cue: SoundCue, looped: bool) {
        self.plays.push((cue, looped));
    }

    fn stop(&mut self, cue: SoundCue) {
        self.stops.push(cue);
    }
}

/// A world with every component kind registered, plus everything a system
/// needs to run one tick.
pub struct Harness {
    pub world: World,
    pub events: Events,
    pub difficulty: DifficultyState,
    pub bounds: Bounds,
    pub score: u32,
    pub audio: RecordingAudio,
    pub display: RecordingDisplay,
}

impl Harness {
    pub fn new() -> Self {
        let mut world = World::new();
        world.register_all().unwrap();
        Self {
            world,
            events: Events::new(),
            difficulty: DifficultyState::new(60.0, 2.0),
            bounds: Bounds {
                width: 600.0,
                height: 800.0,
            },
            score: 0,
            audio: RecordingAudio::default(),
            display: RecordingDisplay::default(),
        }
    }

    pub fn run(&mut self, system: &mut dyn System, dt: f32) -> Result<(), EcsError> {
        let mut ctx = TickContext {
            dt,
            bounds: self.bounds,
            difficulty: &mut self.difficulty,
            events: &mut self.events,
            score: self.score,
            audio: &mut self.audio,
            display: &mut self.display,
        };
        system.run(&mut self.world, &mut ctx)
    }
}
