//! Application state and screen management
//!
//! Three screens: the title menu, a running session, and the game-over
//! summary. Each frame the main loop hands the current input to `frame`,
//! which advances whichever screen is active and switches screens when the
//! player confirms or the ship is destroyed.

use log::{error, info};
use macroquad::color::{Color, BLACK, GRAY, RED, WHITE, YELLOW};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::GameAssets;
use crate::config::GameConfig;
use crate::game::{AudioPlayer, DisplaySurface, InputState, Session, SoundCue};

const TITLE_SIZE: f32 = 64.0;
const TEXT_SIZE: f32 = 32.0;

/// The active screen
pub enum Screen {
    Menu,
    Playing(Session),
    GameOver { score: u32 },
}

/// Main application state
pub struct AppState {
    pub screen: Screen,
    pub config: GameConfig,
    pub assets: GameAssets,
    /// Best score since launch
    pub high_score: u32,
    /// Seeds one spawn RNG per session
    rng: StdRng,
}

impl AppState {
    pub fn new(config: GameConfig, assets: GameAssets, seed: u64) -> Self {
        Self {
            screen: Screen::Menu,
            config,
            assets,
            high_score: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advance one frame. Returns false when the player asked to quit.
    pub fn frame(
        &mut self,
        dt: f32,
        input: &InputState,
        audio: &mut dyn AudioPlayer,
        display: &mut dyn DisplaySurface,
    ) -> bool {
        let dt = clamp_dt(dt, self.config.window.max_frame_time);

        let screen = std::mem::replace(&mut self.screen, Screen::Menu);
        self.screen = match screen {
            Screen::Menu => {
                if input.quit {
                    return false;
                }
                if input.confirm {
                    self.start_session(audio)
                } else {
                    self.draw_menu(display);
                    Screen::Menu
                }
            }
            Screen::Playing(session) => self.run_session(session, dt, input, audio, display),
            Screen::GameOver { score } => {
                if input.quit {
                    return false;
                }
                if input.confirm {
                    Screen::Menu
                } else {
                    self.draw_game_over(score, display);
                    Screen::GameOver { score }
                }
            }
        };
        true
    }

    fn start_session(&mut self, audio: &mut dyn AudioPlayer) -> Screen {
        let rng = StdRng::seed_from_u64(self.rng.gen());
        match Session::start(&self.config, &self.assets, rng) {
            Ok(session) => {
                audio.play(SoundCue::Music, true);
                Screen::Playing(session)
            }
            Err(e) => {
                error!("Failed to start session: {}", e);
                Screen::Menu
            }
        }
    }

    fn run_session(
        &mut self,
        mut session: Session,
        dt: f32,
        input: &InputState,
        audio: &mut dyn AudioPlayer,
        display: &mut dyn DisplaySurface,
    ) -> Screen {
        // Escape abandons the run
        if input.quit {
            audio.stop(SoundCue::Music);
            let score = session.end();
            info!("Run abandoned with score {}", score);
            return Screen::Menu;
        }

        match session.tick(dt, input, audio, display) {
            Ok(outcome) if outcome.is_over => {
                audio.stop(SoundCue::Music);
                audio.play(SoundCue::GameOver, false);
                let hits = session.hits();
                let score = session.end();
                info!("Game over: score {} after {} hits", score, hits);
                if score > self.high_score {
                    info!("New high score: {}", score);
                    self.high_score = score;
                }
                Screen::GameOver { score }
            }
            Ok(_) => Screen::Playing(session),
            Err(e) => {
                error!("Session aborted: {}", e);
                debug_assert!(e.is_capacity(), "session tick failed: {}", e);
                audio.stop(SoundCue::Music);
                Screen::Menu
            }
        }
    }

    fn draw_menu(&self, display: &mut dyn DisplaySurface) {
        let (w, h) = self.window_size();
        display.clear(BLACK);
        draw_centered(display, &self.config.window.title, w, h * 0.35, TITLE_SIZE, YELLOW);
        draw_centered(display, "Press SPACE to start", w, h * 0.5, TEXT_SIZE, WHITE);
        draw_centered(display, "Left / Right to steer, ESC to quit", w, h * 0.56, TEXT_SIZE * 0.75, GRAY);
        if self.high_score > 0 {
            draw_centered(display, &format!("Best: {}", self.high_score), w, h * 0.65, TEXT_SIZE, WHITE);
        }
        display.present();
    }

    fn draw_game_over(&self, score: u32, display: &mut dyn DisplaySurface) {
        let (w, h) = self.window_size();
        display.clear(BLACK);
        draw_centered(display, "GAME OVER", w, h * 0.35, TITLE_SIZE, RED);
        draw_centered(display, &format!("Score: {}", score), w, h * 0.5, TEXT_SIZE, WHITE);
        draw_centered(display, "Press SPACE to continue", w, h * 0.6, TEXT_SIZE, GRAY);
        display.present();
    }

    fn window_size(&self) -> (f32, f32) {
        (self.config.window.width as f32, self.config.window.height as f32)
    }
}

/// Keep dt positive and below `max` so a stalled frame (window drag,
/// debugger) cannot teleport obstacles through the ship.
pub fn clamp_dt(dt: f32, max: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, max)
    } else {
        0.0
    }
}

/// Rough horizontal centering; glyphs average about half the font size wide.
fn draw_centered(display: &mut dyn DisplaySurface, text: &str, width: f32, y: f32, size: f32, color: Color) {
    let text_width = text.chars().count() as f32 * size * 0.5;
    display.draw_text(text, ((width - text_width) / 2.0).max(0.0), y, size, color);
}
