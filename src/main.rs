//! INVADE SPACERS: dodge the falling junk for as long as the hull holds
//!
//! A tiny arcade game on a fixed-capacity ECS:
//! - Steer the ship left and right along the bottom of the screen
//! - Obstacles fall faster the longer you survive
//! - Every obstacle that makes it past you scores a point

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod assets;
mod config;
mod game;
mod platform;

use log::{info, warn};
use macroquad::prelude::*;

use app::AppState;
use assets::GameAssets;
use config::{GameConfig, CONFIG_PATH};
use game::{AudioPlayer, SilentAudio};
use platform::{poll_input, FramePacer, MacroquadAudio, MacroquadDisplay};

fn window_conf() -> Conf {
    let config = GameConfig::load_or_default(CONFIG_PATH);
    Conf {
        window_title: format!("{} v{}", config.window.title, VERSION),
        window_width: config.window.width as i32,
        window_height: config.window.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = GameConfig::load_or_default(CONFIG_PATH);
    // First launch: write every default out so players have a file to edit
    #[cfg(not(target_arch = "wasm32"))]
    if !std::path::Path::new(CONFIG_PATH).exists() {
        match config.save(CONFIG_PATH) {
            Ok(()) => info!("Wrote default config to {}", CONFIG_PATH),
            Err(e) => warn!("Could not write default config {}: {}", CONFIG_PATH, e),
        }
    }
    let assets = GameAssets::load(&config);

    let font = match &config.assets.font {
        Some(path) => match load_ttf_font(path).await {
            Ok(font) => {
                info!("Loaded font {}", path);
                Some(font)
            }
            Err(e) => {
                warn!("Failed to load font {}: {}, using the built-in font", path, e);
                None
            }
        },
        None => None,
    };

    let mut audio: Box<dyn AudioPlayer> = if config.audio.enabled {
        Box::new(MacroquadAudio::load(&config.audio, &config.assets).await)
    } else {
        info!("Audio disabled in config");
        Box::new(SilentAudio)
    };
    let mut display = MacroquadDisplay::new(font);
    let pacer = FramePacer::new(config.window.target_fps);

    // Clock seed; a fresh spawn pattern every launch
    let seed = (miniquad::date::now() * 1000.0) as u64;
    let mut app = AppState::new(config, assets, seed);

    info!("=== INVADE SPACERS v{} ===", VERSION);

    let mut last_frame = get_time();
    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();
        let dt = (frame_start - last_frame) as f32;
        last_frame = frame_start;

        let input = poll_input();
        if !app.frame(dt, &input, audio.as_mut(), &mut display) {
            info!("Quit requested, best score {}", app.high_score);
            break;
        }

        pacer.wait(frame_start);
        next_frame().await;
    }
}
