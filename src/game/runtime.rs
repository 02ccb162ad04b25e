//! Game Session
//!
//! One play-through, from the ship appearing to its last hit point. The
//! session owns the world, the difficulty state, the score and the ordered
//! system pipeline. The app shell drives it through `start` / `tick` / `end`
//! and never touches the world directly.

use log::{error, info};
use rand::Rng;

use super::component::ComponentKind as K;
use super::components::{Background, Health, Position, Sprite};
use super::entity::Entity;
use super::error::EcsError;
use super::event::Events;
use super::host::{AudioPlayer, DisplaySurface};
use super::systems::{
    Bounds, CollisionSystem, DifficultyState, FlickerSystem, MovementSystem, RenderingSystem, ScrollingSystem,
    SpawnSettings, SpawnSystem, System, TickContext,
};
use super::world::World;
use crate::assets::GameAssets;
use crate::config::GameConfig;

/// Key state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    /// Start / continue on menu screens
    pub confirm: bool,
    pub quit: bool,
}

impl InputState {
    /// -1 for left, +1 for right, 0 for neither or both.
    pub fn steer(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// The ship is destroyed (or gone)
    pub is_over: bool,
    pub score: u32,
}

/// A running game.
pub struct Session {
    world: World,
    events: Events,
    difficulty: DifficultyState,
    bounds: Bounds,
    ship: Entity,
    ship_speed: f32,
    /// Run in this order every tick
    systems: Vec<Box<dyn System>>,
    score: u32,
    hits: u32,
    elapsed: f32,
}

impl Session {
    /// Register components, place the ship and the background, and build
    /// the system pipeline.
    pub fn start<R: Rng + 'static>(config: &GameConfig, assets: &GameAssets, rng: R) -> Result<Self, EcsError> {
        let mut world = World::new();
        world.register_all()?;

        let bounds = Bounds {
            width: config.window.width as f32,
            height: config.window.height as f32,
        };

        let ship_sprite: Sprite = assets.ship.clone();
        let (ship_w, _) = ship_sprite.size();
        let ship = world.create()?;
        world.assign(
            ship,
            Position::new(
                (bounds.width - ship_w as f32) / 2.0,
                bounds.height - config.ship.bottom_margin,
            ),
        )?;
        world.assign(ship, ship_sprite)?;
        world.assign(ship, Health::new(config.ship.hp))?;

        let background = world.create()?;
        world.assign(background, Position::new(0.0, 0.0))?;
        world.assign(background, assets.background.clone())?;
        world.assign(background, Background)?;

        let systems: Vec<Box<dyn System>> = vec![
            Box::new(MovementSystem),
            Box::new(ScrollingSystem),
            Box::new(CollisionSystem::new(config.collision.flicker_duration)),
            Box::new(RenderingSystem),
            Box::new(SpawnSystem::new(
                SpawnSettings::from(&config.spawn),
                assets.obstacles.clone(),
                rng,
            )),
            Box::new(FlickerSystem),
        ];

        info!(
            "Session started: ship {} hp {}, {}x{} window, {} obstacle variants",
            ship,
            config.ship.hp,
            config.window.width,
            config.window.height,
            assets.obstacles.len()
        );

        Ok(Self {
            world,
            events: Events::new(),
            difficulty: DifficultyState::new(config.difficulty.initial_speed, config.difficulty.ramp_rate),
            bounds,
            ship,
            ship_speed: config.ship.speed,
            systems,
            score: 0,
            hits: 0,
            elapsed: 0.0,
        })
    }

    /// Advance the game by `dt` seconds and draw one frame.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &InputState,
        audio: &mut dyn AudioPlayer,
        display: &mut dyn DisplaySurface,
    ) -> Result<TickOutcome, EcsError> {
        self.steer_ship(dt, input)?;

        let mut ctx = TickContext {
            dt,
            bounds: self.bounds,
            difficulty: &mut self.difficulty,
            events: &mut self.events,
            score: self.score,
            audio,
            display,
        };
        for system in self.systems.iter_mut() {
            if let Err(e) = system.run(&mut self.world, &mut ctx) {
                error!("{} system failed: {}", system.name(), e);
                return Err(e);
            }
            // Obstacles that left this tick count immediately, HUD included
            ctx.score = self.score + ctx.events.offscreen.len() as u32;
        }

        self.score = ctx.score;
        self.hits += self.events.hits.len() as u32;
        self.events.clear_all();
        self.elapsed += dt;

        Ok(TickOutcome {
            is_over: self.is_over(),
            score: self.score,
        })
    }

    /// Finish the session and return the final score.
    pub fn end(self) -> u32 {
        info!(
            "Session ended after {:.1}s: score {}, {} hits taken",
            self.elapsed, self.score, self.hits
        );
        self.score
    }

    /// Ship gone or out of hit points.
    pub fn is_over(&self) -> bool {
        match self.world.get::<Health>(self.ship) {
            Ok(health) => health.is_dead(),
            Err(_) => true,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Collisions so far
    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn ship(&self) -> Entity {
        self.ship
    }

    #[cfg(test)]
    pub fn difficulty(&self) -> &DifficultyState {
        &self.difficulty
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Horizontal ship control, clamped so the sprite stays on screen.
    fn steer_ship(&mut self, dt: f32, input: &InputState) -> Result<(), EcsError> {
        if !self.world.is_alive(self.ship) || !self.world.has(self.ship, K::Position) {
            return Ok(());
        }
        let ship_w = match self.world.get::<Sprite>(self.ship) {
            Ok(sprite) => sprite.size().0 as f32,
            Err(_) => 0.0,
        };
        let max_x = (self.bounds.width - ship_w).max(0.0);
        let position = self.world.get_mut::<Position>(self.ship)?;
        position.x = (position.x + input.steer() * self.ship_speed * dt).clamp(0.0, max_x);
        Ok(())
    }
}
