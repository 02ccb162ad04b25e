use log::debug;
use rand::Rng;

use super::{System, TickContext};
use crate::assets::SpriteAsset;
use crate::config::SpawnConfig;
use crate::game::components::{Damage, Position, Velocity};
use crate::game::error::EcsError;
use crate::game::World;

/// Obstacle spawn tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSettings {
    /// Chance per tick, independent of dt
    pub probability: f64,
    pub min_size: u32,
    pub max_size: u32,
    pub start_y: f32,
    pub damage: i32,
}

impl From<&SpawnConfig> for SpawnSettings {
    fn from(config: &SpawnConfig) -> Self {
        Self {
            probability: config.probability,
            min_size: config.min_size,
            max_size: config.max_size,
            start_y: config.start_y,
            damage: config.damage,
        }
    }
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self::from(&SpawnConfig::default())
    }
}

/// Randomly drops a new obstacle from above the window.
///
/// Each spawn picks a sprite variant, a square size, an x position that keeps
/// the sprite inside the window, and a fall speed between one and two times
/// the current difficulty speed. A full world skips the spawn.
pub struct SpawnSystem<R> {
    settings: SpawnSettings,
    variants: Vec<SpriteAsset>,
    rng: R,
}

impl<R: Rng> SpawnSystem<R> {
    pub fn new(settings: SpawnSettings, variants: Vec<SpriteAsset>, rng: R) -> Self {
        Self {
            settings,
            variants,
            rng,
        }
    }
}

impl<R: Rng> System for SpawnSystem<R> {
    fn name(&self) -> &'static str {
        "spawn"
    }

    fn run(&mut self, world: &mut World, ctx: &mut TickContext<'_>) -> Result<(), EcsError> {
        if self.variants.is_empty() || !self.rng.gen_bool(self.settings.probability.clamp(0.0, 1.0)) {
            return Ok(());
        }

        let min = self.settings.min_size.min(self.settings.max_size);
        let size = self.rng.gen_range(min..=self.settings.max_size);
        let variant = self.rng.gen_range(0..self.variants.len());
        let max_x = (ctx.bounds.width - size as f32).max(0.0);
        let x = self.rng.gen_range(0.0..=max_x);
        let speed = ctx.difficulty.speed;
        let dy = self.rng.gen_range(speed.min(2.0 * speed)..=speed.max(2.0 * speed));

        let entity = match world.create() {
            Ok(entity) => entity,
            Err(e) if e.is_capacity() => {
                debug!("Skipping spawn: {}", e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let sprite = self.variants[variant].sprite(Some((size, size)));

        world.assign(entity, Position::new(x, self.settings.start_y))?;
        world.assign(entity, Velocity::new(0.0, dy))?;
        world.assign(entity, sprite)?;
        world.assign(entity, Damage::new(self.settings.damage))?;

        debug!("Spawned {} ({}px, variant {}) at x={:.0} falling {:.0}px/s", entity, size, variant, x, dy);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::component::ComponentKind as K;
    use crate::game::components::Sprite;
    use crate::game::testing::Harness;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn system(probability: f64) -> SpawnSystem<StdRng> {
        let settings = SpawnSettings {
            probability,
            min_size: 30,
            max_size: 60,
            start_y: -60.0,
            damage: 2,
        };
        let variants = vec![
            SpriteAsset::placeholder("a", 16, 16, [200, 0, 0, 255]),
            SpriteAsset::placeholder("b", 24, 24, [0, 200, 0, 255]),
        ];
        SpawnSystem::new(settings, variants, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_spawns_obstacle_in_range() {
        let mut h = Harness::new();
        h.difficulty.speed = 80.0;
        let mut spawn = system(1.0);

        h.run(&mut spawn, 0.016).unwrap();

        let spawned = h.world.query(&[K::Position, K::Velocity, K::Sprite, K::Damage]).unwrap();
        assert_eq!(spawned.len(), 1);
        let e = spawned[0];

        let (w, hgt) = h.world.get::<Sprite>(e).unwrap().size();
        assert_eq!(w, hgt);
        assert!((30..=60).contains(&w));

        let pos = h.world.get::<Position>(e).unwrap();
        assert_eq!(pos.y, -60.0);
        assert!(pos.x >= 0.0 && pos.x + w as f32 <= h.bounds.width);

        let vel = h.world.get::<Velocity>(e).unwrap();
        assert_eq!(vel.dx, 0.0);
        assert!(vel.dy >= 80.0 && vel.dy <= 160.0);

        assert_eq!(h.world.get::<Damage>(e).unwrap().amount, 2);
    }

    #[test]
    fn test_zero_probability_never_spawns() {
        let mut h = Harness::new();
        let mut spawn = system(0.0);

        for _ in 0..200 {
            h.run(&mut spawn, 0.016).unwrap();
        }

        assert_eq!(h.world.entity_count(), 0);
    }

    #[test]
    fn test_full_world_skips_spawn() {
        let mut h = Harness::new();
        while h.world.create().is_ok() {}
        let capacity = h.world.entity_count();
        let mut spawn = system(1.0);

        h.run(&mut spawn, 0.016).unwrap();

        assert_eq!(h.world.entity_count(), capacity);
    }

    #[test]
    fn test_same_size_reuses_scaled_image() {
        let mut h = Harness::new();
        let settings = SpawnSettings {
            probability: 1.0,
            min_size: 32,
            max_size: 32,
            ..SpawnSettings::default()
        };
        let variants = vec![SpriteAsset::placeholder("only", 8, 8, [255, 255, 255, 255])];
        let mut spawn = SpawnSystem::new(settings, variants, StdRng::seed_from_u64(1));

        h.run(&mut spawn, 0.016).unwrap();
        h.run(&mut spawn, 0.016).unwrap();

        let ids: Vec<u64> = h
            .world
            .query(&[K::Sprite])
            .unwrap()
            .into_iter()
            .map(|e| h.world.get::<Sprite>(e).unwrap().image().id())
            .collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], ids[1]);
    }
}
