use log::debug;

use super::{System, TickContext};
use crate::game::component::ComponentKind as K;
use crate::game::components::{Damage, Flicker, Health, Position, Sprite};
use crate::game::error::EcsError;
use crate::game::event::HitEvent;
use crate::game::host::SoundCue;
use crate::game::World;

/// Default blink time after a hit, in seconds
pub const DEFAULT_FLICKER_DURATION: f32 = 0.6;

/// Pixel-accurate ship vs. obstacle hit test.
///
/// The ship is the lowest-id entity with {Position, Health}; obstacles are
/// everything with {Position, Sprite, Damage}. A hit consumes the obstacle,
/// damages the ship and (re)starts its blink timer.
#[derive(Debug)]
pub struct CollisionSystem {
    pub flicker_duration: f32,
}

impl CollisionSystem {
    pub fn new(flicker_duration: f32) -> Self {
        Self { flicker_duration }
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new(DEFAULT_FLICKER_DURATION)
    }
}

/// Rectangles overlap, edges touching excluded.
fn boxes_overlap(a: Position, a_size: (u32, u32), b: Position, b_size: (u32, u32)) -> bool {
    a.x < b.x + b_size.0 as f32
        && a.x + a_size.0 as f32 > b.x
        && a.y < b.y + b_size.1 as f32
        && a.y + a_size.1 as f32 > b.y
}

impl System for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn run(&mut self, world: &mut World, ctx: &mut TickContext<'_>) -> Result<(), EcsError> {
        let Some(ship) = world.query_first(&[K::Position, K::Health])? else {
            return Ok(());
        };
        let ship_sprite = world.get::<Sprite>(ship)?.clone();

        for obstacle in world.query(&[K::Position, K::Sprite, K::Damage])? {
            // Earlier hits this tick may have killed the ship; keep consuming
            // overlapping obstacles so a game-over frame shows them gone.
            let ship_pos = *world.get::<Position>(ship)?;
            let obs_pos = *world.get::<Position>(obstacle)?;
            let obs_sprite = world.get::<Sprite>(obstacle)?;

            if !boxes_overlap(ship_pos, ship_sprite.size(), obs_pos, obs_sprite.size()) {
                continue;
            }
            // Offset of the obstacle's top-left relative to the ship's, in
            // whole pixels
            let offset = (
                (obs_pos.x - ship_pos.x).floor() as i32,
                (obs_pos.y - ship_pos.y).floor() as i32,
            );
            if !ship_sprite.mask().overlaps(obs_sprite.mask(), offset) {
                continue;
            }

            let damage = world.get::<Damage>(obstacle)?.amount;
            world.assign(ship, Flicker::new(self.flicker_duration))?;
            let remaining_hp = world.get_mut::<Health>(ship)?.damage(damage);
            world.destroy(obstacle);

            debug!("{} hit {} for {}, hp now {}", obstacle, ship, damage, remaining_hp);
            ctx.events.hits.send(HitEvent {
                ship,
                obstacle,
                damage,
                remaining_hp,
            });
            // The killing blow is silent; game-over audio takes over
            if remaining_hp != 0 {
                ctx.audio.play(SoundCue::Hit, false);
            }
        }
        Ok(())
    }
}
