use super::{System, TickContext};
use crate::game::component::ComponentKind as K;
use crate::game::components::{Position, Sprite};
use crate::game::error::EcsError;
use crate::game::World;

/// Scrolls background tiles downward at the current difficulty speed, then
/// ramps that speed up.
///
/// Positions wrap by subtracting the tile height rather than resetting to
/// zero, so the tiling never visibly jumps.
#[derive(Debug, Default)]
pub struct ScrollingSystem;

impl System for ScrollingSystem {
    fn name(&self) -> &'static str {
        "scrolling"
    }

    fn run(&mut self, world: &mut World, ctx: &mut TickContext<'_>) -> Result<(), EcsError> {
        let step = ctx.difficulty.speed * ctx.dt;

        for entity in world.query(&[K::Position, K::Sprite, K::Background])? {
            let tile_height = world.get::<Sprite>(entity)?.size().1 as f32;
            let position = world.get_mut::<Position>(entity)?;
            position.y += step;
            if tile_height > 0.0 {
                while position.y >= tile_height {
                    position.y -= tile_height;
                }
            }
        }

        ctx.difficulty.ramp(ctx.dt);
        Ok(())
    }
}
