use super::{System, TickContext};
use crate::game::component::ComponentKind as K;
use crate::game::components::Flicker;
use crate::game::error::EcsError;
use crate::game::World;

/// Counts down blink timers and strips them once expired.
#[derive(Debug, Default)]
pub struct FlickerSystem;

impl System for FlickerSystem {
    fn name(&self) -> &'static str {
        "flicker"
    }

    fn run(&mut self, world: &mut World, ctx: &mut TickContext<'_>) -> Result<(), EcsError> {
        for entity in world.query(&[K::Flicker])? {
            let flicker = world.get_mut::<Flicker>(entity)?;
            flicker.remaining -= ctx.dt;
            if flicker.remaining <= 0.0 {
                world.unassign(entity, K::Flicker)?;
            }
        }
        Ok(())
    }
}
