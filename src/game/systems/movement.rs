use log::trace;

use super::{System, TickContext};
use crate::game::component::ComponentKind as K;
use crate::game::components::{Position, Velocity};
use crate::game::error::EcsError;
use crate::game::event::OffscreenEvent;
use crate::game::World;

/// Integrates velocity into position, then despawns anything that fell past
/// the bottom of the window.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn run(&mut self, world: &mut World, ctx: &mut TickContext<'_>) -> Result<(), EcsError> {
        for entity in world.query(&[K::Position, K::Velocity])? {
            let velocity = *world.get::<Velocity>(entity)?;
            let position = world.get_mut::<Position>(entity)?;
            position.x += velocity.dx * ctx.dt;
            position.y += velocity.dy * ctx.dt;

            if position.y > ctx.bounds.height {
                trace!("{} left the screen at y={:.1}", entity, position.y);
                world.destroy(entity);
                ctx.events.offscreen.send(OffscreenEvent { entity });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::testing::Harness;

    #[test]
    fn test_integrates_velocity() {
        let mut h = Harness::new();
        let e = h.world.create().unwrap();
        h.world.assign(e, Position::new(0.0, 0.0)).unwrap();
        h.world.assign(e, Velocity::new(10.0, 20.0)).unwrap();

        h.run(&mut MovementSystem, 1.0).unwrap();

        assert_eq!(h.world.get::<Position>(e).unwrap(), &Position::new(10.0, 20.0));
        assert!(h.events.offscreen.is_empty());
    }

    #[test]
    fn test_despawns_below_window() {
        let mut h = Harness::new();
        let height = h.bounds.height;
        let e = h.world.create().unwrap();
        h.world.assign(e, Position::new(0.0, height - 5.0)).unwrap();
        h.world.assign(e, Velocity::new(0.0, 20.0)).unwrap();

        h.run(&mut MovementSystem, 1.0).unwrap();

        assert!(!h.world.is_alive(e));
        assert!(h.world.query(&[K::Position]).unwrap().is_empty());
        assert_eq!(h.events.offscreen.len(), 1);
    }

    #[test]
    fn test_entities_without_velocity_stay_put() {
        let mut h = Harness::new();
        let e = h.world.create().unwrap();
        h.world.assign(e, Position::new(3.0, 4.0)).unwrap();

        h.run(&mut MovementSystem, 0.5).unwrap();

        assert_eq!(h.world.get::<Position>(e).unwrap(), &Position::new(3.0, 4.0));
    }
}
