use macroquad::color::{Color, BLACK, WHITE};

use super::{System, TickContext};
use crate::game::component::ComponentKind as K;
use crate::game::components::{Flicker, Health, Position, Sprite};
use crate::game::error::EcsError;
use crate::game::World;

/// Health shown when there is no ship to read it from
pub const PLACEHOLDER_HEALTH: i32 = 10;

pub const HUD_FONT_SIZE: f32 = 36.0;
const HUD_MARGIN: f32 = 10.0;
const HUD_COLOR: Color = WHITE;

/// Draws one frame: scrolling background, game objects, HUD.
///
/// Read-only with respect to the world. Runs after collision so a hit's
/// blink shows up on the same frame.
#[derive(Debug, Default)]
pub struct RenderingSystem;

impl RenderingSystem {
    fn draw_backgrounds(world: &World, ctx: &mut TickContext<'_>) -> Result<(), EcsError> {
        for entity in world.query(&[K::Position, K::Sprite, K::Background])? {
            let offset = world.get::<Position>(entity)?.y;
            let sprite = world.get::<Sprite>(entity)?;
            let (tile_w, tile_h) = sprite.size();
            if tile_w == 0 || tile_h == 0 {
                continue;
            }

            // One spare row above the viewport so the wrap never shows a gap
            let (tile_w, tile_h) = (tile_w as f32, tile_h as f32);
            let mut x = 0.0;
            while x < ctx.bounds.width {
                let mut y = -tile_h;
                while y < ctx.bounds.height + tile_h {
                    ctx.display.blit(sprite.image(), x, y + offset);
                    y += tile_h;
                }
                x += tile_w;
            }
        }
        Ok(())
    }

    fn draw_objects(world: &World, ctx: &mut TickContext<'_>) -> Result<(), EcsError> {
        for entity in world.query(&[K::Position, K::Sprite])? {
            if world.has(entity, K::Background) {
                continue;
            }
            if world.has(entity, K::Flicker) && !world.get::<Flicker>(entity)?.is_visible() {
                continue;
            }
            let position = world.get::<Position>(entity)?;
            let sprite = world.get::<Sprite>(entity)?;
            ctx.display.blit(sprite.image(), position.x, position.y);
        }
        Ok(())
    }

    fn draw_hud(world: &World, ctx: &mut TickContext<'_>) -> Result<(), EcsError> {
        let hp = match world.query_first(&[K::Position, K::Health])? {
            Some(ship) => world.get::<Health>(ship)?.hp,
            None => PLACEHOLDER_HEALTH,
        };
        let line = HUD_FONT_SIZE;
        ctx.display
            .draw_text(&format!("Health: {}", hp), HUD_MARGIN, HUD_MARGIN + line * 0.75, HUD_FONT_SIZE, HUD_COLOR);
        ctx.display.draw_text(
            &format!("Score: {}", ctx.score),
            HUD_MARGIN,
            HUD_MARGIN + line * 1.75,
            HUD_FONT_SIZE,
            HUD_COLOR,
        );
        Ok(())
    }
}

impl System for RenderingSystem {
    fn name(&self) -> &'static str {
        "rendering"
    }

    fn run(&mut self, world: &mut World, ctx: &mut TickContext<'_>) -> Result<(), EcsError> {
        ctx.display.clear(BLACK);
        Self::draw_backgrounds(world, ctx)?;
        Self::draw_objects(world, ctx)?;
        Self::draw_hud(world, ctx)?;
        ctx.display.present();
        Ok(())
    }
}
