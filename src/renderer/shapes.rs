//! Scene drawing for hearts, bombs, the basket and sparks
//!
//! Pure functions from entity records to primitives. Each entity is drawn
//! inside its own bounding box so what you see is what collides.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::Renderer;
use super::primitives::{ArcStyle, CircleArc, Glyph, Paint, PathSegment, Shape};
use crate::sim::entity::{FallingEntity, FallingKind, Particle, Player};
use crate::sim::state::GameState;

const BASKET_FILL: Paint = Paint::Rgb(0xff, 0x4d, 0x6d);
const BASKET_RIM: Paint = Paint::Rgb(0xc9, 0x18, 0x4a);
const BASKET_RIM_WIDTH: f32 = 5.0;
/// How far the rim arc sits above the bowl
const BASKET_RIM_LIFT: f32 = 10.0;

pub const BOMB_GLYPH: &str = "💣";

/// Draw everything alive in the current frame, back to front
pub fn draw_scene<R: Renderer>(state: &GameState, renderer: &mut R) {
    if let Some(player) = &state.player {
        draw_player(player, renderer);
    }
    for heart in &state.hearts {
        draw_falling(heart, renderer);
    }
    for bomb in &state.bombs {
        draw_falling(bomb, renderer);
    }
    for particle in &state.particles {
        draw_particle(particle, renderer);
    }
}

/// Basket: a filled bowl hanging below `pos.y` plus a rim arc above it
pub fn draw_player<R: Renderer>(player: &Player, renderer: &mut R) {
    let radius = player.width / 2.0;
    let cx = player.center_x();

    renderer.draw_circle_arc(&CircleArc {
        center: Vec2::new(cx, player.pos.y),
        radius,
        start: 0.0,
        end: PI,
        style: ArcStyle::Fill(BASKET_FILL),
        alpha: 1.0,
    });
    renderer.draw_circle_arc(&CircleArc {
        center: Vec2::new(cx, player.pos.y - BASKET_RIM_LIFT),
        radius,
        start: PI,
        end: 0.0,
        style: ArcStyle::Stroke {
            paint: BASKET_RIM,
            width: BASKET_RIM_WIDTH,
        },
        alpha: 1.0,
    });
}

pub fn draw_falling<R: Renderer>(entity: &FallingEntity, renderer: &mut R) {
    match entity.kind {
        FallingKind::Heart { hue } => renderer.draw_shape(&heart_shape(entity, hue)),
        FallingKind::Bomb => renderer.draw_glyph(&Glyph {
            text: BOMB_GLYPH.to_string(),
            // Baseline at the bottom of the box
            pos: Vec2::new(entity.pos.x, entity.pos.y + entity.size),
            size: entity.size,
        }),
    }
}

/// Four cubic lobes meeting at the top notch and the bottom tip
pub fn heart_shape(entity: &FallingEntity, hue: f32) -> Shape {
    let s = entity.size;
    let half = s / 2.0;
    let notch = s * 0.3;
    let x = entity.pos.x + half;
    let y = entity.pos.y;

    let v = Vec2::new;
    Shape {
        segments: vec![
            PathSegment::MoveTo(v(x, y + notch)),
            PathSegment::CubicTo {
                c1: v(x, y),
                c2: v(x - half, y),
                to: v(x - half, y + notch),
            },
            PathSegment::CubicTo {
                c1: v(x - half, y + half),
                c2: v(x, y + half),
                to: v(x, y + s),
            },
            PathSegment::CubicTo {
                c1: v(x, y + half),
                c2: v(x + half, y + half),
                to: v(x + half, y + notch),
            },
            PathSegment::CubicTo {
                c1: v(x + half, y),
                c2: v(x, y),
                to: v(x, y + notch),
            },
        ],
        fill: Paint::Hsl(hue, 100.0, 60.0),
    }
}

pub fn draw_particle<R: Renderer>(particle: &Particle, renderer: &mut R) {
    renderer.draw_circle_arc(&CircleArc {
        center: particle.pos,
        radius: particle.size,
        start: 0.0,
        end: TAU,
        style: ArcStyle::Fill(Paint::WHITE),
        alpha: particle.alpha(),
    });
}
