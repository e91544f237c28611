//! Data-only entity records
//!
//! Positions are the top-left corner of each entity's bounding box, in
//! canvas pixels with y growing downward. Speeds are pixels per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Viewport;
use crate::tuning::Tuning;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// The basket the player steers along the bottom of the screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Distance from the viewport bottom to the top edge
    pub bottom_offset: f32,
}

impl Player {
    /// Create a player centered horizontally near the bottom of the viewport
    pub fn new(viewport: Viewport, tuning: &Tuning) -> Self {
        let width = tuning.player_width;
        Self {
            pos: Vec2::new(
                viewport.width / 2.0 - width / 2.0,
                viewport.height - tuning.player_bottom_offset,
            ),
            width,
            height: tuning.player_height,
            bottom_offset: tuning.player_bottom_offset,
        }
    }

    /// Keep the player inside the viewport horizontally
    ///
    /// When the viewport is narrower than the player, the right edge wins.
    pub fn update(&mut self, viewport: Viewport) {
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
        if self.pos.x + self.width > viewport.width {
            self.pos.x = viewport.width - self.width;
        }
    }

    /// Center the player under a pointer x coordinate
    pub fn follow_pointer(&mut self, pointer_x: f32) {
        self.pos.x = pointer_x - self.width / 2.0;
    }

    /// Re-anchor to the bottom after the viewport changed size
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.pos.y = viewport.height - self.bottom_offset;
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// What a falling entity does when caught
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FallingKind {
    /// Worth one point. Hue in degrees for the fill color.
    Heart { hue: f32 },
    /// Ends the round on contact
    Bomb,
}

/// A heart or bomb falling straight down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingEntity {
    pub id: u32,
    pub kind: FallingKind,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl FallingEntity {
    /// Move one frame down
    #[inline]
    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    /// True once the top edge has passed the bottom of the viewport
    #[inline]
    pub fn is_below(&self, viewport: Viewport) -> bool {
        self.pos.y > viewport.height
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn is_heart(&self) -> bool {
        matches!(self.kind, FallingKind::Heart { .. })
    }
}

/// A cosmetic spark from a caught heart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    pub fn advance(&mut self, decay: f32) {
        self.pos += self.vel;
        self.life -= decay;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Opacity proportional to remaining life
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}
