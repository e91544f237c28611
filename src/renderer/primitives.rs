//! Drawing primitives shared by every renderer

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fill or stroke color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Rgb(u8, u8, u8),
    /// Hue in degrees, saturation and lightness in percent
    Hsl(f32, f32, f32),
}

impl Paint {
    pub const WHITE: Paint = Paint::Rgb(0xff, 0xff, 0xff);

    /// CSS color string
    pub fn to_css(&self) -> String {
        match *self {
            Paint::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            Paint::Hsl(h, s, l) => format!("hsl({},{}%,{}%)", h, s, l),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArcStyle {
    Fill(Paint),
    Stroke { paint: Paint, width: f32 },
}

/// Circular arc swept clockwise (screen space) from `start` to `end` radians
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleArc {
    pub center: Vec2,
    pub radius: f32,
    pub start: f32,
    pub end: f32,
    pub style: ArcStyle,
    /// 0 = invisible, 1 = opaque
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    MoveTo(Vec2),
    CubicTo { c1: Vec2, c2: Vec2, to: Vec2 },
}

/// Closed filled path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub segments: Vec<PathSegment>,
    pub fill: Paint,
}

/// A single text glyph drawn from its baseline-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub text: String,
    pub pos: Vec2,
    /// Font size in pixels
    pub size: f32,
}

impl Glyph {
    pub fn font(&self) -> String {
        format!("{}px Arial", self.size)
    }
}
