//! Rendering module
//!
//! The simulation never touches a drawing context. Scene functions in
//! [`shapes`] turn state into primitives and push them through a
//! [`Renderer`]: a [`DrawList`] records them, the canvas backend paints them.

pub mod draw_list;
pub mod primitives;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw_list::{DrawCommand, DrawList};
pub use primitives::{ArcStyle, CircleArc, Glyph, Paint, PathSegment, Shape};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::Viewport;

/// Drawing surface the scene is painted onto
pub trait Renderer {
    /// Wipe the whole surface
    fn clear(&mut self, viewport: Viewport);
    fn draw_circle_arc(&mut self, arc: &CircleArc);
    fn draw_shape(&mut self, shape: &Shape);
    fn draw_glyph(&mut self, glyph: &Glyph);
}
