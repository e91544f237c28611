//! Recorded draw commands
//!
//! A renderer that paints nothing and remembers everything. Used by the
//! headless build and by tests that assert on what a frame would show.

use super::Renderer;
use super::primitives::{CircleArc, Glyph, Shape};
use crate::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Viewport),
    CircleArc(CircleArc),
    Shape(Shape),
    Glyph(Glyph),
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay the recording onto another renderer
    pub fn replay<R: Renderer>(&self, target: &mut R) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(viewport) => target.clear(*viewport),
                DrawCommand::CircleArc(arc) => target.draw_circle_arc(arc),
                DrawCommand::Shape(shape) => target.draw_shape(shape),
                DrawCommand::Glyph(glyph) => target.draw_glyph(glyph),
            }
        }
    }
}

impl Renderer for DrawList {
    fn clear(&mut self, viewport: Viewport) {
        // Everything before a clear is invisible anyway
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(viewport));
    }

    fn draw_circle_arc(&mut self, arc: &CircleArc) {
        self.commands.push(DrawCommand::CircleArc(arc.clone()));
    }

    fn draw_shape(&mut self, shape: &Shape) {
        self.commands.push(DrawCommand::Shape(shape.clone()));
    }

    fn draw_glyph(&mut self, glyph: &Glyph) {
        self.commands.push(DrawCommand::Glyph(glyph.clone()));
    }
}
