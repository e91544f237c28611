//! 2D canvas backend

use web_sys::CanvasRenderingContext2d;

use super::Renderer;
use super::primitives::{ArcStyle, CircleArc, Glyph, PathSegment, Shape};
use crate::Viewport;

/// Paints primitives onto a `CanvasRenderingContext2d`
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self, viewport: Viewport) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            viewport.width as f64,
            viewport.height as f64,
        );
    }

    fn draw_circle_arc(&mut self, arc: &CircleArc) {
        let ctx = &self.ctx;
        ctx.set_global_alpha(arc.alpha as f64);
        ctx.begin_path();
        if let Err(e) = ctx.arc(
            arc.center.x as f64,
            arc.center.y as f64,
            arc.radius.max(0.0) as f64,
            arc.start as f64,
            arc.end as f64,
        ) {
            log::warn!("Canvas arc failed: {:?}", e);
        }
        match arc.style {
            ArcStyle::Fill(paint) => {
                ctx.set_fill_style_str(&paint.to_css());
                ctx.fill();
            }
            ArcStyle::Stroke { paint, width } => {
                ctx.set_stroke_style_str(&paint.to_css());
                ctx.set_line_width(width as f64);
                ctx.stroke();
            }
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_shape(&mut self, shape: &Shape) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&shape.fill.to_css());
        ctx.begin_path();
        for segment in &shape.segments {
            match *segment {
                PathSegment::MoveTo(p) => ctx.move_to(p.x as f64, p.y as f64),
                PathSegment::CubicTo { c1, c2, to } => ctx.bezier_curve_to(
                    c1.x as f64,
                    c1.y as f64,
                    c2.x as f64,
                    c2.y as f64,
                    to.x as f64,
                    to.y as f64,
                ),
            }
        }
        ctx.fill();
    }

    fn draw_glyph(&mut self, glyph: &Glyph) {
        self.ctx.set_font(&glyph.font());
        if let Err(e) = self
            .ctx
            .fill_text(&glyph.text, glyph.pos.x as f64, glyph.pos.y as f64)
        {
            log::warn!("Canvas fill_text failed: {:?}", e);
        }
    }
}
