use std::f64::consts::TAU;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::error::RenderError;
use crate::math::Vec2;
use super::color::Color;
use super::surface::{Ellipse, LineCap, Paint, RadialGradient, Surface};

/// Wrapper around a canvas 2D context
pub struct CanvasSurface {
    pub ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn build_gradient(&self, g: &RadialGradient) -> Result<CanvasGradient, RenderError> {
        let gradient = self
            .ctx
            .create_radial_gradient(
                g.inner_center.x,
                g.inner_center.y,
                g.inner_radius,
                g.outer_center.x,
                g.outer_center.y,
                g.outer_radius,
            )
            .map_err(|e| RenderError::canvas("createRadialGradient", e))?;

        for (offset, color) in &g.stops {
            gradient
                .add_color_stop(*offset as f32, &color.to_css())
                .map_err(|e| RenderError::canvas("addColorStop", e))?;
        }

        Ok(gradient)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) -> Result<(), RenderError> {
        self.ctx
            .translate(offset.x, offset.y)
            .map_err(|e| RenderError::canvas("translate", e))
    }

    fn rotate(&mut self, radians: f64) -> Result<(), RenderError> {
        self.ctx
            .rotate(radians)
            .map_err(|e| RenderError::canvas("rotate", e))
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Vec2) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Vec2) {
        self.ctx.line_to(p.x, p.y);
    }

    fn quadratic_curve_to(&mut self, control: Vec2, end: Vec2) {
        self.ctx.quadratic_curve_to(control.x, control.y, end.x, end.y);
    }

    fn circle(&mut self, center: Vec2, radius: f64) -> Result<(), RenderError> {
        self.ctx
            .arc(center.x, center.y, radius, 0.0, TAU)
            .map_err(|e| RenderError::canvas("arc", e))
    }

    fn ellipse(&mut self, e: Ellipse) -> Result<(), RenderError> {
        self.ctx
            .ellipse(e.center.x, e.center.y, e.radius_x, e.radius_y, e.rotation, 0.0, TAU)
            .map_err(|err| RenderError::canvas("ellipse", err))
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn set_stroke_paint(&mut self, paint: &Paint) -> Result<(), RenderError> {
        match paint {
            Paint::Solid(color) => self.ctx.set_stroke_style_str(&color.to_css()),
            Paint::Radial(g) => {
                let gradient = self.build_gradient(g)?;
                self.ctx.set_stroke_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }

    fn set_fill_paint(&mut self, paint: &Paint) -> Result<(), RenderError> {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Radial(g) => {
                let gradient = self.build_gradient(g)?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_shadow(&mut self, blur: f64, color: Color) {
        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_color(&color.to_css());
    }
}
