//! Headless surface that records every call
//!
//! Used by the test-suite to inspect what a frame painted, and by embedders
//! that want to run the garden without a browser. Negative radii are
//! rejected the same way the canvas rejects them (IndexSizeError).

use crate::error::RenderError;
use crate::math::Vec2;
use super::color::Color;
use super::surface::{Ellipse, LineCap, Paint, Surface};

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f64),
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadraticCurveTo { control: Vec2, end: Vec2 },
    Circle { center: Vec2, radius: f64 },
    Ellipse(Ellipse),
    Fill,
    Stroke,
    StrokePaint(Paint),
    FillPaint(Paint),
    LineWidth(f64),
    LineCap(LineCap),
    GlobalAlpha(f64),
    Shadow { blur: f64, color: Color },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
    fail_on: Option<&'static str>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every fallible call named `op` fail, to exercise error paths
    pub fn failing_on(op: &'static str) -> Self {
        Self {
            fail_on: Some(op),
            ..Self::default()
        }
    }

    /// Current save/restore nesting
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn check(&self, op: &'static str) -> Result<(), RenderError> {
        match self.fail_on {
            Some(name) if name == op => Err(RenderError::Canvas {
                op,
                message: "injected failure".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn check_radius(op: &'static str, radius: f64) -> Result<(), RenderError> {
        if radius < 0.0 || radius.is_nan() {
            return Err(RenderError::Canvas {
                op,
                message: format!("IndexSizeError: radius {} is negative", radius),
            });
        }
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) -> Result<(), RenderError> {
        self.check("translate")?;
        self.commands.push(DrawCommand::Translate(offset));
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), RenderError> {
        self.check("rotate")?;
        self.commands.push(DrawCommand::Rotate(radians));
        Ok(())
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Vec2) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn quadratic_curve_to(&mut self, control: Vec2, end: Vec2) {
        self.commands.push(DrawCommand::QuadraticCurveTo { control, end });
    }

    fn circle(&mut self, center: Vec2, radius: f64) -> Result<(), RenderError> {
        self.check("arc")?;
        Self::check_radius("arc", radius)?;
        self.commands.push(DrawCommand::Circle { center, radius });
        Ok(())
    }

    fn ellipse(&mut self, ellipse: Ellipse) -> Result<(), RenderError> {
        self.check("ellipse")?;
        Self::check_radius("ellipse", ellipse.radius_x)?;
        Self::check_radius("ellipse", ellipse.radius_y)?;
        self.commands.push(DrawCommand::Ellipse(ellipse));
        Ok(())
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn set_stroke_paint(&mut self, paint: &Paint) -> Result<(), RenderError> {
        self.check("strokeStyle")?;
        self.commands.push(DrawCommand::StrokePaint(paint.clone()));
        Ok(())
    }

    fn set_fill_paint(&mut self, paint: &Paint) -> Result<(), RenderError> {
        self.check("fillStyle")?;
        if let Paint::Radial(g) = paint {
            Self::check_radius("createRadialGradient", g.inner_radius)?;
            Self::check_radius("createRadialGradient", g.outer_radius)?;
        }
        self.commands.push(DrawCommand::FillPaint(paint.clone()));
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.commands.push(DrawCommand::LineCap(cap));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_shadow(&mut self, blur: f64, color: Color) {
        self.commands.push(DrawCommand::Shadow { blur, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_restore_depth() {
        let mut s = RecordingSurface::new();
        s.save();
        s.save();
        s.restore();
        assert_eq!(s.depth(), 1);
        assert_eq!(s.max_depth(), 2);
        s.restore();
        s.restore();
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let mut s = RecordingSurface::new();
        assert!(s.circle(Vec2::ZERO, -1.0).is_err());
        assert!(s.circle(Vec2::ZERO, 0.0).is_ok());
    }

    #[test]
    fn test_injected_failure() {
        let mut s = RecordingSurface::failing_on("rotate");
        assert!(s.rotate(1.0).is_err());
        assert!(s.translate(Vec2::ZERO).is_ok());
        assert_eq!(s.commands, vec![DrawCommand::Translate(Vec2::ZERO)]);
    }

    #[test]
    fn test_isolated_restores_after_failure() {
        let mut s = RecordingSurface::failing_on("rotate");
        let result = s.isolated(|s| {
            s.translate(Vec2::new(5.0, 5.0))?;
            s.rotate(0.5)?;
            s.fill();
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(s.depth(), 0);
        assert_eq!(s.commands.last(), Some(&DrawCommand::Restore));
        assert_eq!(s.count(|c| matches!(c, DrawCommand::Fill)), 0);
    }
}
