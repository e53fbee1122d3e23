//! The drawing capability every entity paints through
//!
//! Mirrors the subset of the HTML canvas 2D API the garden needs: a path
//! builder, paint state, and a save/restore transform stack. Calls that the
//! canvas can reject return `Result`; the rest are infallible.

use crate::error::RenderError;
use crate::math::Vec2;
use super::color::Color;

/// Stroke end style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Round,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Round => "round",
        }
    }
}

/// Two-circle radial gradient, in the current transform's coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f64,
    pub outer_center: Vec2,
    pub outer_radius: f64,
    /// (offset in [0, 1], color)
    pub stops: Vec<(f64, Color)>,
}

/// Stroke or fill source
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Radial(RadialGradient),
}

/// Full ellipse sub-path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation in radians
    pub rotation: f64,
}

pub trait Surface {
    /// Erase the whole surface to transparent
    fn clear(&mut self, width: f64, height: f64);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2) -> Result<(), RenderError>;
    fn rotate(&mut self, radians: f64) -> Result<(), RenderError>;

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    fn quadratic_curve_to(&mut self, control: Vec2, end: Vec2);
    /// Full circle sub-path
    fn circle(&mut self, center: Vec2, radius: f64) -> Result<(), RenderError>;
    fn ellipse(&mut self, ellipse: Ellipse) -> Result<(), RenderError>;
    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_stroke_paint(&mut self, paint: &Paint) -> Result<(), RenderError>;
    fn set_fill_paint(&mut self, paint: &Paint) -> Result<(), RenderError>;
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_shadow(&mut self, blur: f64, color: Color);

    /// Run `body` between `save` and `restore`. The state is restored even
    /// when `body` fails part way, so a rejected call never leaks a
    /// transform or paint into later draws.
    fn isolated<F>(&mut self, body: F) -> Result<(), RenderError>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<(), RenderError>,
    {
        self.save();
        let result = body(self);
        self.restore();
        result
    }
}
