use rand::Rng;

use crate::config::LeafConfig;
use crate::error::RenderError;
use crate::math::{deg_to_rad, Vec2};
use crate::render::{Ellipse, Paint, Surface};

/// Fan of long oval leaves around a stem tip.
///
/// Leaf lengths are re-rolled on every call, so leaves shimmer in size from
/// frame to frame; nothing about them is stored on the node.
pub fn draw_leaves<S: Surface, R: Rng + ?Sized>(
    surface: &mut S,
    tip: Vec2,
    angle: f64,
    rng: &mut R,
    cfg: &LeafConfig,
) -> Result<(), RenderError> {
    for i in 0..cfg.count {
        let leaf_angle = angle + cfg.spread * i as f64;
        let len = cfg.length.sample(rng);

        surface.isolated(|surface| {
            surface.translate(tip)?;
            surface.rotate(deg_to_rad(leaf_angle))?;

            surface.begin_path();
            surface.set_fill_paint(&Paint::Solid(cfg.color))?;
            surface.ellipse(Ellipse {
                center: Vec2::new(len / 2.0, 0.0),
                radius_x: len / 2.0,
                radius_y: len / cfg.slenderness,
                rotation: 0.0,
            })?;
            surface.fill();

            // Vein
            surface.begin_path();
            surface.set_stroke_paint(&Paint::Solid(cfg.vein_color))?;
            surface.set_line_width(cfg.vein_width);
            surface.move_to(Vec2::ZERO);
            surface.line_to(Vec2::new(len, 0.0));
            surface.stroke();
            Ok(())
        })?;
    }
    Ok(())
}
