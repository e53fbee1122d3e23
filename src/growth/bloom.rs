//! Frangipani bloom painting
//!
//! A pure function of position, size, color and elapsed time. The flower
//! keeps no rotation state: its spin is read straight from the clock.

use std::f64::consts::TAU;

use crate::animation::bloom_rotation;
use crate::config::BloomConfig;
use crate::error::RenderError;
use crate::math::Vec2;
use crate::render::{Color, Ellipse, Paint, RadialGradient, Surface};

/// Gradient for one petal, laid out in the petal's local frame
pub fn petal_gradient(size: f64, color: Color, cfg: &BloomConfig) -> RadialGradient {
    let stops = if color == cfg.white {
        vec![(0.0, cfg.white_center), (0.4, Color::WHITE), (1.0, cfg.white_tip)]
    } else {
        vec![(0.0, cfg.warm_center), (0.5, color), (1.0, color)]
    };

    RadialGradient {
        inner_center: Vec2::ZERO,
        inner_radius: size * 0.1,
        outer_center: Vec2::new(size * 0.5, -size * 0.5),
        outer_radius: size,
        stops,
    }
}

pub fn draw_bloom<S: Surface>(
    surface: &mut S,
    center: Vec2,
    size: f64,
    color: Color,
    elapsed_ms: f64,
    cfg: &BloomConfig,
) -> Result<(), RenderError> {
    let petals = cfg.petal_count.max(1);
    let step = TAU / petals as f64;

    surface.isolated(|surface| {
        surface.translate(center)?;
        surface.set_shadow(cfg.glow, color);
        surface.rotate(bloom_rotation(elapsed_ms, cfg.rotation_speed))?;

        for i in 0..petals {
            surface.isolated(|surface| draw_petal(surface, i as f64 * step, size, color, cfg))?;
        }
        Ok(())
    })
}

fn draw_petal<S: Surface>(
    surface: &mut S,
    angle: f64,
    size: f64,
    color: Color,
    cfg: &BloomConfig,
) -> Result<(), RenderError> {
    surface.rotate(angle)?;

    surface.set_fill_paint(&Paint::Radial(petal_gradient(size, color, cfg)))?;
    surface.set_shadow(cfg.petal_glow, color);

    // Wedge: outer edge out to the tip, inner edge curling back to center
    surface.begin_path();
    surface.move_to(Vec2::ZERO);
    surface.quadratic_curve_to(Vec2::new(size * 0.5, -size * 0.2), Vec2::new(size, -size * 0.5));
    surface.quadratic_curve_to(Vec2::new(size * 0.8, -size * 0.8), Vec2::ZERO);
    surface.fill();

    surface.begin_path();
    surface.ellipse(Ellipse {
        center: Vec2::new(size / 2.0, 0.0),
        radius_x: size / 2.0,
        radius_y: size / 4.0,
        rotation: -0.2,
    })?;
    surface.fill();
    Ok(())
}
