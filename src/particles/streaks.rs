//! Falling rain/star streaks
//!
//! A fixed population of slanted lines that fall, drift sideways, and are
//! recycled above the top edge instead of being destroyed.

use rand::Rng;

use crate::config::StreakConfig;
use crate::error::RenderError;
use crate::math::Vec2;
use crate::render::{Paint, Surface};

#[derive(Debug, Clone)]
pub struct AmbientStreak {
    pub position: Vec2,
    pub size: f64,
    pub length: f64,
    pub fall_speed: f64,
    pub drift: f64,
    pub opacity: f64,
}

impl AmbientStreak {
    /// Scatter a streak uniformly over the surface
    pub fn new<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, cfg: &StreakConfig) -> Self {
        Self {
            position: Vec2::new(rng.gen::<f64>() * width, rng.gen::<f64>() * height),
            size: cfg.size.sample(rng),
            length: cfg.length.sample(rng),
            fall_speed: cfg.fall_speed.sample(rng),
            drift: cfg.drift.sample(rng),
            opacity: cfg.opacity.sample(rng),
        }
    }

    /// Advance one frame; returns true when the streak was recycled
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        width: f64,
        height: f64,
        cfg: &StreakConfig,
    ) -> bool {
        self.position.x += self.drift;
        self.position.y += self.fall_speed;

        let recycled = self.position.y > height + self.length;
        if recycled {
            self.position.y = -cfg.respawn_offset - rng.gen::<f64>() * cfg.respawn_jitter;
            self.position.x = rng.gen::<f64>() * width;
            self.fall_speed = cfg.fall_speed.sample(rng);
            self.length = cfg.length.sample(rng);
            self.opacity = cfg.opacity.sample(rng);
        }

        if self.position.x < -cfg.edge_margin {
            self.position.x = width + cfg.edge_margin;
        }
        if self.position.x > width + cfg.edge_margin {
            self.position.x = -cfg.edge_margin;
        }

        recycled
    }

    /// Tail end of the streak, up and skewed against the drift
    pub fn tail(&self, cfg: &StreakConfig) -> Vec2 {
        self.position - Vec2::new(self.drift * self.length * cfg.skew, self.length)
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, cfg: &StreakConfig) -> Result<(), RenderError> {
        surface.isolated(|surface| {
            surface.set_stroke_paint(&Paint::Solid(cfg.color.with_alpha(self.opacity)))?;
            surface.set_line_width(self.size);
            surface.begin_path();
            surface.move_to(self.position);
            surface.line_to(self.tail(cfg));
            surface.stroke();
            Ok(())
        })
    }
}
