use rand::Rng;

use crate::config::SparkConfig;
use crate::error::RenderError;
use crate::math::Vec2;
use crate::render::{Color, Paint, Surface};

/// A short-lived glowing dot shed by a bloom
#[derive(Debug, Clone)]
pub struct SparkParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
    pub color: Color,
    /// Frames left; the particle is expired at zero
    pub life: i32,
    budget: i32,
    pub opacity: f64,
}

impl SparkParticle {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, position: Vec2, color: Color, cfg: &SparkConfig) -> Self {
        let budget = cfg.lifetime.max(1) as i32;
        Self {
            position,
            velocity: Vec2::new(cfg.speed.sample(rng), cfg.speed.sample(rng)),
            radius: cfg.radius.sample(rng),
            color,
            life: budget,
            budget,
            opacity: 1.0,
        }
    }

    pub fn update(&mut self, cfg: &SparkConfig) {
        self.position = self.position + self.velocity;
        self.life -= 1;
        self.opacity = (self.life as f64 / self.budget as f64).max(0.0);
        self.radius *= cfg.shrink;
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0
    }

    /// Starting lifetime in frames
    pub fn budget(&self) -> i32 {
        self.budget
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, cfg: &SparkConfig) -> Result<(), RenderError> {
        surface.isolated(|surface| {
            surface.set_global_alpha(self.opacity);
            surface.set_fill_paint(&Paint::Solid(self.color))?;
            surface.set_shadow(cfg.glow, self.color);
            surface.begin_path();
            surface.circle(self.position, self.radius)?;
            surface.fill();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn spark(seed: u64) -> SparkParticle {
        let mut rng = SmallRng::seed_from_u64(seed);
        SparkParticle::new(&mut rng, Vec2::new(50.0, 50.0), Color::hex(0xff69b4), &SparkConfig::default())
    }

    #[test]
    fn test_new_spark() {
        let cfg = SparkConfig::default();
        let s = spark(1);
        assert_eq!(s.life, 60);
        assert_eq!(s.budget(), 60);
        assert_eq!(s.opacity, 1.0);
        assert!(cfg.radius.contains(s.radius));
        assert!(s.velocity.x.abs() <= 1.0 && s.velocity.y.abs() <= 1.0);
    }

    #[test]
    fn test_life_and_opacity() {
        let cfg = SparkConfig::default();
        let mut s = spark(2);
        for i in 1..=30 {
            s.update(&cfg);
            assert_eq!(s.life, 60 - i);
            assert!((s.opacity - s.life as f64 / 60.0).abs() < 1e-12);
        }
        assert!((s.opacity - 0.5).abs() < 1e-9);
        assert!(!s.is_expired());

        for _ in 0..30 {
            s.update(&cfg);
        }
        assert!(s.life <= 0);
        assert!(s.is_expired());
    }

    #[test]
    fn test_not_expired_before_budget() {
        let cfg = SparkConfig::default();
        let mut s = spark(3);
        for _ in 0..59 {
            s.update(&cfg);
            assert!(!s.is_expired());
        }
        s.update(&cfg);
        assert!(s.is_expired());
    }

    #[test]
    fn test_radius_and_opacity_non_increasing() {
        let cfg = SparkConfig::default();
        let mut s = spark(4);
        let (mut r, mut o) = (s.radius, s.opacity);
        for _ in 0..60 {
            s.update(&cfg);
            assert!(s.radius < r);
            assert!(s.opacity <= o);
            r = s.radius;
            o = s.opacity;
        }
    }

    #[test]
    fn test_moves_by_velocity() {
        let cfg = SparkConfig::default();
        let mut s = spark(5);
        let start = s.position;
        s.update(&cfg);
        assert_eq!(s.position, start + s.velocity);
    }

    #[test]
    fn test_draw_glowing_circle() {
        let cfg = SparkConfig::default();
        let s = spark(6);
        let mut surface = RecordingSurface::new();
        s.draw(&mut surface, &cfg).unwrap();

        assert!(surface.commands.contains(&DrawCommand::GlobalAlpha(1.0)));
        assert!(surface.commands.contains(&DrawCommand::Shadow { blur: 10.0, color: s.color }));
        assert!(surface
            .commands
            .contains(&DrawCommand::Circle { center: s.position, radius: s.radius }));
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_failed_fill_style_still_restores() {
        let cfg = SparkConfig::default();
        let mut surface = RecordingSurface::failing_on("fillStyle");
        assert!(spark(7).draw(&mut surface, &cfg).is_err());
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::Circle { .. })), 0);
    }
}
