//! Everything alive in one garden, and the per-frame driver
//!
//! The scene owns all three entity collections plus the surface size and
//! the random source. It is rebuilt wholesale on reset; planting only
//! appends.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::GardenConfig;
use crate::error::{ConfigError, RenderError};
use crate::growth::{FrameContext, GrowthNode, Sprout};
use crate::math::Vec2;
use crate::particles::{AmbientStreak, SparkParticle};
use crate::render::Surface;

pub struct Scene<R: Rng = SmallRng> {
    width: f64,
    height: f64,
    roots: Vec<GrowthNode>,
    streaks: Vec<AmbientStreak>,
    sparks: Vec<SparkParticle>,
    config: GardenConfig,
    rng: R,
}

impl Scene<SmallRng> {
    /// Scene with an entropy-seeded random source
    pub fn new(width: f64, height: f64, config: GardenConfig) -> Result<Self, ConfigError> {
        Self::with_rng(width, height, config, SmallRng::from_entropy())
    }
}

impl<R: Rng> Scene<R> {
    /// Validates `config` before anything is spawned from it
    pub fn with_rng(width: f64, height: f64, config: GardenConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut scene = Self {
            width,
            height,
            roots: Vec::new(),
            streaks: Vec::new(),
            sparks: Vec::new(),
            config,
            rng,
        };
        scene.reset();
        Ok(scene)
    }

    /// Discard all growth and repopulate streaks and roots
    pub fn reset(&mut self) {
        self.roots.clear();
        self.streaks.clear();
        self.sparks.clear();

        let cfg = &self.config;
        let (width, height) = (self.width, self.height);

        for _ in 0..cfg.scene.streak_count {
            self.streaks.push(AmbientStreak::new(&mut self.rng, width, height, &cfg.streaks));
        }

        // Roots fan upward from bottom center
        let base = Vec2::new(width / 2.0, height);
        for _ in 0..cfg.scene.root_count {
            let sprout = Sprout {
                origin: base,
                angle: cfg.scene.root_angle.sample(&mut self.rng),
                length: height * cfg.scene.root_length.sample(&mut self.rng),
                width: cfg.scene.root_width,
                depth: cfg.scene.root_depth,
            };
            let root = GrowthNode::new(&mut self.rng, sprout, cfg.growth.stem_color, cfg);
            self.roots.push(root);
        }

        debug!(
            width,
            height,
            streaks = self.streaks.len(),
            roots = self.roots.len(),
            "scene reset"
        );
    }

    /// New surface size; all growth starts over
    pub fn resize(&mut self, width: f64, height: f64) {
        info!(width, height, "surface resized");
        self.width = width;
        self.height = height;
        self.reset();
    }

    /// Plant a small single stem at a clicked point
    pub fn plant(&mut self, x: f64, y: f64) {
        let cfg = &self.config;
        let sprout = Sprout {
            origin: Vec2::new(x, y),
            angle: cfg.scene.planted_angle,
            length: cfg.scene.planted_length,
            width: cfg.scene.planted_width,
            depth: cfg.scene.root_depth,
        };
        let root = GrowthNode::new(&mut self.rng, sprout, cfg.growth.stem_color, cfg);
        self.roots.push(root);
        debug!(x, y, roots = self.roots.len(), "planted");
    }

    /// Update and paint one frame.
    ///
    /// Streaks first, then each root tree (grow, sway, draw), then sparks,
    /// which are walked in reverse so expired ones can be removed in place
    /// after their last draw.
    pub fn frame<S: Surface>(&mut self, surface: &mut S, elapsed_ms: f64) -> Result<(), RenderError> {
        surface.clear(self.width, self.height);

        let cfg = &self.config;
        let (width, height) = (self.width, self.height);

        for streak in &mut self.streaks {
            streak.update(&mut self.rng, width, height, &cfg.streaks);
            streak.draw(surface, &cfg.streaks)?;
        }

        for root in &mut self.roots {
            root.update(&mut self.rng, cfg);
            root.layout(elapsed_ms, &cfg.growth);
            let mut frame = FrameContext {
                elapsed_ms,
                rng: &mut self.rng,
                sparks: &mut self.sparks,
                config: cfg,
            };
            root.draw(surface, &mut frame)?;
        }

        for i in (0..self.sparks.len()).rev() {
            let spark = &mut self.sparks[i];
            spark.update(&cfg.sparks);
            spark.draw(surface, &cfg.sparks)?;
            if spark.is_expired() {
                self.sparks.remove(i);
            }
        }

        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn roots(&self) -> &[GrowthNode] {
        &self.roots
    }

    pub fn streaks(&self) -> &[AmbientStreak] {
        &self.streaks
    }

    pub fn sparks(&self) -> &[SparkParticle] {
        &self.sparks
    }

    /// Every stem segment across all roots
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|r| r.count()).sum()
    }

    pub fn bloom_count(&self) -> usize {
        self.roots
            .iter()
            .flat_map(|r| r.iter_preorder())
            .filter(|n| n.has_bloom)
            .count()
    }
}
