//! Tuning parameters for every entity in the garden
//!
//! Defaults reproduce the shipped look. A partial YAML document can be
//! layered over them with [`GardenConfig::from_yaml`]; missing fields keep
//! their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::Span;
use crate::render::Color;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    pub scene: SceneConfig,
    pub streaks: StreakConfig,
    pub sparks: SparkConfig,
    pub growth: GrowthConfig,
    pub leaves: LeafConfig,
    pub bloom: BloomConfig,
}

/// Population and planting presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub streak_count: usize,
    pub root_count: usize,
    /// Root angles in degrees, -90 is straight up
    pub root_angle: Span,
    /// Root target length as a fraction of surface height
    pub root_length: Span,
    pub root_width: f64,
    /// Generations of single-stem continuation before a root flowers
    pub root_depth: u32,
    pub planted_angle: f64,
    pub planted_length: f64,
    pub planted_width: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            streak_count: 300,
            root_count: 30,
            root_angle: Span::new(-160.0, -20.0),
            root_length: Span::new(0.4, 0.7),
            root_width: 8.0,
            root_depth: 0,
            planted_angle: -90.0,
            planted_length: 50.0,
            planted_width: 4.0,
        }
    }
}

/// Falling rain/star lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakConfig {
    pub size: Span,
    pub length: Span,
    pub fall_speed: Span,
    pub drift: Span,
    pub opacity: Span,
    /// Recycled streaks restart this far above the top edge...
    pub respawn_offset: f64,
    /// ...plus up to this much extra
    pub respawn_jitter: f64,
    /// Horizontal wrap padding
    pub edge_margin: f64,
    /// Horizontal skew of the tail per unit of drift and length
    pub skew: f64,
    pub color: Color,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            size: Span::new(0.5, 2.0),
            length: Span::new(8.0, 20.0),
            fall_speed: Span::new(2.0, 8.0),
            drift: Span::symmetric(0.25),
            opacity: Span::new(0.2, 1.0),
            respawn_offset: 10.0,
            respawn_jitter: 100.0,
            edge_margin: 50.0,
            skew: 0.3,
            color: Color::rgb(200, 220, 255),
        }
    }
}

/// Sparkles shed by blooms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkConfig {
    /// Lifetime budget in frames
    pub lifetime: u32,
    pub radius: Span,
    pub speed: Span,
    /// Per-frame radius multiplier
    pub shrink: f64,
    pub glow: f64,
    /// Per-frame emission probability for each bloom
    pub spawn_chance: f64,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            lifetime: 60,
            radius: Span::new(1.0, 4.0),
            speed: Span::symmetric(1.0),
            shrink: 0.95,
            glow: 10.0,
            spawn_chance: 0.05,
        }
    }
}

/// Stem growth, continuation and sway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Fraction of the remaining length grown each frame
    pub rate: f64,
    pub min_step: f64,
    pub child_length_decay: f64,
    pub child_width_decay: f64,
    /// Child angle jitter in degrees
    pub wave: Span,
    /// Depth against which sway amplitude and bloom size are measured
    pub depth_reference: u32,
    /// Sway amplitude in degrees
    pub sway_amplitude: f64,
    pub sway_per_level: f64,
    /// Sway phase advance per millisecond
    pub sway_speed: f64,
    pub stem_color: Color,
    pub stem_glow_color: Color,
    pub stem_glow: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            rate: 0.05,
            min_step: 0.1,
            child_length_decay: 0.95,
            child_width_decay: 0.85,
            wave: Span::symmetric(10.0),
            depth_reference: 10,
            sway_amplitude: 2.0,
            sway_per_level: 0.1,
            sway_speed: 0.001,
            stem_color: Color::hex(0x6b8e23),
            stem_glow_color: Color::hex(0x556b2f),
            stem_glow: 5.0,
        }
    }
}

/// Decorative leaves around a nearly grown tip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafConfig {
    pub count: usize,
    /// Angular step between leaves, degrees
    pub spread: f64,
    pub length: Span,
    /// Leaf half-width is length divided by this
    pub slenderness: f64,
    /// Leaves appear once length reaches this fraction of the target
    pub threshold: f64,
    pub color: Color,
    pub vein_color: Color,
    pub vein_width: f64,
}

impl Default for LeafConfig {
    fn default() -> Self {
        Self {
            count: 3,
            spread: 120.0,
            length: Span::new(20.0, 30.0),
            slenderness: 6.0,
            threshold: 0.8,
            color: Color::hex(0x228b22),
            vein_color: Color::hex(0x32cd32),
            vein_width: 1.0,
        }
    }
}

/// Five-petal frangipani blooms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    pub palette: Vec<Color>,
    /// Palette entry that gets the gold-to-white treatment
    pub white: Color,
    pub petal_count: usize,
    /// Fraction of the remaining size grown each frame
    pub rate: f64,
    pub base_size: f64,
    pub size_per_level: f64,
    /// Radians per millisecond
    pub rotation_speed: f64,
    pub glow: f64,
    pub petal_glow: f64,
    pub white_center: Color,
    pub white_tip: Color,
    pub warm_center: Color,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            palette: vec![
                Color::WHITE,
                Color::hex(0xff69b4),
                Color::hex(0xff0000),
                Color::hex(0x00ffff),
            ],
            white: Color::WHITE,
            petal_count: 5,
            rate: 0.03,
            base_size: 35.0,
            size_per_level: 6.0,
            rotation_speed: 0.0005,
            glow: 15.0,
            petal_glow: 5.0,
            white_center: Color::hex(0xffd700),
            white_tip: Color::hex(0xf0f0f0),
            warm_center: Color::hex(0xffcc00),
        }
    }
}

impl GardenConfig {
    /// Parse YAML over the defaults and validate the result
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: GardenConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let spans = [
            ("scene.root_angle", self.scene.root_angle),
            ("scene.root_length", self.scene.root_length),
            ("streaks.size", self.streaks.size),
            ("streaks.length", self.streaks.length),
            ("streaks.fall_speed", self.streaks.fall_speed),
            ("streaks.drift", self.streaks.drift),
            ("streaks.opacity", self.streaks.opacity),
            ("sparks.radius", self.sparks.radius),
            ("sparks.speed", self.sparks.speed),
            ("growth.wave", self.growth.wave),
            ("leaves.length", self.leaves.length),
        ];
        for (field, span) in spans {
            if !span.min.is_finite() || !span.max.is_finite() {
                return Err(ConfigError::invalid(field, "bounds must be finite"));
            }
            if span.is_inverted() {
                return Err(ConfigError::invalid(
                    field,
                    format!("min {} exceeds max {}", span.min, span.max),
                ));
            }
        }

        if self.sparks.lifetime == 0 {
            return Err(ConfigError::invalid("sparks.lifetime", "must be at least one frame"));
        }
        if !(0.0..=1.0).contains(&self.sparks.spawn_chance) {
            return Err(ConfigError::invalid("sparks.spawn_chance", "must be within [0, 1]"));
        }
        if !(self.sparks.shrink > 0.0 && self.sparks.shrink < 1.0) {
            return Err(ConfigError::invalid("sparks.shrink", "must be within (0, 1)"));
        }
        if self.sparks.radius.min <= 0.0 {
            return Err(ConfigError::invalid("sparks.radius", "must be positive"));
        }
        if !(self.growth.rate > 0.0 && self.growth.rate <= 1.0) {
            return Err(ConfigError::invalid("growth.rate", "must be within (0, 1]"));
        }
        if self.growth.min_step <= 0.0 {
            return Err(ConfigError::invalid("growth.min_step", "must be positive"));
        }
        if !(self.bloom.rate > 0.0 && self.bloom.rate <= 1.0) {
            return Err(ConfigError::invalid("bloom.rate", "must be within (0, 1]"));
        }
        if self.bloom.palette.is_empty() {
            return Err(ConfigError::invalid("bloom.palette", "needs at least one color"));
        }
        if self.bloom.petal_count == 0 {
            return Err(ConfigError::invalid("bloom.petal_count", "needs at least one petal"));
        }
        if self.leaves.length.min <= 0.0 || self.leaves.slenderness <= 0.0 {
            return Err(ConfigError::invalid("leaves", "length and slenderness must be positive"));
        }
        if self.scene.root_length.min <= 0.0 || self.scene.planted_length <= 0.0 {
            return Err(ConfigError::invalid("scene", "stem lengths must be positive"));
        }
        Ok(())
    }
}
