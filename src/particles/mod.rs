//! Particle entities
//!
//! Ambient streaks that fall across the whole surface, and the sparks
//! blooms shed while they flower.

pub mod streaks;
pub mod sparks;

pub use streaks::AmbientStreak;
pub use sparks::SparkParticle;
