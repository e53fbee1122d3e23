//! Time-driven motion with no stored state
//!
//! Both functions read only elapsed wall time, so a dropped frame never
//! accumulates drift.

use crate::config::GrowthConfig;

/// Angular sway in degrees for a node at `depth`.
///
/// Phase is offset by depth so a chain ripples rather than moving in
/// lockstep; amplitude shrinks as depth approaches the reference depth.
pub fn sway_offset(elapsed_ms: f64, depth: u32, cfg: &GrowthConfig) -> f64 {
    let phase = elapsed_ms * cfg.sway_speed + depth as f64;
    let levels = cfg.depth_reference as f64 - depth as f64;
    phase.sin() * cfg.sway_amplitude * levels * cfg.sway_per_level
}

/// Bloom rotation in radians
pub fn bloom_rotation(elapsed_ms: f64, radians_per_ms: f64) -> f64 {
    elapsed_ms * radians_per_ms
}
