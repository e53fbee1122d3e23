//! Animation curves for growth and motion
//!
//! Eased approach toward targets for stems and blooms, and pure
//! time-based sway and rotation.

mod easing;
mod sway;

pub use easing::{approach, ease_toward, steps_to_reach};
pub use sway::{sway_offset, bloom_rotation};
