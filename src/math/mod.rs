pub mod vec2;
pub mod random;

pub use vec2::{Vec2, deg_to_rad};
pub use random::{Span, pick, chance};
