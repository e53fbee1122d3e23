//! Stem growth, leaves and blooms

mod node;
mod leaves;
mod bloom;

pub use node::{GrowthNode, Sprout, FrameContext};
pub use leaves::draw_leaves;
pub use bloom::{draw_bloom, petal_gradient};
