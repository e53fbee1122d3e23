pub mod color;
pub mod surface;
pub mod canvas;
pub mod recording;

pub use color::Color;
pub use surface::{Surface, Paint, RadialGradient, Ellipse, LineCap};
pub use canvas::CanvasSurface;
pub use recording::{RecordingSurface, DrawCommand};
