use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub mod animation;
pub mod config;
pub mod error;
pub mod growth;
pub mod host;
pub mod math;
pub mod particles;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use config::GardenConfig;
pub use error::{ConfigError, RenderError};
pub use host::run;
pub use scene::Scene;

use render::CanvasSurface;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    telemetry::init(tracing::Level::INFO);
}

/// A garden bound to one canvas, exposed to JavaScript
#[wasm_bindgen]
pub struct Garden {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    scene: Scene,
}

#[wasm_bindgen]
impl Garden {
    /// Create a garden filling the canvas at its current size
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<Garden, JsValue> {
        Ok(Self::with_config(canvas, GardenConfig::default())?)
    }

    /// Update and paint one frame; `timestamp` is the animation-frame time in ms
    #[wasm_bindgen]
    pub fn render(&mut self, timestamp: f64) -> Result<(), JsValue> {
        Ok(self.frame(timestamp)?)
    }

    /// Resize the canvas and start the garden over
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.scene.resize(width as f64, height as f64);
    }

    /// Plant a new stem at a point in canvas pixels
    #[wasm_bindgen]
    pub fn plant(&mut self, x: f64, y: f64) {
        self.scene.plant(x, y);
    }

    #[wasm_bindgen]
    pub fn root_count(&self) -> usize {
        self.scene.roots().len()
    }

    #[wasm_bindgen]
    pub fn node_count(&self) -> usize {
        self.scene.node_count()
    }

    #[wasm_bindgen]
    pub fn bloom_count(&self) -> usize {
        self.scene.bloom_count()
    }

    #[wasm_bindgen]
    pub fn spark_count(&self) -> usize {
        self.scene.sparks().len()
    }

    #[wasm_bindgen]
    pub fn streak_count(&self) -> usize {
        self.scene.streaks().len()
    }
}

impl Garden {
    /// Bind a garden with custom tuning to a canvas
    pub fn with_config(canvas: HtmlCanvasElement, config: GardenConfig) -> Result<Garden, RenderError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| RenderError::canvas("getContext", e))?
            .ok_or(RenderError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::MissingContext)?;

        let scene = Scene::new(canvas.width() as f64, canvas.height() as f64, config)?;

        Ok(Self {
            canvas,
            surface: CanvasSurface::new(ctx),
            scene,
        })
    }

    pub fn frame(&mut self, timestamp: f64) -> Result<(), RenderError> {
        self.scene.frame(&mut self.surface, timestamp)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}
