use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures raised while painting a frame or wiring up the page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("canvas call `{op}` failed: {message}")]
    Canvas { op: &'static str, message: String },
    #[error("2D rendering context unavailable")]
    MissingContext,
    #[error("DOM lookup failed: {0}")]
    Dom(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RenderError {
    /// Wrap a rejected JS call
    pub fn canvas(op: &'static str, err: JsValue) -> Self {
        RenderError::Canvas {
            op,
            message: format!("{:?}", err),
        }
    }
}

impl From<RenderError> for JsValue {
    fn from(err: RenderError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Failures while loading tuning parameters
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
