//! Startup and browser errors.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can stop the sky from mounting.
///
/// Once mounted, nothing is fatal: frame errors are logged and storage errors
/// fall back to defaults.
#[derive(Debug, Error)]
pub enum SkyError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("element #{0} is not a <canvas>")]
    NotCanvas(String),

    #[error("canvas has no 2d context")]
    NoContext,

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for SkyError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SkyError> for JsValue {
    fn from(err: SkyError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
