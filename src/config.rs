//! Mount configuration: which DOM elements to bind and where to keep the theme.
//!
//! Passed from JavaScript as an optional JSON string. Every field has a
//! default matching the stock host page, so `mount()` with no argument works.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::SkyError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkyConfig {
    /// Id of the full-viewport `<canvas>`.
    pub canvas_id: String,
    /// Id of the theme toggle button.
    pub toggle_id: String,
    /// Selector, relative to the button, of the icon element.
    pub icon_selector: String,
    /// Selector, relative to the button, of the caption element.
    pub text_selector: String,
    /// `localStorage` key holding `"dark"` or `"light"`.
    pub storage_key: String,
    /// Console log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
    /// Fixed random seed; a fresh one is drawn per page load when absent.
    pub seed: Option<u64>,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            canvas_id: "sky".to_owned(),
            toggle_id: "toggle-theme".to_owned(),
            icon_selector: ".btn__icon".to_owned(),
            text_selector: ".btn__text".to_owned(),
            storage_key: "cv_theme".to_owned(),
            log_level: "info".to_owned(),
            seed: None,
        }
    }
}

impl SkyConfig {
    /// Parse a config. `None` or blank input yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError::Config`] if the JSON is malformed.
    pub fn parse(json: Option<&str>) -> Result<Self, SkyError> {
        match json.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(raw) => Ok(serde_json::from_str(raw)?),
        }
    }

    /// The configured log level, falling back to `Info` when unrecognised.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
