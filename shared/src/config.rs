use serde::{Deserialize, Serialize};

use crate::colors::Palette;
use crate::interaction::DEFAULT_DRAG_SENSITIVITY;

pub const DEFAULT_DATA_URL: &str = "data/custom.geo.json";

/// Startup configuration. Every field is optional in the source object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub data_url: String,
    pub palette: Palette,
    /// Pointer pixels per degree of rotation.
    pub drag_sensitivity: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            palette: Palette::default(),
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
        }
    }
}

impl GlobeConfig {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str::<Self>(text)
            .map(Self::sanitized)
            .map_err(|e| format!("config parse error: {e}"))
    }

    /// Replace values that would break rendering with their defaults.
    pub fn sanitized(mut self) -> Self {
        if !(self.drag_sensitivity.is_finite() && self.drag_sensitivity > 0.0) {
            self.drag_sensitivity = DEFAULT_DRAG_SENSITIVITY;
        }
        if self.data_url.trim().is_empty() {
            self.data_url = DEFAULT_DATA_URL.to_string();
        }
        self
    }
}
