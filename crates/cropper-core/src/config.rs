//! Editor configuration.
//!
//! Every field has a default, so a partial JSON object (or `{}`) is a valid
//! configuration.

use crate::error::{CropError, Result};
use serde::{Deserialize, Serialize};

/// Tunable constants of the crop editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropperConfig {
    /// Margin kept free around the mask on every side of the viewport.
    pub viewport_padding: f64,
    /// Ratio between the largest and smallest allowed image scale.
    pub max_scale_factor: f64,
    /// Zoom delta per wheel unit. Negative so that scrolling up zooms in.
    pub wheel_sensitivity: f64,
    /// Zoom delta applied by one arrow key press.
    pub key_zoom_step: f64,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            viewport_padding: 100.0,
            max_scale_factor: 4.0,
            wheel_sensitivity: -0.001,
            key_zoom_step: 0.1,
        }
    }
}

impl CropperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CropError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are usable by the layout and zoom code.
    ///
    /// # Errors
    /// Returns [`CropError::InvalidConfig`] for a negative or non-finite
    /// padding, a `max_scale_factor` below 1, or non-finite input deltas.
    pub fn validate(&self) -> Result<()> {
        if !self.viewport_padding.is_finite() || self.viewport_padding < 0.0 {
            return Err(CropError::InvalidConfig(format!(
                "viewport_padding must be a non-negative number, got {}",
                self.viewport_padding
            )));
        }
        if !self.max_scale_factor.is_finite() || self.max_scale_factor < 1.0 {
            return Err(CropError::InvalidConfig(format!(
                "max_scale_factor must be at least 1, got {}",
                self.max_scale_factor
            )));
        }
        if !self.wheel_sensitivity.is_finite() || !self.key_zoom_step.is_finite() {
            return Err(CropError::InvalidConfig(
                "zoom input deltas must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
