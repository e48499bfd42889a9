//! Persisted crop data: crops, insets, the focal point and the editor value.
//!
//! These are the only durable artifacts of the engine. Field names follow the
//! property-editor JSON shape:
//!
//! ```json
//! {
//!   "crops": [
//!     { "alias": "square", "width": 1000, "height": 1000,
//!       "coordinates": { "x1": 0.0, "y1": 0.0, "x2": 0.5, "y2": 0.5 } }
//!   ],
//!   "focalPoint": { "left": 0.5, "top": 0.5 },
//!   "src": "/media/photo.jpg"
//! }
//! ```

use crate::error::{CropError, Result};
use crate::math::{clamp, distance};
use serde::{Deserialize, Serialize};

/// Normalized crop window.
///
/// Each value is the fraction of the displayed image width (x) or height (y)
/// lying outside the mask on that edge. Independent of image resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Inset {
    /// Fraction cropped from the left edge
    pub x1: f64,
    /// Fraction cropped from the top edge
    pub y1: f64,
    /// Fraction cropped from the right edge
    pub x2: f64,
    /// Fraction cropped from the bottom edge
    pub y2: f64,
}

impl Inset {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Check that every component is in `[0, 1)` and that the window keeps a
    /// positive width and height.
    ///
    /// # Errors
    /// Returns [`CropError::InvalidInset`] carrying the first offending value.
    pub fn validate(&self) -> Result<()> {
        for value in [self.x1, self.y1, self.x2, self.y2] {
            if !(0.0..1.0).contains(&value) {
                return Err(CropError::InvalidInset { sum: value });
            }
        }
        for sum in [self.x1 + self.x2, self.y1 + self.y2] {
            if sum >= 1.0 {
                return Err(CropError::InvalidInset { sum });
            }
        }
        Ok(())
    }

    /// Whether all four values are within `tolerance` of `other`.
    pub fn approx_eq(&self, other: &Inset, tolerance: f64) -> bool {
        distance(self.x1, other.x1) <= tolerance
            && distance(self.y1, other.y1) <= tolerance
            && distance(self.x2, other.x2) <= tolerance
            && distance(self.y2, other.y2) <= tolerance
    }
}

/// Point of interest used to place the image when a crop has no coordinates.
///
/// Deserialized values are clamped like [`FocalPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawFocalPoint")]
pub struct FocalPoint {
    /// Horizontal position (0.0 = left edge, 1.0 = right edge)
    pub left: f64,
    /// Vertical position (0.0 = top edge, 1.0 = bottom edge)
    pub top: f64,
}

impl FocalPoint {
    /// Create a focal point, clamping both components to 0.0-1.0.
    pub fn new(left: f64, top: f64) -> Self {
        Self {
            left: clamp(left, 0.0, 1.0),
            top: clamp(top, 0.0, 1.0),
        }
    }
}

/// Unchecked wire form of [`FocalPoint`].
#[derive(Deserialize)]
struct RawFocalPoint {
    left: f64,
    top: f64,
}

impl From<RawFocalPoint> for FocalPoint {
    fn from(raw: RawFocalPoint) -> Self {
        Self::new(raw.left, raw.top)
    }
}

impl Default for FocalPoint {
    fn default() -> Self {
        Self {
            left: 0.5,
            top: 0.5,
        }
    }
}

/// A named crop at a fixed target size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    /// Unique name of the crop within an editor value
    pub alias: String,
    /// Target width; with `target_height` this fixes the mask aspect ratio
    #[serde(rename = "width")]
    pub target_width: f64,
    /// Target height
    #[serde(rename = "height")]
    pub target_height: f64,
    /// Saved crop window, if the user has defined one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Inset>,
}

impl Crop {
    pub fn new(alias: impl Into<String>, target_width: f64, target_height: f64) -> Self {
        Self {
            alias: alias.into(),
            target_width,
            target_height,
            coordinates: None,
        }
    }

    /// Builder-style setter for saved coordinates.
    pub fn with_coordinates(mut self, coordinates: Inset) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Target aspect ratio (width / height).
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.target_width / self.target_height
    }

    /// Whether the crop window was set by the user rather than derived from
    /// the focal point.
    pub fn is_user_defined(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// The property-editor value: every crop of one image plus the shared
/// focal point and the image source identifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropperValue {
    pub crops: Vec<Crop>,
    pub focal_point: FocalPoint,
    pub src: String,
}

impl CropperValue {
    /// Parse a value from its JSON form.
    ///
    /// # Errors
    /// Returns [`CropError::InvalidValue`] if the JSON does not match the
    /// editor value shape.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CropError::InvalidValue(e.to_string()))
    }

    /// Serialize the value to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CropError::InvalidValue(e.to_string()))
    }

    /// Find a crop by alias.
    pub fn crop(&self, alias: &str) -> Option<&Crop> {
        self.crops.iter().find(|c| c.alias == alias)
    }

    /// Find a crop by alias for modification.
    pub fn crop_mut(&mut self, alias: &str) -> Option<&mut Crop> {
        self.crops.iter_mut().find(|c| c.alias == alias)
    }
}
