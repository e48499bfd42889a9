//! On-screen geometry of the crop editor.
//!
//! This module provides the rectangles the editor works with and the two
//! calculations that produce them:
//! - [`layout`] fits the mask into the viewport and derives the scale bounds
//! - [`convert`] maps between persisted [`Inset`](crate::Inset) values and
//!   image placement
//!
//! # Coordinate System
//!
//! All rectangles are viewport-local: (0, 0) is the top-left corner of the
//! viewport, x grows to the right and y grows downwards. Units are whatever
//! the host surface reports (CSS pixels in a browser).

pub mod convert;
pub mod layout;

use crate::error::{CropError, Result};
use serde::{Deserialize, Serialize};

/// A position in viewport-local (or screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Size of the host surface the editor is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportGeometry {
    pub width: f64,
    pub height: f64,
}

impl ViewportGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// The crop window, laid out inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaskGeometry {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl MaskGeometry {
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center of the mask, the default zoom anchor.
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// The displayed image: its natural size and its current on-screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGeometry {
    pub natural_width: f64,
    pub natural_height: f64,
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl ImageGeometry {
    /// Image of the given natural size drawn at `scale` with its top-left
    /// corner at `(left, top)`.
    pub fn at_scale(
        natural_width: f64,
        natural_height: f64,
        scale: f64,
        left: f64,
        top: f64,
    ) -> Self {
        Self {
            natural_width,
            natural_height,
            width: natural_width * scale,
            height: natural_height * scale,
            left,
            top,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Natural aspect ratio (width / height).
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.natural_width / self.natural_height
    }

    /// Current display scale, taking the larger of the two axis ratios.
    pub fn scale(&self) -> f64 {
        (self.width / self.natural_width).max(self.height / self.natural_height)
    }

    /// Top-left corner.
    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Whether the image rectangle fully contains the mask, allowing
    /// `tolerance` of floating point slack on each edge.
    pub fn covers(&self, mask: &MaskGeometry, tolerance: f64) -> bool {
        self.left <= mask.left + tolerance
            && self.top <= mask.top + tolerance
            && self.right() >= mask.right() - tolerance
            && self.bottom() >= mask.bottom() - tolerance
    }
}

/// Reject non-positive and non-finite dimensions.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CropError::InvalidGeometry(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}
