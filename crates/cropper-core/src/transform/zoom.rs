//! Anchor-preserving zoom.
//!
//! Zoom is stored as `alpha` in 0.0-1.0 and mapped linearly onto the scale
//! range `[min_scale, max_scale]`. Changing alpha rescales the image around an
//! anchor point so that the image pixel under the anchor stays put on screen.

use super::pan::clamp_position;
use crate::geometry::layout::ScaleBounds;
use crate::geometry::{ImageGeometry, MaskGeometry, Point};
use crate::math::{clamp, lerp};
use serde::Serialize;

/// Current zoom level and the scale range it maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomState {
    pub alpha: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl ZoomState {
    /// Create a zoom state, clamping `alpha` to 0.0-1.0.
    pub fn new(bounds: ScaleBounds, alpha: f64) -> Self {
        Self {
            alpha: clamp(alpha, 0.0, 1.0),
            min_scale: bounds.min_scale,
            max_scale: bounds.max_scale,
        }
    }

    /// Scale for the current alpha.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale_at(self.alpha)
    }

    /// Scale for an arbitrary alpha (clamped to 0.0-1.0).
    #[inline]
    pub fn scale_at(&self, alpha: f64) -> f64 {
        lerp(self.min_scale, self.max_scale, alpha)
    }
}

/// Change the zoom by `delta` and rescale `image` around `anchor`.
///
/// `anchor` is viewport-local; `None` anchors at the mask center. The new
/// position is clamped against the mask before it is written back, so the
/// anchor only stays fixed when that clamp does not engage.
///
/// Returns `true` if the zoom level changed.
pub fn apply_zoom_delta(
    zoom: &mut ZoomState,
    image: &mut ImageGeometry,
    mask: &MaskGeometry,
    delta: f64,
    anchor: Option<Point>,
) -> bool {
    let old_alpha = zoom.alpha;
    zoom.alpha = clamp(zoom.alpha + delta, 0.0, 1.0);
    rescale_image(image, mask, zoom.scale(), anchor);

    tracing::trace!(alpha = zoom.alpha, scale = zoom.scale(), "zoom applied");
    zoom.alpha != old_alpha
}

/// Resize `image` to `new_scale` keeping the pixel under `anchor` in place,
/// then clamp it against the mask.
///
/// The old scale is read from the image itself, so repeated steps do not
/// accumulate drift between the zoom state and the geometry.
pub fn rescale_image(
    image: &mut ImageGeometry,
    mask: &MaskGeometry,
    new_scale: f64,
    anchor: Option<Point>,
) {
    let anchor = anchor.unwrap_or_else(|| mask.center());
    let ratio = new_scale / image.scale();
    let left = anchor.x - (anchor.x - image.left) * ratio;
    let top = anchor.y - (anchor.y - image.top) * ratio;

    let width = image.natural_width * new_scale;
    let height = image.natural_height * new_scale;
    let position = clamp_position(mask, width, height, Point::new(left, top));

    image.width = width;
    image.height = height;
    image.left = position.x;
    image.top = position.y;
}

/// Zoom delta for a wheel event.
///
/// Wheel `delta_y` is positive when scrolling down, and `sensitivity` is
/// negative by default so scrolling up zooms in.
#[inline]
pub fn wheel_zoom_delta(delta_y: f64, sensitivity: f64) -> f64 {
    delta_y * sensitivity
}

/// Keyboard zoom shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomKey {
    /// `ArrowUp`
    In,
    /// `ArrowDown`
    Out,
}

impl ZoomKey {
    /// Map a DOM `KeyboardEvent.key` value to a zoom key.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(ZoomKey::In),
            "ArrowDown" => Some(ZoomKey::Out),
            _ => None,
        }
    }

    /// Signed zoom delta for one key press.
    pub fn delta(self, step: f64) -> f64 {
        match self {
            ZoomKey::In => step,
            ZoomKey::Out => -step,
        }
    }
}
