//! Conversion between persisted insets and on-screen image placement.
//!
//! Forward conversion places the image behind a known mask, either from saved
//! [`Inset`] coordinates or from a [`FocalPoint`]. Backward conversion turns
//! the final placement into an [`Inset`] on save.
//!
//! # Dominant Axis
//!
//! With saved coordinates, only one axis is used to size the image: the
//! horizontal insets for crops wider than tall, the vertical insets otherwise
//! (square crops included). The other axis follows from the image's own
//! aspect ratio, since the image is rarely crop-shaped.

use super::layout::ScaleBounds;
use super::{ensure_positive, ImageGeometry, MaskGeometry};
use crate::error::{CropError, Result};
use crate::math::{extrapolate_from_inset, inverse_lerp, lerp};
use crate::model::{FocalPoint, Inset};

/// Floating point slack allowed when checking that the image covers the mask.
pub const COVER_TOLERANCE: f64 = 1e-9;

/// Image placement produced by a forward conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub image: ImageGeometry,
    /// Zoom state matching the image scale. May fall outside 0.0-1.0 when the
    /// saved coordinates were made with a different zoom range.
    pub alpha: f64,
}

/// Zoom state for `scale` within `bounds`; 0.0 for an empty zoom range.
pub fn alpha_for_scale(bounds: ScaleBounds, scale: f64) -> f64 {
    // DivisionUndefined is the only failure
    inverse_lerp(bounds.min_scale, bounds.max_scale, scale).unwrap_or(0.0)
}

/// Place the image from saved coordinates.
///
/// # Errors
/// - [`CropError::InvalidInset`] if the coordinates leave no positive crop window
/// - [`CropError::InvalidGeometry`] if the natural image size is not positive
pub fn coordinates_to_geometry(
    mask: &MaskGeometry,
    crop_aspect: f64,
    natural_width: f64,
    natural_height: f64,
    bounds: ScaleBounds,
    inset: &Inset,
) -> Result<Placement> {
    ensure_positive("image natural width", natural_width)?;
    ensure_positive("image natural height", natural_height)?;
    inset.validate()?;

    let image_aspect = natural_width / natural_height;
    let (width, height) = if crop_aspect > 1.0 {
        let width = extrapolate_from_inset(mask.width, inset.x1 + inset.x2)?;
        (width, width / image_aspect)
    } else {
        let height = extrapolate_from_inset(mask.height, inset.y1 + inset.y2)?;
        (height * image_aspect, height)
    };

    let image = ImageGeometry {
        natural_width,
        natural_height,
        width,
        height,
        left: mask.left - width * inset.x1,
        top: mask.top - height * inset.y1,
    };
    Ok(Placement {
        alpha: alpha_for_scale(bounds, image.scale()),
        image,
    })
}

/// Place the image at the cover scale, positioned by the focal point.
///
/// The focal point picks where the image sits within the slack between mask
/// and image: (0.5, 0.5) centers it, (0, 0) aligns the top-left corners.
///
/// # Errors
/// Returns [`CropError::InvalidGeometry`] if the natural size is not positive
/// or if the image at `bounds.min_scale` does not cover the mask.
pub fn focal_point_to_geometry(
    mask: &MaskGeometry,
    natural_width: f64,
    natural_height: f64,
    bounds: ScaleBounds,
    focal_point: FocalPoint,
) -> Result<Placement> {
    ensure_positive("image natural width", natural_width)?;
    ensure_positive("image natural height", natural_height)?;

    let width = natural_width * bounds.min_scale;
    let height = natural_height * bounds.min_scale;
    if width < mask.width - COVER_TOLERANCE || height < mask.height - COVER_TOLERANCE {
        return Err(CropError::InvalidGeometry(format!(
            "image {width}x{height} does not cover mask {}x{}",
            mask.width, mask.height
        )));
    }

    let image = ImageGeometry {
        natural_width,
        natural_height,
        width,
        height,
        left: lerp(mask.left, mask.right() - width, focal_point.left),
        top: lerp(mask.top, mask.bottom() - height, focal_point.top),
    };
    Ok(Placement { image, alpha: 0.0 })
}

/// Convert the current placement back into normalized coordinates.
///
/// # Errors
/// Returns [`CropError::InvalidGeometry`] if the image has no positive size.
pub fn geometry_to_coordinates(mask: &MaskGeometry, image: &ImageGeometry) -> Result<Inset> {
    ensure_positive("image width", image.width)?;
    ensure_positive("image height", image.height)?;

    Ok(Inset {
        x1: (mask.left - image.left) / image.width,
        y1: (mask.top - image.top) / image.height,
        x2: (mask.right() - image.right()).abs() / image.width,
        y2: (mask.bottom() - image.bottom()).abs() / image.height,
    })
}
