//! Mask layout and image scale bounds.
//!
//! The mask is the largest rectangle with the crop's aspect ratio that fits
//! inside the viewport minus a padding margin, centered in the viewport. The
//! scale bounds follow from the mask: the minimum scale is the "cover" scale
//! at which the image just covers the mask on both axes.

use super::{ensure_positive, ImageGeometry, MaskGeometry, ViewportGeometry};
use crate::config::CropperConfig;
use crate::error::{CropError, Result};
use crate::model::Crop;

/// Scale range of an image behind a mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    /// Smallest scale at which the image still covers the mask
    pub min_scale: f64,
    /// `min_scale * max_scale_factor`
    pub max_scale: f64,
}

/// Result of a full layout pass for one crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropLayout {
    pub mask: MaskGeometry,
    pub bounds: ScaleBounds,
}

/// Fit a mask with the target aspect ratio into the padded viewport.
///
/// # Errors
/// Returns [`CropError::InvalidGeometry`] if a viewport or target dimension
/// is not positive, or if the padding leaves no room for the mask.
pub fn compute_mask(
    viewport: ViewportGeometry,
    target_width: f64,
    target_height: f64,
    padding: f64,
) -> Result<MaskGeometry> {
    ensure_positive("viewport width", viewport.width)?;
    ensure_positive("viewport height", viewport.height)?;
    ensure_positive("crop width", target_width)?;
    ensure_positive("crop height", target_height)?;

    let available_width = viewport.width - padding * 2.0;
    let available_height = viewport.height - padding * 2.0;
    if available_width <= 0.0 || available_height <= 0.0 {
        return Err(CropError::InvalidGeometry(format!(
            "viewport {}x{} leaves no room inside padding {}",
            viewport.width, viewport.height, padding
        )));
    }

    // Pick the limiting axis from the padded area, not the whole viewport
    let crop_aspect = target_width / target_height;
    let (width, height) = if crop_aspect > available_width / available_height {
        (available_width, available_width / crop_aspect)
    } else {
        (available_height * crop_aspect, available_height)
    };

    Ok(MaskGeometry {
        width,
        height,
        left: (viewport.width - width) / 2.0,
        top: (viewport.height - height) / 2.0,
    })
}

/// Compute the zoom range of an image behind `mask`.
///
/// # Errors
/// Returns [`CropError::InvalidGeometry`] if the natural size is not positive.
pub fn compute_scale_bounds(
    mask: &MaskGeometry,
    natural_width: f64,
    natural_height: f64,
    max_scale_factor: f64,
) -> Result<ScaleBounds> {
    ensure_positive("image natural width", natural_width)?;
    ensure_positive("image natural height", natural_height)?;

    let min_scale = (mask.width / natural_width).max(mask.height / natural_height);
    Ok(ScaleBounds {
        min_scale,
        max_scale: min_scale * max_scale_factor,
    })
}

/// Run the full layout for `crop` in `viewport`.
pub fn compute_layout(
    viewport: ViewportGeometry,
    crop: &Crop,
    natural_width: f64,
    natural_height: f64,
    config: &CropperConfig,
) -> Result<CropLayout> {
    let mask = compute_mask(
        viewport,
        crop.target_width,
        crop.target_height,
        config.viewport_padding,
    )?;
    let bounds = compute_scale_bounds(
        &mask,
        natural_width,
        natural_height,
        config.max_scale_factor,
    )?;
    Ok(CropLayout { mask, bounds })
}

/// Fit the whole image inside the viewport, centered. Used for focal point
/// editing where no mask exists.
pub fn fit_contain(
    viewport: ViewportGeometry,
    natural_width: f64,
    natural_height: f64,
) -> Result<ImageGeometry> {
    ensure_positive("viewport width", viewport.width)?;
    ensure_positive("viewport height", viewport.height)?;
    ensure_positive("image natural width", natural_width)?;
    ensure_positive("image natural height", natural_height)?;

    let scale = (viewport.width / natural_width).min(viewport.height / natural_height);
    let width = natural_width * scale;
    let height = natural_height * scale;
    Ok(ImageGeometry::at_scale(
        natural_width,
        natural_height,
        scale,
        (viewport.width - width) / 2.0,
        (viewport.height - height) / 2.0,
    ))
}
