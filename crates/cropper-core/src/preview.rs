//! Thumbnail placement for crop previews.
//!
//! A preview shows one crop inside a fixed container: the frame takes the
//! crop's aspect ratio, and the image is placed inside the frame either from
//! the saved coordinates or around the shared focal point. Coordinates are
//! frame-local, with the frame's top-left corner at (0, 0).

use crate::error::{CropError, Result};
use crate::geometry::convert::coordinates_to_geometry;
use crate::geometry::layout::compute_scale_bounds;
use crate::geometry::{ensure_positive, ImageGeometry, MaskGeometry, Point, ViewportGeometry};
use crate::model::{Crop, FocalPoint};
use crate::transform::{clamp_position, rescale_image};
use serde::Serialize;

/// Placement of one crop preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropPreview {
    /// Visible frame, shaped like the crop
    pub frame: ViewportGeometry,
    /// Image position relative to the frame
    pub image: ImageGeometry,
    /// Whether the placement came from saved coordinates
    pub user_defined: bool,
}

/// Lay out a preview of `crop` inside `container`.
///
/// Crops wider than tall keep the container width; others keep its height.
/// Saved coordinates are normalized the way the editor normalizes them: an
/// image below the cover scale is scaled up around the frame center, then
/// clamped so the frame stays covered. Saved coordinates that fail
/// validation fall back to focal point placement.
///
/// # Errors
/// Returns [`CropError::InvalidGeometry`] for non-positive container, crop or
/// image dimensions.
pub fn compute_crop_preview(
    crop: &Crop,
    focal_point: FocalPoint,
    natural_width: f64,
    natural_height: f64,
    container: ViewportGeometry,
) -> Result<CropPreview> {
    ensure_positive("container width", container.width)?;
    ensure_positive("container height", container.height)?;
    ensure_positive("crop width", crop.target_width)?;
    ensure_positive("crop height", crop.target_height)?;

    let crop_aspect = crop.aspect_ratio();
    let frame = if crop_aspect > 1.0 {
        ViewportGeometry::new(container.width, container.width / crop_aspect)
    } else {
        ViewportGeometry::new(container.height * crop_aspect, container.height)
    };
    let mask = MaskGeometry {
        width: frame.width,
        height: frame.height,
        left: 0.0,
        top: 0.0,
    };
    let bounds = compute_scale_bounds(&mask, natural_width, natural_height, 1.0)?;

    if let Some(inset) = &crop.coordinates {
        let placement = coordinates_to_geometry(
            &mask,
            crop_aspect,
            natural_width,
            natural_height,
            bounds,
            inset,
        );
        match placement {
            Ok(placement) => {
                let mut image = placement.image;
                let scale = image.scale().max(bounds.min_scale);
                rescale_image(&mut image, &mask, scale, None);
                return Ok(CropPreview {
                    frame,
                    image,
                    user_defined: true,
                });
            }
            Err(err @ CropError::InvalidInset { .. }) => {
                tracing::warn!(
                    alias = %crop.alias,
                    error = %err,
                    "preview falls back to focal point"
                );
            }
            Err(err) => return Err(err),
        }
    }

    // Center the focal point in the frame, then keep the frame covered
    let width = natural_width * bounds.min_scale;
    let height = natural_height * bounds.min_scale;
    let centered = Point::new(
        frame.width / 2.0 - width * focal_point.left,
        frame.height / 2.0 - height * focal_point.top,
    );
    let position = clamp_position(&mask, width, height, centered);

    Ok(CropPreview {
        frame,
        image: ImageGeometry::at_scale(
            natural_width,
            natural_height,
            bounds.min_scale,
            position.x,
            position.y,
        ),
        user_defined: false,
    })
}
