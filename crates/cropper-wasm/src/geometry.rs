//! Geometry WASM bindings.
//!
//! Stateless access to the layout and conversion functions, for hosts that
//! render previews or migrate saved coordinates without a session.
//! Structured arguments and results cross the boundary via serde_wasm_bindgen.

use cropper_core::geometry::convert::{self, Placement};
use cropper_core::geometry::layout::{self, ScaleBounds};
use cropper_core::{CropError, ImageGeometry, MaskGeometry, ViewportGeometry};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Mask and zoom range returned by [`compute_mask_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsMaskLayout {
    pub mask: MaskGeometry,
    pub min_scale: f64,
    pub max_scale: f64,
}

/// Image placement returned by [`coordinates_to_geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JsPlacement {
    pub image: ImageGeometry,
    pub alpha: f64,
}

impl From<Placement> for JsPlacement {
    fn from(placement: Placement) -> Self {
        Self {
            image: placement.image,
            alpha: placement.alpha,
        }
    }
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn from_js<T: serde::de::DeserializeOwned>(
    value: JsValue,
    what: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

/// Convert a core error to a JS string and report it on the console.
pub(crate) fn core_err(err: CropError) -> JsValue {
    let value = JsValue::from_str(&err.to_string());
    web_sys::console::error_1(&value);
    value
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn mask_layout(
    viewport_width: f64,
    viewport_height: f64,
    target_width: f64,
    target_height: f64,
    natural_width: f64,
    natural_height: f64,
    padding: f64,
    max_scale_factor: f64,
) -> Result<JsMaskLayout, CropError> {
    let viewport = ViewportGeometry::new(viewport_width, viewport_height);
    let mask = layout::compute_mask(viewport, target_width, target_height, padding)?;
    let bounds =
        layout::compute_scale_bounds(&mask, natural_width, natural_height, max_scale_factor)?;
    Ok(JsMaskLayout {
        mask,
        min_scale: bounds.min_scale,
        max_scale: bounds.max_scale,
    })
}

/// Fit a crop mask into a viewport and compute the image's zoom range.
///
/// # Returns
/// `{ mask: { width, height, left, top }, minScale, maxScale }`
///
/// # Example (TypeScript)
/// ```typescript
/// const { naturalWidth, naturalHeight } = img;
/// const layout = compute_mask_layout(800, 600, 1920, 1080, naturalWidth, naturalHeight, 100, 4);
/// maskEl.style.width = `${layout.mask.width}px`;
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn compute_mask_layout(
    viewport_width: f64,
    viewport_height: f64,
    target_width: f64,
    target_height: f64,
    natural_width: f64,
    natural_height: f64,
    padding: f64,
    max_scale_factor: f64,
) -> Result<JsValue, JsValue> {
    let layout = mask_layout(
        viewport_width,
        viewport_height,
        target_width,
        target_height,
        natural_width,
        natural_height,
        padding,
        max_scale_factor,
    )
    .map_err(core_err)?;
    to_js(&layout)
}

/// Place an image behind `mask` from saved inset coordinates.
///
/// # Arguments
/// * `mask` - `{ width, height, left, top }` in viewport pixels
/// * `crop_aspect` - Crop target width divided by target height
/// * `inset` - `{ x1, y1, x2, y2 }` as saved on the crop
///
/// # Returns
/// `{ image, alpha }`, where `alpha` is the zoom level matching the image scale
#[wasm_bindgen]
pub fn coordinates_to_geometry(
    mask: JsValue,
    crop_aspect: f64,
    natural_width: f64,
    natural_height: f64,
    min_scale: f64,
    max_scale: f64,
    inset: JsValue,
) -> Result<JsValue, JsValue> {
    let mask: MaskGeometry = from_js(mask, "mask")?;
    let inset = from_js(inset, "inset")?;
    let bounds = ScaleBounds { min_scale, max_scale };
    let placement = convert::coordinates_to_geometry(
        &mask,
        crop_aspect,
        natural_width,
        natural_height,
        bounds,
        &inset,
    )
    .map_err(core_err)?;
    to_js(&JsPlacement::from(placement))
}

/// Convert an on-screen placement back into inset coordinates.
///
/// # Returns
/// `{ x1, y1, x2, y2 }`
#[wasm_bindgen]
pub fn geometry_to_coordinates(mask: JsValue, image: JsValue) -> Result<JsValue, JsValue> {
    let mask: MaskGeometry = from_js(mask, "mask")?;
    let image: ImageGeometry = from_js(image, "image")?;
    let inset = convert::geometry_to_coordinates(&mask, &image).map_err(core_err)?;
    to_js(&inset)
}

/// Lay out a crop thumbnail inside a fixed container.
///
/// # Arguments
/// * `crop` - `{ alias, width, height, coordinates? }`
/// * `focal_point` - `{ left, top }`
///
/// # Returns
/// `{ frame: { width, height }, image, userDefined }`
#[wasm_bindgen]
pub fn compute_crop_preview(
    crop: JsValue,
    focal_point: JsValue,
    natural_width: f64,
    natural_height: f64,
    container_width: f64,
    container_height: f64,
) -> Result<JsValue, JsValue> {
    let crop = from_js(crop, "crop")?;
    let focal_point = from_js(focal_point, "focal point")?;
    let preview = cropper_core::compute_crop_preview(
        &crop,
        focal_point,
        natural_width,
        natural_height,
        ViewportGeometry::new(container_width, container_height),
    )
    .map_err(core_err)?;
    to_js(&preview)
}
