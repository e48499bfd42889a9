//! Cropper Core - Crop geometry engine
//!
//! This crate provides the viewport-relative geometry behind the crop editor:
//! mask layout, cover-scale zoom bounds, conversion between saved insets and
//! on-screen placement, anchored zoom, clamped panning, focal point picking
//! and a session type that ties them together.
//!
//! All geometry is in CSS pixels relative to the viewport's top-left corner.
//! Persisted values ([`Inset`], [`FocalPoint`]) are normalized to 0.0-1.0 and
//! independent of any viewport.

pub mod config;
pub mod error;
pub mod focus;
pub mod geometry;
pub mod math;
pub mod model;
pub mod preview;
pub mod session;
pub mod transform;

pub use config::CropperConfig;
pub use error::{CropError, Result};
pub use geometry::convert::{
    coordinates_to_geometry, focal_point_to_geometry, geometry_to_coordinates, Placement,
};
pub use geometry::layout::{
    compute_layout, compute_mask, compute_scale_bounds, fit_contain, CropLayout, ScaleBounds,
};
pub use geometry::{ImageGeometry, MaskGeometry, Point, ViewportGeometry};
pub use model::{Crop, CropperValue, FocalPoint, Inset};
pub use preview::{compute_crop_preview, CropPreview};
pub use session::{CropSession, CropperEvent, GeometrySnapshot};
pub use transform::{PanController, ZoomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_edit() {
        let json = r#"{
            "crops": [{"alias": "thumb", "width": 300, "height": 300}],
            "focalPoint": {"left": 0.5, "top": 0.5},
            "src": "a.jpg"
        }"#;
        let value = CropperValue::from_json(json).unwrap();
        let mut session = CropSession::new(value, CropperConfig::default()).unwrap();
        session.set_viewport(ViewportGeometry::new(800.0, 600.0), Point::default()).unwrap();
        session.set_image_size(2000.0, 1000.0).unwrap();
        session.select_crop("thumb").unwrap();
        session.save().unwrap();

        let json = session.value().to_json().unwrap();
        let saved = CropperValue::from_json(&json).unwrap();
        assert_eq!(
            saved.crop("thumb").unwrap().coordinates,
            Some(Inset::new(0.25, 0.0, 0.25, 0.0))
        );
    }

    #[test]
    fn test_layout_and_conversion_agree() {
        let crop = Crop::new("wide", 1600.0, 900.0);
        let layout = compute_layout(
            ViewportGeometry::new(1000.0, 800.0),
            &crop,
            4000.0,
            3000.0,
            &CropperConfig::default(),
        )
        .unwrap();
        let placement = focal_point_to_geometry(
            &layout.mask,
            4000.0,
            3000.0,
            layout.bounds,
            FocalPoint::default(),
        )
        .unwrap();
        let inset = geometry_to_coordinates(&layout.mask, &placement.image).unwrap();
        let back = coordinates_to_geometry(
            &layout.mask,
            crop.aspect_ratio(),
            4000.0,
            3000.0,
            layout.bounds,
            &inset,
        )
        .unwrap();
        assert!((back.image.left - placement.image.left).abs() < 1e-9);
        assert!((back.image.top - placement.image.top).abs() < 1e-9);
        assert!((back.image.width - placement.image.width).abs() < 1e-9);
    }

    #[test]
    fn test_preview_and_editor_agree_on_saved_coordinates() {
        let crop = Crop::new("desktop", 1920.0, 1080.0).with_coordinates(Inset::default());
        let value = CropperValue {
            crops: vec![crop.clone()],
            ..CropperValue::default()
        };
        let mut session = CropSession::new(value, CropperConfig::default()).unwrap();
        session.set_viewport(ViewportGeometry::new(800.0, 600.0), Point::default()).unwrap();
        session.set_image_size(2000.0, 1000.0).unwrap();
        session.select_crop("desktop").unwrap();
        let edited = session.save().unwrap();

        let preview = compute_crop_preview(
            &crop,
            FocalPoint::default(),
            2000.0,
            1000.0,
            ViewportGeometry::new(160.0, 160.0),
        )
        .unwrap();
        let frame = MaskGeometry {
            width: preview.frame.width,
            height: preview.frame.height,
            left: 0.0,
            top: 0.0,
        };
        let previewed = geometry_to_coordinates(&frame, &preview.image).unwrap();

        assert!((edited.x1 - 1.0 / 18.0).abs() < 1e-9);
        assert!(previewed.approx_eq(&edited, 1e-9));
    }
}
