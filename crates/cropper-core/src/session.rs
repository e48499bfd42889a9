//! Crop editing session.
//!
//! [`CropSession`] owns the editor value and wires layout, conversion, zoom,
//! pan and focal point picking together. It is driven by the host event loop:
//! every method takes `&mut self`, runs synchronously and queues
//! [`CropperEvent`]s that the host drains with [`CropSession::take_events`].
//!
//! # Modes
//!
//! - **Focal point**: the whole image is shown contain-fitted and pointer
//!   drags move the shared focal point.
//! - **Crop**: one crop is edited behind its mask. The crop is a working copy;
//!   nothing reaches the editor value until [`CropSession::save`].
//!
//! # Layout Readiness
//!
//! Layout needs both the viewport size and the natural image size. Until both
//! are known the session records the requested mode and defers the rebuild;
//! [`CropSession::snapshot`] returns `None` in the meantime.

use crate::config::CropperConfig;
use crate::error::{CropError, Result};
use crate::focus::FocalPointSetter;
use crate::geometry::convert::{
    coordinates_to_geometry, focal_point_to_geometry, geometry_to_coordinates,
};
use crate::geometry::layout::{compute_layout, fit_contain};
use crate::geometry::{ensure_positive, ImageGeometry, MaskGeometry, Point, ViewportGeometry};
use crate::model::{Crop, CropperValue, FocalPoint, Inset};
use crate::transform::{
    apply_zoom_delta, rescale_image, wheel_zoom_delta, PanController, ZoomKey, ZoomState,
};
use serde::Serialize;

/// Read-only geometry for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum GeometrySnapshot {
    /// A crop is being edited behind its mask.
    Crop {
        mask: MaskGeometry,
        image: ImageGeometry,
        zoom: ZoomState,
    },
    /// The focal point is being edited on the contain-fitted image.
    FocalPoint {
        image: ImageGeometry,
        #[serde(rename = "focalPoint")]
        focal_point: FocalPoint,
    },
}

impl GeometrySnapshot {
    pub fn image(&self) -> &ImageGeometry {
        match self {
            GeometrySnapshot::Crop { image, .. } | GeometrySnapshot::FocalPoint { image, .. } => {
                image
            }
        }
    }

    pub fn mask(&self) -> Option<&MaskGeometry> {
        match self {
            GeometrySnapshot::Crop { mask, .. } => Some(mask),
            GeometrySnapshot::FocalPoint { .. } => None,
        }
    }

    /// Current zoom alpha, in crop mode.
    pub fn alpha(&self) -> Option<f64> {
        match self {
            GeometrySnapshot::Crop { zoom, .. } => Some(zoom.alpha),
            GeometrySnapshot::FocalPoint { .. } => None,
        }
    }
}

/// Notifications for the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CropperEvent {
    /// The snapshot was replaced or mutated; re-render.
    GeometryChanged,
    /// A crop was saved.
    CropChanged { alias: String, coordinates: Inset },
    /// The shared focal point moved.
    FocalPointChanged(FocalPoint),
    /// Crop editing was abandoned without saving.
    Canceled,
}

#[derive(Debug, Clone)]
enum Mode {
    FocalPoint,
    /// Working copy of the crop being edited
    Crop(Crop),
}

/// Interactive editor for the crops of one image.
#[derive(Debug)]
pub struct CropSession {
    config: CropperConfig,
    value: CropperValue,
    viewport: Option<ViewportGeometry>,
    /// Screen position of the viewport's top-left corner
    origin: Point,
    natural_size: Option<(f64, f64)>,
    mode: Mode,
    geometry: Option<GeometrySnapshot>,
    pan: PanController,
    focus: FocalPointSetter,
    events: Vec<CropperEvent>,
}

impl CropSession {
    /// Create a session in focal point mode.
    ///
    /// # Errors
    /// Returns [`CropError::InvalidConfig`] if `config` fails validation.
    pub fn new(value: CropperValue, config: CropperConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            value,
            viewport: None,
            origin: Point::default(),
            natural_size: None,
            mode: Mode::FocalPoint,
            geometry: None,
            pan: PanController::new(),
            focus: FocalPointSetter::new(),
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    /// The persisted editor value, including every saved crop.
    pub fn value(&self) -> &CropperValue {
        &self.value
    }

    pub fn into_value(self) -> CropperValue {
        self.value
    }

    pub fn focal_point(&self) -> FocalPoint {
        self.value.focal_point
    }

    /// Working copy of the crop being edited.
    pub fn active_crop(&self) -> Option<&Crop> {
        match &self.mode {
            Mode::Crop(crop) => Some(crop),
            Mode::FocalPoint => None,
        }
    }

    pub fn is_focal_point_mode(&self) -> bool {
        matches!(self.mode, Mode::FocalPoint)
    }

    pub fn is_dragging(&self) -> bool {
        self.pan.is_dragging() || self.focus.is_dragging()
    }

    /// Current geometry, or `None` while layout is pending or failed.
    pub fn snapshot(&self) -> Option<&GeometrySnapshot> {
        self.geometry.as_ref()
    }

    /// Drain queued events in the order they happened.
    pub fn take_events(&mut self) -> Vec<CropperEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Host surface and image resource
    // ------------------------------------------------------------------

    /// Report the viewport size and its screen position. Triggers a rebuild.
    pub fn set_viewport(&mut self, viewport: ViewportGeometry, origin: Point) -> Result<()> {
        self.viewport = Some(viewport);
        self.origin = origin;
        self.rebuild()
    }

    /// Image ready signal with the decoded natural size. Triggers a rebuild.
    ///
    /// # Errors
    /// Returns [`CropError::InvalidGeometry`] for a non-positive size; the
    /// previous size (if any) is kept.
    pub fn set_image_size(&mut self, natural_width: f64, natural_height: f64) -> Result<()> {
        ensure_positive("image natural width", natural_width)?;
        ensure_positive("image natural height", natural_height)?;
        self.natural_size = Some((natural_width, natural_height));
        self.rebuild()
    }

    /// Switch to a different image. Layout waits for the next
    /// [`set_image_size`](Self::set_image_size).
    pub fn set_source(&mut self, src: impl Into<String>) {
        self.value.src = src.into();
        self.natural_size = None;
        self.discard_geometry();
    }

    // ------------------------------------------------------------------
    // Mode changes
    // ------------------------------------------------------------------

    /// Start editing the crop named `alias`.
    ///
    /// # Errors
    /// - [`CropError::UnknownCrop`] if no crop has that alias
    /// - layout errors from the rebuild (the crop stays selected)
    pub fn select_crop(&mut self, alias: &str) -> Result<()> {
        let crop = self
            .value
            .crop(alias)
            .cloned()
            .ok_or_else(|| CropError::UnknownCrop(alias.to_string()))?;
        self.mode = Mode::Crop(crop);
        self.rebuild()
    }

    /// Leave crop editing (discarding any working copy) and edit the focal point.
    pub fn select_focal_point_mode(&mut self) -> Result<()> {
        self.mode = Mode::FocalPoint;
        self.rebuild()
    }

    /// Drop the working copy's coordinates and place it from the focal point.
    ///
    /// # Errors
    /// Returns [`CropError::NoActiveCrop`] in focal point mode.
    pub fn reset(&mut self) -> Result<()> {
        let Mode::Crop(crop) = &mut self.mode else {
            return Err(CropError::NoActiveCrop);
        };
        crop.coordinates = None;
        self.rebuild()
    }

    /// Write the current placement onto the crop and return to focal point mode.
    ///
    /// Only the edited crop is changed in the editor value.
    ///
    /// # Errors
    /// - [`CropError::NoActiveCrop`] in focal point mode
    /// - [`CropError::LayoutPending`] if no geometry exists yet
    pub fn save(&mut self) -> Result<Inset> {
        let Mode::Crop(crop) = &self.mode else {
            return Err(CropError::NoActiveCrop);
        };
        let Some(GeometrySnapshot::Crop { mask, image, .. }) = &self.geometry else {
            return Err(CropError::LayoutPending);
        };
        let coordinates = geometry_to_coordinates(mask, image)?;
        let alias = crop.alias.clone();

        let target = self
            .value
            .crop_mut(&alias)
            .ok_or_else(|| CropError::UnknownCrop(alias.clone()))?;
        target.coordinates = Some(coordinates);

        tracing::info!(alias = %alias, ?coordinates, "crop saved");
        self.events.push(CropperEvent::CropChanged { alias, coordinates });
        self.mode = Mode::FocalPoint;
        // A failed focal point layout does not undo the save
        if let Err(err) = self.rebuild() {
            tracing::warn!(error = %err, "focal point layout failed after save");
        }
        Ok(coordinates)
    }

    /// Abandon crop editing without persisting anything.
    ///
    /// # Errors
    /// Returns [`CropError::NoActiveCrop`] in focal point mode.
    pub fn cancel(&mut self) -> Result<()> {
        let Mode::Crop(crop) = &self.mode else {
            return Err(CropError::NoActiveCrop);
        };
        tracing::info!(alias = %crop.alias, "crop edit canceled");
        self.events.push(CropperEvent::Canceled);
        self.mode = Mode::FocalPoint;
        if let Err(err) = self.rebuild() {
            tracing::warn!(error = %err, "focal point layout failed after cancel");
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pointer, wheel, keyboard and slider input
    // ------------------------------------------------------------------

    /// Pointer pressed at a screen position.
    ///
    /// Returns `true` if the press landed on the image and started a drag.
    pub fn pointer_down(&mut self, screen: Point) -> bool {
        let local = self.to_local(screen);
        match &mut self.geometry {
            Some(GeometrySnapshot::Crop { image, .. }) => self.pan.pointer_down(local, image),
            Some(GeometrySnapshot::FocalPoint { image, .. }) => {
                let image = *image;
                match self.focus.pointer_down(local, &image) {
                    Some(focal_point) => {
                        self.update_focal_point(focal_point);
                        true
                    }
                    None => false,
                }
            }
            None => false,
        }
    }

    /// Pointer moved to a screen position.
    ///
    /// Returns `true` if the geometry or focal point changed.
    pub fn pointer_move(&mut self, screen: Point) -> bool {
        let local = self.to_local(screen);
        match &mut self.geometry {
            Some(GeometrySnapshot::Crop { mask, image, .. }) => {
                let moved = self.pan.pointer_move(local, image, mask);
                if moved {
                    self.events.push(CropperEvent::GeometryChanged);
                }
                moved
            }
            Some(GeometrySnapshot::FocalPoint { image, focal_point }) => {
                let image = *image;
                let current = *focal_point;
                match self.focus.pointer_move(local, &image) {
                    Some(next) if next != current => {
                        self.update_focal_point(next);
                        true
                    }
                    _ => false,
                }
            }
            None => false,
        }
    }

    /// Pointer released, anywhere.
    pub fn pointer_up(&mut self) {
        self.pan.pointer_up();
        self.focus.pointer_up();
    }

    /// Pointer stream lost (capture lost, window blur).
    pub fn pointer_cancel(&mut self) {
        self.pan.cancel();
        self.focus.pointer_up();
    }

    /// Wheel zoom anchored at the pointer.
    ///
    /// Returns `true` if the zoom level changed.
    pub fn wheel(&mut self, delta_y: f64, screen: Point) -> bool {
        let delta = wheel_zoom_delta(delta_y, self.config.wheel_sensitivity);
        let anchor = self.to_local(screen);
        self.zoom_by(delta, Some(anchor))
    }

    /// Keyboard zoom anchored at the mask center.
    ///
    /// Returns `true` if the key is a zoom key and a crop is being edited, so
    /// the host should suppress the key's default action.
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(key) = ZoomKey::from_code(code) else {
            return false;
        };
        if !matches!(self.geometry, Some(GeometrySnapshot::Crop { .. })) {
            return false;
        }
        self.zoom_by(key.delta(self.config.key_zoom_step), None);
        true
    }

    /// Slider input: set the zoom alpha directly, anchored at the mask center.
    ///
    /// Returns `true` if the zoom level changed.
    pub fn set_zoom(&mut self, alpha: f64) -> bool {
        let Some(current) = self.geometry.as_ref().and_then(GeometrySnapshot::alpha) else {
            return false;
        };
        self.zoom_by(alpha - current, None)
    }

    /// Current zoom alpha, in crop mode.
    pub fn zoom(&self) -> Option<f64> {
        self.geometry.as_ref().and_then(GeometrySnapshot::alpha)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn to_local(&self, screen: Point) -> Point {
        screen - self.origin
    }

    fn zoom_by(&mut self, delta: f64, anchor: Option<Point>) -> bool {
        let Some(GeometrySnapshot::Crop { mask, image, zoom }) = &mut self.geometry else {
            return false;
        };
        let changed = apply_zoom_delta(zoom, image, mask, delta, anchor);
        if changed {
            self.events.push(CropperEvent::GeometryChanged);
        }
        changed
    }

    fn update_focal_point(&mut self, focal_point: FocalPoint) {
        self.value.focal_point = focal_point;
        if let Some(GeometrySnapshot::FocalPoint { focal_point: shown, .. }) = &mut self.geometry {
            *shown = focal_point;
        }
        self.events.push(CropperEvent::FocalPointChanged(focal_point));
    }

    fn discard_geometry(&mut self) {
        self.pan.cancel();
        self.focus.pointer_up();
        self.geometry = None;
    }

    /// Recompute all geometry for the current mode from scratch.
    ///
    /// The new snapshot is built completely before it replaces the old one;
    /// on failure no geometry remains.
    fn rebuild(&mut self) -> Result<()> {
        self.discard_geometry();

        let (Some(viewport), Some((natural_width, natural_height))) =
            (self.viewport, self.natural_size)
        else {
            tracing::debug!(
                viewport = self.viewport.is_some(),
                image = self.natural_size.is_some(),
                "layout deferred"
            );
            return Ok(());
        };

        let snapshot = match &self.mode {
            Mode::FocalPoint => {
                let image = fit_contain(viewport, natural_width, natural_height)?;
                tracing::debug!(scale = image.scale(), "focal point layout rebuilt");
                GeometrySnapshot::FocalPoint {
                    image,
                    focal_point: self.value.focal_point,
                }
            }
            Mode::Crop(crop) => build_crop_geometry(
                crop,
                self.value.focal_point,
                viewport,
                natural_width,
                natural_height,
                &self.config,
            )?,
        };

        self.geometry = Some(snapshot);
        self.events.push(CropperEvent::GeometryChanged);
        Ok(())
    }
}

fn build_crop_geometry(
    crop: &Crop,
    focal_point: FocalPoint,
    viewport: ViewportGeometry,
    natural_width: f64,
    natural_height: f64,
    config: &CropperConfig,
) -> Result<GeometrySnapshot> {
    let layout = compute_layout(viewport, crop, natural_width, natural_height, config)?;
    let mask = layout.mask;

    let placement = match &crop.coordinates {
        Some(inset) => {
            match coordinates_to_geometry(
                &mask,
                crop.aspect_ratio(),
                natural_width,
                natural_height,
                layout.bounds,
                inset,
            ) {
                Ok(placement) => placement,
                Err(err @ CropError::InvalidInset { .. }) => {
                    tracing::warn!(
                        alias = %crop.alias,
                        error = %err,
                        "saved coordinates rejected, using focal point"
                    );
                    focal_point_to_geometry(
                        &mask,
                        natural_width,
                        natural_height,
                        layout.bounds,
                        focal_point,
                    )?
                }
                Err(err) => return Err(err),
            }
        }
        None => focal_point_to_geometry(
            &mask,
            natural_width,
            natural_height,
            layout.bounds,
            focal_point,
        )?,
    };

    // Saved coordinates may come from a different zoom range; bring the
    // image back into range and onto the mask.
    let zoom = ZoomState::new(layout.bounds, placement.alpha);
    let mut image = placement.image;
    rescale_image(&mut image, &mask, zoom.scale(), None);

    tracing::debug!(
        alias = %crop.alias,
        mask_width = mask.width,
        mask_height = mask.height,
        min_scale = zoom.min_scale,
        max_scale = zoom.max_scale,
        alpha = zoom.alpha,
        "crop layout rebuilt"
    );
    Ok(GeometrySnapshot::Crop { mask, image, zoom })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value() -> CropperValue {
        CropperValue {
            crops: vec![Crop::new("square", 1000.0, 1000.0), Crop::new("banner", 1920.0, 1080.0)],
            focal_point: FocalPoint::default(),
            src: "photo.jpg".to_string(),
        }
    }

    /// 2000x1000 image in an 800x600 viewport; the square mask is 400x400 at (200, 100).
    fn ready_session() -> CropSession {
        let mut session = CropSession::new(value(), CropperConfig::default()).unwrap();
        session.set_viewport(ViewportGeometry::new(800.0, 600.0), Point::default()).unwrap();
        session.set_image_size(2000.0, 1000.0).unwrap();
        session.take_events();
        session
    }

    fn crop_image(session: &CropSession) -> ImageGeometry {
        match session.snapshot() {
            Some(GeometrySnapshot::Crop { image, .. }) => *image,
            other => panic!("expected crop geometry, got {other:?}"),
        }
    }

    #[test]
    fn test_layout_waits_for_viewport_and_image() {
        let mut session = CropSession::new(value(), CropperConfig::default()).unwrap();
        assert!(session.snapshot().is_none());

        session.set_viewport(ViewportGeometry::new(800.0, 600.0), Point::default()).unwrap();
        assert!(session.snapshot().is_none());
        assert!(session.take_events().is_empty());

        session.set_image_size(2000.0, 1000.0).unwrap();
        assert_eq!(
            session.snapshot(),
            Some(&GeometrySnapshot::FocalPoint {
                image: ImageGeometry::at_scale(2000.0, 1000.0, 0.4, 0.0, 100.0),
                focal_point: FocalPoint::default(),
            })
        );
        assert_eq!(session.take_events(), vec![CropperEvent::GeometryChanged]);
    }

    #[test]
    fn test_crop_selected_before_image_is_laid_out_later() {
        let mut session = CropSession::new(value(), CropperConfig::default()).unwrap();
        session.select_crop("square").unwrap();
        assert!(session.snapshot().is_none());
        session.set_viewport(ViewportGeometry::new(800.0, 600.0), Point::default()).unwrap();
        session.set_image_size(2000.0, 1000.0).unwrap();
        assert!(session.snapshot().and_then(GeometrySnapshot::mask).is_some());
    }

    #[test]
    fn test_select_crop_places_from_focal_point() {
        let mut session = ready_session();
        session.select_crop("square").unwrap();

        let snapshot = session.snapshot().unwrap();
        assert_eq!(
            snapshot.mask(),
            Some(&MaskGeometry {
                width: 400.0,
                height: 400.0,
                left: 200.0,
                top: 100.0,
            })
        );
        assert_eq!(*snapshot.image(), ImageGeometry::at_scale(2000.0, 1000.0, 0.4, 0.0, 100.0));
        assert_eq!(session.zoom(), Some(0.0));
        assert_eq!(session.active_crop().map(|c| c.alias.as_str()), Some("square"));
        assert!(!session.is_focal_point_mode());
    }

    #[test]
    fn test_select_unknown_crop() {
        let mut session = ready_session();
        let err = session.select_crop("missing").unwrap_err();
        assert_eq!(err, CropError::UnknownCrop("missing".to_string()));
        assert!(session.is_focal_point_mode());
    }

    #[test]
    fn test_save_writes_only_the_edited_crop() {
        let mut session = ready_session();
        session.select_crop("square").unwrap();

        let coordinates = session.save().unwrap();
        assert_eq!(coordinates, Inset::new(0.25, 0.0, 0.25, 0.0));
        assert_eq!(session.value().crop("square").unwrap().coordinates, Some(coordinates));
        assert_eq!(session.value().crop("banner").unwrap().coordinates, None);
        assert!(session.is_focal_point_mode());

        let events = session.take_events();
        assert!(events.contains(&CropperEvent::CropChanged {
            alias: "square".to_string(),
            coordinates,
        }));
    }

    #[test]
    fn test_saved_crop_reopens_where_it_was_left() {
        let mut session = ready_session();
        session.select_crop("square").unwrap();

        assert!(session.pointer_down(Point::new(400.0, 300.0)));
        assert!(session.pointer_move(Point::new(300.0, 300.0)));
        session.pointer_up();
        assert_eq!(crop_image(&session).left, -100.0);

        let coordinates = session.save().unwrap();
        assert_eq!(coordinates, Inset::new(0.375, 0.0, 0.125, 0.0));

        session.select_crop("square").unwrap();
        let image = crop_image(&session);
        assert!((image.left - -100.0).abs() < 1e-9);
        assert!((image.top - 100.0).abs() < 1e-9);
        assert!((image.width - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancel_discards_working_copy() {
        let mut session = ready_session();
        session.select_crop("square").unwrap();
        session.pointer_down(Point::new(400.0, 300.0));
        session.pointer_move(Point::new(300.0, 300.0));
        session.pointer_up();
        session.take_events();

        session.cancel().unwrap();
        assert_eq!(
            session.take_events(),
            vec![CropperEvent::Canceled, CropperEvent::GeometryChanged]
        );
        assert_eq!(session.value(), &value());
        assert!(session.is_focal_point_mode());
    }

    #[test]
    fn test_save_and_cancel_need_a_crop() {
        let mut session = ready_session();
        assert_eq!(session.save().unwrap_err(), CropError::NoActiveCrop);
        assert_eq!(session.cancel().unwrap_err(), CropError::NoActiveCrop);
        assert_eq!(session.reset().unwrap_err(), CropError::NoActiveCrop);
    }

    #[test]
    fn test_save_before_layout_is_pending() {
        let mut session = CropSession::new(value(), CropperConfig::default()).unwrap();
        session.select_crop("square").unwrap();
        assert_eq!(session.save().unwrap_err(), CropError::LayoutPending);
        assert_eq!(session.value(), &value());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut crops = value();
        crops.crops[0].coordinates = Some(Inset::new(0.375, 0.0, 0.125, 0.0));
        let mut session = CropSession::new(crops, CropperConfig::default()).unwrap();
        session.set_viewport(ViewportGeometry::new(800.0, 600.0), Point::default()).unwrap();
        session.set_image_size(2000.0, 1000.0).unwrap();
        session.select_crop("square").unwrap();

        session.reset().unwrap();
        let first = *session.snapshot().unwrap();
        session.reset().unwrap();
        assert_eq!(session.snapshot(), Some(&first));
        assert_eq!(first.image().left, 0.0);
        assert!(session.active_crop().unwrap().coordinates.is_none());
        // Reset only touches the working copy
        assert!(session.value().crop("square").unwrap().coordinates.is_some());
    }

    #[test]
    fn test_invalid_saved_coordinates_fall_back_to_focal_point() {
        let mut crops = value();
        crops.crops[0].coordinates = Some(Inset::new(0.0, 0.7, 0.0, 0.7));
        let mut session = CropSession::new(crops, CropperConfig::default()).unwrap();
        session.set_viewport(ViewportGeometry::new(800.0, 600.0), Point::default()).unwrap();
        session.set_image_size(2000.0, 1000.0).unwrap();

        session.select_crop("square").unwrap();
        assert_eq!(crop_image(&session), ImageGeometry::at_scale(2000.0, 1000.0, 0.4, 0.0, 100.0));
    }

    #[test]
    fn test_focal_point_moves_crop_placement() {
        let mut session = ready_session();
        session.pointer_down(Point::new(0.0, 300.0));
        session.pointer_up();
        assert_eq!(session.focal_point(), FocalPoint::new(0.0, 0.5));

        session.select_crop("square").unwrap();
        assert_eq!(crop_image(&session).left, 200.0);
    }

    #[test]
    fn test_focal_point_drag_uses_viewport_origin() {
        let mut session = ready_session();
        session.set_viewport(ViewportGeometry::new(800.0, 600.0), Point::new(10.0, 20.0)).unwrap();
        session.take_events();

        assert!(session.pointer_down(Point::new(410.0, 320.0)));
        assert!(session.pointer_move(Point::new(210.0, 220.0)));
        session.pointer_up();
        assert!(!session.pointer_move(Point::new(10.0, 20.0)));

        assert_eq!(session.focal_point(), FocalPoint::new(0.25, 0.25));
        assert_eq!(session.value().focal_point, FocalPoint::new(0.25, 0.25));
        assert_eq!(
            session.take_events(),
            vec![
                CropperEvent::FocalPointChanged(FocalPoint::new(0.5, 0.5)),
                CropperEvent::FocalPointChanged(FocalPoint::new(0.25, 0.25)),
            ]
        );
    }

    #[test]
    fn test_wheel_and_keys_zoom() {
        let mut session = ready_session();
        // No zoom outside crop mode
        assert!(!session.key_down("ArrowUp"));
        assert!(!session.wheel(-100.0, Point::new(400.0, 300.0)));

        session.select_crop("square").unwrap();
        session.take_events();

        assert!(session.wheel(-100.0, Point::new(400.0, 300.0)));
        assert!((session.zoom().unwrap() - 0.1).abs() < 1e-12);
        assert_eq!(session.take_events(), vec![CropperEvent::GeometryChanged]);

        assert!(session.key_down("ArrowUp"));
        assert!((session.zoom().unwrap() - 0.2).abs() < 1e-12);
        assert!(session.key_down("ArrowDown"));
        assert!((session.zoom().unwrap() - 0.1).abs() < 1e-12);
        assert!(!session.key_down("KeyA"));

        // Zooming out past the minimum still claims the key but changes nothing
        session.set_zoom(0.0);
        session.take_events();
        assert!(session.key_down("ArrowDown"));
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_slider_sets_zoom() {
        let mut session = ready_session();
        assert!(!session.set_zoom(0.5));

        session.select_crop("square").unwrap();
        assert!(session.set_zoom(1.0));
        let snapshot = *session.snapshot().unwrap();
        assert_eq!(snapshot.alpha(), Some(1.0));
        assert!((snapshot.image().width - 3200.0).abs() < 1e-9);
        assert!(snapshot.image().covers(snapshot.mask().unwrap(), 1e-9));
        assert!(!session.set_zoom(1.0));
    }

    #[test]
    fn test_set_source_waits_for_new_image() {
        let mut session = ready_session();
        session.select_crop("square").unwrap();
        session.set_source("other.jpg");
        assert_eq!(session.value().src, "other.jpg");
        assert!(session.snapshot().is_none());
        assert!(!session.pointer_down(Point::new(400.0, 300.0)));

        session.set_image_size(1000.0, 1000.0).unwrap();
        assert_eq!(crop_image(&session).width, 400.0);
    }

    #[test]
    fn test_layout_failure_leaves_no_geometry() {
        let mut session = ready_session();
        session.set_viewport(ViewportGeometry::new(150.0, 150.0), Point::default()).unwrap();
        assert!(session.snapshot().is_some());

        let err = session.select_crop("square").unwrap_err();
        assert!(matches!(err, CropError::InvalidGeometry(_)));
        assert!(session.snapshot().is_none());
        assert!(!session.wheel(-100.0, Point::default()));
    }

    #[test]
    fn test_rebuild_cancels_drag() {
        let mut session = ready_session();
        session.select_crop("square").unwrap();
        assert!(session.pointer_down(Point::new(400.0, 300.0)));
        assert!(session.is_dragging());

        session.set_viewport(ViewportGeometry::new(1000.0, 800.0), Point::default()).unwrap();
        assert!(!session.is_dragging());
        assert!(!session.pointer_move(Point::new(300.0, 300.0)));
    }

    #[test]
    fn test_invalid_inputs() {
        let mut config = CropperConfig::default();
        config.max_scale_factor = 0.5;
        assert!(matches!(
            CropSession::new(value(), config).unwrap_err(),
            CropError::InvalidConfig(_)
        ));

        let mut session = ready_session();
        assert!(matches!(
            session.set_image_size(0.0, 100.0).unwrap_err(),
            CropError::InvalidGeometry(_)
        ));
        // The previous image size is kept
        assert!(session.snapshot().is_some());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(CropperEvent::CropChanged {
            alias: "square".to_string(),
            coordinates: Inset::new(0.25, 0.0, 0.25, 0.0),
        })
        .unwrap();
        assert_eq!(json["type"], "cropChanged");
        assert_eq!(json["alias"], "square");
        assert_eq!(json["coordinates"]["x1"], 0.25);

        let event = CropperEvent::FocalPointChanged(FocalPoint::new(0.2, 0.8));
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "focalPointChanged");
        assert_eq!(json["left"], 0.2);
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut session = ready_session();
        session.select_crop("square").unwrap();
        let json = serde_json::to_value(session.snapshot().unwrap()).unwrap();
        assert_eq!(json["mode"], "crop");
        assert_eq!(json["mask"]["width"], 400.0);
        assert_eq!(json["image"]["naturalWidth"], 2000.0);
        assert_eq!(json["zoom"]["minScale"], 0.4);
    }
}
