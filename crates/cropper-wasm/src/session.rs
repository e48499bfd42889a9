//! Crop session WASM bindings.
//!
//! `JsCropSession` wraps the core session for the browser host. The host
//! forwards DOM input (pointer, wheel, keyboard, slider, resize, image load)
//! and reads back the geometry snapshot and queued events after each call.

use crate::geometry::{core_err, from_js, to_js};
use cropper_core::{CropSession, CropperConfig, CropperValue, Point, ViewportGeometry};
use wasm_bindgen::prelude::*;

/// Interactive crop editor state accessible from JavaScript.
///
/// # Example (TypeScript)
/// ```typescript
/// const session = JsCropSession.from_json(JSON.stringify(value));
/// const rect = viewport.getBoundingClientRect();
/// session.set_viewport(rect.width, rect.height, rect.left, rect.top);
/// session.set_image_size(img.naturalWidth, img.naturalHeight);
/// session.select_crop('banner');
///
/// viewport.addEventListener('pointermove', (e) => {
///   if (session.pointer_move(e.clientX, e.clientY)) render(session.snapshot());
/// });
/// ```
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session from an editor value object and an optional config object.
    #[wasm_bindgen(constructor)]
    pub fn new(value: JsValue, config: JsValue) -> Result<JsCropSession, JsValue> {
        let value: CropperValue = from_js(value, "editor value")?;
        let config: CropperConfig = if config.is_undefined() || config.is_null() {
            CropperConfig::default()
        } else {
            from_js(config, "config")?
        };
        let inner = CropSession::new(value, config).map_err(core_err)?;
        Ok(Self { inner })
    }

    /// Create a session from JSON strings, as stored by the host form.
    pub fn from_json(value: &str, config: Option<String>) -> Result<JsCropSession, JsValue> {
        Self::parse(value, config.as_deref()).map_err(core_err)
    }

    // =========================================================================
    // Host surface and image resource
    // =========================================================================

    /// Report the viewport size and its screen position (`getBoundingClientRect`).
    pub fn set_viewport(
        &mut self,
        width: f64,
        height: f64,
        left: f64,
        top: f64,
    ) -> Result<(), JsValue> {
        self.inner
            .set_viewport(ViewportGeometry::new(width, height), Point::new(left, top))
            .map_err(core_err)
    }

    /// Report the natural size once the image has loaded.
    pub fn set_image_size(
        &mut self,
        natural_width: f64,
        natural_height: f64,
    ) -> Result<(), JsValue> {
        self.inner
            .set_image_size(natural_width, natural_height)
            .map_err(core_err)
    }

    /// Switch to a different image source.
    pub fn set_source(&mut self, src: String) {
        self.inner.set_source(src);
    }

    // =========================================================================
    // Mode changes
    // =========================================================================

    pub fn select_crop(&mut self, alias: &str) -> Result<(), JsValue> {
        self.inner.select_crop(alias).map_err(core_err)
    }

    pub fn select_focal_point_mode(&mut self) -> Result<(), JsValue> {
        self.inner.select_focal_point_mode().map_err(core_err)
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.inner.reset().map_err(core_err)
    }

    /// Save the edited crop.
    ///
    /// # Returns
    /// The saved `{ x1, y1, x2, y2 }` coordinates.
    pub fn save(&mut self) -> Result<JsValue, JsValue> {
        let coordinates = self.inner.save().map_err(core_err)?;
        to_js(&coordinates)
    }

    pub fn cancel(&mut self) -> Result<(), JsValue> {
        self.inner.cancel().map_err(core_err)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Returns `true` if a drag started.
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) -> bool {
        self.inner.pointer_down(Point::new(client_x, client_y))
    }

    /// Returns `true` if the view needs to be re-rendered.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> bool {
        self.inner.pointer_move(Point::new(client_x, client_y))
    }

    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    pub fn pointer_cancel(&mut self) {
        self.inner.pointer_cancel();
    }

    /// Returns `true` if the zoom level changed.
    pub fn wheel(&mut self, delta_y: f64, client_x: f64, client_y: f64) -> bool {
        self.inner.wheel(delta_y, Point::new(client_x, client_y))
    }

    /// Returns `true` if the key was handled and its default action should be
    /// prevented.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.inner.key_down(key)
    }

    /// Slider input, 0.0 to 1.0.
    pub fn set_zoom(&mut self, alpha: f64) -> bool {
        self.inner.set_zoom(alpha)
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Current zoom alpha, or `undefined` outside crop mode.
    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> Option<f64> {
        self.inner.zoom()
    }

    #[wasm_bindgen(getter)]
    pub fn is_focal_point_mode(&self) -> bool {
        self.inner.is_focal_point_mode()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Alias of the crop being edited, or `undefined`.
    #[wasm_bindgen(getter)]
    pub fn active_crop(&self) -> Option<String> {
        self.inner.active_crop().map(|crop| crop.alias.clone())
    }

    /// Geometry to render, or `null` while layout is pending.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        match self.inner.snapshot() {
            Some(snapshot) => to_js(snapshot),
            None => Ok(JsValue::NULL),
        }
    }

    /// Drain queued events as an array of `{ type, ... }` objects.
    pub fn take_events(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.take_events())
    }

    /// The editor value as an object.
    pub fn value(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.value())
    }

    /// The editor value as a JSON string, for the host's hidden form field.
    pub fn value_json(&self) -> Result<String, JsValue> {
        self.inner.value().to_json().map_err(core_err)
    }
}

impl JsCropSession {
    fn parse(value: &str, config: Option<&str>) -> cropper_core::Result<Self> {
        let value = CropperValue::from_json(value)?;
        let config = match config {
            Some(json) => CropperConfig::from_json(json)?,
            None => CropperConfig::default(),
        };
        let inner = CropSession::new(value, config)?;
        Ok(Self { inner })
    }
}
