//! Cropper WASM - WebAssembly bindings for the crop editor
//!
//! This crate exposes the cropper-core session and geometry functions to the
//! browser host that renders the editor.
//!
//! # Module Structure
//!
//! - `session` - `JsCropSession`, the stateful editor driven by DOM input
//! - `geometry` - Stateless layout, conversion and preview functions
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession } from '@cropper/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = JsCropSession.from_json(hiddenInput.value);
//! session.set_image_size(img.naturalWidth, img.naturalHeight);
//! ```

use wasm_bindgen::prelude::*;

mod geometry;
mod session;

// Re-export public types
pub use geometry::{
    compute_crop_preview, compute_mask_layout, coordinates_to_geometry, geometry_to_coordinates,
};
pub use session::JsCropSession;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!("cropper-wasm {} loaded", version())));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
