//! Drag-to-pan with position clamping.
//!
//! The clamp expresses the coverage invariant as a bound on the image's
//! top-left corner: as long as the image is at least as large as the mask,
//! any clamped position keeps the mask fully inside the image.

use crate::geometry::{ImageGeometry, MaskGeometry, Point};
use crate::math::clamp;

/// Clamp a proposed top-left image position so the image covers the mask.
///
/// - `left` is limited to `[mask.right - image_width, mask.left]`
/// - `top` is limited to `[mask.bottom - image_height, mask.top]`
pub fn clamp_position(
    mask: &MaskGeometry,
    image_width: f64,
    image_height: f64,
    position: Point,
) -> Point {
    Point {
        x: clamp(position.x, mask.right() - image_width, mask.left),
        y: clamp(position.y, mask.bottom() - image_height, mask.top),
    }
}

/// Pointer drag state. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer offset from the image's top-left corner at pointer-down
    Dragging { pointer_offset: Point },
}

/// `Idle -> Dragging -> Idle` state machine driven by pointer events.
///
/// All pointer positions are viewport-local.
#[derive(Debug, Clone, Default)]
pub struct PanController {
    state: DragState,
}

impl PanController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start a drag if the pointer is over the image.
    ///
    /// Returns `true` when a drag was started.
    pub fn pointer_down(&mut self, pointer: Point, image: &ImageGeometry) -> bool {
        if !image.contains(pointer) {
            return false;
        }
        self.state = DragState::Dragging {
            pointer_offset: pointer - image.position(),
        };
        tracing::trace!(x = pointer.x, y = pointer.y, "pan drag started");
        true
    }

    /// Move the image with the pointer, clamped against the mask.
    ///
    /// Returns `true` if the image position changed.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        image: &mut ImageGeometry,
        mask: &MaskGeometry,
    ) -> bool {
        let DragState::Dragging { pointer_offset } = self.state else {
            return false;
        };
        let target = pointer - pointer_offset;
        let clamped = clamp_position(mask, image.width, image.height, target);
        if clamped == image.position() {
            return false;
        }
        image.left = clamped.x;
        image.top = clamped.y;
        true
    }

    /// End the drag. Accepted anywhere, including outside the image.
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    /// Abort the drag (pointer capture lost, or a layout rebuild).
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            tracing::trace!("pan drag canceled");
        }
        self.state = DragState::Idle;
    }
}
