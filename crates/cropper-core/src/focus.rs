//! Focal point picking on the contain-fitted image.

use crate::geometry::{ImageGeometry, Point};
use crate::math::clamp;
use crate::model::FocalPoint;

/// Focal point under `pointer`, relative to the displayed image.
///
/// Positions outside the image snap to the nearest edge.
pub fn focal_point_at(image: &ImageGeometry, pointer: Point) -> FocalPoint {
    let x = clamp(pointer.x - image.left, 0.0, image.width);
    let y = clamp(pointer.y - image.top, 0.0, image.height);
    FocalPoint::new(x / image.width, y / image.height)
}

/// Press-and-drag focal point picker.
///
/// Pointer-down over the image sets the focal point and starts a drag;
/// every move while dragging updates it.
#[derive(Debug, Clone, Default)]
pub struct FocalPointSetter {
    dragging: bool,
}

impl FocalPointSetter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_down(&mut self, pointer: Point, image: &ImageGeometry) -> Option<FocalPoint> {
        if !image.contains(pointer) {
            return None;
        }
        self.dragging = true;
        Some(focal_point_at(image, pointer))
    }

    pub fn pointer_move(&mut self, pointer: Point, image: &ImageGeometry) -> Option<FocalPoint> {
        self.dragging.then(|| focal_point_at(image, pointer))
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }
}
