//! Interactive image transforms: zoom and pan behind a fixed mask.
//!
//! Both controllers mutate an [`ImageGeometry`](crate::geometry::ImageGeometry)
//! in place and share one rule: the image rectangle must always contain the
//! mask rectangle. Zoom hands its result to the pan clamp before committing.
//!
//! # Transform Order
//!
//! For every zoom step:
//! 1. Rescale around the anchor point
//! 2. Resize to `natural * scale`
//! 3. Clamp the position against the mask

mod pan;
mod zoom;

pub use pan::{clamp_position, DragState, PanController};
pub use zoom::{apply_zoom_delta, rescale_image, wheel_zoom_delta, ZoomKey, ZoomState};
