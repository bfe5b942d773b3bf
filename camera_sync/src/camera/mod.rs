//! Camera module - wire camera state and the geometry shared by both
//! transform directions.
//!
//! Provides passive value types: the host-independent camera state, the
//! re-orthogonalized view basis, and the zoom rectangle of a UI viewport.

mod camera_state;
mod view_basis;
mod zoom_corners;

pub use camera_state::{CameraState, GEOMETRY_EPSILON};
pub use view_basis::ViewBasis;
pub use zoom_corners::ZoomCorners;
