//! Transform module - conversions between host views and `CameraState`.
//!
//! `capture_view` is the forward direction (host view to wire state),
//! `restore_view` the reverse (wire state to host orientation and framing).
//! For the same extents and distance the two are exact inverses.

mod forward;
mod reverse;

pub use forward::{capture_view, vertical_field_of_view, ExportPolicy};
pub use reverse::{restore_active_view, restore_view, RESTORE_TRANSACTION};
