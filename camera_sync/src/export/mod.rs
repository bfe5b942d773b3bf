//! Export module - push the active 3D view's camera to the viewer.
//!
//! A host traversal drives `CameraExportContext`, which captures the state
//! of the requested view and hands it to a `StateSink` when the traversal
//! finishes.

mod state_sink;
mod camera_export_context;

pub use state_sink::StateSink;
pub use camera_export_context::{sync_camera_to_viewer, CameraExportContext, NOT_A_3D_VIEW_MESSAGE};
