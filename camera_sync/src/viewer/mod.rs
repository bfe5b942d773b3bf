//! Viewer module - the web viewer's side of the camera exchange.
//!
//! The viewer renders the model in its own scene space, offset from the CAD
//! host's coordinates by a model-to-viewer transform.

mod viewer_adapter;

pub use viewer_adapter::{ViewerAdapter, ViewerCamera, ViewerViewport, DEFAULT_ORTHOGRAPHIC_HEIGHT};
