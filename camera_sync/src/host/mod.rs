//! Host module - capabilities of the CAD host consumed by the transforms.
//!
//! The `HostDocument` trait is the only seam between the camera transforms
//! and a concrete CAD application. `MockHost` implements it in memory.

mod document;
mod transaction;
pub mod mock_host;

pub use document::{
    CameraInfo, ElementKind, ExportContext, HostDocument, NodeAction, ViewId, ViewNode,
    ViewOrientation,
};
pub use transaction::Transaction;
pub use mock_host::{MockFailures, MockHost, MockView, MockViewport};
