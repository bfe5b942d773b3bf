/// CameraExportContext - traversal callbacks capturing one view's camera.
///
/// Unrelated views visited by the traversal are skipped. The captured
/// state is sent on `finish`; a failed send is logged and never aborts the
/// traversal.

use crate::camera::CameraState;
use crate::error::Result;
use crate::host::{ElementKind, ExportContext, HostDocument, NodeAction, ViewId, ViewNode};
use crate::transform::{capture_view, ExportPolicy};
use crate::{sync_bail, sync_info, sync_warn};
use super::state_sink::StateSink;

const SOURCE: &str = "camera_sync::export";

/// Shown when the export command runs outside a 3D view.
pub const NOT_A_3D_VIEW_MESSAGE: &str = "Please run this command in a 3D view.";

/// Export context for a single view.
pub struct CameraExportContext<'a> {
    view_id: ViewId,
    policy: ExportPolicy,
    sink: &'a dyn StateSink,
    captured: Option<CameraState>,
}

impl<'a> CameraExportContext<'a> {
    pub fn new(view_id: ViewId, policy: ExportPolicy, sink: &'a dyn StateSink) -> Self {
        Self {
            view_id,
            policy,
            sink,
            captured: None,
        }
    }

    /// State captured by the traversal, if the view was visited.
    pub fn captured(&self) -> Option<&CameraState> {
        self.captured.as_ref()
    }
}

impl ExportContext for CameraExportContext<'_> {
    fn start(&mut self) -> bool {
        self.captured = None;
        true
    }

    fn on_view_begin(&mut self, host: &dyn HostDocument, node: &ViewNode) -> Result<NodeAction> {
        if node.view_id != self.view_id {
            return Ok(NodeAction::Skip);
        }

        self.captured = Some(capture_view(host, node.view_id, &node.camera_info, self.policy)?);
        Ok(NodeAction::Proceed)
    }

    fn finish(&mut self) {
        let Some(state) = self.captured.as_ref() else {
            sync_warn!(SOURCE, "Traversal finished without visiting view `{}`", self.view_id);
            return;
        };

        match self.sink.send(state) {
            Ok(()) => sync_info!(SOURCE, "Sent camera of view `{}`", self.view_id),
            Err(err) => sync_warn!(SOURCE, "Failed to send camera of view `{}`: {}", self.view_id, err),
        }
    }
}

/// Export the active view's camera through `sink`.
///
/// Returns the captured state. Delivery failures are only logged, so `Ok`
/// means the capture succeeded, not that the viewer received it.
///
/// # Errors
///
/// `Error::HostPrecondition` with `NOT_A_3D_VIEW_MESSAGE` if the active view
/// is not a 3D view, or any capture error raised during the traversal.
pub fn sync_camera_to_viewer(
    host: &dyn HostDocument,
    sink: &dyn StateSink,
    policy: ExportPolicy,
) -> Result<CameraState> {
    let view_id = match host.active_view() {
        Some(id) if host.element_kind(id) == Some(ElementKind::View3d) => id,
        _ => sync_bail!(SOURCE, HostPrecondition, "{}", NOT_A_3D_VIEW_MESSAGE),
    };

    let mut context = CameraExportContext::new(view_id, policy, sink);
    host.traverse(view_id, &mut context)?;

    match context.captured() {
        Some(state) => Ok(*state),
        None => sync_bail!(SOURCE, HostPrecondition, "View `{}` was not visited by the traversal", view_id),
    }
}

#[cfg(test)]
#[path = "camera_export_context_tests.rs"]
mod tests;
