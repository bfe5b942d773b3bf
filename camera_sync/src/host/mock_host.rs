/// Mock Host for tests (no CAD application required)
///
/// In-memory document with 3D views, UI viewports, snapshot-based
/// transactions and failure injection. Lets the transforms, the export
/// traversal and the restore queue run without a real host.

use std::collections::BTreeMap;
use glam::DVec3;
use crate::camera::ZoomCorners;
use crate::error::Result;
use crate::sync_bail;
use super::document::{
    CameraInfo, ElementKind, ExportContext, HostDocument, NodeAction, ViewId, ViewNode,
    ViewOrientation,
};

// ============================================================================
// Mock View
// ============================================================================

/// UI viewport showing a view.
///
/// `aspect` is the window's width/height. Zooming fits the requested
/// rectangle into the window, the way a host viewport does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockViewport {
    pub corners: ZoomCorners,
    pub aspect: f64,
}

/// A host element held by the mock document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockView {
    pub kind: ElementKind,
    pub orientation: ViewOrientation,
    pub is_perspective: bool,
    pub can_toggle: bool,
    pub viewport: Option<MockViewport>,
}

impl MockView {
    /// A 3D view that is not open in any viewport.
    pub fn view3d(orientation: ViewOrientation, is_perspective: bool) -> Self {
        Self {
            kind: ElementKind::View3d,
            orientation,
            is_perspective,
            can_toggle: true,
            viewport: None,
        }
    }

    /// A plan/section style view.
    pub fn other_view() -> Self {
        Self {
            kind: ElementKind::OtherView,
            ..Self::view3d(default_orientation(), false)
        }
    }

    /// An element that is not a view.
    pub fn non_view() -> Self {
        Self {
            kind: ElementKind::NonView,
            ..Self::view3d(default_orientation(), false)
        }
    }

    /// Open the view in a UI viewport framing `corners`.
    pub fn opened(mut self, corners: ZoomCorners, aspect: f64) -> Self {
        self.viewport = Some(MockViewport { corners, aspect });
        self
    }

    /// Lock the projection mode (e.g. a view with a locked camera).
    pub fn without_projection_toggle(mut self) -> Self {
        self.can_toggle = false;
        self
    }
}

fn default_orientation() -> ViewOrientation {
    ViewOrientation::new(DVec3::new(0.0, 0.0, 10.0), DVec3::Y, DVec3::NEG_Z)
}

// ============================================================================
// Failure injection
// ============================================================================

/// Host calls that should fail on their next invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockFailures {
    pub begin_transaction: bool,
    pub toggle_projection: bool,
    pub set_orientation: bool,
    pub zoom: bool,
    pub commit: bool,
}

// ============================================================================
// Mock Host
// ============================================================================

struct OpenTransaction {
    name: String,
    snapshot: BTreeMap<ViewId, MockView>,
}

/// In-memory host document
pub struct MockHost {
    views: BTreeMap<ViewId, MockView>,
    active_view: Option<ViewId>,
    transaction: Option<OpenTransaction>,
    /// Views the traversal visits before the requested one
    traversal_extras: Vec<ViewId>,
    /// Calls that fail while their flag is set
    pub failures: MockFailures,
    committed: Vec<String>,
    rolled_back: Vec<String>,
    refresh_count: usize,
    calls: Vec<&'static str>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            views: BTreeMap::new(),
            active_view: None,
            transaction: None,
            traversal_extras: Vec::new(),
            failures: MockFailures::default(),
            committed: Vec::new(),
            rolled_back: Vec::new(),
            refresh_count: 0,
            calls: Vec::new(),
        }
    }

    pub fn add_view(&mut self, id: ViewId, view: MockView) {
        self.views.insert(id, view);
    }

    pub fn set_active_view(&mut self, id: Option<ViewId>) {
        self.active_view = id;
    }

    /// Make the traversal visit `id` before the requested view.
    pub fn add_traversal_view(&mut self, id: ViewId) {
        self.traversal_extras.push(id);
    }

    pub fn view(&self, id: ViewId) -> Option<&MockView> {
        self.views.get(&id)
    }

    /// Names of committed transactions, oldest first
    pub fn committed_transactions(&self) -> &[String] {
        &self.committed
    }

    /// Names of rolled back transactions, oldest first
    pub fn rolled_back_transactions(&self) -> &[String] {
        &self.rolled_back
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    /// Host calls in order (queries excluded)
    pub fn calls(&self) -> &[&'static str] {
        &self.calls
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Camera info the host reports for `id` during traversal.
    ///
    /// Extents are the viewport rectangle measured along the view's right
    /// and up directions; the target distance is the rectangle center's
    /// depth along the forward direction.
    pub fn camera_info(&self, id: ViewId) -> CameraInfo {
        let Some(view) = self.views.get(&id) else {
            return CameraInfo {
                is_perspective: false,
                horizontal_extent: 1.0,
                vertical_extent: 1.0,
                target_distance: 1.0,
            };
        };

        let orientation = view.orientation;
        let right = orientation.right_direction().normalize_or_zero();
        let up = orientation.up_direction.normalize_or_zero();
        let forward = orientation.forward_direction.normalize_or_zero();

        match view.viewport {
            Some(viewport) => {
                let half = viewport.corners.half_diagonal();
                CameraInfo {
                    is_perspective: view.is_perspective,
                    horizontal_extent: 2.0 * half.dot(right).abs(),
                    vertical_extent: 2.0 * half.dot(up).abs(),
                    target_distance: (viewport.corners.center() - orientation.eye_position).dot(forward),
                }
            }
            None => CameraInfo {
                is_perspective: view.is_perspective,
                horizontal_extent: 1.0,
                vertical_extent: 1.0,
                target_distance: 1.0,
            },
        }
    }

    fn require_view3d(&self, id: ViewId) -> Result<&MockView> {
        match self.views.get(&id) {
            Some(view) if view.kind == ElementKind::View3d => Ok(view),
            Some(_) => sync_bail!("camera_sync::MockHost", HostPrecondition, "Element {} is not a 3D view", id),
            None => sync_bail!("camera_sync::MockHost", HostPrecondition, "Element {} does not exist", id),
        }
    }

    fn require_transaction(&self, operation: &str) -> Result<()> {
        if self.transaction.is_none() {
            sync_bail!("camera_sync::MockHost", HostOperation, "{} requires an open transaction", operation);
        }
        Ok(())
    }

    fn set_projection(&mut self, view: ViewId, perspective: bool, call: &'static str) -> Result<()> {
        self.calls.push(call);
        self.require_transaction(call)?;
        if self.failures.toggle_projection {
            sync_bail!("camera_sync::MockHost", HostOperation, "Projection toggle failed on view {}", view);
        }
        if !self.require_view3d(view)?.can_toggle {
            sync_bail!("camera_sync::MockHost", HostPrecondition, "View {} cannot toggle its projection", view);
        }
        if let Some(entry) = self.views.get_mut(&view) {
            entry.is_perspective = perspective;
        }
        Ok(())
    }
}

/// Grow `corners` so their extents match `aspect` along the view's axes.
fn fit_to_window(corners: ZoomCorners, orientation: &ViewOrientation, aspect: f64) -> ZoomCorners {
    let right = orientation.right_direction().normalize_or_zero();
    let up = orientation.up_direction.normalize_or_zero();
    let center = corners.center();
    let half = corners.half_diagonal();

    let along_right = half.dot(right);
    let along_up = half.dot(up);
    let depth = half - right * along_right - up * along_up;

    let (mut half_width, mut half_height) = (along_right.abs(), along_up.abs());
    if half_width < half_height * aspect {
        half_width = half_height * aspect;
    } else {
        half_height = half_width / aspect;
    }

    let fitted = right * half_width.copysign(along_right) + up * half_height.copysign(along_up) + depth;
    ZoomCorners::new(center + fitted, center - fitted)
}

impl HostDocument for MockHost {
    fn element_kind(&self, id: ViewId) -> Option<ElementKind> {
        self.views.get(&id).map(|view| view.kind)
    }

    fn active_view(&self) -> Option<ViewId> {
        self.active_view
    }

    fn orientation(&self, view: ViewId) -> Result<ViewOrientation> {
        Ok(self.require_view3d(view)?.orientation)
    }

    fn set_orientation(&mut self, view: ViewId, orientation: ViewOrientation) -> Result<()> {
        self.calls.push("set_orientation");
        self.require_transaction("set_orientation")?;
        self.require_view3d(view)?;
        if self.failures.set_orientation {
            sync_bail!("camera_sync::MockHost", HostOperation, "Orientation rejected on view {}", view);
        }
        if let Some(entry) = self.views.get_mut(&view) {
            entry.orientation = orientation;
        }
        Ok(())
    }

    fn is_perspective(&self, view: ViewId) -> Result<bool> {
        Ok(self.require_view3d(view)?.is_perspective)
    }

    fn can_toggle_projection(&self, view: ViewId) -> Result<bool> {
        Ok(self.require_view3d(view)?.can_toggle)
    }

    fn toggle_to_perspective(&mut self, view: ViewId) -> Result<()> {
        self.set_projection(view, true, "toggle_to_perspective")
    }

    fn toggle_to_isometric(&mut self, view: ViewId) -> Result<()> {
        self.set_projection(view, false, "toggle_to_isometric")
    }

    fn zoom_corners(&self, view: ViewId) -> Option<ZoomCorners> {
        self.views
            .get(&view)
            .and_then(|entry| entry.viewport)
            .map(|viewport| viewport.corners)
    }

    fn zoom_and_center_rectangle(&mut self, view: ViewId, corners: ZoomCorners) -> Result<()> {
        self.calls.push("zoom_and_center_rectangle");
        if self.failures.zoom {
            sync_bail!("camera_sync::MockHost", HostOperation, "Zoom failed on view {}", view);
        }
        let Some(entry) = self.views.get_mut(&view) else {
            sync_bail!("camera_sync::MockHost", HostPrecondition, "Element {} does not exist", view);
        };
        let orientation = entry.orientation;
        let Some(viewport) = entry.viewport.as_mut() else {
            sync_bail!("camera_sync::MockHost", HostPrecondition, "View {} is not open in a viewport", view);
        };
        viewport.corners = fit_to_window(corners, &orientation, viewport.aspect);
        Ok(())
    }

    fn refresh_active_view(&mut self) {
        self.calls.push("refresh_active_view");
        self.refresh_count += 1;
    }

    fn begin_transaction(&mut self, name: &str) -> Result<()> {
        self.calls.push("begin_transaction");
        if self.failures.begin_transaction {
            sync_bail!("camera_sync::MockHost", HostOperation, "Cannot start transaction '{}'", name);
        }
        if let Some(open) = &self.transaction {
            sync_bail!("camera_sync::MockHost", HostOperation, "Transaction '{}' is already open", open.name);
        }
        self.transaction = Some(OpenTransaction {
            name: name.to_string(),
            snapshot: self.views.clone(),
        });
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<()> {
        self.calls.push("commit_transaction");
        if self.failures.commit {
            sync_bail!("camera_sync::MockHost", HostOperation, "Commit failed");
        }
        match self.transaction.take() {
            Some(open) => {
                self.committed.push(open.name);
                Ok(())
            }
            None => sync_bail!("camera_sync::MockHost", HostOperation, "No open transaction to commit"),
        }
    }

    fn rollback_transaction(&mut self) {
        self.calls.push("rollback_transaction");
        if let Some(open) = self.transaction.take() {
            self.views = open.snapshot;
            self.rolled_back.push(open.name);
        }
    }

    fn traverse(&self, view: ViewId, context: &mut dyn ExportContext) -> Result<()> {
        if !context.start() {
            return Ok(());
        }

        for id in self.traversal_extras.iter().copied().chain(std::iter::once(view)) {
            let node = ViewNode {
                view_id: id,
                camera_info: self.camera_info(id),
            };
            if context.on_view_begin(self, &node)? == NodeAction::Proceed {
                context.on_view_end(id);
            }
        }

        context.finish();
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_host_tests.rs"]
mod tests;
