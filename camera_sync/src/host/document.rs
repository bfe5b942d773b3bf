/// HostDocument trait - the CAD host's view and viewport capabilities
///
/// The camera transforms never talk to a concrete host. Everything they
/// read or mutate goes through this trait: element lookup, view
/// orientation, projection mode, the zoom rectangle of the open UI
/// viewport, transactions, and the host-driven scene traversal.

use glam::DVec3;
use crate::camera::ZoomCorners;
use crate::error::Result;

/// Integer id of a host element (views are elements).
pub type ViewId = i64;

/// What a host element id resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// A 3D view with an explicit orientation
    View3d,
    /// Any other view (plan, section, sheet, ...)
    OtherView,
    /// Not a view at all
    NonView,
}

/// Orientation of a host 3D view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOrientation {
    pub eye_position: DVec3,
    pub up_direction: DVec3,
    pub forward_direction: DVec3,
}

impl ViewOrientation {
    pub fn new(eye_position: DVec3, up_direction: DVec3, forward_direction: DVec3) -> Self {
        Self {
            eye_position,
            up_direction,
            forward_direction,
        }
    }

    /// `forward × up`
    pub fn right_direction(&self) -> DVec3 {
        self.forward_direction.cross(self.up_direction)
    }
}

/// Projection data the host reports for a view during traversal.
///
/// Extents are measured on the plane at `target_distance` from the eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInfo {
    pub is_perspective: bool,
    pub horizontal_extent: f64,
    pub vertical_extent: f64,
    pub target_distance: f64,
}

/// A view visited by the host traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewNode {
    pub view_id: ViewId,
    pub camera_info: CameraInfo,
}

/// Whether the traversal should descend into a visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    Proceed,
    Skip,
}

/// Callbacks invoked by `HostDocument::traverse`.
///
/// The host calls `start`, then `on_view_begin`/`on_view_end` for every
/// view it visits (possibly unrelated ones), then `finish`. An error from
/// `on_view_begin` stops the traversal and `finish` is not called.
pub trait ExportContext {
    /// Return `false` to cancel the traversal before it begins.
    fn start(&mut self) -> bool;

    fn on_view_begin(&mut self, host: &dyn HostDocument, node: &ViewNode) -> Result<NodeAction>;

    fn on_view_end(&mut self, _view_id: ViewId) {}

    fn finish(&mut self);
}

/// CAD host capabilities consumed by the transforms.
///
/// All mutating calls are only legal on the host's mutation thread, inside a
/// transaction opened with `begin_transaction`.
pub trait HostDocument {
    /// Resolve an element id. `None` if the id does not exist.
    fn element_kind(&self, id: ViewId) -> Option<ElementKind>;

    /// Currently active view, if any.
    fn active_view(&self) -> Option<ViewId>;

    fn orientation(&self, view: ViewId) -> Result<ViewOrientation>;

    fn set_orientation(&mut self, view: ViewId, orientation: ViewOrientation) -> Result<()>;

    fn is_perspective(&self, view: ViewId) -> Result<bool>;

    /// Whether the view supports switching between perspective and isometric.
    fn can_toggle_projection(&self, view: ViewId) -> Result<bool>;

    fn toggle_to_perspective(&mut self, view: ViewId) -> Result<()>;

    fn toggle_to_isometric(&mut self, view: ViewId) -> Result<()>;

    /// Zoom rectangle of the UI viewport showing `view`.
    ///
    /// `None` if the view is not open in any UI viewport.
    fn zoom_corners(&self, view: ViewId) -> Option<ZoomCorners>;

    /// Zoom the UI viewport showing `view` to the given rectangle.
    fn zoom_and_center_rectangle(&mut self, view: ViewId, corners: ZoomCorners) -> Result<()>;

    /// Redraw the active view and every open view.
    fn refresh_active_view(&mut self);

    fn begin_transaction(&mut self, name: &str) -> Result<()>;

    fn commit_transaction(&mut self) -> Result<()>;

    /// Undo every mutation since `begin_transaction`.
    fn rollback_transaction(&mut self);

    /// Run a host-driven traversal of `view`, invoking `context` callbacks.
    fn traverse(&self, view: ViewId, context: &mut dyn ExportContext) -> Result<()>;
}
