/// Forward transform - host 3D view to `CameraState`.
///
/// Runs inside a host traversal. The host reports the projection extents
/// of the view being rendered; the orientation and the UI viewport's zoom
/// rectangle are read back from the document.

use glam::DVec3;
use crate::camera::{CameraState, ZoomCorners, GEOMETRY_EPSILON};
use crate::error::Result;
use crate::host::{CameraInfo, ElementKind, HostDocument, ViewId, ViewOrientation};
use crate::sync_bail;

const SOURCE: &str = "camera_sync::forward";

/// How the exported eye, target and orthographic scale are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPolicy {
    /// Target is the center of the UI viewport's zoom rectangle; the eye is
    /// placed at the distance that frames the visible rectangle.
    ///
    /// Follows the user's on-screen pan and zoom. Requires the view to be
    /// open in a UI viewport.
    #[default]
    ViewportFraming,
    /// Eye is the host's raw eye position; the target lies at the host's
    /// target distance along the forward direction.
    ///
    /// Ignores the zoom rectangle, but the view must still be open in a UI
    /// viewport.
    CameraDistance,
}

/// Capture the camera of `view_id` as a `CameraState`.
///
/// # Arguments
///
/// * `host` - Host document
/// * `view_id` - View being rendered by the traversal
/// * `camera_info` - Projection data reported for that view
/// * `policy` - Eye/target derivation
///
/// # Errors
///
/// `Error::HostPrecondition` if `view_id` is not a 3D view, the view is not
/// open in any UI viewport, or the reported extents or
/// zoom rectangle cannot produce a camera.
pub fn capture_view(
    host: &dyn HostDocument,
    view_id: ViewId,
    camera_info: &CameraInfo,
    policy: ExportPolicy,
) -> Result<CameraState> {
    match host.element_kind(view_id) {
        Some(ElementKind::View3d) => {}
        Some(_) | None => {
            sync_bail!(SOURCE, HostPrecondition, "Input view `{}` is not a View3D type", view_id)
        }
    }

    let horizontal = camera_info.horizontal_extent;
    let vertical = camera_info.vertical_extent;
    if !(horizontal > GEOMETRY_EPSILON && vertical > GEOMETRY_EPSILON) {
        sync_bail!(
            SOURCE,
            HostPrecondition,
            "View `{}` reports empty extents ({} x {})",
            view_id,
            horizontal,
            vertical
        );
    }
    if camera_info.is_perspective && camera_info.target_distance.abs() <= GEOMETRY_EPSILON {
        sync_bail!(SOURCE, HostPrecondition, "View `{}` reports a zero target distance", view_id);
    }

    let aspect = horizontal / vertical;
    let orientation = host.orientation(view_id)?;

    let Some(corners) = host.zoom_corners(view_id) else {
        sync_bail!(SOURCE, HostPrecondition, "The selected view `{}` is not opened", view_id);
    };

    let state = match policy {
        ExportPolicy::ViewportFraming => from_viewport(view_id, camera_info, aspect, &orientation, &corners)?,
        ExportPolicy::CameraDistance => from_camera_distance(view_id, camera_info, aspect, &orientation)?,
    };

    state.validate()?;
    Ok(state)
}

/// Vertical field of view in degrees from the reported extents.
///
/// The host reports the full width of the view plane at `target_distance`,
/// which gives the horizontal angle `2·atan(w / 2d)`. The wire carries the
/// vertical angle, recovered through the aspect ratio.
pub fn vertical_field_of_view(camera_info: &CameraInfo) -> f64 {
    let aspect = camera_info.horizontal_extent / camera_info.vertical_extent;
    let horizontal_fov = 2.0 * (camera_info.horizontal_extent / (2.0 * camera_info.target_distance.abs())).atan();
    2.0 * ((horizontal_fov / 2.0).tan() / aspect).atan().to_degrees()
}

fn unit_axes(view_id: ViewId, orientation: &ViewOrientation) -> Result<(DVec3, DVec3, DVec3)> {
    let forward = orientation.forward_direction.try_normalize();
    let up = orientation.up_direction.try_normalize();
    let right = orientation.right_direction().try_normalize();
    match (forward, up, right) {
        (Some(forward), Some(up), Some(right)) => Ok((forward, up, right)),
        _ => sync_bail!(SOURCE, HostPrecondition, "View `{}` has a degenerate orientation", view_id),
    }
}

fn from_viewport(
    view_id: ViewId,
    camera_info: &CameraInfo,
    aspect: f64,
    orientation: &ViewOrientation,
    corners: &ZoomCorners,
) -> Result<CameraState> {
    let (forward, up, right) = unit_axes(view_id, orientation)?;

    if corners.is_degenerate() {
        sync_bail!(SOURCE, HostPrecondition, "Zoom rectangle of view `{}` is empty", view_id);
    }

    let target = corners.center();
    let diagonal = corners.first - target;

    // |diag|·sin(angle(diag, right)) with a unit right vector
    let half_height = diagonal.cross(right).length();
    if half_height <= GEOMETRY_EPSILON {
        sync_bail!(SOURCE, HostPrecondition, "Zoom rectangle of view `{}` has no height", view_id);
    }
    let ortho_scale = 2.0 * half_height;

    let state = if camera_info.is_perspective {
        let fov = vertical_field_of_view(camera_info);
        let distance = half_height / (fov / 2.0).to_radians().tan();
        CameraState::new(aspect, true, fov, target - forward * distance, target, up, ortho_scale)
    } else {
        CameraState::new(aspect, false, 0.0, target - forward * ortho_scale, target, up, ortho_scale)
    };

    Ok(state)
}

fn from_camera_distance(
    view_id: ViewId,
    camera_info: &CameraInfo,
    aspect: f64,
    orientation: &ViewOrientation,
) -> Result<CameraState> {
    let (forward, up, _) = unit_axes(view_id, orientation)?;

    let distance = camera_info.target_distance.abs();
    if distance <= GEOMETRY_EPSILON {
        sync_bail!(SOURCE, HostPrecondition, "View `{}` reports a zero target distance", view_id);
    }

    let eye = orientation.eye_position;
    let target = eye + forward * distance;

    let fov = if camera_info.is_perspective {
        vertical_field_of_view(camera_info)
    } else {
        0.0
    };

    Ok(CameraState::new(
        aspect,
        camera_info.is_perspective,
        fov,
        eye,
        target,
        up,
        camera_info.vertical_extent,
    ))
}

#[cfg(test)]
#[path = "forward_tests.rs"]
mod tests;
