/// Reverse transform - apply a `CameraState` to a host 3D view.
///
/// The state is validated before the host is touched. Every mutation then
/// happens inside one host transaction; any failure rolls it back so the
/// view is left exactly as it was.

use crate::camera::{CameraState, ViewBasis, ZoomCorners};
use crate::error::Result;
use crate::host::{ElementKind, HostDocument, Transaction, ViewId, ViewOrientation};
use crate::{sync_bail, sync_debug, sync_info};

const SOURCE: &str = "camera_sync::reverse";

/// Name of the host transaction wrapping a restore.
pub const RESTORE_TRANSACTION: &str = "Restore View State";

/// Restore `state` onto the host's active view.
///
/// # Errors
///
/// `Error::MalformedPayload` for an invalid state, `Error::HostPrecondition`
/// if there is no active 3D view, plus every error of `restore_view`.
pub fn restore_active_view<H: HostDocument + ?Sized>(host: &mut H, state: &CameraState) -> Result<()> {
    state.validate()?;

    let Some(view_id) = host.active_view() else {
        sync_bail!(SOURCE, HostPrecondition, "There is no active view to restore onto");
    };

    restore_view(host, view_id, state)
}

/// Restore `state` onto `view_id`.
///
/// Steps, all inside one transaction:
/// 1. check the view can toggle its projection, toggle it if the mode differs
/// 2. set the orientation to the re-orthogonalized basis
/// 3. zoom the UI viewport to the rectangle framing the state
/// 4. refresh, commit
///
/// # Errors
///
/// - `Error::MalformedPayload` if the state is invalid (nothing is mutated)
/// - `Error::HostPrecondition` if the view is not an open 3D view or cannot
///   toggle its projection
/// - `Error::HostOperation` if the host rejects a mutation or the commit
pub fn restore_view<H: HostDocument + ?Sized>(host: &mut H, view_id: ViewId, state: &CameraState) -> Result<()> {
    state.validate()?;
    let basis = ViewBasis::look_at(state.position(), state.target(), state.up())?;

    if host.element_kind(view_id) != Some(ElementKind::View3d) {
        sync_bail!(SOURCE, HostPrecondition, "View `{}` is not a 3D view", view_id);
    }
    if host.zoom_corners(view_id).is_none() {
        sync_bail!(SOURCE, HostPrecondition, "View `{}` is not opened in any UI viewport", view_id);
    }

    let mut transaction = Transaction::start(host, RESTORE_TRANSACTION)?;

    if !transaction.can_toggle_projection(view_id)? {
        sync_bail!(SOURCE, HostPrecondition, "View `{}` cannot toggle its projection mode", view_id);
    }
    if transaction.is_perspective(view_id)? != state.is_perspective() {
        if state.is_perspective() {
            transaction.toggle_to_perspective(view_id)?;
        } else {
            transaction.toggle_to_isometric(view_id)?;
        }
    }

    transaction.set_orientation(view_id, ViewOrientation::new(state.position(), basis.up, basis.sight))?;

    // Right direction as the host sees it after reorientation
    let view_right = transaction.orientation(view_id)?.right_direction();

    let corners = if state.is_perspective() {
        ZoomCorners::for_perspective(
            state.position(),
            state.target(),
            view_right,
            state.field_of_view(),
            state.aspect(),
        )?
    } else {
        ZoomCorners::for_orthographic(state.position(), state.target(), view_right, state.ortho_scale())?
    };
    sync_debug!(SOURCE, "Zooming view `{}` to {:?} / {:?}", view_id, corners.first, corners.second);

    transaction.zoom_and_center_rectangle(view_id, corners)?;
    transaction.refresh_active_view();
    transaction.commit()?;

    sync_info!(SOURCE, "Restored view `{}`", view_id);
    Ok(())
}

#[cfg(test)]
#[path = "reverse_tests.rs"]
mod tests;
