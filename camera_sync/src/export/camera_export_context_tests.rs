use std::cell::RefCell;
use glam::DVec3;
use super::*;
use crate::camera::ZoomCorners;
use crate::error::Error;
use crate::host::{MockHost, MockView, ViewOrientation};

// ============================================================================
// Helpers
// ============================================================================

#[derive(Default)]
struct RecordingSink {
    sent: RefCell<Vec<CameraState>>,
}

impl StateSink for RecordingSink {
    fn send(&self, state: &CameraState) -> Result<()> {
        self.sent.borrow_mut().push(*state);
        Ok(())
    }
}

fn host_with_open_view() -> MockHost {
    let mut host = MockHost::new();
    let orientation = ViewOrientation::new(DVec3::new(0.0, 0.0, 10.0), DVec3::Y, DVec3::NEG_Z);
    let corners = ZoomCorners::new(DVec3::new(-3.0, 2.0, 0.0), DVec3::new(3.0, -2.0, 0.0));
    host.add_view(1, MockView::view3d(orientation, true).opened(corners, 1.5));
    host.set_active_view(Some(1));
    host
}

// ============================================================================
// Export command
// ============================================================================

#[test]
fn test_sync_sends_captured_state() {
    let host = host_with_open_view();
    let sink = RecordingSink::default();

    let state = sync_camera_to_viewer(&host, &sink, ExportPolicy::ViewportFraming).unwrap();

    let sent = sink.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], state);
    assert!((state.aspect() - 1.5).abs() < 1e-9);
}

#[test]
fn test_sync_skips_unrelated_views() {
    let mut host = host_with_open_view();
    host.add_view(5, MockView::other_view());
    host.add_traversal_view(5);
    host.add_traversal_view(42);
    let sink = RecordingSink::default();

    let result = sync_camera_to_viewer(&host, &sink, ExportPolicy::ViewportFraming);

    assert!(result.is_ok());
    assert_eq!(sink.sent.borrow().len(), 1);
}

#[test]
fn test_sync_requires_3d_active_view() {
    let mut host = host_with_open_view();
    host.add_view(2, MockView::other_view());
    host.set_active_view(Some(2));
    let sink = RecordingSink::default();

    let result = sync_camera_to_viewer(&host, &sink, ExportPolicy::ViewportFraming);

    assert_eq!(result, Err(Error::HostPrecondition(NOT_A_3D_VIEW_MESSAGE.to_string())));
    assert!(sink.sent.borrow().is_empty());
}

#[test]
fn test_sync_without_active_view() {
    let mut host = host_with_open_view();
    host.set_active_view(None);
    let sink = RecordingSink::default();

    let result = sync_camera_to_viewer(&host, &sink, ExportPolicy::ViewportFraming);
    assert!(matches!(result, Err(Error::HostPrecondition(_))));
}

#[test]
fn test_capture_error_stops_traversal_without_sending() {
    let mut host = MockHost::new();
    let orientation = ViewOrientation::new(DVec3::new(0.0, 0.0, 10.0), DVec3::Y, DVec3::NEG_Z);
    host.add_view(1, MockView::view3d(orientation, true));
    host.set_active_view(Some(1));
    let sink = RecordingSink::default();

    let result = sync_camera_to_viewer(&host, &sink, ExportPolicy::ViewportFraming);

    assert!(matches!(result, Err(Error::HostPrecondition(_))));
    assert!(sink.sent.borrow().is_empty());
}

#[test]
fn test_send_failure_is_not_an_export_error() {
    let host = host_with_open_view();
    let failing = |_: &CameraState| -> Result<()> { Err(Error::Transport("connection refused".to_string())) };

    let result = sync_camera_to_viewer(&host, &failing, ExportPolicy::ViewportFraming);

    assert!(result.is_ok());
}

// ============================================================================
// Context callbacks
// ============================================================================

#[test]
fn test_context_skips_other_views() {
    let host = host_with_open_view();
    let sink = RecordingSink::default();
    let mut context = CameraExportContext::new(1, ExportPolicy::ViewportFraming, &sink);

    let node = ViewNode {
        view_id: 9,
        camera_info: host.camera_info(1),
    };
    assert!(context.start());
    assert_eq!(context.on_view_begin(&host, &node).unwrap(), NodeAction::Skip);
    assert!(context.captured().is_none());

    context.finish();
    assert!(sink.sent.borrow().is_empty());
}
