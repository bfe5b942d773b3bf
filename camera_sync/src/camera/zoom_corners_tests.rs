use glam::DVec3;
use super::*;

const TOLERANCE: f64 = 1e-9;

// ============================================================================
// Basic geometry
// ============================================================================

#[test]
fn test_center_and_half_diagonal() {
    let corners = ZoomCorners::new(DVec3::new(2.0, 4.0, 0.0), DVec3::new(-2.0, 0.0, 0.0));

    assert_eq!(corners.center(), DVec3::new(0.0, 2.0, 0.0));
    assert_eq!(corners.half_diagonal(), DVec3::new(2.0, 2.0, 0.0));
    assert!(!corners.is_degenerate());
}

#[test]
fn test_degenerate_corners() {
    let p = DVec3::new(1.0, 2.0, 3.0);
    assert!(ZoomCorners::new(p, p).is_degenerate());
}

// ============================================================================
// Perspective framing
// ============================================================================

#[test]
fn test_perspective_framing_extents() {
    // fov 90° at distance 10 → half height 10, aspect 2 → half width 20
    let corners = ZoomCorners::for_perspective(
        DVec3::new(0.0, 0.0, 10.0),
        DVec3::ZERO,
        DVec3::X,
        90.0,
        2.0,
    )
    .unwrap();

    assert!(corners.center().abs_diff_eq(DVec3::ZERO, TOLERANCE));

    let diagonal = corners.half_diagonal();
    assert!((diagonal.y.abs() - 10.0).abs() < TOLERANCE);
    assert!((diagonal.x.abs() - 20.0).abs() < TOLERANCE);
    assert!(diagonal.z.abs() < TOLERANCE);
}

#[test]
fn test_perspective_framing_lies_in_target_plane() {
    let position = DVec3::new(4.0, -6.0, 3.0);
    let target = DVec3::new(1.0, 1.0, 0.0);
    let sight = (target - position).normalize();
    let right = sight.cross(DVec3::Z).normalize();

    let corners = ZoomCorners::for_perspective(position, target, right, 50.0, 1.3).unwrap();

    // Both corners are on the plane through target perpendicular to the sight
    assert!((corners.first - target).dot(sight).abs() < TOLERANCE);
    assert!((corners.second - target).dot(sight).abs() < TOLERANCE);
    assert!(corners.center().abs_diff_eq(target, TOLERANCE));
}

// ============================================================================
// Orthographic framing
// ============================================================================

#[test]
fn test_orthographic_framing_is_square() {
    let corners = ZoomCorners::for_orthographic(
        DVec3::new(0.0, 0.0, 50.0),
        DVec3::ZERO,
        DVec3::X,
        8.0,
    )
    .unwrap();

    let diagonal = corners.half_diagonal();
    assert!((diagonal.x.abs() - 4.0).abs() < TOLERANCE);
    assert!((diagonal.y.abs() - 4.0).abs() < TOLERANCE);
}

#[test]
fn test_orthographic_framing_ignores_eye_distance() {
    let near = ZoomCorners::for_orthographic(DVec3::new(0.0, 0.0, 1.0), DVec3::ZERO, DVec3::X, 6.0).unwrap();
    let far = ZoomCorners::for_orthographic(DVec3::new(0.0, 0.0, 1000.0), DVec3::ZERO, DVec3::X, 6.0).unwrap();

    assert!(near.first.abs_diff_eq(far.first, TOLERANCE));
    assert!(near.second.abs_diff_eq(far.second, TOLERANCE));
}

// ============================================================================
// Failure cases
// ============================================================================

#[test]
fn test_framing_rejects_right_parallel_to_sight() {
    let result = ZoomCorners::for_perspective(
        DVec3::new(0.0, 0.0, 10.0),
        DVec3::ZERO,
        DVec3::Z,
        60.0,
        1.0,
    );
    assert!(matches!(result, Err(Error::HostPrecondition(_))));
}

#[test]
fn test_framing_rejects_zero_height() {
    let result = ZoomCorners::for_orthographic(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO, DVec3::X, 0.0);
    assert!(result.is_err());
}
