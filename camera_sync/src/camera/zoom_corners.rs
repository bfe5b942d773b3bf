/// ZoomCorners - world-space rectangle framed by a UI viewport.
///
/// Two opposite corners of the visible rectangle on the plane through the
/// target. Used in both directions: the exporter reads it to recover the
/// user's pan/zoom, the restore path computes one and applies it as a
/// zoom-to-rectangle.

use glam::DVec3;
use crate::error::{Error, Result};
use super::camera_state::GEOMETRY_EPSILON;

/// Two opposite corners of a zoom rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomCorners {
    pub first: DVec3,
    pub second: DVec3,
}

impl ZoomCorners {
    pub fn new(first: DVec3, second: DVec3) -> Self {
        Self { first, second }
    }

    /// Midpoint of the two corners.
    pub fn center(&self) -> DVec3 {
        (self.first + self.second) * 0.5
    }

    /// Half diagonal, from the center to `first`.
    pub fn half_diagonal(&self) -> DVec3 {
        self.first - self.center()
    }

    /// True if both corners coincide.
    pub fn is_degenerate(&self) -> bool {
        self.first.distance(self.second) <= GEOMETRY_EPSILON
    }

    /// Rectangle centered on `target` with the given half extents.
    ///
    /// The rectangle's vertical axis is `sight_vec × view_right` and its
    /// horizontal axis is `sight_vec × vertical`; corners are
    /// `target ± (vertical·half_height + horizontal·half_width)`.
    ///
    /// # Arguments
    ///
    /// * `target` - Rectangle center
    /// * `sight_vec` - `position - target`
    /// * `view_right` - Right direction of the host view after reorientation
    /// * `half_height` - Half of the vertical extent
    /// * `half_width` - Half of the horizontal extent
    pub fn framing(
        target: DVec3,
        sight_vec: DVec3,
        view_right: DVec3,
        half_height: f64,
        half_width: f64,
    ) -> Result<Self> {
        let vertical = sight_vec
            .cross(view_right)
            .try_normalize()
            .ok_or_else(|| Error::HostPrecondition("view right direction is parallel to the sight vector".to_string()))?
            * half_height;

        let horizontal = sight_vec
            .cross(vertical)
            .try_normalize()
            .ok_or_else(|| Error::HostPrecondition("zoom rectangle has zero height".to_string()))?
            * half_width;

        let diagonal = vertical + horizontal;

        Ok(Self::new(target + diagonal, target - diagonal))
    }

    /// Perspective framing: `half_height = tan(fov/2)·|position - target|`,
    /// `half_width = half_height·aspect`.
    pub fn for_perspective(
        position: DVec3,
        target: DVec3,
        view_right: DVec3,
        field_of_view_degrees: f64,
        aspect: f64,
    ) -> Result<Self> {
        let sight_vec = position - target;
        let half_height = (field_of_view_degrees / 2.0).to_radians().tan() * sight_vec.length();
        let half_width = half_height * aspect;

        Self::framing(target, sight_vec, view_right, half_height, half_width)
    }

    /// Orthographic framing: square footprint of side `ortho_scale`.
    ///
    /// The wire format carries no orthographic aspect, so width follows height.
    pub fn for_orthographic(
        position: DVec3,
        target: DVec3,
        view_right: DVec3,
        ortho_scale: f64,
    ) -> Result<Self> {
        let half_height = ortho_scale / 2.0;
        let half_width = half_height;

        Self::framing(target, position - target, view_right, half_height, half_width)
    }
}

#[cfg(test)]
#[path = "zoom_corners_tests.rs"]
mod tests;
