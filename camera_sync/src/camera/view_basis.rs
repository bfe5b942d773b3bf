/// ViewBasis - right-handed orthonormal camera frame.
///
/// Transmitted `up` vectors drift across serialization boundaries and are
/// not required to be orthogonal to the sight direction. The basis is
/// rebuilt from the sight direction:
///
/// - `sight = normalize(target - position)`
/// - `right = normalize(sight × up_in)`
/// - `up    = right × sight`

use glam::DVec3;
use crate::error::{Error, Result};
use super::camera_state::GEOMETRY_EPSILON;

/// Mutually orthogonal, unit-length camera axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    /// Unit vector from the eye toward the target
    pub sight: DVec3,
    /// Unit up vector, orthogonal to `sight`
    pub up: DVec3,
    /// Unit right vector (`sight × up`)
    pub right: DVec3,
}

impl ViewBasis {
    /// Build the basis looking from `position` to `target`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedPayload` if `position == target` or `up_hint`
    /// is parallel to the sight direction.
    pub fn look_at(position: DVec3, target: DVec3, up_hint: DVec3) -> Result<Self> {
        let sight = (target - position)
            .try_normalize()
            .ok_or_else(|| Error::MalformedPayload("position and target coincide".to_string()))?;

        let right = sight.cross(up_hint);
        if right.length() <= GEOMETRY_EPSILON {
            return Err(Error::MalformedPayload("up is zero or parallel to the view direction".to_string()));
        }
        let right = right.normalize();
        let up = right.cross(sight).normalize();

        Ok(Self { sight, up, right })
    }

    /// True if all three axes are unit length and mutually orthogonal.
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        (self.sight.length() - 1.0).abs() <= tolerance
            && (self.up.length() - 1.0).abs() <= tolerance
            && (self.right.length() - 1.0).abs() <= tolerance
            && self.sight.dot(self.up).abs() <= tolerance
            && self.sight.dot(self.right).abs() <= tolerance
            && self.up.dot(self.right).abs() <= tolerance
    }
}

#[cfg(test)]
#[path = "view_basis_tests.rs"]
mod tests;
