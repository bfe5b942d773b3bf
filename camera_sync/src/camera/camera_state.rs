/// CameraState - the host-independent wire representation of a camera.
///
/// Built fresh on every export or capture event and never merged: each
/// delivered state fully replaces the consumer's previous one. Carries no
/// version or ordering token, the latest received state wins.
///
/// Wire form (JSON, lower camel case):
///
/// ```text
/// { "aspect": 1.5, "isPerspective": true, "fov": 60.0,
///   "position": [0,0,10], "target": [0,0,0], "up": [0,1,0],
///   "orthoScale": 0.0 }
/// ```

use glam::DVec3;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// Lengths below this are treated as zero (coincident points, parallel vectors).
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Generic camera state exchanged between the CAD host and the web viewer.
///
/// `fov` is authoritative only for perspective states, `ortho_scale` only
/// for orthographic ones. `up` need not be orthogonal to the sight vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    aspect: f64,
    is_perspective: bool,
    #[serde(rename = "fov", default)]
    field_of_view: f64,
    position: DVec3,
    target: DVec3,
    up: DVec3,
    #[serde(default)]
    ortho_scale: f64,
}

impl CameraState {
    /// Create a state from raw fields. Nothing is checked; see `validate()`.
    pub fn new(
        aspect: f64,
        is_perspective: bool,
        field_of_view: f64,
        position: DVec3,
        target: DVec3,
        up: DVec3,
        ortho_scale: f64,
    ) -> Self {
        Self {
            aspect,
            is_perspective,
            field_of_view,
            position,
            target,
            up,
            ortho_scale,
        }
    }

    /// Perspective state (`ortho_scale` is zero).
    pub fn perspective(aspect: f64, field_of_view: f64, position: DVec3, target: DVec3, up: DVec3) -> Self {
        Self::new(aspect, true, field_of_view, position, target, up, 0.0)
    }

    /// Orthographic state (`fov` is zero).
    pub fn orthographic(aspect: f64, ortho_scale: f64, position: DVec3, target: DVec3, up: DVec3) -> Self {
        Self::new(aspect, false, 0.0, position, target, up, ortho_scale)
    }

    // ===== GETTERS =====

    /// Width / height of the view frustum.
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Selects which of `field_of_view` / `ortho_scale` is authoritative.
    pub fn is_perspective(&self) -> bool {
        self.is_perspective
    }

    /// Vertical field of view in degrees (perspective only).
    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    /// Eye location in the producer's coordinate space.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Look-at point in the producer's coordinate space.
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// Up direction as transmitted (not necessarily orthogonal).
    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Vertical world-space extent of the orthographic frustum.
    pub fn ortho_scale(&self) -> f64 {
        self.ortho_scale
    }

    /// `target - position`.
    pub fn sight_vector(&self) -> DVec3 {
        self.target - self.position
    }

    // ===== VALIDATION =====

    /// Check every invariant of the wire model.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedPayload` if a field is not finite, the aspect
    /// is not positive, the authoritative projection field is out of range,
    /// `position == target`, or `up` is parallel to the sight vector.
    pub fn validate(&self) -> Result<()> {
        let scalars = [self.aspect, self.field_of_view, self.ortho_scale];
        if scalars.iter().any(|v| !v.is_finite())
            || !self.position.is_finite()
            || !self.target.is_finite()
            || !self.up.is_finite()
        {
            return Err(Error::MalformedPayload("camera state contains non-finite values".to_string()));
        }

        if self.aspect <= 0.0 {
            return Err(Error::MalformedPayload(format!("aspect must be > 0, got {}", self.aspect)));
        }

        if self.is_perspective {
            if self.field_of_view <= 0.0 || self.field_of_view >= 180.0 {
                return Err(Error::MalformedPayload(format!(
                    "fov must be in (0, 180) degrees, got {}", self.field_of_view
                )));
            }
        } else if self.ortho_scale <= 0.0 {
            return Err(Error::MalformedPayload(format!(
                "orthoScale must be > 0, got {}", self.ortho_scale
            )));
        }

        let sight = self.sight_vector();
        if sight.length() <= GEOMETRY_EPSILON {
            return Err(Error::MalformedPayload("position and target coincide".to_string()));
        }

        if self.up.cross(sight).length() <= GEOMETRY_EPSILON * sight.length().max(1.0) * self.up.length().max(1.0) {
            return Err(Error::MalformedPayload("up is zero or parallel to the view direction".to_string()));
        }

        Ok(())
    }

    // ===== WIRE FORMAT =====

    /// Serialize to the lower-camel-case JSON payload.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedPayload` if the text does not have the
    /// documented shape or violates an invariant.
    pub fn from_json(text: &str) -> Result<Self> {
        let state: CameraState = serde_json::from_str(text)?;
        state.validate()?;
        Ok(state)
    }
}

#[cfg(test)]
#[path = "camera_state_tests.rs"]
mod tests;
