/// ViewerAdapter - maps camera states into and out of viewer scene space.
///
/// On restore, position and target are moved by the model-to-viewer
/// transform and `up` by its linear part. On capture the inverse transform
/// brings the viewer's camera back to host coordinates.

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};
use crate::camera::CameraState;
use crate::error::Result;
use crate::sync_bail;

const SOURCE: &str = "camera_sync::viewer";

/// Orthographic height assumed when the viewer reports none.
pub const DEFAULT_ORTHOGRAPHIC_HEIGHT: f64 = 1.0;

/// Camera to apply in viewer scene space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerCamera {
    pub aspect: f64,
    pub is_perspective: bool,
    pub fov: f64,
    pub position: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    pub ortho_scale: f64,
}

/// Viewport section of the viewer's state, in viewer scene space.
///
/// Unknown keys of the viewer's state are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerViewport {
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    pub aspect_ratio: f64,
    pub is_orthographic: bool,
    #[serde(default)]
    pub field_of_view: f64,
    #[serde(default)]
    pub orthographic_height: Option<f64>,
}

/// Converts between host coordinates and viewer scene space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerAdapter {
    model_to_viewer: DMat4,
    viewer_to_model: DMat4,
}

impl Default for ViewerAdapter {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewerAdapter {
    /// Adapter for a viewer sharing the host's coordinates.
    pub fn identity() -> Self {
        Self {
            model_to_viewer: DMat4::IDENTITY,
            viewer_to_model: DMat4::IDENTITY,
        }
    }

    /// Adapter for a given model-to-viewer transform.
    ///
    /// # Errors
    ///
    /// `Error::HostPrecondition` if the transform is not invertible.
    pub fn new(model_to_viewer: DMat4) -> Result<Self> {
        let determinant = model_to_viewer.determinant();
        if !determinant.is_finite() || determinant.abs() <= f64::EPSILON {
            sync_bail!(SOURCE, HostPrecondition, "Model-to-viewer transform is not invertible");
        }
        Ok(Self {
            model_to_viewer,
            viewer_to_model: model_to_viewer.inverse(),
        })
    }

    /// Adapter for a viewer that subtracts a global offset from the model.
    pub fn from_global_offset(offset: DVec3) -> Self {
        Self {
            model_to_viewer: DMat4::from_translation(-offset),
            viewer_to_model: DMat4::from_translation(offset),
        }
    }

    pub fn model_to_viewer(&self) -> &DMat4 {
        &self.model_to_viewer
    }

    /// Camera to apply in the viewer for a received state.
    pub fn apply(&self, state: &CameraState) -> ViewerCamera {
        ViewerCamera {
            aspect: state.aspect(),
            is_perspective: state.is_perspective(),
            fov: state.field_of_view(),
            position: self.model_to_viewer.transform_point3(state.position()),
            target: self.model_to_viewer.transform_point3(state.target()),
            up: self.model_to_viewer.transform_vector3(state.up()),
            ortho_scale: state.ortho_scale(),
        }
    }

    /// Parse a relay broadcast and convert it for the viewer.
    ///
    /// # Errors
    ///
    /// `Error::MalformedPayload` if the payload is not a valid camera state.
    pub fn apply_json(&self, payload: &str) -> Result<ViewerCamera> {
        Ok(self.apply(&CameraState::from_json(payload)?))
    }

    /// Capture the viewer's camera as a host-space `CameraState`.
    ///
    /// # Errors
    ///
    /// `Error::MalformedPayload` if the captured camera violates a state
    /// invariant (e.g. eye and target coincide).
    pub fn capture(&self, viewport: &ViewerViewport) -> Result<CameraState> {
        let state = CameraState::new(
            viewport.aspect_ratio,
            !viewport.is_orthographic,
            viewport.field_of_view,
            self.viewer_to_model.transform_point3(viewport.eye),
            self.viewer_to_model.transform_point3(viewport.target),
            self.viewer_to_model.transform_vector3(viewport.up),
            viewport.orthographic_height.unwrap_or(DEFAULT_ORTHOGRAPHIC_HEIGHT),
        );
        state.validate()?;
        Ok(state)
    }
}

#[cfg(test)]
#[path = "viewer_adapter_tests.rs"]
mod tests;
