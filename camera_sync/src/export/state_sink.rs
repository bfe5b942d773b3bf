/// StateSink trait - outbound transport for exported camera states

use crate::camera::CameraState;
use crate::error::Result;

/// Delivers an exported camera state (e.g. an HTTP POST to the relay).
///
/// Failures are reported to the caller, which logs them. The export never
/// retries.
pub trait StateSink {
    fn send(&self, state: &CameraState) -> Result<()>;
}

impl<F> StateSink for F
where
    F: Fn(&CameraState) -> Result<()>,
{
    fn send(&self, state: &CameraState) -> Result<()> {
        self(state)
    }
}
