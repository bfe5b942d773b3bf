/// RestoreQueue - bounded request queue drained by the mutation thread.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use crate::camera::CameraState;
use crate::error::{Error, Result};
use crate::host::HostDocument;
use crate::transform::restore_active_view;
use crate::{sync_debug, sync_error, sync_info, sync_warn};

const SOURCE: &str = "camera_sync::restore";

/// Shown when restore input cannot be parsed into a valid camera state.
pub const INVALID_JSON_MESSAGE: &str = "Input view state data is not a valid JSON!";

/// Shown when a queued restore fails on the host.
pub const RESTORE_FAILED_MESSAGE: &str = "Failed to restore view state!";

/// The UI affordance used to trigger restores (e.g. the input dialog).
pub trait RestoreUi: Send + Sync {
    /// Show a user-visible failure message.
    fn show_failure(&self, message: &str);

    /// Return the input affordance to the foreground.
    fn bring_to_front(&self);
}

/// Create a restore queue holding at most `capacity` pending requests.
///
/// `capacity` of zero makes every request wait for the mutation thread to
/// pick it up.
pub fn restore_channel(capacity: usize, ui: Arc<dyn RestoreUi>) -> (RestoreRequester, RestoreQueue) {
    let (sender, receiver) = mpsc::sync_channel(capacity);
    (
        RestoreRequester { sender, ui: Arc::clone(&ui) },
        RestoreQueue { receiver, ui },
    )
}

// ============================================================================
// Requester
// ============================================================================

/// Producer half. Cheap to clone, usable from any thread.
#[derive(Clone)]
pub struct RestoreRequester {
    sender: SyncSender<CameraState>,
    ui: Arc<dyn RestoreUi>,
}

impl RestoreRequester {
    /// Enqueue a restore of `state`.
    ///
    /// Blocks only while the queue is full.
    ///
    /// # Errors
    ///
    /// `Error::MalformedPayload` if the state is invalid (nothing is queued),
    /// `Error::QueueClosed` if the mutation thread dropped its queue.
    pub fn request(&self, state: CameraState) -> Result<()> {
        state.validate()?;
        self.sender.send(state).map_err(|_| {
            sync_warn!(SOURCE, "Restore request dropped: queue is closed");
            Error::QueueClosed
        })?;
        sync_debug!(SOURCE, "Restore request queued");
        Ok(())
    }

    /// Enqueue a restore from raw JSON input.
    ///
    /// Blank input is ignored and returns `Ok(false)`. Input that is not a
    /// valid camera state shows `INVALID_JSON_MESSAGE` and is not queued.
    pub fn request_json(&self, text: &str) -> Result<bool> {
        if text.trim().is_empty() {
            return Ok(false);
        }

        let state = match CameraState::from_json(text) {
            Ok(state) => state,
            Err(err) => {
                sync_warn!(SOURCE, "Rejected restore input: {}", err);
                self.ui.show_failure(INVALID_JSON_MESSAGE);
                return Err(err);
            }
        };

        self.request(state)?;
        Ok(true)
    }
}

// ============================================================================
// Queue
// ============================================================================

/// Consumer half, owned by the host's mutation thread.
pub struct RestoreQueue {
    receiver: Receiver<CameraState>,
    ui: Arc<dyn RestoreUi>,
}

impl RestoreQueue {
    /// Apply every request queued so far, without blocking.
    ///
    /// Returns the number of requests applied (successful or not).
    pub fn pump<H: HostDocument + ?Sized>(&self, host: &mut H) -> usize {
        let mut applied = 0;
        while let Ok(state) = self.receiver.try_recv() {
            self.apply(host, &state);
            applied += 1;
        }
        applied
    }

    /// Apply requests as they arrive until every requester is dropped.
    ///
    /// Returns the number of requests applied.
    pub fn run<H: HostDocument + ?Sized>(self, host: &mut H) -> usize {
        let mut applied = 0;
        for state in self.receiver.iter() {
            self.apply(host, &state);
            applied += 1;
        }
        sync_info!(SOURCE, "Restore queue closed after {} request(s)", applied);
        applied
    }

    fn apply<H: HostDocument + ?Sized>(&self, host: &mut H, state: &CameraState) {
        if let Err(err) = restore_active_view(host, state) {
            sync_error!(SOURCE, "Restore failed: {}", err);
            self.ui.show_failure(RESTORE_FAILED_MESSAGE);
        }
        self.ui.bring_to_front();
    }
}

#[cfg(test)]
#[path = "restore_queue_tests.rs"]
mod tests;
