//! Restore module - marshal restore requests onto the host's mutation thread.
//!
//! Sockets and dialogs produce requests on arbitrary threads through a
//! `RestoreRequester`. The mutation thread owns the `RestoreQueue` and
//! applies them in FIFO order, one transaction per request.

mod restore_queue;

pub use restore_queue::{
    restore_channel, RestoreQueue, RestoreRequester, RestoreUi, INVALID_JSON_MESSAGE,
    RESTORE_FAILED_MESSAGE,
};
