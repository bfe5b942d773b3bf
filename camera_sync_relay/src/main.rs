//! camera-sync-relay - relay server binary.
//!
//! Configured from the environment:
//! `CAMERA_SYNC_RELAY_HOST`, `CAMERA_SYNC_RELAY_PORT`, `CAMERA_SYNC_RELAY_CAPACITY`.

use std::process::ExitCode;
use camera_sync::sync_error;
use camera_sync_relay::{serve, RelayConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let config = RelayConfig::from_env();

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            sync_error!("camera_sync_relay::main", "{}", err);
            ExitCode::FAILURE
        }
    }
}
