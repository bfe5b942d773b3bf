/// Relay server lifecycle: bind, serve, shut down on Ctrl-C.

use std::future::Future;
use tokio::net::TcpListener;
use camera_sync::{sync_error, sync_info};
use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};
use crate::relay::Relay;
use crate::routes::create_router;

const SOURCE: &str = "camera_sync_relay::server";

/// Bind the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// `RelayError::Bind` if the address cannot be bound, `RelayError::Serve`
/// if the server stops with an I/O error.
pub async fn serve(config: RelayConfig) -> RelayResult<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| RelayError::Bind { addr, source })?;

    serve_on(listener, Relay::new(config.capacity), &config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// Open event streams are closed when `shutdown` resolves so that the
/// graceful shutdown does not wait for subscribers to disconnect.
pub async fn serve_on<F>(listener: TcpListener, relay: Relay, config: &RelayConfig, shutdown: F) -> RelayResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(relay.clone(), config);
    sync_info!(SOURCE, "Relay listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            relay.close();
        })
        .await?;

    sync_info!(SOURCE, "Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => sync_info!(SOURCE, "Ctrl-C received, shutting down"),
        Err(err) => sync_error!(SOURCE, "Cannot listen for Ctrl-C: {}", err),
    }
}
