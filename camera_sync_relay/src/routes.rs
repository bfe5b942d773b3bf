//! Relay HTTP routes.
//!
//! ## Endpoints (default paths)
//!
//! - `POST /api/viewStates/sync`    - State exported by the CAD host, relayed to viewers
//! - `POST /api/viewStates/restore` - State captured by a viewer, relayed to the CAD host
//! - `GET  /api/viewStates/events`  - SSE stream of relayed states (`?topic=` to filter)

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use camera_sync::sync_info;
use crate::config::RelayConfig;
use crate::error::RelayResult;
use crate::field_names::normalize_json;
use crate::relay::Relay;

const SOURCE: &str = "camera_sync_relay::routes";

/// Shared state of the relay routes.
#[derive(Clone)]
pub struct RelayState {
    relay: Relay,
    viewer_topic: Arc<str>,
    host_topic: Arc<str>,
    keep_alive: Duration,
}

/// Query of the event subscription.
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Only deliver this topic
    pub topic: Option<String>,
}

/// Build the relay router publishing through `relay`.
pub fn create_router(relay: Relay, config: &RelayConfig) -> Router {
    let state = RelayState {
        relay,
        viewer_topic: Arc::from(config.viewer_topic.as_str()),
        host_topic: Arc::from(config.host_topic.as_str()),
        keep_alive: config.keep_alive,
    };

    Router::new()
        .route(&config.sync_path, post(sync_view_state))
        .route(&config.restore_path, post(restore_view_state))
        .route(&config.events_path, get(view_state_events))
        .with_state(state)
}

/// POST sync - CAD host export, relayed to viewers
async fn sync_view_state(State(state): State<RelayState>, body: Bytes) -> RelayResult<StatusCode> {
    let payload = normalize_json(&body)?;
    let delivered = state.relay.publish(&state.viewer_topic, payload);
    sync_info!(SOURCE, "Camera state from host relayed to {} viewer(s)", delivered);
    Ok(StatusCode::OK)
}

/// POST restore - viewer capture, relayed to the CAD host
async fn restore_view_state(State(state): State<RelayState>, body: Bytes) -> RelayResult<StatusCode> {
    let payload = normalize_json(&body)?;
    let delivered = state.relay.publish(&state.host_topic, payload);
    sync_info!(SOURCE, "Camera state from viewer relayed to {} host listener(s)", delivered);
    Ok(StatusCode::OK)
}

/// GET events - SSE stream, one event per relayed message
async fn view_state_events(
    State(state): State<RelayState>,
    Query(query): Query<EventsQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.relay.subscribe();
    let topic = query.topic;
    sync_info!(SOURCE, "Subscriber connected (topic filter: {:?})", topic);

    let events = BroadcastStream::new(receiver).filter_map(move |result| match result {
        Ok(message) if topic.as_deref().map_or(true, |wanted| wanted == message.topic) => {
            Some(Ok(Event::default().event(&message.topic).data(&*message.payload)))
        }
        Ok(_) => None,
        Err(_) => None, // Lagged, skip missed messages
    });
    let stream = futures::StreamExt::take_until(events, state.relay.closed());

    Sse::new(stream).keep_alive(KeepAlive::new().interval(state.keep_alive).text("ping"))
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
