/*!
# Camera Sync Relay

Stateless relay between the CAD host and the web viewers.

States POSTed by the host are normalized to lower camel case field names
and broadcast to every connected viewer over server-sent events; states
captured by a viewer take the reverse route to the host. Nothing is
stored.

This crate also provides the host-side transport: `HttpRelaySink`
implements `camera_sync`'s `StateSink`, and `listen_for_restores` feeds the
host's restore queue from the event stream.
*/

mod error;
mod config;
mod field_names;
mod relay;
mod routes;
mod server;
mod client;
mod sse;

pub use error::{RelayError, RelayResult};
pub use config::{RelayConfig, CAPACITY_ENV, HOST_ENV, PORT_ENV};
pub use field_names::{canonical_name, normalize_json, normalize_payload, FIELD_NAMES};
pub use relay::{Relay, RelayMessage};
pub use routes::{create_router, EventsQuery, RelayState};
pub use server::{serve, serve_on};
pub use client::{join_url, HttpRelaySink};
pub use sse::{listen_for_restores, SseEvent, SseParser};
