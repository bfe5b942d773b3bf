/// RelayConfig - listening address, routes, topics and channel sizing.
///
/// Defaults match the viewer and the CAD add-in out of the box; the
/// listening address and channel capacity can be overridden from the
/// environment.

use std::time::Duration;
use camera_sync::sync_warn;

const SOURCE: &str = "camera_sync_relay::config";

/// Listening host (default `0.0.0.0`)
pub const HOST_ENV: &str = "CAMERA_SYNC_RELAY_HOST";
/// Listening port (default `8080`)
pub const PORT_ENV: &str = "CAMERA_SYNC_RELAY_PORT";
/// Broadcast channel capacity (default `64`)
pub const CAPACITY_ENV: &str = "CAMERA_SYNC_RELAY_CAPACITY";

/// Relay configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Ingress for states exported by the CAD host
    pub sync_path: String,
    /// Ingress for states captured by the viewer
    pub restore_path: String,
    /// Server-sent event subscription
    pub events_path: String,
    /// Topic delivered to viewers
    pub viewer_topic: String,
    /// Topic delivered to the CAD host
    pub host_topic: String,
    /// Messages buffered per subscriber before it lags
    pub capacity: usize,
    /// Interval of keep-alive comments on idle subscriptions
    pub keep_alive: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            sync_path: "/api/viewStates/sync".to_string(),
            restore_path: "/api/viewStates/restore".to_string(),
            events_path: "/api/viewStates/events".to_string(),
            viewer_topic: "restoreCameraState".to_string(),
            host_topic: "restoreHostCamera".to_string(),
            capacity: 64,
            keep_alive: Duration::from_secs(10),
        }
    }
}

impl RelayConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Unparsable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_ENV).filter(|host| !host.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup(PORT_ENV) {
            match port.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(err) => sync_warn!(SOURCE, "Ignoring {}={:?}: {}", PORT_ENV, port, err),
            }
        }

        if let Some(capacity) = lookup(CAPACITY_ENV) {
            match capacity.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.capacity = capacity,
                Ok(_) => sync_warn!(SOURCE, "Ignoring {}=0: capacity must be positive", CAPACITY_ENV),
                Err(err) => sync_warn!(SOURCE, "Ignoring {}={:?}: {}", CAPACITY_ENV, capacity, err),
            }
        }

        config
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
