/// HttpRelaySink - blocking HTTP transport from the CAD host to the relay.
///
/// The host's export runs on its UI thread inside a synchronous traversal,
/// so the POST is blocking. Failures come back as `Error::Transport` and
/// are logged by the exporter.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use camera_sync::camera_sync::{CameraState, Error, Result};
use camera_sync::camera_sync::export::StateSink;
use camera_sync::sync_debug;
use crate::config::RelayConfig;

const SOURCE: &str = "camera_sync_relay::client";

/// POSTs camera states as JSON to one relay endpoint.
#[derive(Debug, Clone)]
pub struct HttpRelaySink {
    client: Client,
    url: String,
}

impl HttpRelaySink {
    /// Sink posting to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Sink for host exports (`base_url` + sync path).
    pub fn sync_endpoint(base_url: &str, config: &RelayConfig) -> Self {
        Self::new(join_url(base_url, &config.sync_path))
    }

    /// Sink for viewer captures (`base_url` + restore path).
    pub fn restore_endpoint(base_url: &str, config: &RelayConfig) -> Self {
        Self::new(join_url(base_url, &config.restore_path))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StateSink for HttpRelaySink {
    fn send(&self, state: &CameraState) -> Result<()> {
        let body = state.to_json()?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|err| Error::Transport(format!("POST {} failed: {}", self.url, err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!("POST {} answered {}", self.url, status)));
        }

        sync_debug!(SOURCE, "POST {} answered {}", self.url, status);
        Ok(())
    }
}

/// `base_url` and `path` joined with exactly one slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
