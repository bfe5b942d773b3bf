/// Host-side SSE listener feeding the restore queue.
///
/// The CAD host subscribes to the relay's event stream and turns every
/// event of its topic into a restore request. Requests only enter the
/// queue here; they are applied later on the host's mutation thread.

use std::io::{BufRead, BufReader};
use reqwest::blocking::Client;
use camera_sync::camera_sync::{Error, Result};
use camera_sync::camera_sync::restore::RestoreRequester;
use camera_sync::{sync_info, sync_warn};

const SOURCE: &str = "camera_sync_relay::sse";

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event name (`None` for unnamed `message` events)
    pub event: Option<String>,
    pub data: String,
}

/// Incremental parser for `text/event-stream` lines.
#[derive(Debug, Default)]
pub struct SseParser {
    event: Option<String>,
    data: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without its terminator).
    ///
    /// Returns the event completed by a blank line. Comments (keep-alive
    /// pings) and unknown fields are ignored.
    pub fn feed_line(&mut self, line: &str) -> Option<SseEvent> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = self.data.join("\n");
        self.data.clear();
        Some(SseEvent { event, data })
    }
}

/// Read the relay's event stream at `url` and queue every `topic` event.
///
/// Blocks until the relay ends the stream. Invalid payloads are reported
/// by the requester and skipped. Returns the number of queued requests.
///
/// # Errors
///
/// `Error::Transport` if the stream cannot be opened or breaks,
/// `Error::QueueClosed` if the host stopped consuming requests.
pub fn listen_for_restores(url: &str, topic: &str, requester: &RestoreRequester) -> Result<usize> {
    let response = Client::builder()
        .timeout(None)
        .build()
        .and_then(|client| client.get(url).query(&[("topic", topic)]).send())
        .map_err(|err| Error::Transport(format!("GET {} failed: {}", url, err)))?;

    if !response.status().is_success() {
        return Err(Error::Transport(format!("GET {} answered {}", url, response.status())));
    }
    sync_info!(SOURCE, "Listening for '{}' on {}", topic, url);

    let mut parser = SseParser::new();
    let mut queued = 0;

    for line in BufReader::new(response).lines() {
        let line = line.map_err(|err| Error::Transport(format!("Event stream broke: {}", err)))?;
        let Some(event) = parser.feed_line(&line) else {
            continue;
        };
        if event.event.as_deref() != Some(topic) {
            continue;
        }

        match requester.request_json(&event.data) {
            Ok(true) => queued += 1,
            Ok(false) => {}
            Err(Error::QueueClosed) => return Err(Error::QueueClosed),
            Err(err) => sync_warn!(SOURCE, "Skipped relayed state: {}", err),
        }
    }

    sync_info!(SOURCE, "Event stream from {} ended after {} request(s)", url, queued);
    Ok(queued)
}

#[cfg(test)]
#[path = "sse_tests.rs"]
mod tests;
