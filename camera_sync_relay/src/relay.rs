/// Relay - process-wide fan-out of camera states.
///
/// Every published message reaches each subscriber connected at that time.
/// Nothing is stored: a subscriber that connects later, or lags behind the
/// channel capacity, misses the message.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use camera_sync::{sync_debug, sync_info, sync_warn};

const SOURCE: &str = "camera_sync_relay::relay";

/// One relayed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayMessage {
    pub topic: String,
    /// Normalized JSON text, shared by every subscriber
    pub payload: Arc<str>,
}

/// Broadcaster handed to every route that publishes or subscribes.
#[derive(Clone)]
pub struct Relay {
    sender: broadcast::Sender<RelayMessage>,
    closed: Arc<watch::Sender<bool>>,
}

impl Relay {
    /// Create a relay buffering up to `capacity` messages per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        let (closed, _) = watch::channel(false);
        Self {
            sender,
            closed: Arc::new(closed),
        }
    }

    /// Broadcast `payload` under `topic`.
    ///
    /// Returns the number of subscribers the message was handed to. Having
    /// no subscriber is not an error; the message is dropped and logged.
    pub fn publish(&self, topic: &str, payload: impl Into<Arc<str>>) -> usize {
        let message = RelayMessage {
            topic: topic.to_string(),
            payload: payload.into(),
        };

        match self.sender.send(message) {
            Ok(delivered) => {
                sync_debug!(SOURCE, "Relayed '{}' to {} subscriber(s)", topic, delivered);
                delivered
            }
            Err(_) => {
                sync_warn!(SOURCE, "No subscriber for '{}', message dropped", topic);
                0
            }
        }
    }

    /// Receive every message published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RelayMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// End every open subscription stream.
    pub fn close(&self) {
        sync_info!(SOURCE, "Closing relay subscriptions");
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Resolves once `close()` has been called.
    pub fn closed(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut receiver = self.closed.subscribe();
        async move {
            loop {
                let closed = *receiver.borrow_and_update();
                // A receive error means the relay itself is gone
                if closed || receiver.changed().await.is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
