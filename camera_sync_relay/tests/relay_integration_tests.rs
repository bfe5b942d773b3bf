//! Integration tests for the relay over real HTTP connections
//!
//! Each test binds a relay on an ephemeral localhost port.
//!
//! Run with: cargo test -p camera_sync_relay --test relay_integration_tests

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use camera_sync::camera_sync::CameraState;
use camera_sync::camera_sync::camera::ZoomCorners;
use camera_sync::camera_sync::export::StateSink;
use camera_sync::camera_sync::host::{MockHost, MockView, ViewOrientation};
use camera_sync::camera_sync::restore::{restore_channel, RestoreUi};
use camera_sync::camera_sync::viewer::{ViewerAdapter, ViewerViewport};
use camera_sync::glam::DVec3;
use camera_sync_relay::{
    join_url, listen_for_restores, serve_on, HttpRelaySink, Relay, RelayConfig, RelayResult,
    SseEvent, SseParser,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

// ============================================================================
// TEST RELAY
// ============================================================================

struct TestRelay {
    base_url: String,
    relay: Relay,
    config: RelayConfig,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<RelayResult<()>>,
}

impl TestRelay {
    async fn start() -> Self {
        let config = RelayConfig::default();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let relay = Relay::new(config.capacity);
        let (shutdown, signal) = oneshot::channel::<()>();

        let handle = tokio::spawn({
            let relay = relay.clone();
            let config = config.clone();
            async move {
                serve_on(listener, relay, &config, async {
                    let _ = signal.await;
                })
                .await
            }
        });

        Self {
            base_url,
            relay,
            config,
            shutdown: Some(shutdown),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn wait_for_subscribers(&self, count: usize) {
        for _ in 0..500 {
            if self.relay.subscriber_count() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {} subscriber(s), have {}", count, self.relay.subscriber_count());
    }

    async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let result = tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("relay did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}

/// Read the next named event from an SSE response
async fn next_event(response: &mut reqwest::Response, parser: &mut SseParser, pending: &mut String) -> SseEvent {
    loop {
        while let Some(end) = pending.find('\n') {
            let line: String = pending.drain(..=end).collect();
            if let Some(event) = parser.feed_line(line.trim_end_matches('\n')) {
                return event;
            }
        }

        let chunk = tokio::time::timeout(Duration::from_secs(5), response.chunk())
            .await
            .expect("timed out waiting for an event")
            .unwrap()
            .expect("event stream ended");
        pending.push_str(std::str::from_utf8(&chunk).unwrap());
    }
}

#[derive(Default)]
struct RecordingUi {
    failures: Mutex<Vec<String>>,
}

impl RestoreUi for RecordingUi {
    fn show_failure(&self, message: &str) {
        self.failures.lock().unwrap().push(message.to_string());
    }

    fn bring_to_front(&self) {}
}

const PASCAL_CASE_STATE: &str = r#"{"Aspect":1.5,"IsPerspective":true,"FOV":60.0,"Position":[0.0,0.0,10.0],"Target":[0.0,0.0,0.0],"Up":[0.0,1.0,0.0],"OrthoScale":0.0}"#;

// ============================================================================
// FAN-OUT
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_integration_fan_out_to_three_subscribers() {
    let relay = TestRelay::start().await;
    let client = reqwest::Client::new();
    let events_url = relay.url(&relay.config.events_path);

    let mut subscribers = Vec::new();
    for _ in 0..3 {
        let response = client.get(&events_url).send().await.unwrap();
        assert!(response.status().is_success());
        subscribers.push(response);
    }
    relay.wait_for_subscribers(3).await;

    let response = client
        .post(relay.url(&relay.config.sync_path))
        .header("content-type", "application/json")
        .body(PASCAL_CASE_STATE)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let mut deliveries = Vec::new();
    for subscriber in subscribers.iter_mut() {
        let mut parser = SseParser::new();
        let mut pending = String::new();
        deliveries.push(next_event(subscriber, &mut parser, &mut pending).await);
    }

    assert_eq!(deliveries.len(), 3);
    for delivery in &deliveries {
        assert_eq!(delivery, &deliveries[0]);
        assert_eq!(delivery.event.as_deref(), Some("restoreCameraState"));
    }
    let state = CameraState::from_json(&deliveries[0].data).unwrap();
    assert_eq!(state.field_of_view(), 60.0);
    assert_eq!(state.position(), DVec3::new(0.0, 0.0, 10.0));

    drop(subscribers);
    relay.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_integration_disconnected_subscriber_does_not_block_others() {
    let relay = TestRelay::start().await;
    let client = reqwest::Client::new();
    let events_url = relay.url(&relay.config.events_path);

    let mut subscribers = Vec::new();
    for _ in 0..3 {
        subscribers.push(client.get(&events_url).send().await.unwrap());
    }
    relay.wait_for_subscribers(3).await;

    // One viewer goes away without reading anything
    drop(subscribers.remove(1));

    let response = client
        .post(relay.url(&relay.config.sync_path))
        .body(PASCAL_CASE_STATE)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    for subscriber in subscribers.iter_mut() {
        let mut parser = SseParser::new();
        let mut pending = String::new();
        let event = next_event(subscriber, &mut parser, &mut pending).await;
        assert_eq!(event.event.as_deref(), Some("restoreCameraState"));
        assert!(CameraState::from_json(&event.data).is_ok());
    }

    drop(subscribers);
    relay.stop().await;
}

// ============================================================================
// HOST EXPORT THROUGH THE HTTP SINK
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_integration_http_sink_reaches_viewer() {
    let relay = TestRelay::start().await;
    let mut viewer = reqwest::Client::new()
        .get(relay.url(&relay.config.events_path))
        .query(&[("topic", relay.config.viewer_topic.as_str())])
        .send()
        .await
        .unwrap();
    relay.wait_for_subscribers(1).await;

    let state = CameraState::perspective(1.25, 42.0, DVec3::new(3.0, -4.0, 5.0), DVec3::new(1.0, 1.0, 0.0), DVec3::Z);
    let sink_url = relay.url(&relay.config.sync_path);
    let sent = tokio::task::spawn_blocking(move || {
        thread::spawn(move || HttpRelaySink::new(sink_url).send(&state))
            .join()
            .unwrap()
    })
    .await
    .unwrap();
    assert!(sent.is_ok());

    let mut parser = SseParser::new();
    let mut pending = String::new();
    let event = next_event(&mut viewer, &mut parser, &mut pending).await;
    let received = CameraState::from_json(&event.data).unwrap();
    assert_eq!(received, state);

    // The viewer applies it in its own scene space
    let camera = ViewerAdapter::from_global_offset(DVec3::new(1.0, 1.0, 0.0)).apply(&received);
    assert!(camera.target.abs_diff_eq(DVec3::ZERO, 1e-12));

    drop(viewer);
    relay.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_integration_malformed_post_is_rejected() {
    let relay = TestRelay::start().await;

    let response = reqwest::Client::new()
        .post(relay.url(&relay.config.sync_path))
        .body("{\"Aspect\":")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Malformed"));

    relay.stop().await;
}

// ============================================================================
// VIEWER CAPTURE BACK TO THE HOST
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_integration_viewer_capture_restores_host_view() {
    let relay = TestRelay::start().await;

    // Host side: listener thread feeding the restore queue
    let ui = Arc::new(RecordingUi::default());
    let (requester, queue) = restore_channel(8, ui.clone());
    let events_url = relay.url(&relay.config.events_path);
    let host_topic = relay.config.host_topic.clone();
    let listener = thread::spawn(move || listen_for_restores(&events_url, &host_topic, &requester));
    relay.wait_for_subscribers(1).await;

    // Viewer side: capture the viewer camera and post it back
    let viewport = ViewerViewport {
        eye: DVec3::new(0.0, -10.0, 0.0),
        target: DVec3::ZERO,
        up: DVec3::Z,
        aspect_ratio: 1.0,
        is_orthographic: false,
        field_of_view: 45.0,
        orthographic_height: None,
    };
    let offset = DVec3::new(100.0, 50.0, 0.0);
    let captured = ViewerAdapter::from_global_offset(offset).capture(&viewport).unwrap();
    let restore_url = relay.url(&relay.config.restore_path);
    let sent = tokio::task::spawn_blocking(move || {
        thread::spawn(move || HttpRelaySink::new(restore_url).send(&captured))
            .join()
            .unwrap()
    })
    .await
    .unwrap();
    assert!(sent.is_ok());

    // Mutation thread: apply what the listener queued
    let mut host = MockHost::new();
    let orientation = ViewOrientation::new(DVec3::new(0.0, 0.0, 10.0), DVec3::Y, DVec3::NEG_Z);
    let corners = ZoomCorners::new(DVec3::new(-1.0, 1.0, 0.0), DVec3::new(1.0, -1.0, 0.0));
    host.add_view(1, MockView::view3d(orientation, true).opened(corners, 1.0));
    host.set_active_view(Some(1));

    let mut applied = 0;
    for _ in 0..500 {
        applied += queue.pump(&mut host);
        if applied > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(applied, 1);
    assert_eq!(host.view(1).unwrap().orientation.eye_position, DVec3::new(100.0, 40.0, 0.0));
    assert!(ui.failures.lock().unwrap().is_empty());

    // Closing the relay ends the listener's stream
    relay.stop().await;
    let queued = tokio::task::spawn_blocking(move || listener.join().unwrap()).await.unwrap();
    assert_eq!(queued, Ok(1));
}
