//! Integration tests for the recurring health probe: the flag tracks the
//! most recent probe outcome and stops changing after teardown. Uses a
//! minimal in-process HTTP server whose health flips on demand. No mocks.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use rag_chat_client::{ApiClient, HealthMonitor, SessionState};

/// Health endpoint controlled by a shared flag; counts probes as they
/// arrive.
async fn spawn_health_server() -> (String, Arc<AtomicBool>, Arc<AtomicUsize>) {
    let healthy = Arc::new(AtomicBool::new(true));
    let probes = Arc::new(AtomicUsize::new(0));
    let healthy_handler = healthy.clone();
    let probes_handler = probes.clone();
    let app = Router::new().route(
        "/health-check",
        get(move || {
            let healthy = healthy_handler.clone();
            let probes = probes_handler.clone();
            async move {
                probes.fetch_add(1, Ordering::SeqCst);
                if healthy.load(Ordering::SeqCst) {
                    StatusCode::OK
                } else {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), healthy, probes)
}

fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Poll `condition` every 10ms until it holds or `timeout` elapses.
async fn wait_for(mut condition: impl FnMut() -> bool, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

#[tokio::test]
async fn probe_marks_online_after_first_success() {
    let (base, _healthy, _probes) = spawn_health_server().await;
    let state = Arc::new(Mutex::new(SessionState::new()));

    let monitor = HealthMonitor::start(
        ApiClient::new(&base),
        state.clone(),
        Duration::from_millis(50),
    );

    let online = wait_for(
        || state.lock().unwrap().is_server_online(),
        Duration::from_secs(2),
    )
    .await;
    assert!(online, "first probe should mark the server online");

    monitor.stop();
}

#[tokio::test]
async fn probe_tracks_most_recent_outcome() {
    let (base, healthy, _probes) = spawn_health_server().await;
    let state = Arc::new(Mutex::new(SessionState::new()));

    let monitor = HealthMonitor::start(
        ApiClient::new(&base),
        state.clone(),
        Duration::from_millis(50),
    );

    assert!(
        wait_for(
            || state.lock().unwrap().is_server_online(),
            Duration::from_secs(2)
        )
        .await
    );

    // Server degrades: the flag follows within one interval.
    healthy.store(false, Ordering::SeqCst);
    assert!(
        wait_for(
            || !state.lock().unwrap().is_server_online(),
            Duration::from_secs(2)
        )
        .await,
        "flag should flip offline after the server degrades"
    );

    // And recovers.
    healthy.store(true, Ordering::SeqCst);
    assert!(
        wait_for(
            || state.lock().unwrap().is_server_online(),
            Duration::from_secs(2)
        )
        .await,
        "flag should flip back online after the server recovers"
    );

    monitor.stop();
}

#[tokio::test]
async fn probe_marks_offline_when_unreachable() {
    let state = Arc::new(Mutex::new(SessionState::new()));
    // Start from online so the probe outcome is observable.
    state.lock().unwrap().set_server_online(true);

    let monitor = HealthMonitor::start(
        ApiClient::new(&dead_base_url()),
        state.clone(),
        Duration::from_millis(50),
    );

    assert!(
        wait_for(
            || !state.lock().unwrap().is_server_online(),
            Duration::from_secs(2)
        )
        .await,
        "unreachable server should read as offline"
    );

    monitor.stop();
}

#[tokio::test]
async fn probe_leaves_transcript_and_pending_untouched() {
    let (base, _healthy, probes) = spawn_health_server().await;
    let state = Arc::new(Mutex::new(SessionState::new()));

    let monitor = HealthMonitor::start(
        ApiClient::new(&base),
        state.clone(),
        Duration::from_millis(50),
    );

    assert!(wait_for(|| probes.load(Ordering::SeqCst) >= 3, Duration::from_secs(2)).await);

    let state = state.lock().unwrap();
    assert!(state.transcript().is_empty());
    assert!(state.show_welcome());
    assert!(!state.is_pending());
    assert_eq!(state.draft(), "");

    monitor.stop();
}

#[tokio::test]
async fn stopping_the_monitor_stops_probe_driven_changes() {
    let (base, healthy, probes) = spawn_health_server().await;
    let state = Arc::new(Mutex::new(SessionState::new()));

    let monitor = HealthMonitor::start(
        ApiClient::new(&base),
        state.clone(),
        Duration::from_millis(50),
    );

    assert!(
        wait_for(
            || state.lock().unwrap().is_server_online(),
            Duration::from_secs(2)
        )
        .await
    );

    monitor.stop();
    // Let any in-flight probe drain before flipping the server.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let probes_at_stop = probes.load(Ordering::SeqCst);
    healthy.store(false, Ordering::SeqCst);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(
        probes.load(Ordering::SeqCst),
        probes_at_stop,
        "no probes issued after stop"
    );
    assert!(
        state.lock().unwrap().is_server_online(),
        "no probe-driven state change after stop"
    );
}

#[tokio::test]
async fn dropping_the_monitor_stops_probe_driven_changes() {
    let (base, healthy, probes) = spawn_health_server().await;
    let state = Arc::new(Mutex::new(SessionState::new()));

    let monitor = HealthMonitor::start(
        ApiClient::new(&base),
        state.clone(),
        Duration::from_millis(50),
    );

    assert!(
        wait_for(
            || state.lock().unwrap().is_server_online(),
            Duration::from_secs(2)
        )
        .await
    );

    drop(monitor);
    tokio::time::sleep(Duration::from_millis(200)).await;
    let probes_after_drop = probes.load(Ordering::SeqCst);
    healthy.store(false, Ordering::SeqCst);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(probes.load(Ordering::SeqCst), probes_after_drop);
    assert!(state.lock().unwrap().is_server_online());
}
