//! Recurring service health probe. Runs from session start until stopped;
//! the only state it touches is `SessionState::server_online`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::client::ApiClient;
use crate::session::SessionState;

/// Handle to the background probe task. Stopping (or dropping) the monitor
/// cancels the task; no probe outcome is applied afterwards.
pub struct HealthMonitor {
    handle: JoinHandle<()>,
}

impl HealthMonitor {
    /// Probe immediately, then every `interval`, writing each outcome to
    /// `state`. `interval` must be non-zero.
    pub fn start(api: ApiClient, state: Arc<Mutex<SessionState>>, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let online = api.health_check().await;
                let mut state = state.lock().expect("session state lock poisoned");
                if state.is_server_online() != online {
                    tracing::debug!(online, "server availability changed");
                }
                state.set_server_online(online);
            }
        });
        Self { handle }
    }

    /// Cancel the recurring probe.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
