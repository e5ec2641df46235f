//! Gate monitor: drives the access-gate state machine from a polling loop.
//!
//! One mpsc queue carries every event (check results, navigation reports)
//! to a single dispatcher task that owns the machine and applies redirects.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::gate::{AccessGate, GateAction, GateEvent, GateState};
use crate::probe::BlockProbe;

/// How often the gate re-checks block status while mounted.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Applies client-side redirects on behalf of the gate.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Monitor configuration.
#[derive(Debug, Clone)]
pub struct GateOptions {
    pub initial_route: String,
    pub blocked_route: String,
    pub home_route: String,
    pub poll_interval: Duration,
}

impl Default for GateOptions {
    fn default() -> Self {
        Self {
            initial_route: "/".to_string(),
            blocked_route: "/blocked".to_string(),
            home_route: "/".to_string(),
            poll_interval: POLL_INTERVAL,
        }
    }
}

enum MonitorMsg {
    Event(GateEvent),
    Shutdown,
}

/// Polls a [`BlockProbe`] and enforces the redirect policy via a
/// [`Navigator`].
pub struct GateMonitor {
    probe: Arc<dyn BlockProbe>,
    navigator: Arc<dyn Navigator>,
    options: GateOptions,
}

impl GateMonitor {
    pub fn new(
        probe: Arc<dyn BlockProbe>,
        navigator: Arc<dyn Navigator>,
        options: GateOptions,
    ) -> Self {
        Self {
            probe,
            navigator,
            options,
        }
    }

    /// Start polling: an immediate check, then one per `poll_interval`.
    ///
    /// Returns a handle for reporting navigations and shutting down. All
    /// state lives in the spawned dispatcher; dropping the handle stops
    /// the monitor.
    pub fn spawn(self) -> GateHandle {
        let (tx, mut rx) = mpsc::channel::<MonitorMsg>(64);

        // Poller: pushes check results into the queue. The interval's first
        // tick completes immediately.
        let poller = {
            let probe = self.probe.clone();
            let poll_tx = tx.clone();
            let poll_interval = self.options.poll_interval;
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(poll_interval);
                loop {
                    interval.tick().await;
                    let blocked = probe.check().await;
                    let event = GateEvent::CheckResolved { blocked };
                    if poll_tx.send(MonitorMsg::Event(event)).await.is_err() {
                        break;
                    }
                }
            })
        };

        // Dispatcher: the only task that touches the machine.
        let navigator = self.navigator.clone();
        let mut gate = AccessGate::new(
            self.options.initial_route.clone(),
            self.options.blocked_route.clone(),
            self.options.home_route.clone(),
        );
        let task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let event = match msg {
                    MonitorMsg::Shutdown => break,
                    MonitorMsg::Event(event) => event,
                };
                for action in gate.on_event(event) {
                    match action {
                        GateAction::Redirect(route) => {
                            debug!(route = %route, "gate redirect");
                            navigator.navigate(&route);
                            // The machine tracks the route it just moved to.
                            let _ = gate.on_event(GateEvent::Navigated { route });
                        }
                    }
                }
            }
            poller.abort();
            gate.state().clone()
        });

        GateHandle { tx, task }
    }
}

/// Handle to a running gate monitor.
pub struct GateHandle {
    tx: mpsc::Sender<MonitorMsg>,
    task: JoinHandle<GateState>,
}

impl GateHandle {
    /// Report that the visitor navigated to `route` (including back/forward).
    pub async fn navigated(&self, route: impl Into<String>) {
        let event = GateEvent::Navigated {
            route: route.into(),
        };
        let _ = self.tx.send(MonitorMsg::Event(event)).await;
    }

    /// Stop polling and return the final gate state.
    pub async fn shutdown(self) -> GateState {
        let _ = self.tx.send(MonitorMsg::Shutdown).await;
        self.task.await.unwrap_or(GateState::Checking)
    }
}
