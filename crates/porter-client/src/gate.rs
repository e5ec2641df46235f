//! Access-gate state machine.
//!
//! Pure and synchronous: events go in, redirect actions come out. The
//! driver applies actions and feeds the resulting navigation back in, so
//! every transition flows through one dispatcher.

/// Gate lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// No check has resolved yet.
    Checking,
    /// The latest check said the visitor is blocked.
    Blocked,
    /// The latest check said the visitor is not blocked (or the check failed).
    Clear,
}

/// Inputs to the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// A block check completed. Failed checks arrive as `blocked: false`.
    CheckResolved { blocked: bool },
    /// The visitor landed on `route` (including back/forward navigation).
    Navigated { route: String },
}

/// Outputs of the gate, applied by a [`Navigator`](crate::monitor::Navigator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    Redirect(String),
}

/// Enforces the block/redirect policy.
///
/// While `Blocked`, any route other than the blocked-notice route is
/// redirected back to it. While `Clear`, sitting on the blocked-notice route
/// redirects home. Repeated identical check results are idempotent: once the
/// visitor is on the right route, no further actions are emitted.
#[derive(Debug, Clone)]
pub struct AccessGate {
    state: GateState,
    route: String,
    blocked_route: String,
    home_route: String,
}

impl AccessGate {
    pub fn new(
        initial_route: impl Into<String>,
        blocked_route: impl Into<String>,
        home_route: impl Into<String>,
    ) -> Self {
        Self {
            state: GateState::Checking,
            route: initial_route.into(),
            blocked_route: blocked_route.into(),
            home_route: home_route.into(),
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Apply one event and return the actions it demands.
    ///
    /// Out-of-order check completions are resolved last-write-wins.
    pub fn on_event(&mut self, event: GateEvent) -> Vec<GateAction> {
        match event {
            GateEvent::CheckResolved { blocked: true } => {
                self.state = GateState::Blocked;
                if self.route != self.blocked_route {
                    vec![GateAction::Redirect(self.blocked_route.clone())]
                } else {
                    Vec::new()
                }
            }
            GateEvent::CheckResolved { blocked: false } => {
                self.state = GateState::Clear;
                if self.route == self.blocked_route {
                    vec![GateAction::Redirect(self.home_route.clone())]
                } else {
                    Vec::new()
                }
            }
            GateEvent::Navigated { route } => {
                self.route = route;
                if self.state == GateState::Blocked && self.route != self.blocked_route {
                    vec![GateAction::Redirect(self.blocked_route.clone())]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AccessGate {
        AccessGate::new("/", "/blocked", "/")
    }

    fn resolved(blocked: bool) -> GateEvent {
        GateEvent::CheckResolved { blocked }
    }

    fn navigated(route: &str) -> GateEvent {
        GateEvent::Navigated {
            route: route.to_string(),
        }
    }

    #[test]
    fn test_blocked_check_redirects_to_blocked_route() {
        let mut gate = gate();
        let actions = gate.on_event(resolved(true));
        assert_eq!(actions, vec![GateAction::Redirect("/blocked".to_string())]);
        assert_eq!(*gate.state(), GateState::Blocked);
    }

    #[test]
    fn test_clear_check_emits_nothing_off_blocked_route() {
        let mut gate = gate();
        let actions = gate.on_event(resolved(false));
        assert!(actions.is_empty());
        assert_eq!(*gate.state(), GateState::Clear);
    }

    #[test]
    fn test_clear_check_on_blocked_route_redirects_home() {
        let mut gate = AccessGate::new("/blocked", "/blocked", "/");
        let actions = gate.on_event(resolved(false));
        assert_eq!(actions, vec![GateAction::Redirect("/".to_string())]);
    }

    #[test]
    fn test_navigation_away_while_blocked_is_intercepted() {
        let mut gate = gate();
        gate.on_event(resolved(true));
        gate.on_event(navigated("/blocked"));

        let actions = gate.on_event(navigated("/pricing"));
        assert_eq!(actions, vec![GateAction::Redirect("/blocked".to_string())]);
    }

    #[test]
    fn test_navigation_while_clear_is_untouched() {
        let mut gate = gate();
        gate.on_event(resolved(false));
        let actions = gate.on_event(navigated("/pricing"));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_repeated_results_converge_without_toggling() {
        let mut gate = gate();
        gate.on_event(resolved(true));
        gate.on_event(navigated("/blocked"));

        for _ in 0..5 {
            assert!(gate.on_event(resolved(true)).is_empty());
            assert_eq!(*gate.state(), GateState::Blocked);
        }

        // Backend unblocks: one redirect home, then stable again.
        let actions = gate.on_event(resolved(false));
        assert_eq!(actions, vec![GateAction::Redirect("/".to_string())]);
        gate.on_event(navigated("/"));
        for _ in 0..5 {
            assert!(gate.on_event(resolved(false)).is_empty());
            assert_eq!(*gate.state(), GateState::Clear);
        }
    }

    #[test]
    fn test_last_write_wins_on_out_of_order_checks() {
        let mut gate = gate();
        gate.on_event(resolved(true));
        gate.on_event(navigated("/blocked"));
        // A stale in-flight "not blocked" resolves after the blocked one.
        let actions = gate.on_event(resolved(false));
        assert_eq!(actions, vec![GateAction::Redirect("/".to_string())]);
        assert_eq!(*gate.state(), GateState::Clear);
    }

    #[test]
    fn test_failed_check_resolves_to_clear() {
        // The probe reports failures as blocked: false; the gate must land in
        // Clear, never trap the visitor.
        let mut gate = gate();
        let actions = gate.on_event(resolved(false));
        assert!(actions.is_empty());
        assert_eq!(*gate.state(), GateState::Clear);
    }
}
