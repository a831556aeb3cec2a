//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`parley_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Inputs and transport events are replayed from a single ordered script, so
//! a test controls exactly how user input interleaves with network activity.
//! When the script runs out the driver asks the App to quit.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use parley_app::{App, AppAction, AppEvent, Driver};
use parley_client::TransportEvent;

use crate::invariants::{AppSnapshot, InvariantRegistry, SystemSnapshot};

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimStep {
    /// Deliver a transport lifecycle event.
    Transport(TransportEvent),
    /// Submit a line of user input.
    Submit(String),
    /// Feed an event straight into the App.
    Event(AppEvent),
    /// Ask the App to quit.
    Quit,
}

impl SimStep {
    fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Shared state for script injection and observation.
///
/// This allows injection and inspection from outside the runtime, which
/// takes ownership of the driver.
#[derive(Default)]
struct SharedState {
    script: VecDeque<SimStep>,
    sent: Vec<String>,
    connects: Vec<String>,
    connected: bool,
    link_open: bool,
    fail_sends: bool,
    renders: usize,
    last_render: Option<App>,
    stopped: bool,
}

fn lock(state: &Mutex<SharedState>) -> MutexGuard<'_, SharedState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`parley_app::Runtime`]
/// orchestration code runs in both production TUI and simulation tests.
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    invariants: Option<InvariantRegistry>,
    previous: Option<AppSnapshot>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a new simulation driver with an empty script.
    pub fn new() -> Self {
        Self { state: Arc::new(Mutex::new(SharedState::default())), invariants: None, previous: None }
    }

    /// Create a driver that replays `steps` in order.
    pub fn with_script(steps: impl IntoIterator<Item = SimStep>) -> Self {
        let driver = Self::new();
        lock(&driver.state).script.extend(steps);
        driver
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Make every send fail as if the link dropped underneath.
    #[must_use]
    pub fn failing_sends(self) -> Self {
        lock(&self.state).fail_sends = true;
        self
    }

    /// Observer handle that stays valid after the runtime takes the driver.
    pub fn handle(&self) -> SimHandle {
        SimHandle { state: Arc::clone(&self.state) }
    }

    /// Append a step to the script.
    pub fn push(&self, step: SimStep) {
        lock(&self.state).script.push_back(step);
    }

    /// Inject a transport event.
    pub fn inject_transport(&self, event: TransportEvent) {
        self.push(SimStep::Transport(event));
    }

    /// Inject a line of user input.
    pub fn inject_submit(&self, text: impl Into<String>) {
        self.push(SimStep::Submit(text.into()));
    }

    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        self.push(SimStep::Event(event));
    }

    /// Check if there are pending steps to process.
    pub fn has_pending(&self) -> bool {
        !lock(&self.state).script.is_empty()
    }

    /// Check invariants against App state, comparing with the last checked
    /// state.
    pub fn check_invariants(&mut self, app: &App) -> Result<(), SimDriverError> {
        let current = AppSnapshot::from_app(app);
        let snapshot = match self.previous.take() {
            Some(previous) => SystemSnapshot::transition(previous, current.clone()),
            None => SystemSnapshot::initial(current.clone()),
        };
        self.previous = Some(current);

        let Some(registry) = &self.invariants else {
            return Ok(());
        };
        registry.check_all(&snapshot).map_err(|violations| {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            SimDriverError(format!("invariant violation: {}", messages.join("; ")))
        })
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self, app: &mut App) -> Result<Vec<AppAction>, Self::Error> {
        let mut state = lock(&self.state);

        match state.script.front().map(SimStep::is_transport) {
            None => {
                drop(state);
                Ok(app.quit())
            },
            Some(true) => {
                if !state.connected {
                    let step = state.script.pop_front();
                    tracing::debug!(?step, "dropping transport step, not connected");
                }
                Ok(vec![])
            },
            Some(false) => {
                let step = state.script.pop_front();
                drop(state);
                match step {
                    Some(SimStep::Submit(text)) => Ok(app.send_message(text)),
                    Some(SimStep::Event(event)) => Ok(app.handle(event)),
                    Some(SimStep::Quit) => Ok(app.quit()),
                    Some(SimStep::Transport(_)) | None => Ok(vec![]),
                }
            },
        }
    }

    async fn send_text(&mut self, text: String) -> Result<(), Self::Error> {
        let mut state = lock(&self.state);
        if state.fail_sends {
            return Err(SimDriverError("send failed".into()));
        }
        if !state.link_open {
            return Err(SimDriverError("link is not open".into()));
        }
        state.sent.push(text);
        Ok(())
    }

    async fn recv_transport_event(&mut self) -> Option<TransportEvent> {
        let mut state = lock(&self.state);
        if !state.script.front().is_some_and(SimStep::is_transport) {
            return None;
        }

        let Some(SimStep::Transport(event)) = state.script.pop_front() else {
            return None;
        };
        match &event {
            TransportEvent::Opened => state.link_open = true,
            TransportEvent::Closed | TransportEvent::Errored { .. } => {
                state.link_open = false;
                state.connected = false;
            },
            TransportEvent::PayloadReceived(_) => {},
        }
        Some(event)
    }

    async fn connect(&mut self, endpoint: &str) -> Result<(), Self::Error> {
        let mut state = lock(&self.state);
        state.connects.push(endpoint.to_owned());
        state.connected = true;
        state.link_open = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        lock(&self.state).connected
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.check_invariants(app)?;

        let mut state = lock(&self.state);
        state.renders += 1;
        state.last_render = Some(app.clone());
        Ok(())
    }

    fn stop(&mut self) {
        let mut state = lock(&self.state);
        state.connected = false;
        state.link_open = false;
        state.stopped = true;
    }
}

/// Read-only view of a [`SimDriver`]'s recorded activity.
#[derive(Clone)]
pub struct SimHandle {
    state: Arc<Mutex<SharedState>>,
}

impl SimHandle {
    /// Payloads sent so far, in order.
    pub fn sent(&self) -> Vec<String> {
        lock(&self.state).sent.clone()
    }

    /// Endpoints passed to `connect`, in order.
    pub fn connects(&self) -> Vec<String> {
        lock(&self.state).connects.clone()
    }

    /// Number of renders.
    pub fn render_count(&self) -> usize {
        lock(&self.state).renders
    }

    /// App as of the most recent render.
    pub fn last_render(&self) -> Option<App> {
        lock(&self.state).last_render.clone()
    }

    /// True once the runtime has stopped the driver.
    pub fn is_stopped(&self) -> bool {
        lock(&self.state).stopped
    }

    /// Steps not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.state).script.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_submit_queues_step() {
        let driver = SimDriver::new();
        driver.inject_submit("hello");

        assert!(driver.has_pending());
    }

    #[tokio::test]
    async fn empty_script_quits() {
        let mut driver = SimDriver::new();
        let mut app = App::new("ws://sim/ws".into());

        let actions = driver.poll_event(&mut app).await.unwrap();
        assert_eq!(actions, vec![AppAction::Quit]);
    }

    #[tokio::test]
    async fn transport_steps_before_connect_are_dropped() {
        let mut driver = SimDriver::with_script([SimStep::Transport(TransportEvent::Opened)]);
        let mut app = App::new("ws://sim/ws".into());
        let actions = driver.poll_event(&mut app).await.unwrap();
        assert!(actions.is_empty());
        assert!(!driver.has_pending());
    }

    #[tokio::test]
    async fn send_requires_open_link() {
        let mut driver = SimDriver::with_script([SimStep::Transport(TransportEvent::Opened)]);
        driver.connect("ws://sim/ws").await.unwrap();

        assert!(driver.send_text("early".into()).await.is_err());
        assert_eq!(driver.recv_transport_event().await, Some(TransportEvent::Opened));
        assert!(driver.send_text("later".into()).await.is_ok());
        assert_eq!(driver.handle().sent(), vec!["later".to_owned()]);
    }

    #[tokio::test]
    async fn terminal_event_disconnects() {
        let mut driver = SimDriver::with_script([SimStep::Transport(TransportEvent::Closed)]);
        driver.connect("ws://sim/ws").await.unwrap();

        assert!(driver.is_connected());
        let _ = driver.recv_transport_event().await;
        assert!(!driver.is_connected());
    }
}
