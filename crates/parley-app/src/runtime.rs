//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: Session bridge to Client
//! - [`Driver`]: Platform-specific I/O

use parley_client::Environment;

use crate::{App, AppAction, AppEvent, Bridge, Driver, EntryKind};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment for identity generation and timestamps
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    app: App,
    bridge: Bridge<E>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a new runtime with the given driver and environment.
    pub fn new(driver: D, env: E, endpoint: String) -> Self {
        let app = App::new(endpoint);
        let bridge = Bridge::new(env);
        Self { driver, app, bridge }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Polls for input events from the driver
    /// 2. Drains pending transport events
    /// 3. Processes actions and events between App and Bridge
    /// 4. Sends outgoing payloads through the driver
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let actions = self.app.connect();
        let mut should_quit = self.process_actions(actions).await?;

        while !should_quit {
            should_quit = self.process_cycle().await?;
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let actions = self.driver.poll_event(&mut self.app).await?;
        if !actions.is_empty() && self.process_actions(actions).await? {
            return Ok(true);
        }

        while self.driver.is_connected() {
            let Some(event) = self.driver.recv_transport_event().await else {
                break;
            };

            let events = self.bridge.handle_transport(event);
            let failures = self.send_outgoing().await;
            if self.process_bridge_events(failures).await?
                || self.process_bridge_events(events).await?
            {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Connect { endpoint } => {
                        self.connect(&endpoint).await?;
                    },
                    AppAction::SendMessage { .. } => {
                        let events = self.bridge.process_app_action(action);
                        let failures = self.send_outgoing().await;
                        let delivered = failures.is_empty();

                        // A Sent entry is only recorded once its text left
                        for event in events.into_iter().chain(failures) {
                            if !delivered && is_sent_entry(&event) {
                                continue;
                            }
                            pending_actions.extend(self.app.handle(event));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Process events from Bridge back to App.
    async fn process_bridge_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Start a fresh session and connect the driver.
    async fn connect(&mut self, endpoint: &str) -> Result<(), D::Error> {
        self.bridge.begin_session();
        self.driver.connect(endpoint).await?;

        let _ = self.app.handle(AppEvent::Connecting);
        self.driver.render(&self.app)
    }

    /// Send all pending outgoing payloads.
    ///
    /// Send failures are surfaced to the user rather than ending the loop;
    /// the transport reports the terminal event on its own. Returns one
    /// error event per failed send, empty if everything went out.
    async fn send_outgoing(&mut self) -> Vec<AppEvent> {
        let mut failures = Vec::new();

        for text in self.bridge.take_outgoing() {
            if let Err(e) = self.driver.send_text(text).await {
                tracing::warn!(error = %e, "failed to send payload");
                failures.push(AppEvent::Error { message: e.to_string() });
            }
        }

        failures
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }
}

fn is_sent_entry(event: &AppEvent) -> bool {
    matches!(event, AppEvent::EntryAppended(entry) if entry.kind() == EntryKind::Sent)
}
