//! Session-to-Application translation layer.
//!
//! The [`Bridge`] wraps the low-level [`parley_client::Client`] and adapts
//! it to the high-level application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts high-level [`crate::AppAction`] into client operations.
//! - Accumulates outgoing text payloads to be sent by the driver in the next
//!   I/O cycle.
//! - Interprets results from the client and converts them back into
//!   [`crate::AppEvent`]s, stamping transcript entries with the environment's
//!   wall clock.

use parley_client::{
    Client, ClientAction, ClientError, ClientEvent, Environment, Identity, SessionState,
    TransportEvent,
};

use crate::{AppAction, AppEvent, TranscriptEntry};

/// Bridge between App and Client session logic.
///
/// Generic over Environment to support both production and simulation.
pub struct Bridge<E: Environment> {
    env: E,
    client: Client<E>,
    outgoing: Vec<String>,
}

impl<E: Environment> Bridge<E> {
    /// Create a new Bridge with the given environment.
    pub fn new(env: E) -> Self {
        let client = Client::new(env.clone());
        Self { env, client, outgoing: Vec::new() }
    }

    /// Replace the client with a fresh one for a new connection.
    pub fn begin_session(&mut self) {
        self.client = Client::new(self.env.clone());
        self.outgoing.clear();
    }

    /// Identity of the current session. `None` before the transport opens.
    pub fn identity(&self) -> Option<&str> {
        self.client.identity().map(Identity::as_str)
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.client.state()
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::SendMessage { text } => {
                let result = self.client.handle(ClientEvent::SubmitMessage { text });
                self.handle_client_result(result)
            },
            AppAction::Render | AppAction::Quit | AppAction::Connect { .. } => vec![],
        }
    }

    /// Handle a lifecycle event from the transport.
    pub fn handle_transport(&mut self, event: TransportEvent) -> Vec<AppEvent> {
        let result = self.client.handle(ClientEvent::Transport(event));
        self.handle_client_result(result)
    }

    /// Take pending outgoing payloads.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }

    fn handle_client_result(
        &mut self,
        result: Result<Vec<ClientAction>, ClientError>,
    ) -> Vec<AppEvent> {
        match result {
            Ok(actions) => self.process_client_actions(actions),
            Err(e) => vec![AppEvent::Error { message: e.to_string() }],
        }
    }

    fn process_client_actions(&mut self, actions: Vec<ClientAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                ClientAction::Send(text) => {
                    self.outgoing.push(text);
                },
                ClientAction::Deliver(message) => {
                    let entry = TranscriptEntry::received(message, self.env.local_time());
                    events.push(AppEvent::EntryAppended(entry));
                },
                ClientAction::Sent { body } => {
                    let entry = TranscriptEntry::sent(body, self.env.local_time());
                    events.push(AppEvent::EntryAppended(entry));
                },
                ClientAction::Joined { identity, room } => {
                    events.push(AppEvent::Joined { identity: identity.to_string(), room });
                },
                ClientAction::Ended { state: SessionState::Errored, reason } => {
                    events.push(AppEvent::Errored { reason: reason.unwrap_or_default() });
                },
                ClientAction::Ended { .. } => {
                    events.push(AppEvent::Closed);
                },
            }
        }

        events
    }
}
