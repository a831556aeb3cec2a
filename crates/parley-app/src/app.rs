//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the application completely decoupled from I/O and protocol
//! mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Owns the transcript for the current connection.
//! - Stores terminal dimensions to handle resize events.
//! - Tracks high-level connection state for UI feedback.

use crate::{AppAction, AppEvent, ConnectionState, Transcript, TranscriptSink};

/// Ticks a status message stays visible.
pub const STATUS_TICKS: u32 = 50;

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection state.
    state: ConnectionState,
    /// Server endpoint for connection.
    endpoint: String,
    /// Transcript of the current connection.
    transcript: Transcript,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
    /// Ticks since the status message was set.
    status_age: u32,
}

impl App {
    /// Create a new App with the given server endpoint.
    pub fn new(endpoint: String) -> Self {
        Self {
            state: ConnectionState::Idle,
            endpoint,
            transcript: Transcript::new(),
            terminal_size: (80, 24),
            status_message: None,
            status_age: 0,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => self.age_status(),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Connecting => {
                self.state = ConnectionState::Connecting;
                self.set_status(format!("Connecting to {}...", self.endpoint));
                vec![AppAction::Render]
            },
            AppEvent::Joined { identity, room } => {
                self.set_status(format!("Joined #{room} as {identity}"));
                self.state = ConnectionState::Joined { identity, room };
                vec![AppAction::Render]
            },
            AppEvent::EntryAppended(entry) => {
                self.transcript.append(entry);
                vec![AppAction::Render]
            },
            AppEvent::Closed => {
                self.state = ConnectionState::Closed;
                self.set_status("Connection closed");
                vec![AppAction::Render]
            },
            AppEvent::Errored { reason } => {
                self.set_status(format!("Connection error: {reason}"));
                self.state = ConnectionState::Errored { reason };
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.set_status(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    /// Set a status message to display to the user.
    ///
    /// The message expires after [`STATUS_TICKS`] ticks.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_age = 0;
    }

    fn age_status(&mut self) -> Vec<AppAction> {
        if self.status_message.is_none() {
            return vec![];
        }

        self.status_age = self.status_age.saturating_add(1);
        if self.status_age < STATUS_TICKS {
            return vec![];
        }

        self.status_message = None;
        vec![AppAction::Render]
    }

    /// Start a fresh connection to the server.
    ///
    /// Only allowed before the first connection or after the previous one
    /// ended. Each connection starts with an empty transcript.
    pub fn connect(&mut self) -> Vec<AppAction> {
        if matches!(self.state, ConnectionState::Connecting | ConnectionState::Joined { .. }) {
            self.set_status("Already connected");
            return vec![AppAction::Render];
        }

        self.state = ConnectionState::Connecting;
        self.transcript = Transcript::new();
        vec![AppAction::Connect { endpoint: self.endpoint.clone() }, AppAction::Render]
    }

    /// Submit a line of user input.
    pub fn send_message(&self, text: impl Into<String>) -> Vec<AppAction> {
        vec![AppAction::SendMessage { text: text.into() }, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Current connection state.
    pub fn connection_state(&self) -> &ConnectionState {
        &self.state
    }

    /// Server endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Transcript of the current connection.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
