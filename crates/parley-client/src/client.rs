//! Session controller state machine.
//!
//! The `Client` owns one [`Session`] and sequences identity registration and
//! room join when the transport opens. It never waits for server replies: the
//! protocol has no acknowledgments.

use parley_proto::{Command, classify};

use crate::{
    Environment, Identity, Session, SessionState,
    error::ClientError,
    event::{ClientAction, ClientEvent, TransportEvent},
};

/// Session controller for one connection lifetime.
///
/// Create a new `Client` for every connect attempt so identity and state never
/// leak across connections.
pub struct Client<E: Environment> {
    /// Environment for identity generation.
    env: E,

    /// Session owned by this connection.
    session: Session,
}

impl<E: Environment> Client<E> {
    /// Create a client with an idle session.
    pub fn new(env: E) -> Self {
        Self { env, session: Session::new() }
    }

    /// Session owned by this client.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Identity assigned on open. `None` before the transport opens.
    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    /// Process an event and return resulting actions.
    pub fn handle(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            ClientEvent::Transport(TransportEvent::Opened) => self.handle_opened(),
            ClientEvent::Transport(TransportEvent::PayloadReceived(text)) => {
                self.handle_payload(&text)
            },
            ClientEvent::Transport(TransportEvent::Closed) => {
                Ok(self.handle_terminal(SessionState::Closed, None))
            },
            ClientEvent::Transport(TransportEvent::Errored { reason }) => {
                Ok(self.handle_terminal(SessionState::Errored, Some(reason)))
            },
            ClientEvent::SubmitMessage { text } => Ok(self.handle_submit(text)),
        }
    }

    fn handle_opened(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        let state = self.session.state();
        if state != SessionState::Idle {
            return Err(ClientError::InvalidState { state, operation: "open" });
        }

        let identity = Identity::generate(&self.env);
        self.session.set_state(SessionState::Connecting);

        // Order matters: the server names us before we enter the room
        let actions = vec![
            ClientAction::Send(Command::SetName(identity.to_string()).encode()),
            ClientAction::Send(Command::join_default().encode()),
            ClientAction::Joined {
                identity: identity.clone(),
                room: self.session.room().to_owned(),
            },
        ];

        tracing::info!(%identity, room = self.session.room(), "session joined");
        self.session.assign_identity(identity);
        self.session.set_state(SessionState::Joined);

        Ok(actions)
    }

    fn handle_payload(&mut self, text: &str) -> Result<Vec<ClientAction>, ClientError> {
        let state = self.session.state();
        if state == SessionState::Idle || state.is_terminal() {
            return Err(ClientError::InvalidState { state, operation: "receive payload" });
        }

        Ok(vec![ClientAction::Deliver(classify(text))])
    }

    fn handle_terminal(&mut self, next: SessionState, reason: Option<String>) -> Vec<ClientAction> {
        let state = self.session.state();
        if state.is_terminal() {
            tracing::debug!(?state, ?next, "ignoring second terminal event");
            return vec![];
        }

        match &reason {
            Some(reason) => tracing::warn!(%reason, "session errored"),
            None => tracing::info!("session closed"),
        }

        self.session.set_state(next);
        vec![ClientAction::Ended { state: next, reason }]
    }

    fn handle_submit(&mut self, text: String) -> Vec<ClientAction> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return vec![];
        }

        let state = self.session.state();
        if state != SessionState::Joined {
            tracing::debug!(?state, "dropping message, session not joined");
            return vec![];
        }

        let line = Command::Chat(trimmed.to_owned()).encode();
        vec![ClientAction::Send(line), ClientAction::Sent { body: text }]
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use parley_proto::ClassifiedMessage;

    use super::*;

    /// Environment with a constant RNG so identities are predictable.
    #[derive(Clone)]
    struct TestEnv;

    impl Environment for TestEnv {
        fn local_time(&self) -> NaiveDateTime {
            NaiveDateTime::default()
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            buffer.fill(10); // 'a'
        }
    }

    fn joined_client() -> Client<TestEnv> {
        let mut client = Client::new(TestEnv);
        client.handle(TransportEvent::Opened.into()).unwrap();
        client
    }

    fn submit(client: &mut Client<TestEnv>, text: &str) -> Vec<ClientAction> {
        client.handle(ClientEvent::SubmitMessage { text: text.into() }).unwrap()
    }

    #[test]
    fn opened_sends_name_then_join() {
        let mut client = Client::new(TestEnv);
        let actions = client.handle(TransportEvent::Opened.into()).unwrap();

        assert_eq!(actions.as_slice(), [
            ClientAction::Send("/name aaaaa".into()),
            ClientAction::Send("/join chat".into()),
            ClientAction::Joined {
                identity: Identity::generate(&TestEnv),
                room: "chat".into()
            },
        ]);
        assert_eq!(client.state(), SessionState::Joined);
        assert_eq!(client.identity().map(Identity::as_str), Some("aaaaa"));
    }

    #[test]
    fn second_open_is_rejected() {
        let mut client = joined_client();
        let result = client.handle(TransportEvent::Opened.into());

        assert_eq!(
            result,
            Err(ClientError::InvalidState { state: SessionState::Joined, operation: "open" })
        );
    }

    #[test]
    fn submit_sends_trimmed_and_records_original() {
        let mut client = joined_client();
        let actions = submit(&mut client, "  hey there  ");

        assert_eq!(actions.as_slice(), [
            ClientAction::Send("hey there".into()),
            ClientAction::Sent { body: "  hey there  ".into() },
        ]);
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut client = joined_client();

        assert!(submit(&mut client, "").is_empty());
        assert!(submit(&mut client, "   ").is_empty());
        assert!(submit(&mut client, "\t\n").is_empty());
    }

    #[test]
    fn submit_before_open_is_dropped() {
        let mut client = Client::new(TestEnv);

        assert!(submit(&mut client, "hello").is_empty());
        assert_eq!(client.state(), SessionState::Idle);
    }

    #[test]
    fn payload_is_classified() {
        let mut client = joined_client();
        let actions =
            client.handle(TransportEvent::PayloadReceived("[chat] bob: hi".into()).into()).unwrap();

        assert_eq!(actions.as_slice(), [ClientAction::Deliver(ClassifiedMessage::Chat {
            sender: "[chat] bob".into(),
            body: "hi".into(),
        })]);
    }

    #[test]
    fn payload_before_open_is_rejected() {
        let mut client = Client::new(TestEnv);
        let result = client.handle(TransportEvent::PayloadReceived("hi".into()).into());

        assert!(matches!(result, Err(ClientError::InvalidState { state: SessionState::Idle, .. })));
    }

    #[test]
    fn close_is_terminal_and_drops_sends() {
        let mut client = joined_client();
        let actions = client.handle(TransportEvent::Closed.into()).unwrap();

        assert_eq!(actions.as_slice(), [ClientAction::Ended {
            state: SessionState::Closed,
            reason: None
        }]);
        assert!(submit(&mut client, "anyone?").is_empty());
        assert_eq!(client.state(), SessionState::Closed);
    }

    #[test]
    fn error_before_open_is_terminal() {
        let mut client = Client::new(TestEnv);
        let actions = client
            .handle(TransportEvent::Errored { reason: "connection refused".into() }.into())
            .unwrap();

        assert_eq!(actions.as_slice(), [ClientAction::Ended {
            state: SessionState::Errored,
            reason: Some("connection refused".into())
        }]);
        assert!(client.identity().is_none());
    }

    #[test]
    fn second_terminal_event_is_ignored() {
        let mut client = joined_client();
        client.handle(TransportEvent::Closed.into()).unwrap();

        let actions =
            client.handle(TransportEvent::Errored { reason: "late".into() }.into()).unwrap();

        assert!(actions.is_empty());
        assert_eq!(client.state(), SessionState::Closed);
    }

    #[test]
    fn payload_after_close_is_rejected() {
        let mut client = joined_client();
        client.handle(TransportEvent::Closed.into()).unwrap();

        let result = client.handle(TransportEvent::PayloadReceived("late".into()).into());
        assert!(result.is_err());
    }
}
