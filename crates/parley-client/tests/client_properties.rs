//! Property-based tests for the session controller.
//!
//! Tests verify that session invariants hold under arbitrary event sequences:
//! blank input never reaches the wire, join commands always go first, and
//! nothing is sent once the session is terminal.

use chrono::NaiveDateTime;
use parley_client::{Client, ClientAction, ClientEvent, Environment, SessionState, TransportEvent};
use proptest::prelude::*;

/// Deterministic environment for property tests.
#[derive(Clone)]
struct TestEnv;

impl Environment for TestEnv {
    fn local_time(&self) -> NaiveDateTime {
        NaiveDateTime::default()
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        for (i, b) in buffer.iter_mut().enumerate() {
            *b = i as u8;
        }
    }
}

/// Whitespace-only input (including empty).
fn blank_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n'), Just('\r')], 0..8)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Arbitrary client events, transport lifecycle included.
fn event_strategy() -> impl Strategy<Value = ClientEvent> {
    prop_oneof![
        1 => Just(ClientEvent::Transport(TransportEvent::Opened)),
        4 => ".{0,32}".prop_map(|t| ClientEvent::Transport(TransportEvent::PayloadReceived(t))),
        1 => Just(ClientEvent::Transport(TransportEvent::Closed)),
        1 => "[a-z ]{1,16}".prop_map(|reason| ClientEvent::Transport(TransportEvent::Errored { reason })),
        4 => ".{0,32}".prop_map(|text| ClientEvent::SubmitMessage { text }),
        1 => blank_text().prop_map(|text| ClientEvent::SubmitMessage { text }),
    ]
}

fn sends(actions: &[ClientAction]) -> Vec<&str> {
    actions
        .iter()
        .filter_map(|a| match a {
            ClientAction::Send(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_blank_submit_never_sends(text in blank_text()) {
        let mut client = Client::new(TestEnv);
        client.handle(TransportEvent::Opened.into()).unwrap();

        let actions = client.handle(ClientEvent::SubmitMessage { text }).unwrap();

        // PROPERTY: no Send, no Sent
        prop_assert!(actions.is_empty());
    }

    #[test]
    fn prop_joined_submit_sends_trimmed_text(text in ".{0,64}") {
        let mut client = Client::new(TestEnv);
        client.handle(TransportEvent::Opened.into()).unwrap();

        let actions = client.handle(ClientEvent::SubmitMessage { text: text.clone() }).unwrap();

        if text.trim().is_empty() {
            prop_assert!(actions.is_empty());
        } else {
            prop_assert_eq!(actions, vec![
                ClientAction::Send(text.trim().to_owned()),
                ClientAction::Sent { body: text.clone() },
            ]);
        }
    }

    #[test]
    fn prop_session_invariants_hold(events in prop::collection::vec(event_strategy(), 0..40)) {
        let mut client = Client::new(TestEnv);
        let mut wire: Vec<String> = Vec::new();
        let mut ended = 0usize;

        for event in events {
            let before = client.state();
            let Ok(actions) = client.handle(event) else {
                // Rejected events must not change state
                prop_assert_eq!(client.state(), before);
                continue;
            };

            // PROPERTY: a terminal session never sends
            if before.is_terminal() {
                prop_assert!(sends(&actions).is_empty());
            }

            ended += actions.iter().filter(|a| matches!(a, ClientAction::Ended { .. })).count();
            wire.extend(sends(&actions).into_iter().map(str::to_owned));
        }

        // PROPERTY: at most one terminal transition
        prop_assert!(ended <= 1);

        // PROPERTY: if anything was sent, the join sequence came first
        if !wire.is_empty() {
            prop_assert!(wire[0].starts_with("/name "));
            prop_assert_eq!(wire.get(1).map(String::as_str), Some("/join chat"));
        }

        if ended == 1 {
            prop_assert!(client.state().is_terminal());
        } else {
            prop_assert!(matches!(client.state(), SessionState::Idle | SessionState::Joined));
        }
    }
}
