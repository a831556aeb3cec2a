//! Fuzz target for the session controller
//!
//! Drives a `Client` with arbitrary interleavings of transport events and
//! user submissions.
//!
//! # Invariants
//!
//! - Nothing is sent before the transport opens or after it ends
//! - The first two sends are `/name <identity>` then `/join chat`
//! - Blank submissions never produce a send
//! - At most one `Ended` action per session
//! - Errors are only ever `InvalidState`, never panics

#![no_main]

use arbitrary::Arbitrary;
use chrono::NaiveDateTime;
use libfuzzer_sys::fuzz_target;
use parley_client::{
    Client, ClientAction, ClientEvent, Environment, SessionState, TransportEvent,
};

#[derive(Debug, Clone, Arbitrary)]
enum SessionOp {
    Open,
    Payload(String),
    Close,
    Error(String),
    Submit(String),
}

/// Environment whose RNG replays fuzzer-chosen bytes.
#[derive(Clone)]
struct FuzzEnv {
    seed: u8,
}

impl Environment for FuzzEnv {
    fn local_time(&self) -> NaiveDateTime {
        NaiveDateTime::default()
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = self.seed.wrapping_add(i as u8);
        }
    }
}

fuzz_target!(|input: (u8, Vec<SessionOp>)| {
    let (seed, ops) = input;
    let mut client = Client::new(FuzzEnv { seed });
    let mut wire = Vec::new();
    let mut ended = 0;

    for op in ops {
        let before = client.state();
        let event = match op {
            SessionOp::Open => ClientEvent::Transport(TransportEvent::Opened),
            SessionOp::Payload(text) => ClientEvent::Transport(TransportEvent::PayloadReceived(text)),
            SessionOp::Close => ClientEvent::Transport(TransportEvent::Closed),
            SessionOp::Error(reason) => ClientEvent::Transport(TransportEvent::Errored { reason }),
            SessionOp::Submit(text) => {
                let blank = text.trim().is_empty();
                let actions = client.handle(ClientEvent::SubmitMessage { text }).unwrap_or_default();
                if blank || before != SessionState::Joined {
                    assert!(actions.is_empty());
                }
                wire.extend(sends(&actions));
                continue;
            },
        };

        let Ok(actions) = client.handle(event) else {
            continue;
        };

        if before.is_terminal() {
            assert!(actions.is_empty());
        }
        ended += actions.iter().filter(|a| matches!(a, ClientAction::Ended { .. })).count();
        wire.extend(sends(&actions));
    }

    assert!(ended <= 1);
    if let Some(identity) = client.identity() {
        assert_eq!(wire.first().map(String::as_str), Some(format!("/name {identity}").as_str()));
        assert_eq!(wire.get(1).map(String::as_str), Some("/join chat"));
    } else {
        assert!(wire.is_empty());
    }
});

fn sends(actions: &[ClientAction]) -> Vec<String> {
    actions
        .iter()
        .filter_map(|a| match a {
            ClientAction::Send(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}
