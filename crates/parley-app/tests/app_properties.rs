//! Property-based tests for App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences.
//! This ensures behavioral correctness across all possible execution paths.

use parley_app::{App, AppAction, Bridge, EntryKind};
use parley_client::TransportEvent;
use parley_harness::{AppSnapshot, InvariantRegistry, SimEnv, SystemSnapshot};
use parley_proto::{ClassifiedMessage, classify};
use proptest::prelude::*;

/// Inputs that can reach the App through the bridge.
#[derive(Debug, Clone)]
enum Input {
    Transport(TransportEvent),
    Submit(String),
}

/// Generate random inputs.
fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        1 => Just(Input::Transport(TransportEvent::Opened)),
        4 => "(\\[[a-z]{1,3}\\] )?[a-z :]{0,16}"
            .prop_map(|text| Input::Transport(TransportEvent::PayloadReceived(text))),
        1 => Just(Input::Transport(TransportEvent::Closed)),
        1 => "[a-z ]{1,10}".prop_map(|reason| Input::Transport(TransportEvent::Errored { reason })),
        4 => "[ a-z]{0,12}".prop_map(Input::Submit),
    ]
}

/// Generate inbound payloads, both notices and chat lines.
fn payload_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z :]{0,16}",
        "\\[[a-z]{1,3}\\] [a-z]{1,6}(: [a-z :]{0,12})?",
    ]
}

/// Fields of the entry a payload should produce: kind, sender and body.
fn expected_entry(payload: &str) -> (EntryKind, Option<String>, String) {
    match classify(payload) {
        ClassifiedMessage::Info { text } => (EntryKind::Info, None, text),
        ClassifiedMessage::Chat { sender, body } => (EntryKind::Received, Some(sender), body),
    }
}

/// Process actions from App through Bridge and update App state.
fn process_actions(app: &mut App, bridge: &mut Bridge<SimEnv>, actions: Vec<AppAction>) {
    for action in actions {
        if let AppAction::SendMessage { .. } = action {
            for event in bridge.process_app_action(action) {
                app.handle(event);
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_app_invariants_hold(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 0..60),
    ) {
        let mut app = App::new("ws://localhost:8080/ws".into());
        let mut bridge = Bridge::new(SimEnv::with_seed(seed));
        let invariants = InvariantRegistry::standard();

        let mut previous = AppSnapshot::from_app(&app);
        let _ = app.connect();
        bridge.begin_session();

        for (i, input) in inputs.into_iter().enumerate() {
            match input {
                Input::Transport(event) => {
                    for app_event in bridge.handle_transport(event) {
                        app.handle(app_event);
                    }
                },
                Input::Submit(text) => {
                    let actions = app.send_message(text);
                    process_actions(&mut app, &mut bridge, actions);
                },
            }
            let _ = bridge.take_outgoing();

            let current = AppSnapshot::from_app(&app);
            let snapshot = SystemSnapshot::transition(previous, current.clone());
            invariants.assert_all(&snapshot, &format!("after input {i}"));
            previous = current;
        }
    }

    #[test]
    fn prop_sent_entries_match_submissions(
        texts in prop::collection::vec("[ a-z]{0,12}", 0..20),
    ) {
        let mut app = App::new("ws://localhost:8080/ws".into());
        let mut bridge = Bridge::new(SimEnv::with_seed(0));
        let _ = app.connect();
        for event in bridge.handle_transport(TransportEvent::Opened) {
            app.handle(event);
        }
        let _ = bridge.take_outgoing();

        let mut wire = Vec::new();
        for text in &texts {
            let actions = app.send_message(text.clone());
            process_actions(&mut app, &mut bridge, actions);
            wire.extend(bridge.take_outgoing());
        }

        let expected: Vec<_> = texts.iter().filter(|t| !t.trim().is_empty()).cloned().collect();
        let recorded: Vec<_> = app.transcript().iter().map(|e| e.body().to_owned()).collect();
        let trimmed: Vec<_> = expected.iter().map(|t| t.trim().to_owned()).collect();
        prop_assert_eq!(recorded, expected);
        prop_assert_eq!(wire, trimmed);
    }

    #[test]
    fn prop_transcript_follows_arrival_order(
        inbound in prop::collection::vec(payload_strategy(), 0..40),
        submits in prop::collection::vec("[a-z]{1,8}", 0..10),
    ) {
        let mut app = App::new("ws://localhost:8080/ws".into());
        let mut bridge = Bridge::new(SimEnv::with_seed(0));
        let _ = app.connect();
        for event in bridge.handle_transport(TransportEvent::Opened) {
            app.handle(event);
        }

        // Interleave local submissions between inbound payloads
        let mut submits = submits.into_iter();
        for (i, payload) in inbound.iter().enumerate() {
            for event in bridge.handle_transport(TransportEvent::PayloadReceived(payload.clone())) {
                app.handle(event);
            }
            if i % 3 != 0 {
                continue;
            }
            if let Some(text) = submits.next() {
                let actions = app.send_message(text);
                process_actions(&mut app, &mut bridge, actions);
            }
        }

        let received: Vec<_> = app
            .transcript()
            .iter()
            .filter(|e| e.kind() != EntryKind::Sent)
            .map(|e| (e.kind(), e.sender().map(str::to_owned), e.body().to_owned()))
            .collect();
        let expected: Vec<_> = inbound.iter().map(|p| expected_entry(p)).collect();
        prop_assert_eq!(received, expected);
    }
}
