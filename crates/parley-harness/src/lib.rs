//! Deterministic simulation harness for Parley.
//!
//! Seeded implementations of the Environment and Driver traits for
//! deterministic, reproducible testing of the full runtime loop without a
//! terminal or a network.
//!
//! # Invariant Testing
//!
//! [`SimDriver::with_invariants`] compares each render with the previous one
//! using [`InvariantRegistry::standard()`]: the transcript only grows at its
//! tail and a closed session stays closed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    AppSnapshot, EntriesRequireConnection, Invariant, InvariantRegistry, InvariantResult,
    SystemSnapshot, TerminalStateIsFinal, TranscriptPrefixStable, Violation,
};
pub use sim_driver::{SimDriver, SimDriverError, SimHandle, SimStep};
pub use sim_env::SimEnv;
