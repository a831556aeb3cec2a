//! Environment abstraction for deterministic testing.
//!
//! Decouples session logic from system resources (wall clock, randomness).
//! Production uses [`SystemEnv`]; simulation uses a seeded RNG and a virtual
//! clock so transcripts and identities are reproducible.

use chrono::{Local, NaiveDateTime};

/// Abstract environment providing wall-clock time and randomness.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Current local wall-clock time.
    ///
    /// Used to stamp transcript entries when they are appended. There is no
    /// synchronization with the server clock.
    fn local_time(&self) -> NaiveDateTime;

    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    fn random_bytes(&self, buffer: &mut [u8]);
}

/// Production environment using the local clock and OS randomness.
#[derive(Debug, Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn local_time(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).expect("invariant: OS RNG failure is unrecoverable");
    }
}
