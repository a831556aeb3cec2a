//! Seeded environment for simulation.
//!
//! [`SimEnv`] replaces the system clock with a virtual one that advances one
//! second every time it is read, and the OS RNG with a seeded `ChaCha8`
//! stream. Two environments built from the same seed produce the same
//! identities and the same timestamps.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{NaiveDateTime, TimeDelta};
use parley_client::Environment;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic environment with a virtual clock and seeded RNG.
///
/// Clones share the same clock and RNG stream.
#[derive(Clone)]
pub struct SimEnv {
    rng: Arc<Mutex<ChaCha8Rng>>,
    clock: Arc<Mutex<NaiveDateTime>>,
}

impl SimEnv {
    /// Create an environment seeded with `seed`. The clock starts at the
    /// Unix epoch.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
            clock: Arc::new(Mutex::new(NaiveDateTime::default())),
        }
    }

    /// Start the virtual clock at `start`.
    #[must_use]
    pub fn starting_at(self, start: NaiveDateTime) -> Self {
        *self.clock.lock().unwrap_or_else(PoisonError::into_inner) = start;
        self
    }

    /// Move the virtual clock forward without reading it.
    pub fn advance(&self, delta: TimeDelta) {
        let mut clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
        *clock += delta;
    }

    /// Current virtual time, without advancing.
    pub fn peek_time(&self) -> NaiveDateTime {
        *self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Environment for SimEnv {
    fn local_time(&self) -> NaiveDateTime {
        let mut clock = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
        let now = *clock;
        *clock += TimeDelta::seconds(1);
        now
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner).fill_bytes(buffer);
    }
}

impl std::fmt::Debug for SimEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimEnv").field("clock", &self.peek_time()).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use parley_client::Identity;

    use super::*;

    #[test]
    fn same_seed_same_identity() {
        let a = Identity::generate(&SimEnv::with_seed(7));
        let b = Identity::generate(&SimEnv::with_seed(7));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut bytes_a = [0u8; 16];
        let mut bytes_b = [0u8; 16];
        SimEnv::with_seed(1).random_bytes(&mut bytes_a);
        SimEnv::with_seed(2).random_bytes(&mut bytes_b);
        assert_ne!(bytes_a, bytes_b);
    }

    #[test]
    fn clock_advances_on_read() {
        let env = SimEnv::with_seed(0);
        let first = env.local_time();
        let second = env.local_time();
        assert_eq!(second - first, TimeDelta::seconds(1));
    }

    #[test]
    fn clones_share_clock() {
        let env = SimEnv::with_seed(0);
        let clone = env.clone();
        let _ = env.local_time();
        assert_eq!(clone.peek_time(), NaiveDateTime::default() + TimeDelta::seconds(1));
    }

    #[test]
    fn advance_moves_clock() {
        let env = SimEnv::with_seed(0);
        env.advance(TimeDelta::minutes(5));
        assert_eq!(env.local_time(), NaiveDateTime::default() + TimeDelta::minutes(5));
    }
}
