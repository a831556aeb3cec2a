//! Session and transcript checks run between renders.
//!
//! Every render captures the connection state and the transcript into an
//! [`AppSnapshot`]. Two consecutive snapshots form a [`SystemSnapshot`],
//! and each registered [`Invariant`] compares them: the transcript may only
//! grow at its tail until a new connection starts, a closed or errored
//! session never comes back, and nothing lands in the transcript before the
//! first connect.
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = SystemSnapshot::transition(before, AppSnapshot::from_app(&app));
//! registry.check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{EntriesRequireConnection, TerminalStateIsFinal, TranscriptPrefixStable};
pub use snapshot::{AppSnapshot, SystemSnapshot};

/// Outcome of one check.
pub type InvariantResult = Result<(), Violation>;

/// A broken session or transcript rule.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// What the snapshots showed, e.g. the entry that changed.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A rule relating the transcript and connection state of two renders.
pub trait Invariant: Send + Sync {
    /// Name reported in a [`Violation`].
    fn name(&self) -> &'static str;

    /// Compare `state.current` against `state.previous`, if any.
    fn check(&self, state: &SystemSnapshot) -> InvariantResult;
}

/// Set of checks applied to every render.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Registry holding the session rules the simulation driver enforces:
    /// - [`TranscriptPrefixStable`]: entries are never removed or rewritten
    /// - [`TerminalStateIsFinal`]: closed and errored sessions stay that way
    /// - [`EntriesRequireConnection`]: nothing is recorded before connecting
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(TranscriptPrefixStable);
        registry.add(TerminalStateIsFinal);
        registry.add(EntriesRequireConnection);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Run every check, collecting all violations rather than stopping at the first.
    pub fn check_all(&self, state: &SystemSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Panic with every violation, prefixed by `context`.
    #[allow(clippy::panic, reason = "Test assertion helper")]
    pub fn assert_all(&self, state: &SystemSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
