//! Visited set: the dedup ledger keyed by canonical state identity.
//!
//! Tree enumeration and optimal search only insert. Backtracking also
//! removes, so its set holds exactly the states on the current path.
//!
//! Keys are the states' `identity_bytes()`, stored in a `BTreeSet` so that
//! iteration order is deterministic if a caller ever inspects it.

use std::collections::BTreeSet;

use statespace_kernel::carrier::state::StateIdentity;

/// Set of finalized state identities.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    seen: BTreeSet<Vec<u8>>,
}

impl VisitedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize `state`. Returns `false` if its identity was already present.
    pub fn insert<S: StateIdentity>(&mut self, state: &S) -> bool {
        self.seen.insert(state.identity_bytes())
    }

    /// Forget `state`. Returns `false` if it was not present.
    pub fn remove<S: StateIdentity>(&mut self, state: &S) -> bool {
        self.seen.remove(&state.identity_bytes())
    }

    #[must_use]
    pub fn contains<S: StateIdentity>(&self, state: &S) -> bool {
        self.seen.contains(&state.identity_bytes())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
