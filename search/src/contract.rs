//! Search problem contract trait.

use statespace_kernel::carrier::state::StateIdentity;

/// A problem the engine can explore.
///
/// One implementation per problem (N-puzzle, water-jug, missionaries and
/// cannibals, N-queens, weighted graph, graph coloring). Drivers are generic
/// over this trait, so each instantiation is statically dispatched.
///
/// # Contract
///
/// - `successors` is pure and deterministic: same state, same successors,
///   same order. The order defines frontier tie-breaks and tree layout.
/// - An empty successor list is a leaf / dead end, never an error.
/// - Successors should already satisfy `is_valid`. Drivers re-check every
///   successor and drop the ones that do not.
pub trait SearchProblemV1 {
    /// Immutable problem configuration.
    type State: StateIdentity + Clone + std::fmt::Debug;

    /// Legal next states, in a stable order.
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Domain validity guard (e.g. the missionaries safety invariant).
    fn is_valid(&self, _state: &Self::State) -> bool {
        true
    }

    /// Goal predicate.
    fn is_goal(&self, _state: &Self::State) -> bool {
        false
    }

    /// Estimated remaining cost. Admissibility is the implementer's claim,
    /// not something the engine checks.
    fn heuristic(&self, _state: &Self::State) -> i64 {
        0
    }

    /// Cost of the move `from -> to`, where `to` is in `successors(from)`.
    fn step_cost(&self, _from: &Self::State, _to: &Self::State) -> i64 {
        1
    }
}
