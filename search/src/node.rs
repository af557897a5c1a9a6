//! Core search node and frontier key types.

/// An immutable search node.
///
/// Nodes live in a [`crate::arena::NodeArena`]; `parent_id` is an index into
/// the same arena, so the parent links form a tree and never own anything.
///
/// `node_id` is assigned in creation order and doubles as the insertion-order
/// tie-break on the priority frontier.
#[derive(Debug, Clone)]
pub struct SearchNodeV1<S> {
    /// Arena index, monotonic in creation order.
    pub node_id: u64,
    /// Parent node ID (`None` for root).
    pub parent_id: Option<u64>,
    /// The wrapped state.
    pub state: S,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Accumulated path cost from the root.
    pub g_cost: i64,
    /// Heuristic estimate at creation time.
    pub h_cost: i64,
}

impl<S> SearchNodeV1<S> {
    /// Compute `f_cost = g_cost + h_cost` (the frontier ordering key).
    #[must_use]
    pub fn f_cost(&self) -> i64 {
        self.g_cost.saturating_add(self.h_cost)
    }

    /// The frontier key this node is pushed with.
    #[must_use]
    pub fn frontier_key(&self) -> FrontierKey {
        FrontierKey {
            f_cost: self.f_cost(),
            insertion_order: self.node_id,
        }
    }
}

/// The frontier ordering key: `(f_cost, insertion_order)`.
///
/// Lower `f_cost` first; equal priorities pop in insertion order, which keeps
/// results deterministic for equal-priority states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub f_cost: i64,
    pub insertion_order: u64,
}
