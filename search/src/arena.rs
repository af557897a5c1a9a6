//! Node arena and path reconstruction.
//!
//! Nodes are stored in a `Vec` and refer to their parent by index. A child
//! never owns its parent and a parent never knows its children, so there are
//! no ownership cycles to manage.

use crate::node::SearchNodeV1;

/// Append-only node storage indexed by `node_id`.
#[derive(Debug, Clone)]
pub struct NodeArena<S> {
    nodes: Vec<SearchNodeV1<S>>,
}

impl<S> NodeArena<S> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocate a node. Returns its `node_id`.
    pub fn alloc(
        &mut self,
        state: S,
        parent_id: Option<u64>,
        depth: u32,
        g_cost: i64,
        h_cost: i64,
    ) -> u64 {
        let node_id = self.nodes.len() as u64;
        self.nodes.push(SearchNodeV1 {
            node_id,
            parent_id,
            state,
            depth,
            g_cost,
            h_cost,
        });
        node_id
    }

    #[must_use]
    pub fn get(&self, node_id: u64) -> Option<&SearchNodeV1<S>> {
        usize::try_from(node_id).ok().and_then(|i| self.nodes.get(i))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order.
    #[must_use]
    pub fn nodes(&self) -> &[SearchNodeV1<S>] {
        &self.nodes
    }

    /// Node IDs from the root to `node_id`, inclusive.
    ///
    /// Returns an empty path if `node_id` is not in the arena.
    #[must_use]
    pub fn reconstruct_path(&self, node_id: u64) -> Vec<u64> {
        if self.get(node_id).is_none() {
            return Vec::new();
        }
        walk_to_root(node_id, |id| self.get(id).and_then(|n| n.parent_id))
    }
}

impl<S> Default for NodeArena<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Follow parent links from `start` and return the IDs root-first.
///
/// Shared by the arena and by tree reports, whose records carry the same
/// kind of parent index.
pub fn walk_to_root(start: u64, parent_of: impl Fn(u64) -> Option<u64>) -> Vec<u64> {
    let mut path = Vec::new();
    let mut current = Some(start);
    while let Some(id) = current {
        path.push(id);
        current = parent_of(id);
    }
    path.reverse();
    path
}
