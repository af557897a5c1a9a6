//! Run reports: the structured audit record every driver returns.
//!
//! [`TreeReportV1`] is produced by both tree enumerators, [`SearchOutcomeV1`]
//! by the optimal-cost search. Each has a JSON projection built with `json!`
//! and serialized through the kernel's canonical JSON, so two runs that made
//! the same decisions produce byte-identical report bytes.

use serde_json::json;
use statespace_kernel::carrier::state::StateIdentity;
use statespace_kernel::proof::canon::{canonical_json_bytes, CanonError};
use statespace_kernel::proof::hash::{canonical_hash, ContentHash};
use statespace_kernel::proof::hash_domain::HashDomain;

use crate::arena::{walk_to_root, NodeArena};
use crate::policy::FrontierOrderV1;

/// Which enumerator produced a tree report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeModeV1 {
    BreadthFirst,
    Backtracking,
}

impl TreeModeV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth_first",
            Self::Backtracking => "backtracking",
        }
    }
}

/// One visited state, in visitation order.
#[derive(Debug, Clone)]
pub struct TreeRecordV1<S> {
    /// Index into [`TreeReportV1::records`].
    pub node_id: u64,
    pub parent_id: Option<u64>,
    pub depth: u32,
    pub state: S,
    /// No later record shares this record's parent.
    pub last_sibling: bool,
}

/// Counters accumulated during enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStatsV1 {
    /// Successors or pops dropped because their identity was already visited
    /// (backtracking: already on the current path).
    pub duplicates_suppressed: u64,
    /// Successors not enqueued because they would exceed `max_depth`.
    pub truncated_by_depth: u64,
    /// Successors that failed the problem's validity predicate.
    pub invalid_successors_rejected: u64,
    /// Backtracking only: frames popped after their successors ran out.
    pub backtracks: u64,
    pub frontier_high_water: u64,
}

/// Why enumeration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeTerminationV1 {
    /// Everything reachable within the depth bound was visited.
    Exhausted,
    /// `stop_at_goal` was set and this record satisfied the goal.
    GoalReached { node_id: u64 },
    /// `max_solutions` solutions were collected.
    SolutionLimitReached { solutions: u64 },
}

/// Result of tree enumeration (breadth-first or backtracking).
#[derive(Debug, Clone)]
pub struct TreeReportV1<S> {
    pub mode: TreeModeV1,
    pub records: Vec<TreeRecordV1<S>>,
    /// `depth_counts[d]` is the number of records at depth `d`.
    pub depth_counts: Vec<u64>,
    /// Record IDs that satisfied the goal, in discovery order.
    pub solution_ids: Vec<u64>,
    pub stats: TreeStatsV1,
    pub termination: TreeTerminationV1,
}

impl<S> TreeReportV1<S> {
    /// Total number of visited states.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.records.len() as u64
    }

    #[must_use]
    pub fn record(&self, node_id: u64) -> Option<&TreeRecordV1<S>> {
        usize::try_from(node_id)
            .ok()
            .and_then(|i| self.records.get(i))
    }

    /// States of every solution record, in discovery order.
    #[must_use]
    pub fn solution_states(&self) -> Vec<&S> {
        self.solution_ids
            .iter()
            .filter_map(|&id| self.record(id).map(|r| &r.state))
            .collect()
    }

    /// States from the root to `node_id`, inclusive. Empty if unknown.
    #[must_use]
    pub fn path_to(&self, node_id: u64) -> Vec<&S> {
        if self.record(node_id).is_none() {
            return Vec::new();
        }
        walk_to_root(node_id, |id| self.record(id).and_then(|r| r.parent_id))
            .into_iter()
            .filter_map(|id| self.record(id).map(|r| &r.state))
            .collect()
    }
}

impl<S: StateIdentity> TreeReportV1<S> {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "depth_counts": self.depth_counts,
            "mode": self.mode.as_str(),
            "records": self.records.iter().map(tree_record_to_json).collect::<Vec<_>>(),
            "schema_version": "tree_report.v1",
            "solution_ids": self.solution_ids,
            "stats": {
                "backtracks": self.stats.backtracks,
                "duplicates_suppressed": self.stats.duplicates_suppressed,
                "frontier_high_water": self.stats.frontier_high_water,
                "invalid_successors_rejected": self.stats.invalid_successors_rejected,
                "truncated_by_depth": self.stats.truncated_by_depth,
            },
            "termination": tree_termination_to_json(self.termination),
            "total_count": self.total_count(),
        })
    }

    /// Canonical JSON bytes of [`Self::to_json_value`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a state's JSON projection contains a
    /// non-integer number.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Domain-separated digest of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::to_canonical_json_bytes`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::TreeReport, &bytes))
    }
}

fn tree_record_to_json<S: StateIdentity>(r: &TreeRecordV1<S>) -> serde_json::Value {
    json!({
        "depth": r.depth,
        "fingerprint": r.state.fingerprint().as_str(),
        "last_sibling": r.last_sibling,
        "node_id": r.node_id,
        "parent_id": r.parent_id,
        "state": r.state.to_json(),
    })
}

fn tree_termination_to_json(t: TreeTerminationV1) -> serde_json::Value {
    match t {
        TreeTerminationV1::Exhausted => json!({"type": "exhausted"}),
        TreeTerminationV1::GoalReached { node_id } => {
            json!({"node_id": node_id, "type": "goal_reached"})
        }
        TreeTerminationV1::SolutionLimitReached { solutions } => {
            json!({"solutions": solutions, "type": "solution_limit_reached"})
        }
    }
}

/// Set `last_sibling` on every record whose parent has no later child.
///
/// Run once after enumeration finishes, when all siblings are known.
pub(crate) fn mark_last_siblings<S>(records: &mut [TreeRecordV1<S>]) {
    let mut seen_parents = std::collections::BTreeSet::new();
    for record in records.iter_mut().rev() {
        record.last_sibling = seen_parents.insert(record.parent_id);
    }
}

/// Build `depth_counts` from a record list.
pub(crate) fn count_depths<S>(records: &[TreeRecordV1<S>]) -> Vec<u64> {
    let mut counts: Vec<u64> = Vec::new();
    for record in records {
        let d = record.depth as usize;
        if counts.len() <= d {
            counts.resize(d + 1, 0);
        }
        counts[d] += 1;
    }
    counts
}

/// Counters accumulated during optimal-cost search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatsV1 {
    /// Nodes finalized and expanded (the goal node is finalized, not expanded).
    pub expansions: u64,
    /// Nodes allocated in the arena, root included.
    pub nodes_generated: u64,
    /// Pops whose state had already been finalized.
    pub stale_pops: u64,
    /// Successors skipped because their state was already finalized.
    pub duplicates_suppressed: u64,
    pub invalid_successors_rejected: u64,
    pub frontier_high_water: u64,
}

/// Why search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    GoalReached { node_id: u64 },
    FrontierExhausted,
}

/// The goal path found by search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionV1 {
    /// Arena IDs from the root to the goal, inclusive.
    pub node_ids: Vec<u64>,
    /// Accumulated `g` of the goal node.
    pub total_cost: i64,
}

/// Result of [`crate::search::search_optimal`].
#[derive(Debug, Clone)]
pub struct SearchOutcomeV1<S> {
    pub order: FrontierOrderV1,
    pub nodes: NodeArena<S>,
    /// Arena IDs in the order their states were finalized.
    pub finalized: Vec<u64>,
    pub solution: Option<SolutionV1>,
    pub stats: SearchStatsV1,
    pub termination: TerminationReasonV1,
}

impl<S> SearchOutcomeV1<S> {
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.termination, TerminationReasonV1::GoalReached { .. })
    }

    /// States along the solution path, root first. Empty without a solution.
    #[must_use]
    pub fn path_states(&self) -> Vec<&S> {
        self.solution
            .as_ref()
            .map(|s| {
                s.node_ids
                    .iter()
                    .filter_map(|&id| self.nodes.get(id).map(|n| &n.state))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn total_cost(&self) -> Option<i64> {
        self.solution.as_ref().map(|s| s.total_cost)
    }
}

impl<S: Clone> SearchOutcomeV1<S> {
    /// Consume the outcome, keeping only the path states and its cost.
    #[must_use]
    pub fn into_path(self) -> Option<(Vec<S>, i64)> {
        let cost = self.total_cost()?;
        let path = self.path_states().into_iter().cloned().collect();
        Some((path, cost))
    }
}

impl<S: StateIdentity> SearchOutcomeV1<S> {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let finalized: Vec<serde_json::Value> = self
            .finalized
            .iter()
            .filter_map(|&id| self.nodes.get(id))
            .map(|n| {
                json!({
                    "depth": n.depth,
                    "f_cost": n.f_cost(),
                    "fingerprint": n.state.fingerprint().as_str(),
                    "g_cost": n.g_cost,
                    "node_id": n.node_id,
                    "parent_id": n.parent_id,
                })
            })
            .collect();

        let solution = self.solution.as_ref().map(|s| {
            json!({
                "node_ids": s.node_ids,
                "path": self.path_states().iter().map(|st| st.to_json()).collect::<Vec<_>>(),
                "total_cost": s.total_cost,
            })
        });

        json!({
            "finalized": finalized,
            "order": self.order.as_str(),
            "schema_version": "search_outcome.v1",
            "solution": solution,
            "stats": {
                "duplicates_suppressed": self.stats.duplicates_suppressed,
                "expansions": self.stats.expansions,
                "frontier_high_water": self.stats.frontier_high_water,
                "invalid_successors_rejected": self.stats.invalid_successors_rejected,
                "nodes_generated": self.stats.nodes_generated,
                "stale_pops": self.stats.stale_pops,
            },
            "termination": search_termination_to_json(self.termination),
        })
    }

    /// Canonical JSON bytes of [`Self::to_json_value`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a state's JSON projection contains a
    /// non-integer number.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Domain-separated digest of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::to_canonical_json_bytes`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchOutcome, &bytes))
    }
}

fn search_termination_to_json(t: TerminationReasonV1) -> serde_json::Value {
    match t {
        TerminationReasonV1::GoalReached { node_id } => {
            json!({"node_id": node_id, "type": "goal_reached"})
        }
        TerminationReasonV1::FrontierExhausted => json!({"type": "frontier_exhausted"}),
    }
}
