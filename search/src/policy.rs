//! Search policy types.
//!
//! Policies are plain typed configuration with defaults. Each has a JSON
//! projection so the harness can echo it into report bundles.

use serde_json::json;

use crate::error::SearchError;

/// Exploration order for [`crate::search::search_optimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierOrderV1 {
    /// Priority by `f = g + h`, ties in insertion order.
    #[default]
    BestFirst,
    /// FIFO, heuristic ignored. Shortest step count when every move costs 1.
    BreadthFirst,
}

impl FrontierOrderV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BestFirst => "best_first",
            Self::BreadthFirst => "breadth_first",
        }
    }
}

/// Configuration for goal-directed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchPolicyV1 {
    pub order: FrontierOrderV1,
}

impl SearchPolicyV1 {
    #[must_use]
    pub fn breadth_first() -> Self {
        Self {
            order: FrontierOrderV1::BreadthFirst,
        }
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "kind": "search",
            "order": self.order.as_str(),
        })
    }
}

/// Configuration for breadth-first tree enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreePolicyV1 {
    /// Nodes deeper than this are discarded without expansion.
    pub max_depth: u32,
    /// Stop right after recording the first state that satisfies the goal.
    pub stop_at_goal: bool,
}

impl Default for TreePolicyV1 {
    fn default() -> Self {
        Self {
            max_depth: 3,
            stop_at_goal: false,
        }
    }
}

impl TreePolicyV1 {
    #[must_use]
    pub fn with_max_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "kind": "tree",
            "max_depth": self.max_depth,
            "stop_at_goal": self.stop_at_goal,
        })
    }
}

/// Configuration for explicit-stack backtracking enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacktrackPolicyV1 {
    /// Nodes at this depth are recorded but not expanded.
    pub max_depth: u32,
    /// Stop after this many solutions. `None` collects all of them.
    pub max_solutions: Option<u64>,
}

impl Default for BacktrackPolicyV1 {
    fn default() -> Self {
        Self {
            max_depth: u32::MAX,
            max_solutions: None,
        }
    }
}

impl BacktrackPolicyV1 {
    /// Stop at the first solution.
    #[must_use]
    pub fn first_solution() -> Self {
        Self {
            max_solutions: Some(1),
            ..Self::default()
        }
    }

    /// Reject policies that could never produce a solution.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_solutions` is `Some(0)`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_solutions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_solutions must be at least 1 when set".into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "kind": "backtrack",
            "max_depth": self.max_depth,
            "max_solutions": self.max_solutions,
        })
    }
}
