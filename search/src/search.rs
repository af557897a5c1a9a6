//! Optimal-cost search: best-first by `f = g + h`, or breadth-first.
//!
//! Both orders share one loop, instantiated with a different [`Frontier`].
//! The frontier holds arena node IDs. The visited set holds finalized states
//! only, so several pending entries for one state may coexist; every pop of
//! an already-finalized state is discarded as stale (lazy deletion).

use crate::arena::NodeArena;
use crate::contract::SearchProblemV1;
use crate::error::{check_root, SearchError};
use crate::frontier::{BestFirstFrontier, FifoFrontier, Frontier};
use crate::policy::{FrontierOrderV1, SearchPolicyV1};
use crate::report::{SearchOutcomeV1, SearchStatsV1, SolutionV1, TerminationReasonV1};
use crate::visited::VisitedSet;

/// Search from `root` for a state satisfying `is_goal`.
///
/// Under [`FrontierOrderV1::BestFirst`] the first goal popped has the lowest
/// `g` among all goals when the heuristic is admissible. Under
/// [`FrontierOrderV1::BreadthFirst`] the heuristic is ignored and the first
/// goal popped has the fewest steps.
///
/// A frontier that empties without a goal is reported as
/// [`TerminationReasonV1::FrontierExhausted`] with no solution.
///
/// # Errors
///
/// Returns [`SearchError::InvalidRoot`] if `root` fails `is_valid`.
pub fn search_optimal<P: SearchProblemV1>(
    problem: &P,
    root: &P::State,
    policy: &SearchPolicyV1,
) -> Result<SearchOutcomeV1<P::State>, SearchError> {
    check_root(problem, root)?;
    let outcome = match policy.order {
        FrontierOrderV1::BestFirst => {
            run(problem, root, policy.order, BestFirstFrontier::new(), true)
        }
        FrontierOrderV1::BreadthFirst => {
            run(problem, root, policy.order, FifoFrontier::new(), false)
        }
    };
    Ok(outcome)
}

fn run<P: SearchProblemV1, F: Frontier<u64>>(
    problem: &P,
    root: &P::State,
    order: FrontierOrderV1,
    mut frontier: F,
    use_heuristic: bool,
) -> SearchOutcomeV1<P::State> {
    let estimate = |state: &P::State| {
        if use_heuristic {
            problem.heuristic(state)
        } else {
            0
        }
    };

    let mut nodes = NodeArena::new();
    let mut visited = VisitedSet::new();
    let mut finalized = Vec::new();
    let mut stats = SearchStatsV1::default();
    let mut solution = None;
    let mut termination = TerminationReasonV1::FrontierExhausted;

    let root_id = nodes.alloc(root.clone(), None, 0, 0, estimate(root));
    stats.nodes_generated += 1;
    if let Some(node) = nodes.get(root_id) {
        frontier.push(node.frontier_key(), root_id);
    }

    while let Some(node_id) = frontier.pop() {
        let Some(node) = nodes.get(node_id) else {
            continue;
        };
        if !visited.insert(&node.state) {
            stats.stale_pops += 1;
            continue;
        }
        finalized.push(node_id);

        if problem.is_goal(&node.state) {
            solution = Some(SolutionV1 {
                node_ids: nodes.reconstruct_path(node_id),
                total_cost: node.g_cost,
            });
            termination = TerminationReasonV1::GoalReached { node_id };
            break;
        }
        stats.expansions += 1;

        // Children are costed while the parent is borrowed, then allocated.
        let mut children = Vec::new();
        for child in problem.successors(&node.state) {
            if !problem.is_valid(&child) {
                stats.invalid_successors_rejected += 1;
                continue;
            }
            if visited.contains(&child) {
                stats.duplicates_suppressed += 1;
                continue;
            }
            let g_cost = node
                .g_cost
                .saturating_add(problem.step_cost(&node.state, &child));
            let h_cost = estimate(&child);
            children.push((child, g_cost, h_cost));
        }
        let depth = node.depth.saturating_add(1);

        for (child, g_cost, h_cost) in children {
            let child_id = nodes.alloc(child, Some(node_id), depth, g_cost, h_cost);
            stats.nodes_generated += 1;
            if let Some(child_node) = nodes.get(child_id) {
                frontier.push(child_node.frontier_key(), child_id);
            }
        }
    }

    stats.frontier_high_water = frontier.high_water();

    SearchOutcomeV1 {
        order,
        nodes,
        finalized,
        solution,
        stats,
        termination,
    }
}
