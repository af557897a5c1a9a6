//! Breadth-first tree enumeration.
//!
//! Visits every state reachable from the root within `max_depth`, each
//! identity at most once, and records them in visitation order. The
//! frontier holds pending entries (state, depth, parent) rather than arena
//! nodes, since enumeration keeps a record for every finalized state anyway.

use crate::contract::SearchProblemV1;
use crate::error::{check_root, SearchError};
use crate::frontier::{FifoFrontier, Frontier};
use crate::node::FrontierKey;
use crate::policy::TreePolicyV1;
use crate::report::{
    count_depths, mark_last_siblings, TreeModeV1, TreeRecordV1, TreeReportV1, TreeStatsV1,
    TreeTerminationV1,
};
use crate::visited::VisitedSet;

struct Pending<S> {
    state: S,
    depth: u32,
    parent_id: Option<u64>,
}

/// Enumerate the state tree breadth-first.
///
/// Per pop: a state whose identity is already visited is skipped; otherwise
/// it is finalized and recorded, then expanded. Successors that fail
/// `is_valid`, are already visited, or would land deeper than
/// `policy.max_depth` are counted and dropped.
///
/// # Errors
///
/// Returns [`SearchError::InvalidRoot`] if `root` fails `is_valid`.
pub fn enumerate_tree<P: SearchProblemV1>(
    problem: &P,
    root: &P::State,
    policy: &TreePolicyV1,
) -> Result<TreeReportV1<P::State>, SearchError> {
    check_root(problem, root)?;

    let mut visited = VisitedSet::new();
    let mut frontier: FifoFrontier<Pending<P::State>> = FifoFrontier::new();
    let mut records: Vec<TreeRecordV1<P::State>> = Vec::new();
    let mut solution_ids = Vec::new();
    let mut stats = TreeStatsV1::default();
    let mut termination = TreeTerminationV1::Exhausted;
    let mut pushed: u64 = 0;

    frontier.push(
        FrontierKey {
            f_cost: 0,
            insertion_order: pushed,
        },
        Pending {
            state: root.clone(),
            depth: 0,
            parent_id: None,
        },
    );
    pushed += 1;

    while let Some(entry) = frontier.pop() {
        if !visited.insert(&entry.state) {
            stats.duplicates_suppressed += 1;
            continue;
        }

        let node_id = records.len() as u64;
        let is_goal = problem.is_goal(&entry.state);
        if is_goal {
            solution_ids.push(node_id);
            if policy.stop_at_goal {
                records.push(TreeRecordV1 {
                    node_id,
                    parent_id: entry.parent_id,
                    depth: entry.depth,
                    state: entry.state,
                    last_sibling: false,
                });
                termination = TreeTerminationV1::GoalReached { node_id };
                break;
            }
        }

        for child in problem.successors(&entry.state) {
            if !problem.is_valid(&child) {
                stats.invalid_successors_rejected += 1;
                continue;
            }
            if visited.contains(&child) {
                stats.duplicates_suppressed += 1;
                continue;
            }
            if entry.depth >= policy.max_depth {
                stats.truncated_by_depth += 1;
                continue;
            }
            frontier.push(
                FrontierKey {
                    f_cost: 0,
                    insertion_order: pushed,
                },
                Pending {
                    state: child,
                    depth: entry.depth + 1,
                    parent_id: Some(node_id),
                },
            );
            pushed += 1;
        }

        records.push(TreeRecordV1 {
            node_id,
            parent_id: entry.parent_id,
            depth: entry.depth,
            state: entry.state,
            last_sibling: false,
        });
    }

    stats.frontier_high_water = frontier.high_water();
    mark_last_siblings(&mut records);
    let depth_counts = count_depths(&records);

    Ok(TreeReportV1 {
        mode: TreeModeV1::BreadthFirst,
        records,
        depth_counts,
        solution_ids,
        stats,
        termination,
    })
}
