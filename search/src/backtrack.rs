//! Depth-first backtracking enumeration over an explicit stack.
//!
//! Each stack frame owns the remaining successors of one recorded node; the
//! iterator position is the next-move index. Popping an exhausted frame is a
//! backtrack. No recursion, so depth is bounded by memory rather than the
//! call stack.
//!
//! Dedup is against the current path only: a state is suppressed when it is
//! one of its own ancestors (a cycle), never because another branch already
//! reached it. A state reachable along several paths is therefore recorded
//! once per path, and every solution below it is found each time.

use crate::contract::SearchProblemV1;
use crate::error::{check_root, SearchError};
use crate::policy::BacktrackPolicyV1;
use crate::report::{
    count_depths, mark_last_siblings, TreeModeV1, TreeRecordV1, TreeReportV1, TreeStatsV1,
    TreeTerminationV1,
};
use crate::visited::VisitedSet;

struct Frame<S> {
    record_id: u64,
    depth: u32,
    remaining: std::vec::IntoIter<S>,
}

/// What happened to a newly recorded node.
enum Visit {
    Expand,
    Leaf,
    Stop,
}

struct Walk<'p, P: SearchProblemV1> {
    problem: &'p P,
    policy: &'p BacktrackPolicyV1,
    /// States of the frames currently on the stack.
    on_path: VisitedSet,
    records: Vec<TreeRecordV1<P::State>>,
    solution_ids: Vec<u64>,
    stats: TreeStatsV1,
}

impl<P: SearchProblemV1> Walk<'_, P> {
    /// Record `state`, classify it, and return its successors if it should
    /// be expanded.
    fn visit(
        &mut self,
        state: P::State,
        parent_id: Option<u64>,
        depth: u32,
    ) -> (u64, Visit, Vec<P::State>) {
        let node_id = self.records.len() as u64;
        let is_goal = self.problem.is_goal(&state);
        let successors = if is_goal {
            Vec::new()
        } else {
            self.problem.successors(&state)
        };
        self.records.push(TreeRecordV1 {
            node_id,
            parent_id,
            depth,
            state,
            last_sibling: false,
        });

        if is_goal {
            self.solution_ids.push(node_id);
            let found = self.solution_ids.len() as u64;
            if self.policy.max_solutions.is_some_and(|cap| found >= cap) {
                return (node_id, Visit::Stop, Vec::new());
            }
            return (node_id, Visit::Leaf, Vec::new());
        }
        if depth >= self.policy.max_depth {
            self.stats.truncated_by_depth += successors.len() as u64;
            return (node_id, Visit::Leaf, Vec::new());
        }
        (node_id, Visit::Expand, successors)
    }

    /// A frame for `record_id` was pushed.
    fn enter(&mut self, record_id: u64) {
        if let Some(record) = record_at(&self.records, record_id) {
            self.on_path.insert(&record.state);
        }
    }

    /// The frame for `record_id` was popped.
    fn leave(&mut self, record_id: u64) {
        if let Some(record) = record_at(&self.records, record_id) {
            self.on_path.remove(&record.state);
        }
    }
}

fn record_at<S>(records: &[TreeRecordV1<S>], record_id: u64) -> Option<&TreeRecordV1<S>> {
    usize::try_from(record_id).ok().and_then(|i| records.get(i))
}

/// Enumerate depth-first with backtracking, collecting goal states.
///
/// Every visited state is recorded in preorder. A goal is recorded as a
/// solution and not expanded. Nodes at `policy.max_depth` are recorded but
/// not expanded. A successor already on the path from the root is counted
/// in `duplicates_suppressed` and skipped. Enumeration stops early once
/// `policy.max_solutions` solutions are collected; otherwise every
/// root-to-goal path without a repeated state is reported.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if the policy fails validation, or
/// [`SearchError::InvalidRoot`] if `root` fails `is_valid`.
pub fn enumerate_backtracking<P: SearchProblemV1>(
    problem: &P,
    root: &P::State,
    policy: &BacktrackPolicyV1,
) -> Result<TreeReportV1<P::State>, SearchError> {
    policy.validate()?;
    check_root(problem, root)?;

    let mut walk = Walk {
        problem,
        policy,
        on_path: VisitedSet::new(),
        records: Vec::new(),
        solution_ids: Vec::new(),
        stats: TreeStatsV1::default(),
    };
    let mut stack: Vec<Frame<P::State>> = Vec::new();
    let mut termination = TreeTerminationV1::Exhausted;

    let (root_id, visit, successors) = walk.visit(root.clone(), None, 0);
    match visit {
        Visit::Stop => {
            termination = TreeTerminationV1::SolutionLimitReached { solutions: 1 };
        }
        Visit::Leaf => {}
        Visit::Expand => {
            walk.enter(root_id);
            stack.push(Frame {
                record_id: root_id,
                depth: 0,
                remaining: successors.into_iter(),
            });
        }
    }
    let mut high_water = stack.len() as u64;

    while let Some(frame) = stack.last_mut() {
        let Some(child) = frame.remaining.next() else {
            let record_id = frame.record_id;
            stack.pop();
            walk.leave(record_id);
            walk.stats.backtracks += 1;
            continue;
        };
        let parent_id = frame.record_id;
        let depth = frame.depth + 1;

        if !problem.is_valid(&child) {
            walk.stats.invalid_successors_rejected += 1;
            continue;
        }
        if walk.on_path.contains(&child) {
            walk.stats.duplicates_suppressed += 1;
            continue;
        }

        let (node_id, visit, successors) = walk.visit(child, Some(parent_id), depth);
        match visit {
            Visit::Stop => {
                termination = TreeTerminationV1::SolutionLimitReached {
                    solutions: walk.solution_ids.len() as u64,
                };
                break;
            }
            Visit::Leaf => {}
            Visit::Expand => {
                walk.enter(node_id);
                stack.push(Frame {
                    record_id: node_id,
                    depth,
                    remaining: successors.into_iter(),
                });
                high_water = high_water.max(stack.len() as u64);
            }
        }
    }

    let Walk {
        mut records,
        solution_ids,
        mut stats,
        ..
    } = walk;
    stats.frontier_high_water = high_water;
    mark_last_siblings(&mut records);
    let depth_counts = count_depths(&records);

    Ok(TreeReportV1 {
        mode: TreeModeV1::Backtracking,
        records,
        depth_counts,
        solution_ids,
        stats,
        termination,
    })
}
