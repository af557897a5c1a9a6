//! Backtracking collects every N-queens solution exactly once.

use statespace_harness::contract::WorldHarnessV1;
use statespace_harness::worlds::n_queens::NQueensWorld;
use statespace_search::backtrack::enumerate_backtracking;
use statespace_search::contract::SearchProblemV1;
use statespace_search::enumerate::enumerate_tree;
use statespace_search::policy::{BacktrackPolicyV1, TreePolicyV1};
use statespace_search::report::TreeTerminationV1;

fn solutions(n: u8) -> Vec<Vec<u8>> {
    let world = NQueensWorld::new(n).unwrap();
    let report =
        enumerate_backtracking(&world, &world.root_state(), &BacktrackPolicyV1::default())
            .unwrap();
    assert_eq!(report.termination, TreeTerminationV1::Exhausted);
    report
        .solution_states()
        .into_iter()
        .map(|s| s.columns().to_vec())
        .collect()
}

#[test]
fn known_solution_counts() {
    assert_eq!(solutions(1), vec![vec![0]]);
    assert!(solutions(2).is_empty());
    assert!(solutions(3).is_empty());
    assert_eq!(solutions(4), vec![vec![1, 3, 0, 2], vec![2, 0, 3, 1]]);
    assert_eq!(solutions(6).len(), 4);
    assert_eq!(solutions(8).len(), 92);
}

#[test]
fn every_solution_is_a_valid_full_board() {
    let world = NQueensWorld::new(6).unwrap();
    let report =
        enumerate_backtracking(&world, &world.root_state(), &BacktrackPolicyV1::default())
            .unwrap();
    for state in report.solution_states() {
        assert!(world.is_valid(state));
        assert!(world.is_goal(state));
    }
}

#[test]
fn breadth_first_tree_agrees_with_backtracking() {
    let world = NQueensWorld::new(5).unwrap();
    let tree = enumerate_tree(&world, &world.root_state(), &TreePolicyV1::with_max_depth(5))
        .unwrap();
    let backtrack =
        enumerate_backtracking(&world, &world.root_state(), &BacktrackPolicyV1::default())
            .unwrap();
    assert_eq!(tree.solution_ids.len(), 10);
    assert_eq!(backtrack.solution_ids.len(), 10);
    assert_eq!(tree.total_count(), backtrack.total_count());
}

#[test]
fn first_solution_policy_stops_early() {
    let world = NQueensWorld::new(8).unwrap();
    let report = enumerate_backtracking(
        &world,
        &world.root_state(),
        &BacktrackPolicyV1::first_solution(),
    )
    .unwrap();
    assert_eq!(
        report.termination,
        TreeTerminationV1::SolutionLimitReached { solutions: 1 }
    );
    let first = report.solution_states()[0].columns().to_vec();
    assert_eq!(first, vec![0, 4, 7, 5, 2, 6, 1, 3]);
}
