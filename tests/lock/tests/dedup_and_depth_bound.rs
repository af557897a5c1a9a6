//! No identity is finalized twice in a run (backtracking: twice on one
//! path), and no record lies deeper than the depth bound.

use std::collections::BTreeSet;

use statespace_harness::contract::WorldHarnessV1;
use statespace_harness::worlds::graph_coloring::GraphColoringWorld;
use statespace_harness::worlds::missionaries::MissionariesWorld;
use statespace_harness::worlds::n_puzzle::{NPuzzleWorld, PuzzleStateV1};
use statespace_harness::worlds::n_queens::NQueensWorld;
use statespace_harness::worlds::water_jug::WaterJugWorld;
use statespace_harness::worlds::weighted_graph::{GraphHeuristicV1, WeightedGraphWorld};
use statespace_kernel::carrier::state::StateIdentity;
use statespace_search::backtrack::enumerate_backtracking;
use statespace_search::enumerate::enumerate_tree;
use statespace_search::policy::{BacktrackPolicyV1, SearchPolicyV1, TreePolicyV1};
use statespace_search::report::TreeReportV1;
use statespace_search::search::search_optimal;

fn assert_tree_invariants<S: StateIdentity>(report: &TreeReportV1<S>, max_depth: u32) {
    let mut seen = BTreeSet::new();
    for record in &report.records {
        assert!(
            seen.insert(record.state.identity_bytes()),
            "record {} repeats an identity",
            record.node_id
        );
        assert!(record.depth <= max_depth, "record {} too deep", record.node_id);
    }
    assert_eq!(report.depth_counts.iter().sum::<u64>(), report.total_count());
    assert!(report.depth_counts.len() <= max_depth as usize + 1);
}

fn check_tree<W: WorldHarnessV1>(world: &W, max_depth: u32) -> TreeReportV1<W::State> {
    let report =
        enumerate_tree(world, &world.root_state(), &TreePolicyV1::with_max_depth(max_depth))
            .unwrap();
    assert_tree_invariants(&report, max_depth);
    report
}

#[test]
fn every_world_respects_dedup_and_depth() {
    for depth in 0..=5 {
        check_tree(
            &NPuzzleWorld::with_standard_goal(PuzzleStateV1::solved(3).unwrap()).unwrap(),
            depth,
        );
        check_tree(&WaterJugWorld::new(4, 3, 2).unwrap(), depth);
        check_tree(&MissionariesWorld::new(3, 3, 2).unwrap(), depth);
        check_tree(&NQueensWorld::new(5).unwrap(), depth);
        check_tree(
            &WeightedGraphWorld::new(&[(0, 1, 1), (1, 2, 1), (2, 0, 1), (2, 3, 1)], 0, 3).unwrap(),
            depth,
        );
        check_tree(
            &GraphColoringWorld::new(&[(0, 1), (1, 2), (2, 0)], 3).unwrap(),
            depth,
        );
    }
}

#[test]
fn water_jug_revisits_are_suppressed() {
    // Four of the six moves from each of (0, 0), (4, 0) and (0, 3) lead
    // back to an already-visited state.
    let world = WaterJugWorld::new(4, 3, 2).unwrap();
    let report = check_tree(&world, 1);
    assert_eq!(report.total_count(), 3);
    assert_eq!(report.stats.duplicates_suppressed, 12);
    assert_eq!(report.stats.truncated_by_depth, 4);
}

#[test]
fn depth_zero_is_root_only() {
    let world = MissionariesWorld::new(3, 3, 2).unwrap();
    let report = check_tree(&world, 0);
    assert_eq!(report.total_count(), 1);
    assert_eq!(report.stats.truncated_by_depth, 3);
}

#[test]
fn backtracking_respects_depth_bound() {
    let world = NQueensWorld::new(6).unwrap();
    let policy = BacktrackPolicyV1 {
        max_depth: 3,
        max_solutions: None,
    };
    let report = enumerate_backtracking(&world, &world.root_state(), &policy).unwrap();
    assert_tree_invariants(&report, 3);
    assert!(report.solution_ids.is_empty());
    assert!(report.stats.truncated_by_depth > 0);
}

#[test]
fn backtracking_paths_never_repeat_a_state() {
    let world = WaterJugWorld::new(4, 3, 2).unwrap();
    let policy = BacktrackPolicyV1 {
        max_depth: 6,
        max_solutions: None,
    };
    let report = enumerate_backtracking(&world, &world.root_state(), &policy).unwrap();
    assert!(report.stats.duplicates_suppressed > 0);
    for record in &report.records {
        assert!(record.depth <= 6);
        let path = report.path_to(record.node_id);
        let unique: BTreeSet<Vec<u8>> = path.iter().map(|s| s.identity_bytes()).collect();
        assert_eq!(unique.len(), path.len(), "record {} revisits a state", record.node_id);
    }
    // (4, 0) and (0, 3) both lead on to (4, 3); it is recorded under each.
    let full = report.records.iter().filter(|r| (r.state.a, r.state.b) == (4, 3)).count();
    assert!(full >= 2);
}

#[test]
fn search_finalizes_each_state_once() {
    let world = WeightedGraphWorld::new(
        &[(0, 1, 5), (0, 2, 1), (2, 1, 1), (1, 3, 1), (2, 3, 9), (3, 4, 1)],
        0,
        99,
    )
    .unwrap()
    .with_heuristic(GraphHeuristicV1::Zero);
    let outcome = search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
    let finalized: Vec<u32> = outcome
        .finalized
        .iter()
        .map(|&id| outcome.nodes.get(id).unwrap().state)
        .collect();
    let unique: BTreeSet<u32> = finalized.iter().copied().collect();
    assert_eq!(unique.len(), finalized.len());
    // 99 is an isolated node: every connected node is finalized once.
    assert_eq!(unique, BTreeSet::from([0, 1, 2, 3, 4]));
    assert!(outcome.stats.stale_pops > 0);
}
