//! Weighted graph search: cost-optimal paths with a zero heuristic, and
//! frontier exhaustion (not an error) when the goal is disconnected.

use statespace_harness::contract::WorldHarnessV1;
use statespace_harness::render::render_path_text;
use statespace_harness::worlds::weighted_graph::{
    GraphHeuristicV1, SparseGraphConfigV1, WeightedGraphWorld,
};
use statespace_search::policy::SearchPolicyV1;
use statespace_search::report::TerminationReasonV1;
use statespace_search::search::search_optimal;

const TWO_ISLANDS: &[(u32, u32, i64)] = &[(0, 1, 2), (1, 2, 2), (0, 2, 5), (5, 6, 1), (6, 7, 1)];

#[test]
fn disconnected_goal_exhausts_frontier() {
    let world = WeightedGraphWorld::new(TWO_ISLANDS, 0, 7).unwrap();
    let outcome = search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
    assert_eq!(outcome.termination, TerminationReasonV1::FrontierExhausted);
    assert!(outcome.solution.is_none());
    assert_eq!(outcome.total_cost(), None);
    // Only the start's island is explored.
    assert_eq!(outcome.finalized.len(), 3);
    assert!(outcome.into_path().is_none());
}

#[test]
fn breadth_first_also_exhausts() {
    let world = WeightedGraphWorld::new(TWO_ISLANDS, 5, 0).unwrap();
    let outcome =
        search_optimal(&world, &world.root_state(), &SearchPolicyV1::breadth_first()).unwrap();
    assert!(!outcome.is_goal_reached());
    assert_eq!(outcome.finalized.len(), 3);
}

#[test]
fn isolated_start_finalizes_only_itself() {
    let world = WeightedGraphWorld::new(TWO_ISLANDS, 42, 0).unwrap();
    let outcome = search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
    assert_eq!(outcome.finalized, vec![0]);
    assert_eq!(outcome.stats.expansions, 1);
}

#[test]
fn zero_heuristic_returns_cheapest_path() {
    let world = WeightedGraphWorld::new(TWO_ISLANDS, 0, 2)
        .unwrap()
        .with_heuristic(GraphHeuristicV1::Zero);
    let outcome = search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
    let (path, cost) = outcome.into_path().unwrap();
    assert_eq!(path, vec![0, 1, 2]);
    assert_eq!(cost, 4);
}

#[test]
fn breadth_first_minimizes_edges_not_weight() {
    let world = WeightedGraphWorld::new(TWO_ISLANDS, 0, 2).unwrap();
    let outcome =
        search_optimal(&world, &world.root_state(), &SearchPolicyV1::breadth_first()).unwrap();
    let (path, cost) = outcome.into_path().unwrap();
    assert_eq!(path, vec![0, 2]);
    assert_eq!(cost, 5);
    assert_eq!(
        render_path_text(&path, cost),
        "Solution Path\n========================================\nStep 0: 0\nStep 1: 2\nTotal cost: 5\n"
    );
}

#[test]
fn generated_graphs_always_reach_the_goal() {
    for seed in 0..8 {
        let world = WeightedGraphWorld::random_sparse(&SparseGraphConfigV1::default(), seed)
            .unwrap()
            .with_heuristic(GraphHeuristicV1::Zero);
        let cheapest =
            search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
        let fewest = search_optimal(&world, &world.root_state(), &SearchPolicyV1::breadth_first())
            .unwrap();
        let (Some(cost), Some(bfs_cost)) = (cheapest.total_cost(), fewest.total_cost()) else {
            panic!("seed {seed}: goal {} not reached", world.goal());
        };
        assert!(cost <= bfs_cost, "seed {seed}: {cost} > {bfs_cost}");
    }
}
