//! Best-first search on the (4, 3) jugs with target 2 returns a path as
//! short as breadth-first search does.

use statespace_harness::contract::WorldHarnessV1;
use statespace_harness::worlds::water_jug::{JugStateV1, WaterJugWorld};
use statespace_search::policy::SearchPolicyV1;
use statespace_search::report::TerminationReasonV1;
use statespace_search::search::search_optimal;

fn jugs(pairs: &[(u32, u32)]) -> Vec<JugStateV1> {
    pairs.iter().map(|&(a, b)| JugStateV1 { a, b }).collect()
}

const SHORTEST: &[(u32, u32)] = &[(0, 0), (0, 3), (3, 0), (3, 3), (4, 2)];

#[test]
fn breadth_first_finds_four_move_path() {
    let world = WaterJugWorld::new(4, 3, 2).unwrap();
    let outcome =
        search_optimal(&world, &world.root_state(), &SearchPolicyV1::breadth_first()).unwrap();
    let (path, cost) = outcome.into_path().unwrap();
    assert_eq!(cost, 4);
    assert_eq!(path, jugs(SHORTEST));
}

#[test]
fn best_first_cost_matches_breadth_first() {
    let world = WaterJugWorld::new(4, 3, 2).unwrap();
    let bfs =
        search_optimal(&world, &world.root_state(), &SearchPolicyV1::breadth_first()).unwrap();
    let astar = search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
    assert_eq!(astar.total_cost(), bfs.total_cost());
    // The four-move path is the only one, so both orders return it.
    let (path, _) = astar.into_path().unwrap();
    assert_eq!(path, jugs(SHORTEST));
}

#[test]
fn goal_node_is_last_finalized() {
    let world = WaterJugWorld::new(4, 3, 2).unwrap();
    let outcome = search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
    let TerminationReasonV1::GoalReached { node_id } = outcome.termination else {
        panic!("expected goal, got {:?}", outcome.termination);
    };
    assert_eq!(outcome.finalized.last(), Some(&node_id));
    let goal = &outcome.nodes.get(node_id).unwrap().state;
    assert!(goal.a == 2 || goal.b == 2);
}

#[test]
fn unreachable_target_exhausts_frontier() {
    // gcd(4, 2) = 2: odd amounts are never measurable.
    let world = WaterJugWorld::new(4, 2, 1).unwrap();
    let outcome = search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
    assert_eq!(outcome.termination, TerminationReasonV1::FrontierExhausted);
    assert!(outcome.into_path().is_none());
}
