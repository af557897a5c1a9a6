//! Missionaries and cannibals: no unsafe bank is ever generated, and the
//! classic 3/3 crossing with a two-seat boat takes eleven trips.

use statespace_harness::contract::WorldHarnessV1;
use statespace_harness::render::render_path_text;
use statespace_harness::worlds::missionaries::MissionariesWorld;
use statespace_search::enumerate::enumerate_tree;
use statespace_search::policy::{SearchPolicyV1, TreePolicyV1};
use statespace_search::search::search_optimal;

#[test]
fn every_reachable_state_is_safe() {
    let world = MissionariesWorld::new(3, 3, 2).unwrap();
    let report = enumerate_tree(&world, &world.root_state(), &TreePolicyV1::with_max_depth(20))
        .unwrap();
    assert!(report.records.iter().all(|r| r.state.is_safe()));
    assert_eq!(report.stats.invalid_successors_rejected, 0);
    assert_eq!(report.solution_ids.len(), 1);
}

#[test]
fn classic_crossing_takes_eleven_trips() {
    let world = MissionariesWorld::new(3, 3, 2).unwrap();
    for policy in [SearchPolicyV1::default(), SearchPolicyV1::breadth_first()] {
        let outcome = search_optimal(&world, &world.root_state(), &policy).unwrap();
        let (path, cost) = outcome.into_path().unwrap();
        assert_eq!(cost, 11);
        assert_eq!(path.len(), 12);
        assert_eq!(path.first(), Some(&world.root_state()));
        assert_eq!(path.last(), Some(&world.goal()));
        for pair in path.windows(2) {
            assert!(pair[1].is_safe());
            assert_ne!(pair[0].boat_left, pair[1].boat_left);
        }
    }
}

#[test]
fn stop_at_goal_ends_tree_on_goal_record() {
    let world = MissionariesWorld::new(3, 3, 2).unwrap();
    let policy = TreePolicyV1 {
        max_depth: 20,
        stop_at_goal: true,
    };
    let report = enumerate_tree(&world, &world.root_state(), &policy).unwrap();
    let last = report.records.last().unwrap();
    assert_eq!(last.state, world.goal());
    assert_eq!(last.depth, 11);
    assert_eq!(report.path_to(last.node_id).len(), 12);
}

#[test]
fn four_four_with_two_seats_is_impossible() {
    let world = MissionariesWorld::new(4, 4, 2).unwrap();
    let outcome = search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
    assert!(!outcome.is_goal_reached());
}

#[test]
fn path_renders_river_states() {
    let world = MissionariesWorld::new(3, 3, 2).unwrap();
    let outcome =
        search_optimal(&world, &world.root_state(), &SearchPolicyV1::breadth_first()).unwrap();
    let (path, cost) = outcome.into_path().unwrap();
    let text = render_path_text(&path, cost);
    assert!(text.contains("Step 0: [M:3 C:3] B~~~ [M:0 C:0]\n"));
    assert!(text.contains("Step 11: [M:0 C:0]  ~~~ [M:3 C:3]\n"));
    assert!(text.ends_with("Total cost: 11\n"));
}
