//! Graph m-coloring of a five-vertex graph (two triangles sharing an edge,
//! plus a pendant vertex) by backtracking.

use statespace_harness::contract::WorldHarnessV1;
use statespace_harness::worlds::graph_coloring::{ColoringStateV1, GraphColoringWorld};
use statespace_search::backtrack::enumerate_backtracking;
use statespace_search::policy::BacktrackPolicyV1;
use statespace_search::report::TreeTerminationV1;

const FIVE_VERTEX: &[(u32, u32)] = &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3), (3, 4)];

fn is_proper(world: &GraphColoringWorld, state: &ColoringStateV1) -> bool {
    let colors: std::collections::BTreeMap<u32, u8> =
        world.assignment(state).into_iter().collect();
    colors.len() == world.vertices().len()
        && FIVE_VERTEX.iter().all(|(u, v)| colors[u] != colors[v])
}

#[test]
fn three_colors_suffice() {
    let world = GraphColoringWorld::new(FIVE_VERTEX, 3).unwrap();
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
    let solution = report.solution_states()[0];
    assert!(is_proper(&world, solution));
    assert_eq!(solution.colors(), &[1, 2, 3, 1, 2]);
}

#[test]
fn two_colors_do_not() {
    let world = GraphColoringWorld::new(FIVE_VERTEX, 2).unwrap();
    let report = enumerate_backtracking(
        &world,
        &world.root_state(),
        &BacktrackPolicyV1::first_solution(),
    )
    .unwrap();
    assert_eq!(report.termination, TreeTerminationV1::Exhausted);
    assert!(report.solution_ids.is_empty());
    assert!(report.stats.backtracks > 0);
}

#[test]
fn all_three_colorings_enumerated() {
    // Triangle 0-1-2 in any of 3! orders, vertex 3 forced to vertex 0's
    // color, vertex 4 free among the other two.
    let world = GraphColoringWorld::new(FIVE_VERTEX, 3).unwrap();
    let report =
        enumerate_backtracking(&world, &world.root_state(), &BacktrackPolicyV1::default())
            .unwrap();
    let solutions = report.solution_states();
    assert_eq!(solutions.len(), 12);
    assert!(solutions.iter().all(|s| is_proper(&world, s)));
}

#[test]
fn isolated_vertex_multiplies_colorings() {
    let world = GraphColoringWorld::with_vertices(&[5], FIVE_VERTEX, 3).unwrap();
    assert_eq!(world.vertices(), &[0, 1, 2, 3, 4, 5]);
    let report =
        enumerate_backtracking(&world, &world.root_state(), &BacktrackPolicyV1::default())
            .unwrap();
    let solutions = report.solution_states();
    assert_eq!(solutions.len(), 36);
    assert!(solutions.iter().all(|s| is_proper(&world, s)));
}
