//! Shared workloads for the statespace benchmark suites.
//!
//! Every builder is deterministic: the same arguments always produce the
//! same world, so timings are comparable across runs.

use statespace_harness::contract::WorldHarnessV1;
use statespace_harness::worlds::n_puzzle::{NPuzzleWorld, PuzzleStateV1};
use statespace_harness::worlds::weighted_graph::{GraphHeuristicV1, WeightedGraphWorld};
use statespace_search::contract::SearchProblemV1;

/// A solvable `width`×`width` puzzle, `moves` blank moves away from solved.
///
/// The walk takes successor `(step * 7 + 3) % len` at each step and never
/// steps straight back, so it is reproducible without an RNG.
///
/// # Panics
///
/// Panics if `width` is outside the puzzle's supported range. Benchmark
/// setup failures are fatal.
#[must_use]
pub fn scrambled_puzzle(width: u8, moves: usize) -> NPuzzleWorld {
    let solved = PuzzleStateV1::solved(width).expect("supported width");
    let solved_world = NPuzzleWorld::new(solved.clone(), solved.clone()).expect("solved is solvable");

    let mut previous: Option<PuzzleStateV1> = None;
    let mut current = solved;
    for step in 0..moves {
        let options: Vec<PuzzleStateV1> = solved_world
            .successors(&current)
            .into_iter()
            .filter(|s| previous.as_ref() != Some(s))
            .collect();
        let next = options[(step * 7 + 3) % options.len()].clone();
        previous = Some(std::mem::replace(&mut current, next));
    }
    NPuzzleWorld::with_standard_goal(current).expect("scramble preserves solvability")
}

/// A ring of `nodes` unit-weight edges plus every-fifth-node chords of
/// weight 3, searched from node 0 to the node opposite it.
///
/// # Panics
///
/// Panics if `nodes < 2`.
#[must_use]
pub fn ring_with_chords(nodes: u32, heuristic: GraphHeuristicV1) -> WeightedGraphWorld {
    assert!(nodes >= 2, "ring needs at least two nodes");
    let mut edges: Vec<(u32, u32, i64)> = (0..nodes).map(|i| (i, (i + 1) % nodes, 1)).collect();
    edges.extend(
        (0..nodes)
            .step_by(5)
            .map(|i| (i, (i + nodes / 3) % nodes, 3)),
    );
    WeightedGraphWorld::new(&edges, 0, nodes / 2)
        .expect("non-negative weights")
        .with_heuristic(heuristic)
}

/// Number of states a world's tree enumeration would start from; a cheap
/// sanity value benches print so a misconfigured workload is visible.
#[must_use]
pub fn root_branching<W: WorldHarnessV1>(world: &W) -> usize {
    world.successors(&world.root_state()).len()
}
