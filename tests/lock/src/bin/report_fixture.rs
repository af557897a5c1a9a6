//! Binary that runs a fixed set of worlds through the harness and prints
//! deterministic output lines for cross-process verification.
//!
//! Used by the cross-process determinism test to verify that report and
//! bundle production are identical across process environments.
//!
//! Usage: `report_fixture`
//! Output: one `key=value` line per fact, in a fixed order.

use statespace_harness::bundle::ArtifactBundleV1;
use statespace_harness::runner::{run_backtrack, run_search, run_tree};
use statespace_harness::worlds::graph_coloring::GraphColoringWorld;
use statespace_harness::worlds::missionaries::MissionariesWorld;
use statespace_harness::worlds::n_puzzle::{NPuzzleWorld, PuzzleStateV1};
use statespace_harness::worlds::n_queens::NQueensWorld;
use statespace_harness::worlds::water_jug::WaterJugWorld;
use statespace_harness::worlds::weighted_graph::WeightedGraphWorld;
use statespace_search::policy::{BacktrackPolicyV1, SearchPolicyV1, TreePolicyV1};

fn print_bundle(label: &str, bundle: &ArtifactBundleV1) {
    let report: serde_json::Value = bundle
        .artifact_json("verification_report.json")
        .expect("missing verification_report.json");
    println!("{label}_bundle_digest={}", bundle.digest.as_str());
    println!(
        "{label}_report_digest={}",
        report["report_digest"].as_str().expect("missing report_digest")
    );
    println!("{label}_summary={}", report["summary"]);
    println!("{label}_artifact_count={}", bundle.artifacts.len());
}

fn main() {
    let puzzle = NPuzzleWorld::with_standard_goal(
        PuzzleStateV1::new(3, vec![1, 2, 3, 4, 0, 6, 7, 5, 8]).expect("valid board"),
    )
    .expect("solvable board");
    let bundle = run_tree(&puzzle, &TreePolicyV1::default()).expect("n_puzzle tree run");
    print_bundle("n_puzzle_tree", &bundle);
    let bundle = run_search(&puzzle, &SearchPolicyV1::default()).expect("n_puzzle search run");
    print_bundle("n_puzzle_search", &bundle);

    let jugs = WaterJugWorld::new(4, 3, 2).expect("valid jugs");
    let bundle = run_search(&jugs, &SearchPolicyV1::default()).expect("water_jug search run");
    print_bundle("water_jug_search", &bundle);

    let river = MissionariesWorld::new(3, 3, 2).expect("valid river");
    let bundle =
        run_search(&river, &SearchPolicyV1::breadth_first()).expect("missionaries search run");
    print_bundle("missionaries_search", &bundle);

    let queens = NQueensWorld::new(6).expect("valid board size");
    let bundle =
        run_backtrack(&queens, &BacktrackPolicyV1::default()).expect("n_queens backtrack run");
    print_bundle("n_queens_backtrack", &bundle);

    let graph = WeightedGraphWorld::new(&[(0, 1, 4), (0, 2, 1), (2, 1, 2), (1, 3, 5)], 0, 3)
        .expect("valid graph");
    let bundle = run_search(&graph, &SearchPolicyV1::default()).expect("weighted_graph run");
    print_bundle("weighted_graph_search", &bundle);

    let coloring = GraphColoringWorld::new(&[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3), (3, 4)], 3)
        .expect("valid coloring graph");
    let bundle = run_backtrack(&coloring, &BacktrackPolicyV1::first_solution())
        .expect("graph_coloring run");
    print_bundle("graph_coloring_backtrack", &bundle);
}
