//! World implementations for the harness runner.

pub mod graph_coloring;
pub mod missionaries;
pub mod n_puzzle;
pub mod n_queens;
pub mod water_jug;
pub mod weighted_graph;
