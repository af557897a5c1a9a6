//! Statespace Harness: problem worlds and run packaging.
//!
//! The harness instantiates the search crate's drivers with concrete
//! problems (N-puzzle, water-jug, missionaries and cannibals, N-queens,
//! weighted graph, graph coloring) and packages each run as a
//! self-contained, hash-bound artifact bundle.
//!
//! The harness does NOT implement search logic; it delegates to
//! `statespace_search`. Worlds provide domain rules only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bundle;
pub mod bundle_dir;
pub mod contract;
pub mod render;
pub mod runner;
pub mod worlds;
