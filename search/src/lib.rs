//! Statespace Search: deterministic tree enumeration and optimal-cost search.
//!
//! This crate is the problem-agnostic engine. It depends only on
//! `statespace_kernel`; it does NOT depend on `statespace_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! statespace_kernel  ←  statespace_search  ←  statespace_harness
//! (identity, canon)     (drivers, reports)    (worlds, bundles, runner)
//! ```
//!
//! # Drivers
//!
//! - [`enumerate::enumerate_tree`] -- breadth-first, depth-bounded, each
//!   identity visited once
//! - [`backtrack::enumerate_backtracking`] -- explicit-stack depth-first,
//!   collects every goal path, dedup against the current path only
//! - [`search::search_optimal`] -- best-first by `f = g + h` or breadth-first,
//!   lazy deletion of stale frontier entries
//!
//! All three are generic over [`contract::SearchProblemV1`] and return a
//! report whose canonical JSON is identical across runs.

#![forbid(unsafe_code)]

pub mod arena;
pub mod backtrack;
pub mod contract;
pub mod enumerate;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod report;
pub mod search;
pub mod visited;
