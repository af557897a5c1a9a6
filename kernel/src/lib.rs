//! Statespace Kernel: state identity and canonical hashing.
//!
//! # API Surface
//!
//! - [`carrier::state::StateIdentity`] -- the identity contract every search state implements
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 fingerprints
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON serializer
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `proof`
//!
//! `carrier` depends on `proof` for fingerprints only. The kernel knows nothing
//! about frontiers, problems, or reports.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod proof;
