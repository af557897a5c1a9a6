//! Proof module: canonical hashing and canonical JSON.
//!
//! Depends on nothing internal.

pub mod canon;
pub mod hash;
pub mod hash_domain;
