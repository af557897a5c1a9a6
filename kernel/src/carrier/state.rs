//! `StateIdentity`: the identity contract for search states.
//!
//! # Equality semantics
//!
//! Two states are the *same state* for visitation purposes iff their
//! `identity_bytes()` are equal, regardless of how they were reached. The
//! engine never compares states any other way.
//!
//! Identity bytes must be canonical: fixed field order, little-endian
//! integers, no padding that varies by platform. Fingerprints published in
//! reports are derived from these bytes under [`HashDomain::SearchNode`].

use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Identity and report projection for a search state.
pub trait StateIdentity {
    /// Canonical identity encoding. Equal bytes means interchangeable states.
    fn identity_bytes(&self) -> Vec<u8>;

    /// Integer-only JSON projection of the state, used in reports.
    fn to_json(&self) -> serde_json::Value;

    /// `canonical_hash(SearchNode, identity_bytes())`.
    fn fingerprint(&self) -> ContentHash {
        canonical_hash(HashDomain::SearchNode, &self.identity_bytes())
    }
}

/// Little-endian writer for building identity bytes field by field.
///
/// Integers are fixed-width; byte sequences carry a length prefix so that
/// `[1] ++ [2, 3]` and `[1, 2] ++ [3]` encode differently.
#[derive(Debug, Default)]
pub struct IdentityWriter {
    buf: Vec<u8>,
}

impl IdentityWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn u8(mut self, v: u8) -> Self {
        self.buf.push(v);
        self
    }

    #[must_use]
    pub fn u32(mut self, v: u32) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    #[must_use]
    pub fn bool(self, v: bool) -> Self {
        self.u8(u8::from(v))
    }

    /// Length-prefixed byte sequence.
    #[must_use]
    pub fn bytes(mut self, v: &[u8]) -> Self {
        let len = u32::try_from(v.len()).unwrap_or(u32::MAX);
        self.buf.extend_from_slice(&len.to_le_bytes());
        self.buf.extend_from_slice(v);
        self
    }

    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

impl StateIdentity for u32 {
    fn identity_bytes(&self) -> Vec<u8> {
        self.to_le_bytes().to_vec()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}
