//! Typed domain separators for canonical hashing.
//!
//! Every hash computation in the workspace selects a domain via [`HashDomain`].
//! This module is the single authority for domain-separator byte strings.
//! Adding a domain is one line in the macro invocation below.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// State fingerprints published in reports.
    SearchNode => b"STATESPACE::SEARCH_NODE::V1\0",

    /// Tree enumeration report hashing.
    TreeReport => b"STATESPACE::TREE_REPORT::V1\0",

    /// Optimal-cost search outcome hashing.
    SearchOutcome => b"STATESPACE::SEARCH_OUTCOME::V1\0",

    // -----------------------------------------------------------------------
    // Harness
    // -----------------------------------------------------------------------

    /// Bundle artifact content hashing.
    BundleArtifact => b"STATESPACE::BUNDLE_ARTIFACT::V1\0",

    /// Bundle digest (normative projection).
    BundleDigest => b"STATESPACE::BUNDLE_DIGEST::V1\0",
}
