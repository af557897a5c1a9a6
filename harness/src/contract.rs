//! World harness contract: what a world adds on top of a search problem.
//!
//! Worlds provide domain rules (successors, goal, validity, heuristic) by
//! implementing [`SearchProblemV1`], plus an identifier, a root state, and a
//! JSON echo of their configuration. Worlds may NOT implement hashing,
//! report serialization, or bundle assembly (those are kernel/runner
//! concerns).

use statespace_search::contract::SearchProblemV1;

/// Typed failure for world construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldConfigError {
    /// A constructor argument is out of range or inconsistent.
    InvalidConfiguration { detail: String },
}

impl std::fmt::Display for WorldConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration { detail } => {
                write!(f, "invalid world configuration: {detail}")
            }
        }
    }
}

impl std::error::Error for WorldConfigError {}

pub(crate) fn invalid(detail: impl Into<String>) -> WorldConfigError {
    WorldConfigError::InvalidConfiguration {
        detail: detail.into(),
    }
}

/// The contract a world must implement to be run by the harness runner.
///
/// A world provides:
/// - A unique identifier
/// - The root state every run starts from
/// - A text rendering of its states
/// - Its configuration as integer-only JSON (echoed as `fixture.json`)
///
/// A world does NOT provide:
/// - Hashing or canonical serialization (kernel's job)
/// - Policies (chosen by the caller per run)
pub trait WorldHarnessV1: SearchProblemV1 {
    /// Unique world identifier (e.g., `"water_jug"`).
    fn world_id(&self) -> &str;

    fn root_state(&self) -> Self::State;

    /// Human-readable state, possibly several lines. Used for the rendered
    /// text artifacts only; never hashed into a digest.
    fn render_state(&self, state: &Self::State) -> String;

    /// Configuration echo. Must contain integers, strings, bools, arrays,
    /// and objects only.
    fn config_json(&self) -> serde_json::Value;
}
