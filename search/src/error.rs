//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime outcomes
//! (goal reached, frontier exhausted, depth truncation) are expressed in the
//! returned report and are never errors.

/// Typed failure for pre-flight validation.
///
/// Returned before any node is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The root state fails the problem's validity predicate.
    InvalidRoot { detail: String },
    /// A policy field is out of its accepted range.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot { detail } => write!(f, "invalid root state: {detail}"),
            Self::InvalidPolicy { detail } => write!(f, "invalid policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Pre-flight root check shared by every driver.
pub(crate) fn check_root<P: crate::contract::SearchProblemV1>(
    problem: &P,
    root: &P::State,
) -> Result<(), SearchError> {
    if problem.is_valid(root) {
        Ok(())
    } else {
        Err(SearchError::InvalidRoot {
            detail: format!("{root:?}"),
        })
    }
}
