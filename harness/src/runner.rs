//! Harness runner: run a world through one of the search drivers and
//! package the result as an artifact bundle.
//!
//! The runner uses ONLY the search crate's drivers and report projections
//! plus kernel canonical JSON and hashing. It does not implement any search
//! logic itself.
//!
//! # Pipeline
//!
//! ```text
//! fixture.json ← world_id + config_json()
//! policy.json  ← policy.to_json_value()
//! driver(world, root_state(), policy)
//!   → tree_report.json | search_outcome.json
//!   → verification_report.json (mode, digests of the three above, summary)
//!   → tree.txt | path.txt (rendered, observational)
//!   → build_bundle()
//! ```
//!
//! The four JSON artifacts are canonical and normative. The rendered text
//! is observational: listed in the manifest, outside the bundle digest.

use serde_json::json;
use statespace_kernel::proof::canon::{canonical_json_bytes, CanonError};
use statespace_kernel::proof::hash::{canonical_hash, ContentHash};
use statespace_search::backtrack::enumerate_backtracking;
use statespace_search::enumerate::enumerate_tree;
use statespace_search::error::SearchError;
use statespace_search::policy::{BacktrackPolicyV1, SearchPolicyV1, TreePolicyV1};
use statespace_search::report::{SearchOutcomeV1, TerminationReasonV1, TreeReportV1};
use statespace_search::search::search_optimal;

use crate::bundle::{
    build_bundle, ArtifactBundleV1, BundleBuildError, DOMAIN_BUNDLE_ARTIFACT, FIXTURE_ARTIFACT,
    PATH_TEXT_ARTIFACT, POLICY_ARTIFACT, SEARCH_OUTCOME_ARTIFACT, TREE_REPORT_ARTIFACT,
    TREE_TEXT_ARTIFACT, VERIFICATION_REPORT_ARTIFACT,
};
use crate::contract::WorldHarnessV1;
use crate::render::{render_outcome_text, render_tree_text_with};

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The driver rejected the world's root state or the policy.
    SearchFailed(SearchError),
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
    /// Bundle assembly failed.
    BundleFailed(BundleBuildError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SearchFailed(e) => write!(f, "search failed: {e}"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::BundleFailed(e) => write!(f, "bundle assembly failed: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SearchFailed(e) => Some(e),
            Self::BundleFailed(e) => Some(e),
            Self::CanonFailed { .. } => None,
        }
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::CanonFailed {
            detail: format!("{e:?}"),
        }
    }
}

/// Breadth-first tree enumeration from the world's root state.
///
/// Produces `fixture.json`, `policy.json`, `tree_report.json`, and
/// `verification_report.json` with mode `"tree"`, plus an observational
/// `tree.txt`.
///
/// # Errors
///
/// Returns [`RunError`] at any pipeline step.
pub fn run_tree<W: WorldHarnessV1>(
    world: &W,
    policy: &TreePolicyV1,
) -> Result<ArtifactBundleV1, RunError> {
    let report =
        enumerate_tree(world, &world.root_state(), policy).map_err(RunError::SearchFailed)?;
    package_tree(world, "tree", &policy.to_json_value(), &report)
}

/// Backtracking enumeration from the world's root state. Same artifact set
/// as [`run_tree`], mode `"backtrack"`.
///
/// # Errors
///
/// Returns [`RunError`] at any pipeline step, including an invalid policy.
pub fn run_backtrack<W: WorldHarnessV1>(
    world: &W,
    policy: &BacktrackPolicyV1,
) -> Result<ArtifactBundleV1, RunError> {
    let report = enumerate_backtracking(world, &world.root_state(), policy)
        .map_err(RunError::SearchFailed)?;
    package_tree(world, "backtrack", &policy.to_json_value(), &report)
}

/// Goal-directed search from the world's root state.
///
/// Produces `fixture.json`, `policy.json`, `search_outcome.json`, and
/// `verification_report.json` with mode `"search"`, plus an observational
/// `path.txt`.
///
/// # Errors
///
/// Returns [`RunError`] at any pipeline step.
pub fn run_search<W: WorldHarnessV1>(
    world: &W,
    policy: &SearchPolicyV1,
) -> Result<ArtifactBundleV1, RunError> {
    let outcome =
        search_optimal(world, &world.root_state(), policy).map_err(RunError::SearchFailed)?;
    package_search(world, &policy.to_json_value(), &outcome)
}

fn package_tree<W: WorldHarnessV1>(
    world: &W,
    mode: &str,
    policy_json: &serde_json::Value,
    report: &TreeReportV1<W::State>,
) -> Result<ArtifactBundleV1, RunError> {
    let summary = json!({
        "depth_reached": report.depth_counts.len().saturating_sub(1),
        "solutions": report.solution_ids.len(),
        "total_count": report.total_count(),
    });
    let text = render_tree_text_with(report, |s| world.render_state(s));
    package(
        world,
        mode,
        policy_json,
        (TREE_REPORT_ARTIFACT, report.to_canonical_json_bytes()?),
        summary,
        (TREE_TEXT_ARTIFACT, text),
    )
}

fn package_search<W: WorldHarnessV1>(
    world: &W,
    policy_json: &serde_json::Value,
    outcome: &SearchOutcomeV1<W::State>,
) -> Result<ArtifactBundleV1, RunError> {
    let summary = json!({
        "expansions": outcome.stats.expansions,
        "goal_reached": matches!(outcome.termination, TerminationReasonV1::GoalReached { .. }),
        "path_length": outcome.solution.as_ref().map(|s| s.node_ids.len()),
        "total_cost": outcome.total_cost(),
    });
    let text = render_outcome_text(outcome, |s| world.render_state(s));
    package(
        world,
        "search",
        policy_json,
        (SEARCH_OUTCOME_ARTIFACT, outcome.to_canonical_json_bytes()?),
        summary,
        (PATH_TEXT_ARTIFACT, text),
    )
}

/// Assemble the four normative artifacts and the rendered text. The
/// verification report binds the other three normative artifacts by content
/// hash so `verify_bundle` can check them.
fn package<W: WorldHarnessV1>(
    world: &W,
    mode: &str,
    policy_json: &serde_json::Value,
    (report_name, report_bytes): (&str, Vec<u8>),
    summary: serde_json::Value,
    (text_name, text): (&str, String),
) -> Result<ArtifactBundleV1, RunError> {
    let fixture_bytes = canonical_json_bytes(&json!({
        "config": world.config_json(),
        "schema_version": "fixture.v1",
        "world_id": world.world_id(),
    }))?;
    let policy_bytes = canonical_json_bytes(policy_json)?;

    let verification_report = canonical_json_bytes(&json!({
        "fixture_digest": artifact_hash(&fixture_bytes).as_str(),
        "mode": mode,
        "policy_digest": artifact_hash(&policy_bytes).as_str(),
        "report_digest": artifact_hash(&report_bytes).as_str(),
        "schema_version": "verification_report.v1",
        "summary": summary,
        "world_id": world.world_id(),
    }))?;

    build_bundle(vec![
        (FIXTURE_ARTIFACT.to_string(), fixture_bytes, true),
        (POLICY_ARTIFACT.to_string(), policy_bytes, true),
        (report_name.to_string(), report_bytes, true),
        (
            VERIFICATION_REPORT_ARTIFACT.to_string(),
            verification_report,
            true,
        ),
        (text_name.to_string(), text.into_bytes(), false),
    ])
    .map_err(RunError::BundleFailed)
}

fn artifact_hash(bytes: &[u8]) -> ContentHash {
    canonical_hash(DOMAIN_BUNDLE_ARTIFACT, bytes)
}
