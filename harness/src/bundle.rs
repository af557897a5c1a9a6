//! In-memory artifact bundle: the output of a harness run.
//!
//! No file I/O in this module. The bundle is a deterministic in-memory
//! representation that can be inspected programmatically.
//!
//! # Normative vs observational artifacts
//!
//! Each artifact is tagged `normative` (participates in bundle digest)
//! or observational (present in the manifest but excluded from digest).
//! The runner's JSON artifacts are normative; its rendered text
//! (`tree.txt`, `path.txt`) is observational, so changing the text layout
//! never moves a bundle digest.
//!
//! The bundle digest is computed over the **digest basis**: a canonical
//! JSON projection of normative artifact hashes only.

use std::collections::BTreeMap;

use statespace_kernel::proof::canon::{canonical_json_bytes, is_canonical_json};
use statespace_kernel::proof::hash::{canonical_hash, ContentHash};
use statespace_kernel::proof::hash_domain::HashDomain;

/// Domain prefix for bundle artifact content hashing.
pub const DOMAIN_BUNDLE_ARTIFACT: HashDomain = HashDomain::BundleArtifact;

/// Domain prefix for bundle digest computation.
pub const DOMAIN_BUNDLE_DIGEST: HashDomain = HashDomain::BundleDigest;

pub const FIXTURE_ARTIFACT: &str = "fixture.json";
pub const POLICY_ARTIFACT: &str = "policy.json";
pub const TREE_REPORT_ARTIFACT: &str = "tree_report.json";
pub const SEARCH_OUTCOME_ARTIFACT: &str = "search_outcome.json";
pub const VERIFICATION_REPORT_ARTIFACT: &str = "verification_report.json";
/// Observational: rendered tree for `tree` and `backtrack` runs.
pub const TREE_TEXT_ARTIFACT: &str = "tree.txt";
/// Observational: rendered solution path for `search` runs.
pub const PATH_TEXT_ARTIFACT: &str = "path.txt";

/// A single artifact in the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArtifact {
    /// Logical filename (e.g., `"fixture.json"`).
    pub name: String,
    /// Raw bytes of the artifact.
    pub content: Vec<u8>,
    /// Content hash: `canonical_hash(DOMAIN_BUNDLE_ARTIFACT, content)`.
    pub content_hash: ContentHash,
    /// Whether this artifact participates in the bundle digest.
    pub normative: bool,
}

/// The complete artifact bundle from a harness run.
///
/// All JSON artifacts use kernel's `canonical_json_bytes`.
#[derive(Debug, Clone)]
pub struct ArtifactBundleV1 {
    /// Artifacts indexed by logical name, in sorted order (`BTreeMap`).
    pub artifacts: BTreeMap<String, BundleArtifact>,
    /// Full manifest: canonical JSON listing all artifacts with normative flags.
    pub manifest: Vec<u8>,
    /// Digest basis: canonical JSON listing normative artifact hashes only.
    pub digest_basis: Vec<u8>,
    /// Bundle digest: `canonical_hash(DOMAIN_BUNDLE_DIGEST, digest_basis)`.
    pub digest: ContentHash,
}

impl ArtifactBundleV1 {
    /// Parse a JSON artifact by name.
    #[must_use]
    pub fn artifact_json(&self, name: &str) -> Option<serde_json::Value> {
        self.artifacts
            .get(name)
            .and_then(|a| serde_json::from_slice(&a.content).ok())
    }
}

/// Error building a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleBuildError {
    /// Canonical JSON serialization failed.
    CanonError { detail: String },
    /// Two inputs share one logical name.
    DuplicateArtifact { name: String },
}

impl std::fmt::Display for BundleBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::DuplicateArtifact { name } => write!(f, "duplicate artifact name: {name}"),
        }
    }
}

impl std::error::Error for BundleBuildError {}

/// Input for bundle assembly: `(name, content, normative)`.
pub struct ArtifactInput {
    pub name: String,
    pub content: Vec<u8>,
    pub normative: bool,
}

impl From<(String, Vec<u8>, bool)> for ArtifactInput {
    fn from((name, content, normative): (String, Vec<u8>, bool)) -> Self {
        Self {
            name,
            content,
            normative,
        }
    }
}

/// Build an `ArtifactBundleV1` from a list of artifact inputs.
///
/// Computes content hashes, builds the sorted manifest and digest basis,
/// and derives the bundle digest.
///
/// # Errors
///
/// Returns [`BundleBuildError`] if canonical JSON serialization fails or an
/// artifact name repeats.
pub fn build_bundle(
    artifacts: Vec<impl Into<ArtifactInput>>,
) -> Result<ArtifactBundleV1, BundleBuildError> {
    let mut artifact_map = BTreeMap::new();

    for input in artifacts {
        let input = input.into();
        if artifact_map.contains_key(&input.name) {
            return Err(BundleBuildError::DuplicateArtifact { name: input.name });
        }
        let content_hash = canonical_hash(DOMAIN_BUNDLE_ARTIFACT, &input.content);
        artifact_map.insert(
            input.name.clone(),
            BundleArtifact {
                name: input.name,
                content: input.content,
                content_hash,
                normative: input.normative,
            },
        );
    }

    let manifest = compute_manifest_bytes(&artifact_map)
        .map_err(|detail| BundleBuildError::CanonError { detail })?;

    let digest_basis = compute_digest_basis_bytes(&artifact_map)
        .map_err(|detail| BundleBuildError::CanonError { detail })?;

    let digest = canonical_hash(DOMAIN_BUNDLE_DIGEST, &digest_basis);

    Ok(ArtifactBundleV1 {
        artifacts: artifact_map,
        manifest,
        digest_basis,
        digest,
    })
}

/// Error from bundle integrity verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleVerifyError {
    /// An artifact's stored `content_hash` does not match recomputed hash.
    ContentHashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
    /// Stored `manifest` bytes do not match recomputed manifest from artifacts.
    ManifestMismatch,
    /// Stored `manifest` bytes are not in canonical JSON form.
    ManifestNotCanonical,
    /// Stored `digest_basis` bytes do not match recomputed normative projection.
    DigestBasisMismatch,
    /// Stored `digest_basis` bytes are not in canonical JSON form.
    DigestBasisNotCanonical,
    /// Stored `digest` does not match recomputed hash of `digest_basis`.
    DigestMismatch { expected: String, actual: String },
    /// A normative JSON artifact is not in canonical JSON form.
    ArtifactNotCanonical { artifact: String },
    /// `verification_report.json` or a bound artifact is not valid JSON.
    ReportParseError { detail: String },
    /// Report is missing a required field.
    ReportFieldMissing { field: String },
    /// Report `mode` is not one of `tree`, `backtrack`, `search`.
    ModeUnknown { mode: String },
    /// An artifact required by the report's mode is absent.
    ArtifactMissing { artifact: String },
    /// An artifact that belongs to a different mode is present.
    ModeArtifactConflict { mode: String, artifact: String },
    /// A `*_digest` field in the report does not match the artifact's hash.
    DigestBindingMismatch {
        field: String,
        declared: String,
        recomputed: String,
    },
    /// `world_id` in the report does not match `fixture.json`.
    WorldIdMismatch { in_report: String, in_fixture: String },
    /// Canonical JSON error during verification.
    CanonError { detail: String },
}

impl std::fmt::Display for BundleVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentHashMismatch {
                artifact,
                expected,
                actual,
            } => write!(
                f,
                "content hash mismatch for {artifact}: stored {expected}, recomputed {actual}"
            ),
            Self::ManifestMismatch => write!(f, "manifest does not match artifacts"),
            Self::ManifestNotCanonical => write!(f, "manifest is not canonical JSON"),
            Self::DigestBasisMismatch => write!(f, "digest basis does not match artifacts"),
            Self::DigestBasisNotCanonical => write!(f, "digest basis is not canonical JSON"),
            Self::DigestMismatch { expected, actual } => {
                write!(f, "bundle digest mismatch: stored {expected}, recomputed {actual}")
            }
            Self::ArtifactNotCanonical { artifact } => {
                write!(f, "normative artifact {artifact} is not canonical JSON")
            }
            Self::ReportParseError { detail } => write!(f, "report parse error: {detail}"),
            Self::ReportFieldMissing { field } => write!(f, "report field missing: {field}"),
            Self::ModeUnknown { mode } => write!(f, "unknown report mode: {mode}"),
            Self::ArtifactMissing { artifact } => write!(f, "required artifact missing: {artifact}"),
            Self::ModeArtifactConflict { mode, artifact } => {
                write!(f, "artifact {artifact} does not belong to mode {mode}")
            }
            Self::DigestBindingMismatch {
                field,
                declared,
                recomputed,
            } => write!(
                f,
                "{field} mismatch: report declares {declared}, artifact hashes to {recomputed}"
            ),
            Self::WorldIdMismatch {
                in_report,
                in_fixture,
            } => write!(
                f,
                "world_id mismatch: report {in_report}, fixture {in_fixture}"
            ),
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for BundleVerifyError {}

/// Verify the internal consistency of a bundle.
///
/// This is a pure integrity check; it does NOT re-run the search. It proves:
///
/// 1. Each artifact's `content_hash` matches `canonical_hash(DOMAIN_BUNDLE_ARTIFACT, content)`.
/// 2. `manifest` bytes match the canonical JSON projection recomputed from all artifacts.
/// 3. `digest_basis` bytes match the canonical JSON projection recomputed from normative
///    artifacts only.
/// 4. `digest` matches `canonical_hash(DOMAIN_BUNDLE_DIGEST, digest_basis)`.
/// 5. `manifest` and `digest_basis` are in canonical JSON form.
/// 6. Normative JSON artifacts (`.json` extension + `normative: true`) are in canonical form.
/// 7. If `verification_report.json` exists: its mode names exactly one report
///    artifact, and its `fixture_digest`, `policy_digest`, and `report_digest`
///    match the bound artifacts' content hashes.
///
/// # Errors
///
/// Returns the first [`BundleVerifyError`] encountered.
pub fn verify_bundle(bundle: &ArtifactBundleV1) -> Result<(), BundleVerifyError> {
    // Step 1: Verify each artifact's content_hash.
    for artifact in bundle.artifacts.values() {
        let recomputed = canonical_hash(DOMAIN_BUNDLE_ARTIFACT, &artifact.content);
        if recomputed != artifact.content_hash {
            return Err(BundleVerifyError::ContentHashMismatch {
                artifact: artifact.name.clone(),
                expected: artifact.content_hash.as_str().to_string(),
                actual: recomputed.as_str().to_string(),
            });
        }
    }

    // Step 2: Recompute manifest from artifacts and compare byte-for-byte.
    let expected_manifest = compute_manifest_bytes(&bundle.artifacts)
        .map_err(|detail| BundleVerifyError::CanonError { detail })?;
    if expected_manifest != bundle.manifest {
        return Err(BundleVerifyError::ManifestMismatch);
    }
    if !is_canonical_json(&bundle.manifest) {
        return Err(BundleVerifyError::ManifestNotCanonical);
    }

    // Step 3: Recompute digest_basis from normative artifacts and compare.
    let expected_basis = compute_digest_basis_bytes(&bundle.artifacts)
        .map_err(|detail| BundleVerifyError::CanonError { detail })?;
    if expected_basis != bundle.digest_basis {
        return Err(BundleVerifyError::DigestBasisMismatch);
    }
    if !is_canonical_json(&bundle.digest_basis) {
        return Err(BundleVerifyError::DigestBasisNotCanonical);
    }

    // Step 4: Verify bundle digest.
    let recomputed_digest = canonical_hash(DOMAIN_BUNDLE_DIGEST, &bundle.digest_basis);
    if recomputed_digest != bundle.digest {
        return Err(BundleVerifyError::DigestMismatch {
            expected: bundle.digest.as_str().to_string(),
            actual: recomputed_digest.as_str().to_string(),
        });
    }

    // Step 5: Verify normative JSON artifacts are canonical.
    for artifact in bundle.artifacts.values() {
        let is_json = std::path::Path::new(&artifact.name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if artifact.normative && is_json && !is_canonical_json(&artifact.content) {
            return Err(BundleVerifyError::ArtifactNotCanonical {
                artifact: artifact.name.clone(),
            });
        }
    }

    // Step 6: Report bindings.
    verify_report_bindings(bundle)
}

/// Check mode coherence and digest bindings declared by
/// `verification_report.json`. A bundle without a report has nothing to bind.
fn verify_report_bindings(bundle: &ArtifactBundleV1) -> Result<(), BundleVerifyError> {
    let Some(report_artifact) = bundle.artifacts.get(VERIFICATION_REPORT_ARTIFACT) else {
        return Ok(());
    };
    let report = parse_json(&report_artifact.content)?;

    let mode = required_str(&report, "mode")?;
    let (expected, other) = match mode {
        "tree" | "backtrack" => (TREE_REPORT_ARTIFACT, SEARCH_OUTCOME_ARTIFACT),
        "search" => (SEARCH_OUTCOME_ARTIFACT, TREE_REPORT_ARTIFACT),
        _ => {
            return Err(BundleVerifyError::ModeUnknown {
                mode: mode.to_string(),
            })
        }
    };
    if bundle.artifacts.contains_key(other) {
        return Err(BundleVerifyError::ModeArtifactConflict {
            mode: mode.to_string(),
            artifact: other.to_string(),
        });
    }

    verify_digest_binding(bundle, &report, "fixture_digest", FIXTURE_ARTIFACT)?;
    verify_digest_binding(bundle, &report, "policy_digest", POLICY_ARTIFACT)?;
    verify_digest_binding(bundle, &report, "report_digest", expected)?;

    let in_report = required_str(&report, "world_id")?;
    let fixture = bundle
        .artifacts
        .get(FIXTURE_ARTIFACT)
        .map(|a| parse_json(&a.content))
        .transpose()?
        .unwrap_or_default();
    let in_fixture = fixture
        .get("world_id")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    if in_report != in_fixture {
        return Err(BundleVerifyError::WorldIdMismatch {
            in_report: in_report.to_string(),
            in_fixture: in_fixture.to_string(),
        });
    }

    Ok(())
}

/// `report[field]` must be present and equal `artifact`'s `content_hash`.
fn verify_digest_binding(
    bundle: &ArtifactBundleV1,
    report: &serde_json::Value,
    field: &str,
    artifact: &str,
) -> Result<(), BundleVerifyError> {
    let bound = bundle
        .artifacts
        .get(artifact)
        .ok_or_else(|| BundleVerifyError::ArtifactMissing {
            artifact: artifact.to_string(),
        })?;
    let declared = required_str(report, field)?;
    if bound.content_hash.as_str() != declared {
        return Err(BundleVerifyError::DigestBindingMismatch {
            field: field.to_string(),
            declared: declared.to_string(),
            recomputed: bound.content_hash.as_str().to_string(),
        });
    }
    Ok(())
}

fn parse_json(bytes: &[u8]) -> Result<serde_json::Value, BundleVerifyError> {
    serde_json::from_slice(bytes).map_err(|e| BundleVerifyError::ReportParseError {
        detail: format!("{e:?}"),
    })
}

fn required_str<'a>(
    report: &'a serde_json::Value,
    field: &str,
) -> Result<&'a str, BundleVerifyError> {
    report
        .get(field)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| BundleVerifyError::ReportFieldMissing {
            field: field.to_string(),
        })
}

/// Recompute manifest bytes from the artifact map.
pub(crate) fn compute_manifest_bytes(
    artifacts: &BTreeMap<String, BundleArtifact>,
) -> Result<Vec<u8>, String> {
    let manifest_artifacts: Vec<serde_json::Value> = artifacts
        .values()
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
                "normative": a.normative,
            })
        })
        .collect();

    let manifest_value = serde_json::json!({
        "artifacts": manifest_artifacts,
        "schema_version": "bundle.v1",
    });

    canonical_json_bytes(&manifest_value).map_err(|e| format!("{e:?}"))
}

/// Recompute digest basis bytes from normative artifacts only.
pub(crate) fn compute_digest_basis_bytes(
    artifacts: &BTreeMap<String, BundleArtifact>,
) -> Result<Vec<u8>, String> {
    let normative_artifacts: Vec<serde_json::Value> = artifacts
        .values()
        .filter(|a| a.normative)
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
            })
        })
        .collect();

    let digest_basis_value = serde_json::json!({
        "artifacts": normative_artifacts,
        "schema_version": "bundle_digest_basis.v1",
    });

    canonical_json_bytes(&digest_basis_value).map_err(|e| format!("{e:?}"))
}
