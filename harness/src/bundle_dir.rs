//! Bundle directory persistence: write/read/verify `ArtifactBundleV1` to/from disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   bundle_manifest.json       canonical JSON, full artifact listing
//!   bundle_digest_basis.json   canonical JSON, normative projection only
//!   bundle_digest.txt          ASCII digest string ("sha256:...")
//!   fixture.json               world id + configuration
//!   policy.json                tree, backtrack, or search policy
//!   tree_report.json           (tree/backtrack runs)
//!   search_outcome.json        (search runs)
//!   verification_report.json  mode, digests, summary counters
//! ```
//!
//! The directory path is never part of any hash surface. The manifest's
//! declared list is the source of truth for which files belong.
//!
//! Reading is fail-closed: missing declared files, extra undeclared files,
//! and a stored digest that disagrees with the digest basis are all errors.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use statespace_kernel::proof::hash::{canonical_hash, ContentHash};

use crate::bundle::{
    verify_bundle, ArtifactBundleV1, BundleArtifact, BundleVerifyError, DOMAIN_BUNDLE_DIGEST,
};

const MANIFEST_FILENAME: &str = "bundle_manifest.json";
const DIGEST_BASIS_FILENAME: &str = "bundle_digest_basis.json";
const DIGEST_FILENAME: &str = "bundle_digest.txt";

const METADATA_FILENAMES: &[&str] = &[MANIFEST_FILENAME, DIGEST_BASIS_FILENAME, DIGEST_FILENAME];

/// Prefix of in-flight files written by `write_atomic`; ignored on read.
const TEMP_PREFIX: &str = ".tmp_";

/// Error writing a bundle directory.
#[derive(Debug)]
pub enum BundleDirWriteError {
    /// I/O error during write.
    Io { detail: String },
    /// An artifact name is not a plain filename or collides with a
    /// metadata file.
    InvalidArtifactName { name: String },
}

impl std::fmt::Display for BundleDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::InvalidArtifactName { name } => {
                write!(f, "artifact name cannot be written to a bundle directory: {name}")
            }
        }
    }
}

impl std::error::Error for BundleDirWriteError {}

/// Error reading a bundle directory.
#[derive(Debug)]
pub enum BundleDirReadError {
    Io { detail: String },
    /// A required metadata file is missing.
    MissingMetadata { filename: String },
    /// A declared artifact file is missing from the directory.
    MissingArtifact { name: String },
    /// An undeclared file exists in the directory.
    ExtraFile { name: String },
    /// `bundle_manifest.json` is not valid JSON or has the wrong shape.
    ManifestParseError { detail: String },
    /// Manifest `schema_version` is not `bundle.v1`.
    ManifestVersionMismatch { found: String },
    /// An artifact entry in the manifest is missing a field or malformed.
    ManifestEntryInvalid { detail: String },
    /// `bundle_digest.txt` does not match the digest recomputed from
    /// `bundle_digest_basis.json`.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for BundleDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingMetadata { filename } => {
                write!(f, "missing metadata file: {filename}")
            }
            Self::MissingArtifact { name } => write!(f, "missing artifact: {name}"),
            Self::ExtraFile { name } => write!(f, "undeclared extra file: {name}"),
            Self::ManifestParseError { detail } => {
                write!(f, "manifest parse error: {detail}")
            }
            Self::ManifestVersionMismatch { found } => {
                write!(f, "manifest version mismatch: {found}")
            }
            Self::ManifestEntryInvalid { detail } => {
                write!(f, "manifest entry invalid: {detail}")
            }
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
        }
    }
}

impl std::error::Error for BundleDirReadError {}

/// Error verifying a bundle directory.
#[derive(Debug)]
pub enum BundleDirVerifyError {
    ReadError(BundleDirReadError),
    VerifyError(BundleVerifyError),
}

impl std::fmt::Display for BundleDirVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadError(e) => write!(f, "read error: {e}"),
            Self::VerifyError(e) => write!(f, "verify error: {e}"),
        }
    }
}

impl std::error::Error for BundleDirVerifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadError(e) => Some(e),
            Self::VerifyError(e) => Some(e),
        }
    }
}

/// Write a bundle to `dir`, creating the directory if needed.
///
/// Each artifact becomes one file named after it, plus the three metadata
/// files.
///
/// # Errors
///
/// Returns [`BundleDirWriteError`] on I/O failure or if an artifact name is
/// not a plain filename.
pub fn write_bundle_dir(bundle: &ArtifactBundleV1, dir: &Path) -> Result<(), BundleDirWriteError> {
    for name in bundle.artifacts.keys() {
        if !is_plain_filename(name) {
            return Err(BundleDirWriteError::InvalidArtifactName { name: name.clone() });
        }
    }

    std::fs::create_dir_all(dir).map_err(|e| BundleDirWriteError::Io {
        detail: format!("create_dir_all {}: {e}", dir.display()),
    })?;

    for artifact in bundle.artifacts.values() {
        write_atomic(&dir.join(&artifact.name), &artifact.content)?;
    }

    write_atomic(&dir.join(MANIFEST_FILENAME), &bundle.manifest)?;
    write_atomic(&dir.join(DIGEST_BASIS_FILENAME), &bundle.digest_basis)?;
    write_atomic(&dir.join(DIGEST_FILENAME), bundle.digest.as_str().as_bytes())?;

    Ok(())
}

/// Read a bundle directory back into an `ArtifactBundleV1`.
///
/// Content hashes are taken from the manifest as declared; comparing them
/// against the file bytes is [`verify_bundle`]'s job, so a tampered artifact
/// reads successfully and fails verification.
///
/// # Errors
///
/// Returns [`BundleDirReadError`] on any structural failure.
pub fn read_bundle_dir(dir: &Path) -> Result<ArtifactBundleV1, BundleDirReadError> {
    let manifest_bytes = read_required(dir, MANIFEST_FILENAME)?;
    let digest_basis_bytes = read_required(dir, DIGEST_BASIS_FILENAME)?;
    let digest_bytes = read_required(dir, DIGEST_FILENAME)?;

    let manifest: serde_json::Value = serde_json::from_slice(&manifest_bytes).map_err(|e| {
        BundleDirReadError::ManifestParseError {
            detail: format!("{e}"),
        }
    })?;

    let schema_version = manifest["schema_version"].as_str().unwrap_or("");
    if schema_version != "bundle.v1" {
        return Err(BundleDirReadError::ManifestVersionMismatch {
            found: schema_version.to_string(),
        });
    }

    let entries = manifest["artifacts"].as_array().ok_or_else(|| {
        BundleDirReadError::ManifestParseError {
            detail: "\"artifacts\" is not an array".into(),
        }
    })?;

    let mut artifacts = BTreeMap::new();
    for entry in entries {
        let artifact = read_declared_artifact(dir, entry)?;
        artifacts.insert(artifact.name.clone(), artifact);
    }

    for filename in list_files(dir)? {
        if !artifacts.contains_key(&filename) && !METADATA_FILENAMES.contains(&filename.as_str())
        {
            return Err(BundleDirReadError::ExtraFile { name: filename });
        }
    }

    let recomputed = canonical_hash(DOMAIN_BUNDLE_DIGEST, &digest_basis_bytes);
    let stored = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    if recomputed.as_str() != stored {
        return Err(BundleDirReadError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    Ok(ArtifactBundleV1 {
        artifacts,
        manifest: manifest_bytes,
        digest_basis: digest_basis_bytes,
        digest: recomputed,
    })
}

/// Read from disk, then run [`verify_bundle`]. The offline entrypoint for
/// checking a persisted run.
///
/// # Errors
///
/// Returns [`BundleDirVerifyError`] on read failure or integrity mismatch.
pub fn verify_bundle_dir(dir: &Path) -> Result<(), BundleDirVerifyError> {
    let bundle = read_bundle_dir(dir).map_err(BundleDirVerifyError::ReadError)?;
    verify_bundle(&bundle).map_err(BundleDirVerifyError::VerifyError)
}

fn read_declared_artifact(
    dir: &Path,
    entry: &serde_json::Value,
) -> Result<BundleArtifact, BundleDirReadError> {
    let name = entry["name"]
        .as_str()
        .filter(|n| is_plain_filename(n))
        .ok_or_else(|| BundleDirReadError::ManifestEntryInvalid {
            detail: format!("bad \"name\" field in {entry}"),
        })?
        .to_string();

    let hash_str = entry["content_hash"].as_str().ok_or_else(|| {
        BundleDirReadError::ManifestEntryInvalid {
            detail: format!("missing \"content_hash\" for {name}"),
        }
    })?;
    let content_hash =
        ContentHash::parse(hash_str).ok_or_else(|| BundleDirReadError::ManifestEntryInvalid {
            detail: format!("invalid content_hash for {name}: {hash_str}"),
        })?;

    let normative = entry["normative"].as_bool().ok_or_else(|| {
        BundleDirReadError::ManifestEntryInvalid {
            detail: format!("missing \"normative\" for {name}"),
        }
    })?;

    let content = std::fs::read(dir.join(&name))
        .map_err(|_| BundleDirReadError::MissingArtifact { name: name.clone() })?;

    Ok(BundleArtifact {
        name,
        content,
        content_hash,
        normative,
    })
}

/// A single path component that cannot shadow metadata or temp files.
fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.starts_with(TEMP_PREFIX)
        && !METADATA_FILENAMES.contains(&name)
}

/// Write via temp file + rename in the same directory.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), BundleDirWriteError> {
    let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
        return Err(BundleDirWriteError::Io {
            detail: format!("not a file path: {}", path.display()),
        });
    };
    let temp_path = dir.join(format!("{TEMP_PREFIX}{}", file_name.to_string_lossy()));

    std::fs::write(&temp_path, content).map_err(|e| BundleDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| BundleDirWriteError::Io {
        detail: format!("rename {} to {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, BundleDirReadError> {
    std::fs::read(dir.join(filename)).map_err(|_| BundleDirReadError::MissingMetadata {
        filename: filename.to_string(),
    })
}

/// Regular files in `dir`, by name, excluding in-flight temp files.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, BundleDirReadError> {
    let io = |what: &str, e: std::io::Error| BundleDirReadError::Io {
        detail: format!("{what}: {e}"),
    };
    let mut files = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io("read_dir", e))? {
        let entry = entry.map_err(|e| io("dir entry", e))?;
        if !entry.file_type().map_err(|e| io("file_type", e))?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with(TEMP_PREFIX) {
                files.insert(name.to_string());
            }
        }
    }
    Ok(files)
}
