//! A run's bundle survives a trip through a directory and still verifies;
//! tampering with any artifact on disk is caught, rendered text included.

use statespace_harness::bundle::{
    build_bundle, verify_bundle, ArtifactBundleV1, BundleVerifyError, FIXTURE_ARTIFACT,
    POLICY_ARTIFACT, SEARCH_OUTCOME_ARTIFACT, TREE_REPORT_ARTIFACT, TREE_TEXT_ARTIFACT,
    VERIFICATION_REPORT_ARTIFACT,
};
use statespace_harness::bundle_dir::{
    read_bundle_dir, verify_bundle_dir, write_bundle_dir, BundleDirVerifyError,
};
use statespace_harness::runner::{run_backtrack, run_search, run_tree};
use statespace_harness::worlds::n_queens::NQueensWorld;
use statespace_harness::worlds::water_jug::WaterJugWorld;
use statespace_harness::worlds::weighted_graph::WeightedGraphWorld;
use statespace_search::policy::{BacktrackPolicyV1, SearchPolicyV1, TreePolicyV1};

fn sample_bundles() -> Vec<ArtifactBundleV1> {
    let jugs = WaterJugWorld::new(4, 3, 2).unwrap();
    let queens = NQueensWorld::new(5).unwrap();
    let graph = WeightedGraphWorld::new(&[(0, 1, 3), (1, 2, 4), (0, 2, 9)], 0, 2).unwrap();
    vec![
        run_tree(&jugs, &TreePolicyV1::default()).unwrap(),
        run_search(&jugs, &SearchPolicyV1::default()).unwrap(),
        run_backtrack(&queens, &BacktrackPolicyV1::default()).unwrap(),
        run_search(&graph, &SearchPolicyV1::breadth_first()).unwrap(),
    ]
}

#[test]
fn directory_roundtrip_preserves_bundle() {
    for bundle in sample_bundles() {
        verify_bundle(&bundle).unwrap();
        let dir = tempfile::tempdir().unwrap();
        write_bundle_dir(&bundle, dir.path()).unwrap();
        let loaded = read_bundle_dir(dir.path()).unwrap();
        assert_eq!(loaded.digest, bundle.digest);
        assert_eq!(loaded.manifest, bundle.manifest);
        assert_eq!(loaded.artifacts, bundle.artifacts);
        verify_bundle_dir(dir.path()).unwrap();
    }
}

#[test]
fn tampering_any_artifact_fails_verification() {
    let bundle = run_tree(&WaterJugWorld::new(4, 3, 2).unwrap(), &TreePolicyV1::default())
        .unwrap();
    for name in [
        FIXTURE_ARTIFACT,
        POLICY_ARTIFACT,
        TREE_REPORT_ARTIFACT,
        TREE_TEXT_ARTIFACT,
        VERIFICATION_REPORT_ARTIFACT,
    ] {
        let dir = tempfile::tempdir().unwrap();
        write_bundle_dir(&bundle, dir.path()).unwrap();
        let path = dir.path().join(name);
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.push(b' ');
        std::fs::write(&path, bytes).unwrap();

        let err = verify_bundle_dir(dir.path()).unwrap_err();
        assert!(
            matches!(
                err,
                BundleDirVerifyError::VerifyError(BundleVerifyError::ContentHashMismatch { .. })
            ),
            "{name}: {err}"
        );
    }
}

#[test]
fn rehashed_forgery_breaks_report_binding() {
    // Replace the tree report and rebuild the bundle so every content hash
    // is self-consistent; the verification report still names the old one.
    let bundle = run_tree(&WaterJugWorld::new(4, 3, 2).unwrap(), &TreePolicyV1::default())
        .unwrap();
    let forged: Vec<(String, Vec<u8>, bool)> = bundle
        .artifacts
        .values()
        .map(|a| {
            let content = if a.name == TREE_REPORT_ARTIFACT {
                b"{\"total_count\":0}".to_vec()
            } else {
                a.content.clone()
            };
            (a.name.clone(), content, a.normative)
        })
        .collect();
    let forged = build_bundle(forged).unwrap();
    let err = verify_bundle(&forged).unwrap_err();
    assert!(
        matches!(err, BundleVerifyError::DigestBindingMismatch { ref field, .. } if field == "report_digest"),
        "got {err:?}"
    );
}

#[test]
fn mode_and_report_artifact_must_agree() {
    let bundle = run_search(&WaterJugWorld::new(4, 3, 2).unwrap(), &SearchPolicyV1::default())
        .unwrap();
    let mut inputs: Vec<(String, Vec<u8>, bool)> = bundle
        .artifacts
        .values()
        .map(|a| (a.name.clone(), a.content.clone(), a.normative))
        .collect();
    inputs.push((TREE_REPORT_ARTIFACT.to_string(), b"{}".to_vec(), true));
    let err = verify_bundle(&build_bundle(inputs).unwrap()).unwrap_err();
    assert!(matches!(err, BundleVerifyError::ModeArtifactConflict { .. }));
    assert!(bundle.artifacts.contains_key(SEARCH_OUTCOME_ARTIFACT));
}
