//! Tree enumeration is a pure function of (problem, root, policy): repeated
//! runs produce the same records in the same order and byte-identical
//! canonical reports.

use statespace_harness::contract::WorldHarnessV1;
use statespace_harness::runner::run_tree;
use statespace_harness::worlds::missionaries::MissionariesWorld;
use statespace_harness::worlds::n_puzzle::{NPuzzleWorld, PuzzleStateV1};
use statespace_harness::worlds::water_jug::WaterJugWorld;
use statespace_kernel::carrier::state::StateIdentity;
use statespace_search::enumerate::enumerate_tree;
use statespace_search::policy::TreePolicyV1;

fn puzzle() -> NPuzzleWorld {
    NPuzzleWorld::with_standard_goal(
        PuzzleStateV1::new(3, vec![1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap(),
    )
    .unwrap()
}

#[test]
fn n_puzzle_tree_is_byte_identical_across_runs() {
    let world = puzzle();
    let policy = TreePolicyV1::with_max_depth(4);
    let first = enumerate_tree(&world, &world.root_state(), &policy).unwrap();
    for _ in 0..3 {
        let again = enumerate_tree(&world, &world.root_state(), &policy).unwrap();
        assert_eq!(
            first.to_canonical_json_bytes().unwrap(),
            again.to_canonical_json_bytes().unwrap()
        );
        assert_eq!(first.digest().unwrap(), again.digest().unwrap());
    }
}

#[test]
fn visitation_order_follows_move_order() {
    let world = puzzle();
    let report = enumerate_tree(&world, &world.root_state(), &TreePolicyV1::with_max_depth(1))
        .unwrap();
    // Blank at the center: right, down, left, up.
    let blanks: Vec<usize> = report
        .records
        .iter()
        .map(|r| r.state.blank_index())
        .collect();
    assert_eq!(blanks, vec![4, 5, 7, 3, 1]);
    assert_eq!(report.depth_counts, vec![1, 4]);
}

#[test]
fn record_ids_are_dense_and_parents_precede_children() {
    let world = MissionariesWorld::new(3, 3, 2).unwrap();
    let report = enumerate_tree(&world, &world.root_state(), &TreePolicyV1::with_max_depth(6))
        .unwrap();
    for (i, record) in report.records.iter().enumerate() {
        assert_eq!(record.node_id, i as u64);
        if let Some(parent) = record.parent_id {
            assert!(parent < record.node_id);
            assert_eq!(report.records[parent as usize].depth + 1, record.depth);
        } else {
            assert_eq!(record.node_id, 0);
        }
    }
}

#[test]
fn bundle_digest_is_stable() {
    let world = WaterJugWorld::new(4, 3, 2).unwrap();
    let a = run_tree(&world, &TreePolicyV1::default()).unwrap();
    let b = run_tree(&world, &TreePolicyV1::default()).unwrap();
    assert_eq!(a.digest, b.digest);
    assert_eq!(a.manifest, b.manifest);
}

#[test]
fn different_policy_different_digest() {
    let world = WaterJugWorld::new(4, 3, 2).unwrap();
    let shallow = run_tree(&world, &TreePolicyV1::with_max_depth(1)).unwrap();
    let deep = run_tree(&world, &TreePolicyV1::with_max_depth(2)).unwrap();
    assert_ne!(shallow.digest, deep.digest);
}

#[test]
fn fingerprints_depend_only_on_state() {
    let world = WaterJugWorld::new(4, 3, 2).unwrap();
    let report = enumerate_tree(&world, &world.root_state(), &TreePolicyV1::default()).unwrap();
    let json = report.to_json_value();
    for (record, value) in report.records.iter().zip(json["records"].as_array().unwrap()) {
        assert_eq!(value["fingerprint"], record.state.fingerprint().as_str());
    }
}
