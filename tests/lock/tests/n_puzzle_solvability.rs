//! N-puzzle solvability parity, and search on solvable boards.

use statespace_harness::contract::{WorldConfigError, WorldHarnessV1};
use statespace_harness::worlds::n_puzzle::{NPuzzleWorld, PuzzleStateV1};
use statespace_search::policy::SearchPolicyV1;
use statespace_search::search::search_optimal;

fn board(width: u8, cells: &[u8]) -> PuzzleStateV1 {
    PuzzleStateV1::new(width, cells.to_vec()).unwrap()
}

#[test]
fn three_by_three_parity() {
    assert!(board(3, &[1, 2, 3, 4, 5, 6, 7, 8, 0]).is_solvable());
    assert!(board(3, &[8, 1, 3, 4, 0, 2, 7, 6, 5]).is_solvable());
    assert!(!board(3, &[1, 2, 3, 4, 5, 6, 8, 7, 0]).is_solvable());
}

#[test]
fn four_by_four_parity() {
    let solved: Vec<u8> = (1..16).chain(std::iter::once(0)).collect();
    assert!(board(4, &solved).is_solvable());

    // 14 and 15 swapped: the classic unsolvable fifteen puzzle.
    let mut swapped = solved.clone();
    swapped.swap(13, 14);
    assert!(!board(4, &swapped).is_solvable());

    // Blank moved up one row keeps the board reachable even though the
    // inversion count changes parity.
    let mut blank_up = solved;
    blank_up.swap(15, 11);
    assert!(board(4, &blank_up).is_solvable());
}

#[test]
fn unsolvable_pair_rejected_at_construction() {
    let err = NPuzzleWorld::with_standard_goal(board(3, &[1, 2, 3, 4, 5, 6, 8, 7, 0]))
        .unwrap_err();
    assert!(matches!(err, WorldConfigError::InvalidConfiguration { .. }));
}

#[test]
fn manhattan_search_solves_scrambled_board() {
    let world =
        NPuzzleWorld::with_standard_goal(board(3, &[1, 2, 3, 0, 4, 6, 7, 5, 8])).unwrap();
    let bfs =
        search_optimal(&world, &world.root_state(), &SearchPolicyV1::breadth_first()).unwrap();
    let astar = search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
    assert_eq!(bfs.total_cost(), Some(3));
    assert_eq!(astar.total_cost(), Some(3));
    assert!(astar.stats.expansions <= bfs.stats.expansions);
    let (path, _) = astar.into_path().unwrap();
    assert_eq!(path.last(), Some(world.goal()));
}

#[test]
fn generated_boards_are_solved_optimally() {
    for seed in 0..2 {
        let world =
            NPuzzleWorld::with_standard_goal(PuzzleStateV1::random_solvable(3, seed).unwrap())
                .unwrap();
        let astar =
            search_optimal(&world, &world.root_state(), &SearchPolicyV1::default()).unwrap();
        let bfs = search_optimal(&world, &world.root_state(), &SearchPolicyV1::breadth_first())
            .unwrap();
        assert!(astar.total_cost().is_some(), "seed {seed} unsolved");
        assert_eq!(astar.total_cost(), bfs.total_cost(), "seed {seed}");
    }
}
