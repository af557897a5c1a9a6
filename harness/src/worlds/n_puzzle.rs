//! N-puzzle: a `width × width` sliding-tile board with one blank.
//!
//! The blank swaps with an in-bounds neighbor in the fixed order right,
//! down, left, up. Tree enumeration over this world is the classic
//! state-space tree demonstration; the Manhattan-distance heuristic also
//! makes it usable with optimal search.

use std::fmt;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use statespace_kernel::carrier::state::{IdentityWriter, StateIdentity};
use statespace_search::contract::SearchProblemV1;

use crate::contract::{invalid, WorldConfigError, WorldHarnessV1};

/// Largest supported width; tiles are stored as `u8`.
pub const MAX_WIDTH: u8 = 16;

/// Blank moves as `(row delta, column delta)`: right, down, left, up.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A board, row-major, `0` is the blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleStateV1 {
    width: u8,
    cells: Vec<u8>,
}

impl PuzzleStateV1 {
    /// Build a board from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidConfiguration`] if `width` is
    /// outside `2..=MAX_WIDTH` or `cells` is not a permutation of
    /// `0..width*width`.
    pub fn new(width: u8, cells: Vec<u8>) -> Result<Self, WorldConfigError> {
        if !(2..=MAX_WIDTH).contains(&width) {
            return Err(invalid(format!(
                "puzzle width {width} outside 2..={MAX_WIDTH}"
            )));
        }
        let n = usize::from(width) * usize::from(width);
        if cells.len() != n {
            return Err(invalid(format!(
                "expected {n} cells for width {width}, got {}",
                cells.len()
            )));
        }
        let mut seen = vec![false; n];
        for &tile in &cells {
            let slot = seen.get_mut(usize::from(tile)).ok_or_else(|| {
                invalid(format!("tile {tile} out of range 0..{n}"))
            })?;
            if *slot {
                return Err(invalid(format!("tile {tile} appears twice")));
            }
            *slot = true;
        }
        Ok(Self { width, cells })
    }

    /// The standard goal: tiles `1..` in order, blank in the last cell.
    ///
    /// # Errors
    ///
    /// Same width bounds as [`Self::new`].
    pub fn solved(width: u8) -> Result<Self, WorldConfigError> {
        let n = usize::from(width) * usize::from(width);
        let cells = (1..n)
            .map(|t| u8::try_from(t).unwrap_or(u8::MAX))
            .chain(std::iter::once(0))
            .collect();
        Self::new(width, cells)
    }

    /// A shuffled board that can reach [`Self::solved`]. The same `seed`
    /// always yields the same board.
    ///
    /// # Errors
    ///
    /// Same width bounds as [`Self::new`].
    pub fn random_solvable(width: u8, seed: u64) -> Result<Self, WorldConfigError> {
        let mut board = Self::solved(width)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        board.cells.shuffle(&mut rng);
        if !board.is_solvable() {
            // A tile transposition flips inversion parity; the blank stays put.
            let mut tiles = (0..board.cells.len()).filter(|&i| board.cells[i] != 0);
            if let (Some(a), Some(b)) = (tiles.next(), tiles.next()) {
                board.cells.swap(a, b);
            }
        }
        Ok(board)
    }

    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[must_use]
    pub fn blank_index(&self) -> usize {
        self.cells.iter().position(|&t| t == 0).unwrap_or(0)
    }

    /// Whether this board can reach [`Self::solved`] by blank moves.
    ///
    /// Odd widths: the inversion count must be even. Even widths: the
    /// inversion count plus the blank's row, counted from the bottom
    /// starting at 0, must be even.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        let inversions = self.inversions();
        if self.width % 2 == 1 {
            inversions % 2 == 0
        } else {
            let w = usize::from(self.width);
            let blank_row_from_bottom = w - 1 - self.blank_index() / w;
            (inversions + blank_row_from_bottom) % 2 == 0
        }
    }

    fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self.cells.iter().copied().filter(|&t| t != 0).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, a)| tiles[i + 1..].iter().filter(|b| a > *b).count())
            .sum()
    }

    fn swapped(&self, a: usize, b: usize) -> Self {
        let mut cells = self.cells.clone();
        cells.swap(a, b);
        Self {
            width: self.width,
            cells,
        }
    }
}

impl StateIdentity for PuzzleStateV1 {
    fn identity_bytes(&self) -> Vec<u8> {
        IdentityWriter::new()
            .u8(self.width)
            .bytes(&self.cells)
            .finish()
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "cells": self.cells,
            "width": self.width,
        })
    }
}

impl fmt::Display for PuzzleStateV1 {
    /// One row per line, tiles right-aligned to the widest tile number.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_tile = self.cells.len().saturating_sub(1);
        let pad = max_tile.to_string().len();
        for (r, row) in self.cells.chunks(usize::from(self.width)).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|t| format!("{t:>pad$}")).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Sliding-tile world with a fixed initial and goal board.
#[derive(Debug, Clone)]
pub struct NPuzzleWorld {
    initial: PuzzleStateV1,
    goal: PuzzleStateV1,
    /// `goal_position[tile]` = cell index of `tile` in the goal board.
    goal_position: Vec<usize>,
}

impl NPuzzleWorld {
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidConfiguration`] if the boards have
    /// different widths or the goal is unreachable from `initial`.
    pub fn new(initial: PuzzleStateV1, goal: PuzzleStateV1) -> Result<Self, WorldConfigError> {
        if initial.width != goal.width {
            return Err(invalid(format!(
                "initial width {} differs from goal width {}",
                initial.width, goal.width
            )));
        }
        if initial.is_solvable() != goal.is_solvable() {
            return Err(invalid(
                "goal board is not reachable from the initial board",
            ));
        }
        let mut goal_position = vec![0; goal.cells.len()];
        for (i, &tile) in goal.cells.iter().enumerate() {
            goal_position[usize::from(tile)] = i;
        }
        Ok(Self {
            initial,
            goal,
            goal_position,
        })
    }

    /// World whose goal is the standard solved board.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_standard_goal(initial: PuzzleStateV1) -> Result<Self, WorldConfigError> {
        let goal = PuzzleStateV1::solved(initial.width)?;
        Self::new(initial, goal)
    }

    #[must_use]
    pub fn goal(&self) -> &PuzzleStateV1 {
        &self.goal
    }
}

impl SearchProblemV1 for NPuzzleWorld {
    type State = PuzzleStateV1;

    fn successors(&self, state: &PuzzleStateV1) -> Vec<PuzzleStateV1> {
        let w = usize::from(state.width);
        let blank = state.blank_index();
        let (row, col) = (blank / w, blank % w);
        DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr).filter(|&r| r < w)?;
                let c = col.checked_add_signed(dc).filter(|&c| c < w)?;
                Some(state.swapped(blank, r * w + c))
            })
            .collect()
    }

    fn is_valid(&self, state: &PuzzleStateV1) -> bool {
        state.width == self.goal.width && state.cells.len() == self.goal.cells.len()
    }

    fn is_goal(&self, state: &PuzzleStateV1) -> bool {
        *state == self.goal
    }

    /// Sum of Manhattan distances of every tile to its goal cell.
    fn heuristic(&self, state: &PuzzleStateV1) -> i64 {
        let w = usize::from(state.width);
        let total: usize = state
            .cells
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != 0)
            .map(|(i, &t)| {
                let target = self.goal_position[usize::from(t)];
                (i / w).abs_diff(target / w) + (i % w).abs_diff(target % w)
            })
            .sum();
        i64::try_from(total).unwrap_or(i64::MAX)
    }
}

impl WorldHarnessV1 for NPuzzleWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "n_puzzle"
    }

    fn root_state(&self) -> PuzzleStateV1 {
        self.initial.clone()
    }

    fn render_state(&self, state: &PuzzleStateV1) -> String {
        state.to_string()
    }

    fn config_json(&self) -> serde_json::Value {
        json!({
            "goal": self.goal.cells,
            "initial": self.initial.cells,
            "width": self.initial.width,
        })
    }
}
