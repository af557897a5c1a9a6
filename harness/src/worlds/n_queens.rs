//! N-queens: place one queen per row so that no two attack each other.
//!
//! A state is the list of columns chosen for rows `0..k`. Successors place
//! a queen in row `k`, trying columns in ascending order and keeping only
//! safe ones, so every generated state is a consistent partial board.

use std::fmt;

use serde_json::json;
use statespace_kernel::carrier::state::{IdentityWriter, StateIdentity};
use statespace_search::contract::SearchProblemV1;

use crate::contract::{invalid, WorldConfigError, WorldHarnessV1};

/// Largest supported board; columns are stored as `u8`.
pub const MAX_QUEENS: u8 = 32;

/// Queen columns for the rows placed so far.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QueensStateV1 {
    columns: Vec<u8>,
}

impl QueensStateV1 {
    #[must_use]
    pub fn columns(&self) -> &[u8] {
        &self.columns
    }

    /// Whether a queen at (`row = columns.len()`, `col`) is unattacked.
    #[must_use]
    pub fn accepts(&self, col: u8) -> bool {
        let row = self.columns.len();
        self.columns.iter().enumerate().all(|(r, &c)| {
            c != col && (row - r) != usize::from(c.abs_diff(col))
        })
    }

    fn placed(&self, col: u8) -> Self {
        let mut columns = self.columns.clone();
        columns.push(col);
        Self { columns }
    }
}

impl StateIdentity for QueensStateV1 {
    fn identity_bytes(&self) -> Vec<u8> {
        IdentityWriter::new().bytes(&self.columns).finish()
    }

    fn to_json(&self) -> serde_json::Value {
        json!(self.columns)
    }
}

impl fmt::Display for QueensStateV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.columns)
    }
}

#[derive(Debug, Clone)]
pub struct NQueensWorld {
    n: u8,
}

impl NQueensWorld {
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidConfiguration`] if `n` is outside
    /// `1..=MAX_QUEENS`.
    pub fn new(n: u8) -> Result<Self, WorldConfigError> {
        if !(1..=MAX_QUEENS).contains(&n) {
            return Err(invalid(format!("board size {n} outside 1..={MAX_QUEENS}")));
        }
        Ok(Self { n })
    }

    #[must_use]
    pub fn size(&self) -> u8 {
        self.n
    }

    /// Full board, one row per line: `Q` for a queen, `.` otherwise.
    /// Unplaced rows are all dots.
    #[must_use]
    pub fn render_board(&self, state: &QueensStateV1) -> String {
        (0..usize::from(self.n))
            .map(|row| {
                let queen = state.columns.get(row).copied();
                (0..self.n)
                    .map(|col| if queen == Some(col) { "Q" } else { "." })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SearchProblemV1 for NQueensWorld {
    type State = QueensStateV1;

    fn successors(&self, state: &QueensStateV1) -> Vec<QueensStateV1> {
        if state.columns.len() >= usize::from(self.n) {
            return Vec::new();
        }
        (0..self.n)
            .filter(|&col| state.accepts(col))
            .map(|col| state.placed(col))
            .collect()
    }

    /// Every column in range and no two queens attacking.
    fn is_valid(&self, state: &QueensStateV1) -> bool {
        state.columns.len() <= usize::from(self.n)
            && state.columns.iter().enumerate().all(|(row, &col)| {
                col < self.n
                    && QueensStateV1 {
                        columns: state.columns[..row].to_vec(),
                    }
                    .accepts(col)
            })
    }

    fn is_goal(&self, state: &QueensStateV1) -> bool {
        state.columns.len() == usize::from(self.n)
    }
}

impl WorldHarnessV1 for NQueensWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "n_queens"
    }

    fn root_state(&self) -> QueensStateV1 {
        QueensStateV1::default()
    }

    fn render_state(&self, state: &QueensStateV1) -> String {
        self.render_board(state)
    }

    fn config_json(&self) -> serde_json::Value {
        json!({ "n": self.n })
    }
}
