//! Two-jug measuring puzzle.
//!
//! Every move costs 1. Moves that leave the state unchanged (filling a full
//! jug, pouring into a full one) are still generated; the visited set absorbs
//! them.

use std::fmt;

use serde_json::json;
use statespace_kernel::carrier::state::{IdentityWriter, StateIdentity};
use statespace_search::contract::SearchProblemV1;

use crate::contract::{invalid, WorldConfigError, WorldHarnessV1};

/// Water in each jug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JugStateV1 {
    pub a: u32,
    pub b: u32,
}

impl StateIdentity for JugStateV1 {
    fn identity_bytes(&self) -> Vec<u8> {
        IdentityWriter::new().u32(self.a).u32(self.b).finish()
    }

    fn to_json(&self) -> serde_json::Value {
        json!([self.a, self.b])
    }
}

impl fmt::Display for JugStateV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

#[derive(Debug, Clone)]
pub struct WaterJugWorld {
    capacity_a: u32,
    capacity_b: u32,
    target: u32,
}

impl WaterJugWorld {
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidConfiguration`] if a capacity is
    /// zero or the target exceeds both capacities.
    pub fn new(capacity_a: u32, capacity_b: u32, target: u32) -> Result<Self, WorldConfigError> {
        if capacity_a == 0 || capacity_b == 0 {
            return Err(invalid("jug capacities must be positive"));
        }
        if target > capacity_a.max(capacity_b) {
            return Err(invalid(format!(
                "target {target} exceeds both capacities ({capacity_a}, {capacity_b})"
            )));
        }
        Ok(Self {
            capacity_a,
            capacity_b,
            target,
        })
    }
}

impl SearchProblemV1 for WaterJugWorld {
    type State = JugStateV1;

    /// Fill a, fill b, empty a, empty b, pour a→b, pour b→a.
    fn successors(&self, s: &JugStateV1) -> Vec<JugStateV1> {
        let a_to_b = s.a.min(self.capacity_b - s.b);
        let b_to_a = s.b.min(self.capacity_a - s.a);
        vec![
            JugStateV1 {
                a: self.capacity_a,
                b: s.b,
            },
            JugStateV1 {
                a: s.a,
                b: self.capacity_b,
            },
            JugStateV1 { a: 0, b: s.b },
            JugStateV1 { a: s.a, b: 0 },
            JugStateV1 {
                a: s.a - a_to_b,
                b: s.b + a_to_b,
            },
            JugStateV1 {
                a: s.a + b_to_a,
                b: s.b - b_to_a,
            },
        ]
    }

    fn is_valid(&self, s: &JugStateV1) -> bool {
        s.a <= self.capacity_a && s.b <= self.capacity_b
    }

    fn is_goal(&self, s: &JugStateV1) -> bool {
        s.a == self.target || s.b == self.target
    }

    /// `|a - target| + |b - target|`. Not admissible in general.
    fn heuristic(&self, s: &JugStateV1) -> i64 {
        i64::from(s.a.abs_diff(self.target)) + i64::from(s.b.abs_diff(self.target))
    }
}

impl WorldHarnessV1 for WaterJugWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "water_jug"
    }

    fn root_state(&self) -> JugStateV1 {
        JugStateV1 { a: 0, b: 0 }
    }

    fn render_state(&self, state: &JugStateV1) -> String {
        state.to_string()
    }

    fn config_json(&self) -> serde_json::Value {
        json!({
            "capacity_a": self.capacity_a,
            "capacity_b": self.capacity_b,
            "target": self.target,
        })
    }
}
