//! Missionaries and cannibals river crossing.
//!
//! The boat carries `1..=boat_capacity` people from the bank it is on. A
//! bank is unsafe when it has missionaries and they are outnumbered by
//! cannibals; unsafe states are never generated.

use std::fmt;

use serde_json::json;
use statespace_kernel::carrier::state::{IdentityWriter, StateIdentity};
use statespace_search::contract::SearchProblemV1;

use crate::contract::{invalid, WorldConfigError, WorldHarnessV1};

/// Boat loads as `(missionaries, cannibals)`, tried in this order.
const LOADS: [(u32, u32); 5] = [(1, 0), (2, 0), (0, 1), (0, 2), (1, 1)];

/// Head counts on each bank and the boat's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiverStateV1 {
    pub m_left: u32,
    pub c_left: u32,
    pub boat_left: bool,
    pub m_right: u32,
    pub c_right: u32,
}

impl RiverStateV1 {
    /// Whether no bank has missionaries outnumbered by cannibals.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        let bank_ok = |m: u32, c: u32| m == 0 || m >= c;
        bank_ok(self.m_left, self.c_left) && bank_ok(self.m_right, self.c_right)
    }

    /// Move `m` missionaries and `c` cannibals across with the boat.
    /// `None` if the boat's bank does not have them.
    fn cross(&self, m: u32, c: u32) -> Option<Self> {
        if self.boat_left {
            Some(Self {
                m_left: self.m_left.checked_sub(m)?,
                c_left: self.c_left.checked_sub(c)?,
                boat_left: false,
                m_right: self.m_right + m,
                c_right: self.c_right + c,
            })
        } else {
            Some(Self {
                m_left: self.m_left + m,
                c_left: self.c_left + c,
                boat_left: true,
                m_right: self.m_right.checked_sub(m)?,
                c_right: self.c_right.checked_sub(c)?,
            })
        }
    }
}

impl StateIdentity for RiverStateV1 {
    fn identity_bytes(&self) -> Vec<u8> {
        IdentityWriter::new()
            .u32(self.m_left)
            .u32(self.c_left)
            .bool(self.boat_left)
            .u32(self.m_right)
            .u32(self.c_right)
            .finish()
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "boat_left": self.boat_left,
            "c_left": self.c_left,
            "c_right": self.c_right,
            "m_left": self.m_left,
            "m_right": self.m_right,
        })
    }
}

impl fmt::Display for RiverStateV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let boat = if self.boat_left { "B" } else { " " };
        write!(
            f,
            "[M:{} C:{}] {boat}~~~ [M:{} C:{}]",
            self.m_left, self.c_left, self.m_right, self.c_right
        )
    }
}

#[derive(Debug, Clone)]
pub struct MissionariesWorld {
    missionaries: u32,
    cannibals: u32,
    boat_capacity: u32,
    initial: RiverStateV1,
    goal: RiverStateV1,
}

impl MissionariesWorld {
    /// Everyone starts on the left bank with the boat; the goal is everyone
    /// on the right bank with the boat.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidConfiguration`] if the boat
    /// capacity is zero or nobody needs to cross.
    pub fn new(
        missionaries: u32,
        cannibals: u32,
        boat_capacity: u32,
    ) -> Result<Self, WorldConfigError> {
        if boat_capacity == 0 {
            return Err(invalid("boat capacity must be at least 1"));
        }
        if missionaries == 0 && cannibals == 0 {
            return Err(invalid("at least one person must cross"));
        }
        Ok(Self {
            missionaries,
            cannibals,
            boat_capacity,
            initial: RiverStateV1 {
                m_left: missionaries,
                c_left: cannibals,
                boat_left: true,
                m_right: 0,
                c_right: 0,
            },
            goal: RiverStateV1 {
                m_left: 0,
                c_left: 0,
                boat_left: false,
                m_right: missionaries,
                c_right: cannibals,
            },
        })
    }

    /// Replace the initial state, given the left-bank counts.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidConfiguration`] if the state is
    /// out of range or unsafe.
    pub fn with_initial(
        mut self,
        m_left: u32,
        c_left: u32,
        boat_left: bool,
    ) -> Result<Self, WorldConfigError> {
        self.initial = self.bank_state("initial", m_left, c_left, boat_left)?;
        Ok(self)
    }

    /// Replace the goal state, given the left-bank counts.
    ///
    /// # Errors
    ///
    /// Same as [`Self::with_initial`].
    pub fn with_goal(
        mut self,
        m_left: u32,
        c_left: u32,
        boat_left: bool,
    ) -> Result<Self, WorldConfigError> {
        self.goal = self.bank_state("goal", m_left, c_left, boat_left)?;
        Ok(self)
    }

    #[must_use]
    pub fn goal(&self) -> RiverStateV1 {
        self.goal
    }

    fn bank_state(
        &self,
        which: &str,
        m_left: u32,
        c_left: u32,
        boat_left: bool,
    ) -> Result<RiverStateV1, WorldConfigError> {
        if m_left > self.missionaries || c_left > self.cannibals {
            return Err(invalid(format!(
                "{which} state has more people on the left bank than exist"
            )));
        }
        let state = RiverStateV1 {
            m_left,
            c_left,
            boat_left,
            m_right: self.missionaries - m_left,
            c_right: self.cannibals - c_left,
        };
        if !state.is_safe() {
            return Err(invalid(format!("{which} state {state} is unsafe")));
        }
        Ok(state)
    }
}

impl SearchProblemV1 for MissionariesWorld {
    type State = RiverStateV1;

    fn successors(&self, state: &RiverStateV1) -> Vec<RiverStateV1> {
        LOADS
            .iter()
            .filter(|(m, c)| m + c <= self.boat_capacity)
            .filter_map(|&(m, c)| state.cross(m, c))
            .filter(|next| self.is_valid(next))
            .collect()
    }

    /// Counts conserved on both banks and both banks safe.
    fn is_valid(&self, s: &RiverStateV1) -> bool {
        s.m_left + s.m_right == self.missionaries
            && s.c_left + s.c_right == self.cannibals
            && s.is_safe()
    }

    fn is_goal(&self, s: &RiverStateV1) -> bool {
        *s == self.goal
    }
}

impl WorldHarnessV1 for MissionariesWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "missionaries"
    }

    fn root_state(&self) -> RiverStateV1 {
        self.initial
    }

    fn render_state(&self, state: &RiverStateV1) -> String {
        state.to_string()
    }

    fn config_json(&self) -> serde_json::Value {
        json!({
            "boat_capacity": self.boat_capacity,
            "cannibals": self.cannibals,
            "goal": self.goal.to_json(),
            "initial": self.initial.to_json(),
            "missionaries": self.missionaries,
        })
    }
}
