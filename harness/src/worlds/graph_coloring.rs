//! Graph m-coloring by backtracking.
//!
//! Vertices are colored in ascending label order. A state is the color
//! prefix for the first `k` vertices; successors try colors `1..=m` on
//! vertex `k`, skipping any color already used by a colored neighbor.

use std::fmt;

use petgraph::graphmap::UnGraphMap;
use serde_json::json;
use statespace_kernel::carrier::state::{IdentityWriter, StateIdentity};
use statespace_search::contract::SearchProblemV1;

use crate::contract::{invalid, WorldConfigError, WorldHarnessV1};

/// Colors assigned so far, indexed by vertex position in label order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ColoringStateV1 {
    colors: Vec<u8>,
}

impl ColoringStateV1 {
    #[must_use]
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }
}

impl StateIdentity for ColoringStateV1 {
    fn identity_bytes(&self) -> Vec<u8> {
        IdentityWriter::new().bytes(&self.colors).finish()
    }

    fn to_json(&self) -> serde_json::Value {
        json!(self.colors)
    }
}

impl fmt::Display for ColoringStateV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.colors)
    }
}

#[derive(Debug, Clone)]
pub struct GraphColoringWorld {
    graph: UnGraphMap<u32, ()>,
    /// Node labels in ascending order; position is the coloring order.
    vertices: Vec<u32>,
    max_colors: u8,
}

impl GraphColoringWorld {
    /// Color the vertices touched by `edges`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::with_vertices`].
    pub fn new(edges: &[(u32, u32)], max_colors: u8) -> Result<Self, WorldConfigError> {
        Self::with_vertices(&[], edges, max_colors)
    }

    /// Color `vertices` plus every edge endpoint. Listed vertices need not
    /// touch an edge; isolated ones take color 1 first like any other.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidConfiguration`] if the graph has no
    /// vertices, `max_colors` is zero, or an edge is a self-loop (which no
    /// coloring can satisfy).
    pub fn with_vertices(
        vertices: &[u32],
        edges: &[(u32, u32)],
        max_colors: u8,
    ) -> Result<Self, WorldConfigError> {
        if max_colors == 0 {
            return Err(invalid("at least one color is required"));
        }
        if let Some((u, _)) = edges.iter().find(|(u, v)| u == v) {
            return Err(invalid(format!("vertex {u} has a self-loop")));
        }
        let mut graph: UnGraphMap<u32, ()> = UnGraphMap::from_edges(edges.iter().copied());
        for &vertex in vertices {
            graph.add_node(vertex);
        }
        if graph.node_count() == 0 {
            return Err(invalid("graph has no vertices"));
        }
        let mut vertices: Vec<u32> = graph.nodes().collect();
        vertices.sort_unstable();
        Ok(Self {
            graph,
            vertices,
            max_colors,
        })
    }

    #[must_use]
    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    /// `(vertex label, color)` pairs for the colored prefix.
    #[must_use]
    pub fn assignment(&self, state: &ColoringStateV1) -> Vec<(u32, u8)> {
        self.vertices
            .iter()
            .copied()
            .zip(state.colors.iter().copied())
            .collect()
    }

    /// Whether `vertices[index]` may take `color` given `colors` for the
    /// vertices before it.
    fn color_fits(&self, colors: &[u8], index: usize, color: u8) -> bool {
        let vertex = self.vertices[index];
        self.graph.neighbors(vertex).all(|neighbor| {
            match self.vertices.binary_search(&neighbor) {
                Ok(j) if j < colors.len() && j != index => colors[j] != color,
                _ => true,
            }
        })
    }
}

impl SearchProblemV1 for GraphColoringWorld {
    type State = ColoringStateV1;

    fn successors(&self, state: &ColoringStateV1) -> Vec<ColoringStateV1> {
        let index = state.colors.len();
        if index >= self.vertices.len() {
            return Vec::new();
        }
        (1..=self.max_colors)
            .filter(|&color| self.color_fits(&state.colors, index, color))
            .map(|color| {
                let mut colors = state.colors.clone();
                colors.push(color);
                ColoringStateV1 { colors }
            })
            .collect()
    }

    fn is_valid(&self, state: &ColoringStateV1) -> bool {
        state.colors.len() <= self.vertices.len()
            && state.colors.iter().enumerate().all(|(i, &color)| {
                (1..=self.max_colors).contains(&color)
                    && self.color_fits(&state.colors[..i], i, color)
            })
    }

    fn is_goal(&self, state: &ColoringStateV1) -> bool {
        state.colors.len() == self.vertices.len()
    }
}

impl WorldHarnessV1 for GraphColoringWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "graph_coloring"
    }

    fn root_state(&self) -> ColoringStateV1 {
        ColoringStateV1::default()
    }

    fn render_state(&self, state: &ColoringStateV1) -> String {
        state.to_string()
    }

    fn config_json(&self) -> serde_json::Value {
        let mut edges: Vec<(u32, u32)> = self
            .graph
            .all_edges()
            .map(|(u, v, _)| (u.min(v), u.max(v)))
            .collect();
        edges.sort_unstable();
        json!({
            "edges": edges.iter().map(|(u, v)| json!([u, v])).collect::<Vec<_>>(),
            "max_colors": self.max_colors,
            "vertices": self.vertices,
        })
    }
}
