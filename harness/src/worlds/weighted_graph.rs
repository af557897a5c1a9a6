//! Shortest path on an undirected weighted graph.
//!
//! The state is a node label. Neighbors are generated in ascending label
//! order and each step costs the edge weight.

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use statespace_search::contract::SearchProblemV1;

use crate::contract::{invalid, WorldConfigError, WorldHarnessV1};

/// Remaining-cost estimate used by [`WeightedGraphWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphHeuristicV1 {
    /// `|goal - node|` on the labels. Cheap, but only admissible when labels
    /// happen to underestimate path cost.
    #[default]
    LabelDistance,
    /// Always 0: best-first search degenerates to uniform-cost search and the
    /// returned path is cost-optimal.
    Zero,
}

impl GraphHeuristicV1 {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LabelDistance => "label_distance",
            Self::Zero => "zero",
        }
    }
}

/// Shape of a graph built by [`WeightedGraphWorld::random_sparse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparseGraphConfigV1 {
    /// Nodes are labeled `0..nodes`.
    pub nodes: u32,
    /// Target edge count as a percentage of the complete graph's.
    pub density_percent: u8,
    /// Edge weights are drawn from `1..=max_weight`.
    pub max_weight: i64,
}

impl Default for SparseGraphConfigV1 {
    fn default() -> Self {
        Self {
            nodes: 20,
            density_percent: 20,
            max_weight: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeightedGraphWorld {
    graph: UnGraphMap<u32, i64>,
    start: u32,
    goal: u32,
    heuristic: GraphHeuristicV1,
}

impl WeightedGraphWorld {
    /// Build from `(u, v, weight)` edges. `start` and `goal` are added as
    /// nodes even if no edge touches them. A repeated edge keeps the last
    /// weight.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidConfiguration`] on a negative
    /// weight.
    pub fn new(edges: &[(u32, u32, i64)], start: u32, goal: u32) -> Result<Self, WorldConfigError> {
        let mut graph = UnGraphMap::with_capacity(edges.len() + 2, edges.len());
        graph.add_node(start);
        graph.add_node(goal);
        for &(u, v, w) in edges {
            if w < 0 {
                return Err(invalid(format!("edge ({u}, {v}) has negative weight {w}")));
            }
            graph.add_edge(u, v, w);
        }
        Ok(Self {
            graph,
            start,
            goal,
            heuristic: GraphHeuristicV1::default(),
        })
    }

    /// A connected random graph with a random start and a distinct goal,
    /// reproducible from `seed`.
    ///
    /// Every node is first threaded onto one shuffled chain, which keeps the
    /// graph connected. Random extra edges are then added until the edge
    /// count reaches `density_percent` of `nodes * (nodes - 1) / 2`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldConfigError::InvalidConfiguration`] if there are fewer
    /// than two nodes, the density exceeds 100, or `max_weight` is below 1.
    pub fn random_sparse(config: &SparseGraphConfigV1, seed: u64) -> Result<Self, WorldConfigError> {
        let SparseGraphConfigV1 {
            nodes,
            density_percent,
            max_weight,
        } = *config;
        if nodes < 2 {
            return Err(invalid(format!("need at least 2 nodes, got {nodes}")));
        }
        if density_percent > 100 {
            return Err(invalid(format!("density {density_percent}% exceeds 100%")));
        }
        if max_weight < 1 {
            return Err(invalid(format!("max_weight {max_weight} is below 1")));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut order: Vec<u32> = (0..nodes).collect();
        order.shuffle(&mut rng);

        let n = u64::from(nodes);
        let target = n * (n - 1) * u64::from(density_percent) / 200;
        let mut graph = UnGraphMap::with_capacity(order.len(), order.len());
        for pair in order.windows(2) {
            graph.add_edge(pair[0], pair[1], rng.gen_range(1..=max_weight));
        }
        while (graph.edge_count() as u64) < target {
            let u = rng.gen_range(0..nodes);
            let v = rng.gen_range(0..nodes);
            if u != v && !graph.contains_edge(u, v) {
                graph.add_edge(u, v, rng.gen_range(1..=max_weight));
            }
        }

        let start = rng.gen_range(0..nodes);
        let goal = (start + rng.gen_range(1..nodes)) % nodes;
        Ok(Self {
            graph,
            start,
            goal,
            heuristic: GraphHeuristicV1::default(),
        })
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: GraphHeuristicV1) -> Self {
        self.heuristic = heuristic;
        self
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
    }

    #[must_use]
    pub fn goal(&self) -> u32 {
        self.goal
    }

    /// Whether every node is reachable from every other.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.graph.nodes().next() else {
            return true;
        };
        let mut bfs = Bfs::new(&self.graph, first);
        let mut reached = 0;
        while bfs.next(&self.graph).is_some() {
            reached += 1;
        }
        reached == self.graph.node_count()
    }

    /// Edges as `(min label, max label, weight)`, sorted.
    #[must_use]
    pub fn sorted_edges(&self) -> Vec<(u32, u32, i64)> {
        let mut edges: Vec<(u32, u32, i64)> = self
            .graph
            .all_edges()
            .map(|(u, v, &w)| (u.min(v), u.max(v), w))
            .collect();
        edges.sort_unstable();
        edges
    }
}

impl SearchProblemV1 for WeightedGraphWorld {
    type State = u32;

    fn successors(&self, node: &u32) -> Vec<u32> {
        let mut neighbors: Vec<u32> = self.graph.neighbors(*node).collect();
        neighbors.sort_unstable();
        neighbors
    }

    fn is_valid(&self, node: &u32) -> bool {
        self.graph.contains_node(*node)
    }

    fn is_goal(&self, node: &u32) -> bool {
        *node == self.goal
    }

    fn heuristic(&self, node: &u32) -> i64 {
        match self.heuristic {
            GraphHeuristicV1::LabelDistance => i64::from(self.goal.abs_diff(*node)),
            GraphHeuristicV1::Zero => 0,
        }
    }

    fn step_cost(&self, from: &u32, to: &u32) -> i64 {
        self.graph
            .edge_weight(*from, *to)
            .copied()
            .unwrap_or(i64::MAX)
    }
}

impl WorldHarnessV1 for WeightedGraphWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "weighted_graph"
    }

    fn root_state(&self) -> u32 {
        self.start
    }

    fn render_state(&self, state: &u32) -> String {
        state.to_string()
    }

    fn config_json(&self) -> serde_json::Value {
        let mut nodes: Vec<u32> = self.graph.nodes().collect();
        nodes.sort_unstable();
        json!({
            "edges": self
                .sorted_edges()
                .iter()
                .map(|(u, v, w)| json!([u, v, w]))
                .collect::<Vec<_>>(),
            "goal": self.goal,
            "heuristic": self.heuristic.as_str(),
            "nodes": nodes,
            "start": self.start,
        })
    }
}
