//! Single-pair shortest paths
//!
//! Edge `length` is the traversal cost. Edge `weight` is importance and plays
//! no part in path finding.

use petgraph::algo::astar;
use petgraph::graph::NodeIndex;

use super::project;
use crate::aggregate::{Graph, Node};

/// Estimate of the remaining cost from a node (first argument) to the target.
///
/// Must never overestimate for the returned path to be the shortest.
pub type Heuristic<'a> = &'a dyn Fn(&Node, &Node) -> f64;

impl Graph {
    /// Ids along the cheapest path from `from` to `to`, both included.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<Vec<&str>> {
        self.shortest_path_with(from, to, None)
    }

    /// Shortest path guided by an A* heuristic; plain Dijkstra without one.
    pub fn shortest_path_with(
        &self,
        from: &str,
        to: &str,
        heuristic: Option<Heuristic<'_>>,
    ) -> Option<Vec<&str>> {
        let nodes = self.nodes_map();
        let (_, path) = self.search(from, to, heuristic)?;
        Some(path.into_iter().map(|i| nodes[i.index()].id()).collect())
    }

    /// Total length of the shortest path
    pub fn path_cost(&self, from: &str, to: &str) -> Option<f64> {
        self.search(from, to, None).map(|(cost, _)| cost)
    }

    fn search(
        &self,
        from: &str,
        to: &str,
        heuristic: Option<Heuristic<'_>>,
    ) -> Option<(f64, Vec<NodeIndex>)> {
        let nodes = self.nodes_map();
        let start = nodes.get_index_of(from)?;
        let goal = nodes.get_index_of(to)?;
        let target = &nodes[goal];
        let projection = project(self);

        astar(
            &projection,
            NodeIndex::new(start),
            |n| n.index() == goal,
            |e| *e.weight(),
            |n| heuristic.map_or(0.0, |h| h(&nodes[n.index()], target)),
        )
    }
}
