//! Proximity algorithms over the graph store
//!
//! Path search and partitioning run on a `petgraph` projection of the store;
//! centrality and reachability walk the node links directly.

pub mod centrality;
pub mod shortest_path;

pub use centrality::EigenvectorOptions;
pub use shortest_path::Heuristic;

use std::collections::HashSet;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::aggregate::{Edge, Graph, Node};

/// Undirected petgraph view of a graph.
///
/// Node index `i` is the `i`-th node of the graph in insertion order and the
/// edge weight is the edge length.
pub(crate) fn project(graph: &Graph) -> UnGraph<(), f64> {
    let nodes = graph.nodes_map();
    let mut projection = UnGraph::with_capacity(graph.len(), graph.edge_count());
    for _ in 0..nodes.len() {
        projection.add_node(());
    }
    for edge in graph.edges() {
        let (Some(a), Some(b)) = (
            nodes.get_index_of(edge.node1()),
            nodes.get_index_of(edge.node2()),
        ) else {
            debug_assert!(false, "edge {} references a missing node", edge.id());
            continue;
        };
        projection.add_edge(NodeIndex::new(a), NodeIndex::new(b), edge.length());
    }
    projection
}

impl Graph {
    /// Nodes reachable from `id` in depth-first order, starting with `id`.
    ///
    /// A neighbour is entered only when `traversable(current, edge)` holds,
    /// where `current` is the node being left and `edge` leads to the
    /// neighbour.
    pub fn depth_first<F>(&self, id: &str, traversable: F) -> Vec<&Node>
    where
        F: Fn(&Node, &Edge) -> bool,
    {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        if let Some(start) = self.node(id) {
            self.visit(start, &traversable, &mut visited, &mut order);
        }
        order
    }

    fn visit<'a, F>(
        &'a self,
        node: &'a Node,
        traversable: &F,
        visited: &mut HashSet<&'a str>,
        order: &mut Vec<&'a Node>,
    ) where
        F: Fn(&Node, &Edge) -> bool,
    {
        if !visited.insert(node.id()) {
            return;
        }
        order.push(node);
        for neighbor_id in node.links().iter() {
            let Some(neighbor) = self.node(neighbor_id) else {
                continue;
            };
            let Some(edge) = node
                .links()
                .edge(neighbor_id)
                .and_then(|e| self.edge_by_id(e))
            else {
                continue;
            };
            if traversable(node, edge) {
                self.visit(neighbor, traversable, visited, order);
            }
        }
    }

    /// Whether a path leads from `from` to `to` over traversable edges.
    ///
    /// Passing `|node, edge| node.id() == edge.node1()` follows edges in their
    /// stored direction only.
    pub fn can_reach<F>(&self, from: &str, to: &str, traversable: F) -> bool
    where
        F: Fn(&Node, &Edge) -> bool,
    {
        if !self.contains(to) {
            return false;
        }
        self.depth_first(from, traversable)
            .iter()
            .any(|n| n.id() == to)
    }

    /// Reachability over every edge
    pub fn is_connected(&self, from: &str, to: &str) -> bool {
        self.can_reach(from, to, |_, _| true)
    }
}
