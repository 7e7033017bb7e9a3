//! Cluster operations
//!
//! Neighbourhood flattening, subgraph extraction, graph set algebra, cliques
//! and connected components. Every operation that returns a [`Graph`] builds a
//! fresh copy with the same layout configuration; the source is never touched.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use petgraph::unionfind::UnionFind;

use crate::aggregate::{Graph, GraphResult, Node};

/// Items in first-seen order without repeats
pub fn unique<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Items of `a` also in `b`, in the order of `a`.
///
/// Every set helper keeps the order of its first operand, so
/// `node_intersection(x, y, _)` lists nodes as they appear around `x`.
pub fn intersection<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let b: HashSet<&T> = b.iter().collect();
    unique(a.iter().filter(|x| b.contains(x)).cloned())
}

/// Items of `a` followed by the items of `b` not in `a`
pub fn union<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    unique(a.iter().chain(b.iter()).cloned())
}

/// Items of `a` not in `b`, in the order of `a`
pub fn difference<T: Eq + Hash + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let b: HashSet<&T> = b.iter().collect();
    unique(a.iter().filter(|x| !b.contains(x)).cloned())
}

fn ids<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<&'a str> {
    nodes.into_iter().map(Node::id).collect()
}

impl Graph {
    /// The node and everything within `distance` hops, nearest first.
    ///
    /// Unknown ids flatten to nothing.
    pub fn flatten(&self, id: &str, distance: usize) -> Vec<&Node> {
        let Some(start) = self.node(id) else {
            return Vec::new();
        };
        let mut seen: HashSet<&str> = HashSet::from([start.id()]);
        let mut order = vec![start];
        let mut queue = VecDeque::from([(start, 0)]);

        while let Some((node, hops)) = queue.pop_front() {
            if hops == distance {
                continue;
            }
            for neighbor_id in node.links().iter() {
                if !seen.insert(neighbor_id) {
                    continue;
                }
                if let Some(neighbor) = self.node(neighbor_id) {
                    order.push(neighbor);
                    queue.push_back((neighbor, hops + 1));
                }
            }
        }
        order
    }

    /// A new graph with the given nodes and everything within `distance` hops.
    ///
    /// Edges between included nodes keep their weight, length, label and
    /// properties.
    pub fn subgraph<S: AsRef<str>>(&self, ids: &[S], distance: usize) -> GraphResult<Graph> {
        let mut members = Vec::new();
        for id in ids {
            let id = id.as_ref();
            self.get(id)?;
            members.extend(self.flatten(id, distance));
        }
        Ok(self.rebuild(members))
    }

    /// Subgraph around a single node
    pub fn sub(&self, id: &str, distance: usize) -> GraphResult<Graph> {
        self.subgraph(&[id], distance)
    }

    /// Subgraph around every node matching the predicate
    pub fn subgraph_where<F>(&self, predicate: F, distance: usize) -> Graph
    where
        F: Fn(&Node) -> bool,
    {
        let members = self
            .nodes()
            .filter(|n| predicate(n))
            .flat_map(|n| self.flatten(n.id(), distance))
            .collect();
        self.rebuild(members)
    }

    fn rebuild(&self, members: Vec<&Node>) -> Graph {
        let mut g = self.copy(true);
        let root = self.root().map(Node::id);
        for node in unique(members) {
            g.add_node_with(node.id(), node.options(root == Some(node.id())));
        }
        for edge in self.edges() {
            if g.contains(edge.node1()) && g.contains(edge.node2()) {
                g.add_edge(edge.node1(), edge.node2(), edge.options());
            }
        }
        g
    }

    /// All nodes and edges of both graphs.
    ///
    /// Nodes already present keep their own attributes. The other graph's
    /// root is adopted only when this graph has none.
    pub fn join(&self, other: &Graph) -> Graph {
        let mut g = self.copy(false);
        for node in other.nodes() {
            let root = g.root().is_none() && other.root() == Some(node);
            g.add_node_with(node.id(), node.options(root));
        }
        for edge in other.edges() {
            g.add_edge(edge.node1(), edge.node2(), edge.options());
        }
        g
    }

    /// Nodes present in both graphs with every edge between them from either
    pub fn intersect(&self, other: &Graph) -> Graph {
        let all = self.join(other);
        let nodes = intersection(&ids(self.nodes()), &ids(other.nodes()));
        all.rebuild(nodes.into_iter().filter_map(|id| all.node(id)).collect())
    }

    /// Nodes of this graph missing from the other, with the edges among them
    pub fn subtract(&self, other: &Graph) -> Graph {
        let all = self.join(other);
        let nodes = difference(&ids(self.nodes()), &ids(other.nodes()));
        all.rebuild(nodes.into_iter().filter_map(|id| all.node(id)).collect())
    }

    /// Neighbourhoods of both nodes in common
    pub fn node_intersection(&self, id1: &str, id2: &str, distance: usize) -> Vec<&Node> {
        intersection(&self.flatten(id1, distance), &self.flatten(id2, distance))
    }

    pub fn node_union(&self, id1: &str, id2: &str, distance: usize) -> Vec<&Node> {
        union(&self.flatten(id1, distance), &self.flatten(id2, distance))
    }

    pub fn node_difference(&self, id1: &str, id2: &str, distance: usize) -> Vec<&Node> {
        difference(&self.flatten(id1, distance), &self.flatten(id2, distance))
    }

    /// Leaves and nodes within `depth - 1` hops of a leaf.
    pub fn crown(&self, depth: usize) -> Vec<&Node> {
        let reach = depth.saturating_sub(1);
        unique(
            self.leaves()
                .into_iter()
                .flat_map(|leaf| self.flatten(leaf.id(), reach)),
        )
    }

    pub fn fringe(&self, depth: usize) -> Vec<&Node> {
        self.crown(depth)
    }

    /// Every node connected to every other node
    pub fn is_clique(&self) -> bool {
        self.density() == 1.0
    }

    /// Ids of a maximal clique containing `id`, grown greedily in node order.
    pub fn clique_members(&self, id: &str) -> Vec<&str> {
        let Some(start) = self.node(id) else {
            return Vec::new();
        };
        let mut members = vec![start.id()];
        for node in self.nodes() {
            let fits = members
                .iter()
                .all(|m| *m != node.id() && self.edge(node.id(), m).is_some());
            if fits {
                members.push(node.id());
            }
        }
        members
    }

    /// The clique containing `id`, plus nodes within `distance` hops of it
    pub fn clique(&self, id: &str, distance: usize) -> GraphResult<Graph> {
        self.get(id)?;
        self.subgraph(&self.clique_members(id), distance)
    }

    /// Distinct cliques of at least `threshold` nodes, in discovery order
    pub fn cliques(&self, threshold: usize, distance: usize) -> Vec<Graph> {
        let mut found: Vec<Vec<&str>> = Vec::new();
        for node in self.nodes() {
            let mut members = self.clique_members(node.id());
            if members.len() < threshold {
                continue;
            }
            members.sort_unstable();
            if !found.contains(&members) {
                found.push(members);
            }
        }
        found
            .iter()
            .filter_map(|members| self.subgraph(members, distance).ok())
            .collect()
    }

    /// Connected components, biggest first.
    pub fn partition(&self) -> Vec<Graph> {
        let nodes = self.nodes_map();
        let mut components = UnionFind::<usize>::new(nodes.len());
        for edge in self.edges() {
            if let (Some(a), Some(b)) = (
                nodes.get_index_of(edge.node1()),
                nodes.get_index_of(edge.node2()),
            ) {
                components.union(a, b);
            }
        }

        let mut groups: Vec<(usize, Vec<&Node>)> = Vec::new();
        for (index, node) in nodes.values().enumerate() {
            let label = components.find(index);
            match groups.iter_mut().find(|(l, _)| *l == label) {
                Some((_, members)) => members.push(node),
                None => groups.push((label, vec![node])),
            }
        }
        // Stable: equally sized components keep first-appearance order.
        groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        groups
            .into_iter()
            .map(|(_, members)| self.rebuild(members))
            .collect()
    }

    pub fn split(&self) -> Vec<Graph> {
        self.partition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{EdgeOptions, GraphError};

    fn two_triangles() -> Graph {
        let mut g = Graph::new();
        for (a, b) in [("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "e"), ("e", "c")] {
            g.add_edge(a, b, EdgeOptions::new().weight(0.25));
        }
        g
    }

    #[test]
    fn test_set_helpers_keep_order() {
        let a = ["x", "y", "z", "y"];
        let b = ["z", "w"];

        assert_eq!(unique(a), vec!["x", "y", "z"]);
        assert_eq!(intersection(&a, &b), vec!["z"]);
        assert_eq!(union(&a, &b), vec!["x", "y", "z", "w"]);
        assert_eq!(difference(&a, &b), vec!["x", "y"]);
        assert_eq!(intersection(&["z", "y", "x"], &a), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_flatten_breadth_first() {
        let g = two_triangles();

        assert_eq!(ids(g.flatten("a", 0)), vec!["a"]);
        assert_eq!(ids(g.flatten("a", 1)), vec!["a", "b", "c"]);
        assert_eq!(ids(g.flatten("a", 2)), vec!["a", "b", "c", "d", "e"]);
        assert!(g.flatten("missing", 3).is_empty());
    }

    #[test]
    fn test_subgraph_round_trip() {
        let g = two_triangles();
        let sub = g.sub("a", 1).unwrap();

        assert_eq!(sub.node_ids(), vec!["a", "b", "c"]);
        assert_eq!(sub.edge_count(), 3);
        for edge in sub.edges() {
            let original = g.edge(edge.node1(), edge.node2()).unwrap();
            assert_eq!(edge.weight(), original.weight());
            assert_eq!(edge.length(), original.length());
        }
        assert!(g.contains("d"));
    }

    #[test]
    fn test_subgraph_unknown_id() {
        let g = two_triangles();
        assert!(matches!(
            g.subgraph(&["a", "nope"], 1),
            Err(GraphError::NodeNotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_subgraph_where() {
        let mut g = two_triangles();
        g.node_mut("e").unwrap().category = "end".to_string();

        let sub = g.subgraph_where(|n| n.category == "end", 0);
        assert_eq!(sub.node_ids(), vec!["e"]);
        assert_eq!(sub.edge_count(), 0);
    }

    #[test]
    fn test_graph_algebra() {
        let mut left = Graph::new();
        left.add_edge("a", "b", EdgeOptions::default());
        left.add_edge("b", "c", EdgeOptions::default());
        let mut right = Graph::new();
        right.add_edge("b", "c", EdgeOptions::default());
        right.add_edge("c", "d", EdgeOptions::new().weight(0.9));
        right.add_edge("d", "b", EdgeOptions::default());

        let joined = left.join(&right);
        assert_eq!(joined.node_ids(), vec!["a", "b", "c", "d"]);
        assert_eq!(joined.edge("c", "d").unwrap().weight(), 0.9);

        let both = left.intersect(&right);
        assert_eq!(both.node_ids(), vec!["b", "c"]);
        assert_eq!(both.edge_count(), 1);

        let only_left = left.subtract(&right);
        assert_eq!(only_left.node_ids(), vec!["a"]);
        assert_eq!(only_left.edge_count(), 0);
    }

    #[test]
    fn test_node_set_algebra() {
        let g = two_triangles();
        assert_eq!(ids(g.node_intersection("a", "d", 1)), vec!["c"]);
        assert_eq!(ids(g.node_union("a", "d", 1)), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(ids(g.node_difference("a", "d", 1)), vec!["a", "b"]);
    }

    #[test]
    fn test_cliques() {
        let g = two_triangles();
        assert!(!g.is_clique());
        assert_eq!(g.clique_members("a"), vec!["a", "b", "c"]);

        let clique = g.clique("d", 0).unwrap();
        assert!(clique.is_clique());
        assert_eq!(clique.node_ids(), vec!["d", "c", "e"]);

        let all = g.cliques(3, 0);
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(Graph::is_clique));
        assert!(g.cliques(4, 0).is_empty());
    }

    #[test]
    fn test_partition_biggest_first() {
        let mut g = Graph::new();
        g.add_edge("x", "y", EdgeOptions::default());
        g.add_node("lonely");
        g.add_edge("a", "b", EdgeOptions::default());
        g.add_edge("b", "c", EdgeOptions::default());

        let parts = g.split();
        let sizes: Vec<usize> = parts.iter().map(Graph::len).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
        assert_eq!(parts[0].node_ids(), vec!["a", "b", "c"]);
        assert_eq!(parts[0].edge_count(), 2);
    }

    #[test]
    fn test_crown() {
        let mut g = Graph::new();
        g.add_edge("leaf", "mid", EdgeOptions::default());
        g.add_edge("mid", "core1", EdgeOptions::default());
        g.add_edge("core1", "core2", EdgeOptions::default());
        g.add_edge("core2", "mid", EdgeOptions::default());

        assert_eq!(ids(g.crown(1)), vec!["leaf"]);
        assert_eq!(ids(g.fringe(2)), vec!["leaf", "mid"]);
    }
}
