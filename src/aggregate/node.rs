//! Graph nodes and their adjacency links

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::edge::EdgeId;
use crate::value_objects::{Centrality, Position2D, Properties};

/// Radius every node gets unless told otherwise; also the unit of the
/// graph's pixel distance scale.
pub const DEFAULT_NODE_RADIUS: f64 = 8.0;

/// Style name assigned to fresh nodes
pub const DEFAULT_STYLE: &str = "default";

/// Construction options for [`Graph::add_node_with`](crate::Graph::add_node_with)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeOptions {
    pub radius: f64,
    pub style: String,
    pub category: String,
    /// Display text; the id is used when absent
    pub label: Option<String>,
    /// Make this node the graph's root
    pub root: bool,
    pub properties: Properties,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_NODE_RADIUS,
            style: DEFAULT_STYLE.to_string(),
            category: String::new(),
            label: None,
            root: false,
            properties: Properties::new(),
        }
    }
}

impl NodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn root(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }
}

/// Ordered neighbour list of a node, with the edge behind each neighbour.
///
/// A neighbour appears once per connecting edge, so the orientation-flipped
/// duplicate edges allowed by `add_edge` show up twice. The side table keeps
/// the most recently attached edge for each neighbour id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Links {
    neighbors: Vec<String>,
    edges: HashMap<String, EdgeId>,
}

impl Links {
    pub(crate) fn append(&mut self, neighbor: &str, edge: EdgeId) {
        self.edges.insert(neighbor.to_string(), edge);
        self.neighbors.push(neighbor.to_string());
    }

    /// Drops one occurrence of `neighbor`; the side-table entry goes once no
    /// occurrence is left.
    pub(crate) fn remove(&mut self, neighbor: &str) {
        if let Some(pos) = self.neighbors.iter().position(|n| n == neighbor) {
            self.neighbors.remove(pos);
        }
        if !self.contains(neighbor) {
            self.edges.remove(neighbor);
        }
    }

    /// Edge leading to the given neighbour
    pub fn edge(&self, neighbor: &str) -> Option<EdgeId> {
        self.edges.get(neighbor).copied()
    }

    pub fn contains(&self, neighbor: &str) -> bool {
        self.neighbors.iter().any(|n| n == neighbor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.neighbors.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

/// A node with a unique id in the graph.
///
/// Its position is calculated by the graph's layout; radius and style define
/// how the style collaborator draws it.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    pub label: String,
    pub category: String,
    pub radius: f64,
    pub style: String,
    pub properties: Properties,
    pub(crate) links: Links,

    /// Layout-space position
    pub vx: f64,
    pub vy: f64,
    /// Force accumulated during the current layout iteration
    pub force: Position2D,

    pub(crate) betweenness: Centrality,
    pub(crate) eigenvalue: Centrality,
}

impl Node {
    pub(crate) fn new(id: String, options: NodeOptions) -> Self {
        let label = options.label.unwrap_or_else(|| id.clone());
        Self {
            id,
            label,
            category: options.category,
            radius: options.radius,
            style: options.style,
            properties: options.properties,
            links: Links::default(),
            vx: 0.0,
            vy: 0.0,
            force: Position2D::ZERO,
            betweenness: Centrality::Uncomputed,
            eigenvalue: Centrality::Uncomputed,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Number of edges touching this node
    pub fn degree(&self) -> usize {
        self.links.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.links.len() == 1
    }

    /// Cached betweenness; see [`Graph::betweenness`](crate::Graph::betweenness)
    /// for the computing reader.
    pub fn betweenness(&self) -> Centrality {
        self.betweenness
    }

    /// Cached eigenvector centrality; see
    /// [`Graph::eigenvalue`](crate::Graph::eigenvalue) for the computing reader.
    pub fn eigenvalue(&self) -> Centrality {
        self.eigenvalue
    }

    pub fn position(&self) -> Position2D {
        Position2D::new(self.vx, self.vy)
    }

    /// Options that rebuild this node in another graph
    pub(crate) fn options(&self, root: bool) -> NodeOptions {
        NodeOptions {
            radius: self.radius,
            style: self.style.clone(),
            category: self.category.clone(),
            label: Some(self.label.clone()),
            root,
            properties: self.properties.clone(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_defaults() {
        let node = Node::new("a".to_string(), NodeOptions::default());

        assert_eq!(node.id(), "a");
        assert_eq!(node.label, "a");
        assert_eq!(node.radius, DEFAULT_NODE_RADIUS);
        assert_eq!(node.style, DEFAULT_STYLE);
        assert!(!node.betweenness().is_computed());
        assert!(node.links().is_empty());
    }

    #[test]
    fn test_node_equality_by_id() {
        let a = Node::new("a".to_string(), NodeOptions::new().label("first"));
        let b = Node::new("a".to_string(), NodeOptions::new().radius(20.0));

        assert_eq!(a, b);
    }

    #[test]
    fn test_links_duplicates() {
        let mut links = Links::default();
        links.append("b", EdgeId(1));
        links.append("b", EdgeId(2));

        assert_eq!(links.len(), 2);
        assert_eq!(links.edge("b"), Some(EdgeId(2)));

        links.remove("b");
        assert!(links.contains("b"));
        links.remove("b");
        assert!(!links.contains("b"));
        assert_eq!(links.edge("b"), None);
    }
}
