//! Graph edges

use serde::{Deserialize, Serialize};

use crate::value_objects::Properties;

/// Shortest rest length an edge may have
pub const MIN_EDGE_LENGTH: f64 = 0.1;

/// Stable handle of an edge inside one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub(crate) u64);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Construction options for [`Graph::add_edge`](crate::Graph::add_edge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOptions {
    /// Importance of the connection (0.0 - 1.0), not its cost
    pub weight: f64,
    /// Rest length for the spring layout and traversal cost for path finding
    pub length: f64,
    pub label: String,
    pub properties: Properties,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            weight: 0.0,
            length: 1.0,
            label: String::new(),
            properties: Properties::new(),
        }
    }
}

impl EdgeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }
}

/// A weighted connection between two nodes.
///
/// Undirected for layout and traversal, but `node1`/`node2` keep the order in
/// which the endpoints were given.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    node1: String,
    node2: String,
    weight: f64,
    length: f64,
    pub label: String,
    pub properties: Properties,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, node1: String, node2: String, options: EdgeOptions) -> Self {
        let mut edge = Self {
            id,
            node1,
            node2,
            weight: 0.0,
            length: 1.0,
            label: options.label,
            properties: options.properties,
        };
        edge.set_weight(options.weight);
        edge.set_length(options.length);
        edge
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn node1(&self) -> &str {
        &self.node1
    }

    pub fn node2(&self) -> &str {
        &self.node2
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Clamped into [0.0, 1.0]
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight.clamp(0.0, 1.0);
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Never shorter than [`MIN_EDGE_LENGTH`]
    pub fn set_length(&mut self, length: f64) {
        self.length = length.max(MIN_EDGE_LENGTH);
    }

    pub fn connects(&self, id: &str) -> bool {
        self.node1 == id || self.node2 == id
    }

    /// The endpoint across from `id`, if `id` is an endpoint
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.node1 == id {
            Some(&self.node2)
        } else if self.node2 == id {
            Some(&self.node1)
        } else {
            None
        }
    }

    /// Options that rebuild this edge in another graph
    pub(crate) fn options(&self) -> EdgeOptions {
        EdgeOptions {
            weight: self.weight,
            length: self.length,
            label: self.label.clone(),
            properties: self.properties.clone(),
        }
    }
}
