//! Graph aggregate
//!
//! Owns nodes, edges and their adjacency links together with the layout that
//! positions them. Nodes and edges are created and destroyed only through
//! [`Graph`] methods, which keep the links symmetric and the centrality caches
//! honest.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::edge::{Edge, EdgeId, EdgeOptions};
use super::node::{Node, NodeOptions, DEFAULT_NODE_RADIUS};
use super::{GraphError, GraphResult};
use crate::layout::{
    CircleConfig, Layout, LayoutContext, LayoutKind, LayoutState, SpringConfig,
};
use crate::style::Styles;
use crate::value_objects::{Bounds, Centrality, Position2D, Viewport};

/// Pixel distance between nodes at `distance == 1.0`
const UNIT_DISTANCE: f64 = DEFAULT_NODE_RADIUS * 2.5;

/// Graph construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Layout iteration budget
    pub iterations: usize,
    /// Spacing factor between nodes
    pub distance: f64,
    pub layout: LayoutKind,
    pub spring: SpringConfig,
    pub circle: CircleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            distance: 1.0,
            layout: LayoutKind::Spring,
            spring: SpringConfig::default(),
            circle: CircleConfig::default(),
        }
    }
}

impl GraphConfig {
    pub fn from_json(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An in-memory graph with an incremental layout.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: IndexMap<String, Node>,
    edges: IndexMap<EdgeId, Edge>,
    next_edge: u64,
    root: Option<String>,
    d: f64,
    layout: Layout,
    styles: Styles,
    alpha: f64,
    offset: Position2D,
    viewport: Viewport,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create a new empty graph with a spring layout
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        let layout = match config.layout {
            LayoutKind::Spring => Layout::spring(config.iterations, config.spring),
            LayoutKind::Circle => Layout::circle(config.iterations, config.circle),
        };
        Self::with_layout(layout, config.distance)
    }

    pub fn with_layout(layout: Layout, distance: f64) -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            next_edge: 0,
            root: None,
            d: UNIT_DISTANCE * distance,
            layout,
            styles: Styles::default(),
            alpha: 0.0,
            offset: Position2D::ZERO,
            viewport: Viewport::default(),
        }
    }

    // ---- nodes ---------------------------------------------------------

    /// Adds a node with default options, or returns the existing one.
    pub fn add_node(&mut self, id: impl Into<String>) -> &Node {
        self.add_node_with(id, NodeOptions::default())
    }

    /// Adds a node, or returns the existing node with that id unchanged.
    pub fn add_node_with(&mut self, id: impl Into<String>, options: NodeOptions) -> &Node {
        let id = id.into();
        if !self.nodes.contains_key(&id) {
            let root = options.root;
            self.nodes.insert(id.clone(), Node::new(id.clone(), options));
            if root {
                self.root = Some(id.clone());
            }
            self.invalidate_centrality();
            debug!(node = %id, "node added");
        }
        &self.nodes[&id]
    }

    pub fn add_nodes<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.add_node(id);
        }
    }

    /// Removes a node together with every edge touching it.
    ///
    /// Returns `false` when there was no such node.
    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.nodes.shift_remove(id).is_none() {
            return false;
        }

        let incident: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| e.connects(id))
            .map(Edge::id)
            .collect();
        for edge_id in incident {
            if let Some(edge) = self.edges.shift_remove(&edge_id) {
                if let Some(neighbor) = edge.other(id).and_then(|o| self.nodes.get_mut(o)) {
                    neighbor.links.remove(id);
                }
            }
        }

        if self.root.as_deref() == Some(id) {
            self.root = None;
        }
        self.invalidate_centrality();
        debug!(node = %id, "node removed");
        true
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Strict lookup for callers that treat a missing node as an error.
    pub fn get(&self, id: &str) -> GraphResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref().and_then(|id| self.nodes.get(id))
    }

    /// Makes an existing node the root; unknown ids clear the root.
    pub fn set_root(&mut self, id: Option<&str>) {
        self.root = id.filter(|id| self.nodes.contains_key(*id)).map(str::to_string);
    }

    // ---- edges ---------------------------------------------------------

    /// Adds a weighted edge, creating missing endpoints.
    ///
    /// Self-loops are rejected with `None`. When an edge from `id1` to `id2`
    /// already exists it is returned as is; the reverse orientation still
    /// creates a second edge.
    pub fn add_edge(&mut self, id1: &str, id2: &str, options: EdgeOptions) -> Option<&Edge> {
        if id1 == id2 {
            return None;
        }
        self.add_node(id1);
        self.add_node(id2);

        let existing = self.nodes[id2]
            .links
            .edge(id1)
            .filter(|e| self.edges[e].node1() == id1);
        if let Some(edge_id) = existing {
            return self.edges.get(&edge_id);
        }

        let edge_id = EdgeId(self.next_edge);
        self.next_edge += 1;
        let edge = Edge::new(edge_id, id1.to_string(), id2.to_string(), options);
        self.edges.insert(edge_id, edge);
        self.nodes[id1].links.append(id2, edge_id);
        self.nodes[id2].links.append(id1, edge_id);
        self.invalidate_centrality();
        debug!(from = %id1, to = %id2, edge = %edge_id, "edge added");

        self.edges.get(&edge_id)
    }

    /// Removes every edge between the two nodes; returns how many went.
    pub fn remove_edge(&mut self, id1: &str, id2: &str) -> usize {
        let doomed: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| e.connects(id1) && e.connects(id2))
            .map(Edge::id)
            .collect();
        for edge_id in &doomed {
            if let Some(edge) = self.edges.shift_remove(edge_id) {
                if let Some(n) = self.nodes.get_mut(edge.node1()) {
                    n.links.remove(edge.node2());
                }
                if let Some(n) = self.nodes.get_mut(edge.node2()) {
                    n.links.remove(edge.node1());
                }
            }
        }
        if !doomed.is_empty() {
            self.invalidate_centrality();
            debug!(from = %id1, to = %id2, count = doomed.len(), "edges removed");
        }
        doomed.len()
    }

    /// The edge between two nodes, if they are connected
    pub fn edge(&self, id1: &str, id2: &str) -> Option<&Edge> {
        let node = self.nodes.get(id1)?;
        if !self.nodes.contains_key(id2) {
            return None;
        }
        node.links.edge(id2).and_then(|e| self.edges.get(&e))
    }

    pub fn edge_by_id(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    /// Strict edge lookup
    pub fn get_edge(&self, id1: &str, id2: &str) -> GraphResult<&Edge> {
        self.edge(id1, id2)
            .ok_or_else(|| GraphError::EdgeNotFound(id1.to_string(), id2.to_string()))
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Every edge touching the node, in insertion order
    pub fn node_edges(&self, id: &str) -> Vec<&Edge> {
        self.edges.values().filter(|e| e.connects(id)).collect()
    }

    // ---- whole-graph operations ----------------------------------------

    /// A copy with the same layout type and parameters but fresh layout state.
    ///
    /// With `empty` only the configuration is copied.
    pub fn copy(&self, empty: bool) -> Graph {
        let mut g = Graph::with_layout(self.layout.copy(), self.distance());
        g.styles = self.styles.clone();
        g.viewport = self.viewport;
        if !empty {
            for n in self.nodes.values() {
                let is_root = self.root.as_deref() == Some(n.id());
                g.add_node_with(n.id(), n.options(is_root));
            }
            for e in self.edges.values() {
                g.add_edge(e.node1(), e.node2(), e.options());
            }
        }
        g
    }

    /// Removes nodes and edges and resets the layout.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.root = None;
        self.layout.reset();
        self.alpha = 0.0;
        debug!("graph cleared");
    }

    /// Removes all nodes with `depth` or fewer links.
    pub fn prune(&mut self, depth: usize) {
        for id in self.node_ids() {
            let sparse = self.nodes.get(&id).is_some_and(|n| n.degree() <= depth);
            if sparse {
                self.remove_node(&id);
            }
        }
    }

    pub fn trim(&mut self, depth: usize) {
        self.prune(depth);
    }

    /// Nodes with exactly one connection
    pub fn leaves(&self) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.is_leaf()).collect()
    }

    /// Edges in relation to the number of possible edges; 0.0 below two nodes.
    pub fn density(&self) -> f64 {
        let n = self.nodes.len() as f64;
        if n < 2.0 {
            return 0.0;
        }
        2.0 * self.edges.len() as f64 / (n * (n - 1.0))
    }

    pub fn is_complete(&self) -> bool {
        self.density() == 1.0
    }

    pub fn is_dense(&self) -> bool {
        self.density() > 0.65
    }

    pub fn is_sparse(&self) -> bool {
        self.density() < 0.35
    }

    pub fn nodes_by_category(&self, category: &str) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|n| n.category == category)
            .collect()
    }

    // ---- layout ----------------------------------------------------------

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// Spacing factor between nodes
    pub fn distance(&self) -> f64 {
        self.d / UNIT_DISTANCE
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.d = UNIT_DISTANCE * distance;
    }

    /// Pixels per layout unit
    pub fn scale(&self) -> f64 {
        self.d
    }

    /// Fade-in opacity, grows with every update
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut Styles {
        &mut self.styles
    }

    /// Advances the layout by one frame and recenters the graph.
    ///
    /// Returns `true` while the layout is still running.
    pub fn update(&mut self, viewport: Viewport, iterations: usize) -> bool {
        self.alpha = (self.alpha + 0.05).min(1.0);
        self.viewport = viewport;

        if !self.layout.is_done() {
            self.prepare_layout_inputs();
            let (layout, mut ctx) = self.layout_parts();
            layout.step(&mut ctx, iterations);
        }
        self.recenter();

        !self.layout.is_done()
    }

    /// Runs the layout to completion without a frame budget.
    pub fn solve(&mut self) {
        self.prepare_layout_inputs();
        let (layout, mut ctx) = self.layout_parts();
        layout.solve(&mut ctx);
        self.alpha = 1.0;
        self.recenter();
    }

    pub fn is_done(&self) -> bool {
        self.layout.is_done()
    }

    pub fn layout_state(&self) -> LayoutState {
        self.layout.state()
    }

    /// Changes spring parameters; see [`Layout::tweak`].
    pub fn tweak(&mut self, config: SpringConfig) -> bool {
        self.layout.tweak(config)
    }

    /// Bounding box of all node positions in layout space
    pub fn bounds(&self) -> Option<Bounds> {
        Layout::bounds(&self.nodes)
    }

    /// Translation that centers the graph on the last viewport
    pub fn offset(&self) -> Position2D {
        self.offset
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Node position in drawing space, relative to [`Graph::offset`]
    pub fn scaled_position(&self, node: &Node) -> Position2D {
        node.position() * self.d
    }

    /// Distance from the viewport center to the given node
    pub fn offset_of(&self, id: &str) -> Option<Position2D> {
        let node = self.nodes.get(id)?;
        Some(self.offset + self.scaled_position(node) - self.viewport.center())
    }

    /// First node whose drawn disc (twice its radius) contains the point
    pub fn node_at(&self, point: Position2D) -> Option<&Node> {
        self.nodes.values().find(|n| self.hits(n, point))
    }

    /// Whether the point lies on the drawn node
    pub fn covers(&self, id: &str, point: Position2D) -> bool {
        self.nodes.get(id).is_some_and(|n| self.hits(n, point))
    }

    fn hits(&self, node: &Node, point: Position2D) -> bool {
        let p = self.offset + self.scaled_position(node);
        (p.x - point.x).abs() < node.radius * 2.0 && (p.y - point.y).abs() < node.radius * 2.0
    }

    /// Moves a node so that it is drawn at the given viewport point.
    pub(crate) fn drag_node_to(&mut self, id: &str, point: Position2D) {
        let (offset, d) = (self.offset, self.d);
        if let Some(node) = self.nodes.get_mut(id) {
            node.vx = (point.x - offset.x) / d;
            node.vy = (point.y - offset.y) / d;
        }
    }

    // ---- internals -------------------------------------------------------

    fn layout_parts(&mut self) -> (&mut Layout, LayoutContext<'_>) {
        (
            &mut self.layout,
            LayoutContext {
                nodes: &mut self.nodes,
                edges: &self.edges,
                scale: self.d,
            },
        )
    }

    /// The circle layout orders nodes by betweenness.
    fn prepare_layout_inputs(&mut self) {
        if self.layout.kind() == LayoutKind::Circle
            && self.nodes.values().any(|n| !n.betweenness.is_computed())
        {
            self.betweenness_centrality(true);
        }
    }

    fn recenter(&mut self) {
        self.offset = match self.bounds() {
            Some(b) => Position2D::new(
                (self.viewport.width - (b.max.x + b.min.x) * self.d) / 2.0,
                (self.viewport.height - (b.max.y + b.min.y) * self.d) / 2.0,
            ),
            None => self.viewport.center(),
        };
    }

    pub(crate) fn invalidate_centrality(&mut self) {
        for node in self.nodes.values_mut() {
            node.betweenness = Centrality::Uncomputed;
            node.eigenvalue = Centrality::Uncomputed;
        }
    }

    pub(crate) fn nodes_map(&self) -> &IndexMap<String, Node> {
        &self.nodes
    }

    pub(crate) fn nodes_map_mut(&mut self) -> &mut IndexMap<String, Node> {
        &mut self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(count: usize) -> Graph {
        let mut g = Graph::new();
        for i in 0..count {
            for j in (i + 1)..count {
                g.add_edge(&format!("n{i}"), &format!("n{j}"), EdgeOptions::default());
            }
        }
        g
    }

    /// Test Coverage
    ///
    /// ```mermaid
    /// graph TD
    ///     G[Graph] --> N[Node Operations]
    ///     G --> E[Edge Operations]
    ///     G --> D[Density and Leaves]
    ///     G --> C[Copy and Clear]
    ///     G --> L[Update and Centering]
    ///     E --> Q[Orientation Quirk]
    ///     N --> R[Removal Cascade]
    /// ```

    #[test]
    fn test_add_node_is_idempotent() {
        let mut g = Graph::new();
        g.add_node_with("a", NodeOptions::new().label("Alpha"));
        let again = g.add_node_with("a", NodeOptions::new().label("Other"));

        assert_eq!(again.label, "Alpha");
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn test_root_is_set_on_creation() {
        let mut g = Graph::new();
        g.add_node_with("a", NodeOptions::new().root(true));

        assert_eq!(g.root().map(Node::id), Some("a"));

        g.remove_node("a");
        assert!(g.root().is_none());
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut g = Graph::new();
        assert!(g.add_edge("a", "a", EdgeOptions::default()).is_none());
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut g = Graph::new();
        let edge = g.add_edge("a", "b", EdgeOptions::new().weight(0.5)).unwrap();

        assert_eq!(edge.node1(), "a");
        assert_eq!(edge.node2(), "b");
        assert_eq!(g.len(), 2);
        assert!(g.node("a").unwrap().links().contains("b"));
        assert!(g.node("b").unwrap().links().contains("a"));
    }

    #[test]
    fn test_duplicate_orientation_quirk() {
        let mut g = Graph::new();
        let first = g.add_edge("a", "b", EdgeOptions::default()).unwrap().id();
        let same = g.add_edge("a", "b", EdgeOptions::new().weight(1.0)).unwrap().id();
        assert_eq!(first, same);
        assert_eq!(g.edge_count(), 1);

        let flipped = g.add_edge("b", "a", EdgeOptions::default()).unwrap().id();
        assert_ne!(first, flipped);
        assert_eq!(g.edge_count(), 2);

        assert_eq!(g.remove_edge("a", "b"), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(g.node("a").unwrap().links().is_empty());
        assert!(g.node("b").unwrap().links().is_empty());
    }

    #[test]
    fn test_edge_lookup_is_symmetric() {
        let mut g = Graph::new();
        g.add_edge("a", "b", EdgeOptions::default());

        assert_eq!(g.edge("a", "b").map(Edge::id), g.edge("b", "a").map(Edge::id));
        assert!(g.edge("a", "c").is_none());
        assert!(matches!(
            g.get_edge("a", "c"),
            Err(GraphError::EdgeNotFound(_, _))
        ));
    }

    #[test]
    fn test_strict_lookup_fails() {
        let g = Graph::new();
        assert!(g.node("missing").is_none());
        assert!(matches!(g.get("missing"), Err(GraphError::NodeNotFound(id)) if id == "missing"));
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut g = Graph::new();
        g.add_edge("hub", "a", EdgeOptions::default());
        g.add_edge("hub", "b", EdgeOptions::default());
        g.add_edge("c", "hub", EdgeOptions::default());
        g.add_edge("a", "b", EdgeOptions::default());

        assert!(g.remove_node("hub"));
        assert_eq!(g.edge_count(), 1);
        for id in ["a", "b", "c"] {
            assert!(!g.node(id).unwrap().links().contains("hub"));
        }
        assert!(!g.remove_node("hub"));
    }

    #[test]
    fn test_density_and_completeness() {
        let g = complete(4);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.density(), 1.0);
        assert!(g.is_complete());
        assert!(g.is_dense());

        let mut sparse = Graph::new();
        sparse.add_edge("a", "b", EdgeOptions::default());
        sparse.add_nodes(["c", "d", "e"]);
        assert!(sparse.is_sparse());
        assert_eq!(Graph::new().density(), 0.0);
    }

    #[test]
    fn test_leaves_and_prune() {
        let mut g = Graph::new();
        g.add_edge("a", "b", EdgeOptions::default());
        g.add_edge("b", "c", EdgeOptions::default());
        g.add_node("lonely");

        let leaves: Vec<&str> = g.leaves().into_iter().map(Node::id).collect();
        assert_eq!(leaves, vec!["a", "c"]);

        g.prune(0);
        assert!(!g.contains("lonely"));
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn test_nodes_by_category() {
        let mut g = Graph::new();
        g.add_node_with("a", NodeOptions::new().category("fruit"));
        g.add_node_with("b", NodeOptions::new().category("veg"));
        g.add_node_with("c", NodeOptions::new().category("fruit"));

        let fruit: Vec<&str> = g.nodes_by_category("fruit").into_iter().map(Node::id).collect();
        assert_eq!(fruit, vec!["a", "c"]);
    }

    #[test]
    fn test_copy_keeps_properties_and_config() {
        let mut g = Graph::with_config(GraphConfig {
            iterations: 50,
            distance: 2.0,
            ..GraphConfig::default()
        });
        g.add_node_with(
            "a",
            NodeOptions::new()
                .root(true)
                .property("context", serde_json::json!({"source": "wiki"})),
        );
        g.add_edge("a", "b", EdgeOptions::new().weight(0.3).length(2.0).label("rel"));
        g.solve();

        let copy = g.copy(false);
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.root().map(Node::id), Some("a"));
        assert_eq!(copy.node("a").unwrap().properties["context"]["source"], "wiki");
        let e = copy.edge("a", "b").unwrap();
        assert_eq!((e.weight(), e.length(), e.label.as_str()), (0.3, 2.0, "rel"));
        assert_eq!(copy.layout().iteration(), 0);
        assert_eq!(copy.layout().iterations(), 50);
        assert_eq!(copy.distance(), 2.0);

        let empty = g.copy(true);
        assert!(empty.is_empty());
        assert_eq!(empty.layout().kind(), LayoutKind::Spring);
    }

    #[test]
    fn test_clear_resets_layout() {
        let mut g = complete(3);
        g.update(Viewport::default(), 10);
        g.update(Viewport::default(), 10);
        assert!(g.layout().iteration() > 0);

        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.layout().iteration(), 0);
        assert_eq!(g.alpha(), 0.0);
    }

    #[test]
    fn test_update_centers_graph() {
        let mut g = complete(3);
        let viewport = Viewport::new(400.0, 300.0);
        g.update(viewport, 10);

        let b = g.bounds().unwrap();
        let center = g.offset() + b.center() * g.scale();
        assert!((center.x - 200.0).abs() < 1e-9);
        assert!((center.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_graph_centers_on_viewport() {
        let mut g = Graph::new();
        g.update(Viewport::new(100.0, 80.0), 10);
        assert_eq!(g.offset(), Position2D::new(50.0, 40.0));
    }

    #[test]
    fn test_node_at_hit_test() {
        let mut g = Graph::new();
        g.add_node("a");
        g.update(Viewport::new(200.0, 200.0), 10);

        // A lone node is centered on the viewport.
        assert_eq!(g.node_at(Position2D::new(105.0, 95.0)).map(Node::id), Some("a"));
        assert!(g.node_at(Position2D::new(150.0, 150.0)).is_none());
        assert!(g.offset_of("a").unwrap().length() < 1e-9);
        assert!(g.offset_of("missing").is_none());
    }

    #[test]
    fn test_distance_scale() {
        let mut g = Graph::new();
        assert_eq!(g.scale(), 20.0);
        g.set_distance(1.5);
        assert_eq!(g.scale(), 30.0);
        assert_eq!(g.distance(), 1.5);
    }

    #[test]
    fn test_config_from_json() {
        let config = GraphConfig::from_json(r#"{"iterations": 200, "layout": "circle"}"#).unwrap();
        assert_eq!(config.iterations, 200);
        assert_eq!(config.layout, LayoutKind::Circle);
        assert_eq!(config.distance, 1.0);

        assert!(matches!(
            GraphConfig::from_json("{not json"),
            Err(GraphError::InvalidConfig(_))
        ));
    }
}
