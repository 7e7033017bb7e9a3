//! Dynamic graph
//!
//! A graph that rebuilds itself around whichever node is clicked, reading its
//! data through a [`GraphSource`]. Each rebuild is truncated at a node budget
//! so that browsing a large dataset stays interactive.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::edge::EdgeOptions;
use super::graph::{Graph, GraphConfig};
use super::node::NodeOptions;
use crate::events::{Events, GraphEvent, Pointer};
use crate::style::{DrawOptions, Renderer, Styles, BACK};
use crate::value_objects::{Position2D, Viewport};

/// Layout iterations granted per frame
pub const FRAME_ITERATIONS: usize = 10;

/// Decay of the unfold offset per drawn frame
const UNFOLD_DECAY: f64 = 0.9;

/// Where a dynamic graph reads its data from.
///
/// Every hook has an empty default, so a source only implements what its
/// dataset offers.
pub trait GraphSource {
    /// Whether the id exists in the dataset
    fn has_node(&self, _id: &str) -> bool {
        true
    }

    /// `(weight, id)` of the nodes directly linked to `id`, in any order
    fn get_links(&self, _id: &str) -> Vec<(f64, String)> {
        Vec::new()
    }

    /// `(weight, id, via)` of nodes two hops away, linked to `id` through
    /// the `via` ids
    fn get_cluster(&self, _id: &str) -> Vec<(f64, String, Vec<String>)> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicGraphConfig {
    /// Node count after which a rebuild stops adding nodes
    pub max: usize,
    pub graph: GraphConfig,
}

impl Default for DynamicGraphConfig {
    fn default() -> Self {
        Self {
            max: 20,
            graph: GraphConfig {
                iterations: 500,
                ..GraphConfig::default()
            },
        }
    }
}

/// A [`Graph`] that loads new data when a node is clicked.
#[derive(Debug)]
pub struct DynamicGraph<S> {
    graph: Graph,
    source: S,
    max: usize,
    events: Events,
    previous: Option<String>,
    unfold: Position2D,
}

impl<S: GraphSource> DynamicGraph<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, DynamicGraphConfig::default())
    }

    pub fn with_config(source: S, config: DynamicGraphConfig) -> Self {
        let mut graph = Graph::with_config(config.graph);
        *graph.styles_mut() = Styles::predefined();
        Self {
            graph,
            source,
            max: config.max,
            events: Events::new(),
            previous: None,
            unfold: Position2D::ZERO,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn set_max(&mut self, max: usize) {
        self.max = max;
    }

    /// Root before the last click, shown as a "back" node
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Remaining translation of a freshly loaded graph
    pub fn unfold_offset(&self) -> Position2D {
        self.unfold
    }

    /// Rebuilds the graph around `id`.
    ///
    /// Direct links come first, then the second-degree cluster, each
    /// strongest first; adding stops once the node count exceeds the budget.
    pub fn load(&mut self, id: &str) {
        self.graph.clear();
        self.graph.add_node_with(id, NodeOptions::new().root(true));

        let mut links = self.source.get_links(id);
        links.sort_by(|a, b| b.0.total_cmp(&a.0));
        for (weight, other) in links {
            self.graph.add_edge(id, &other, EdgeOptions::new().weight(weight));
            if self.graph.len() > self.max {
                break;
            }
        }

        if self.graph.len() <= self.max {
            let mut cluster = self.source.get_cluster(id);
            cluster.sort_by(|a, b| b.0.total_cmp(&a.0));
            for (weight, other, via) in cluster {
                for link in &via {
                    self.graph.add_edge(link, &other, EdgeOptions::new().weight(weight));
                    self.graph.add_edge(id, link, EdgeOptions::new().weight(weight));
                }
                if self.graph.len() > self.max {
                    break;
                }
            }
        }

        self.graph.apply_styles();
        if let Some(previous) = self.previous.as_deref().filter(|p| *p != id) {
            self.graph.add_node(previous);
            if let Some(back) = self.graph.node_mut(previous) {
                back.style = BACK.to_string();
            }
        }
        debug!(root = %id, nodes = self.graph.len(), "dynamic graph loaded");
    }

    /// Loads the graph around a clicked node.
    ///
    /// Ignored for ids the source does not know and for the current root.
    /// Returns whether a new graph was loaded.
    pub fn click(&mut self, id: &str) -> bool {
        if !self.source.has_node(id) {
            return false;
        }
        let root = self.graph.root().map(|r| r.id().to_string());
        if root.as_deref() == Some(id) {
            return false;
        }

        self.unfold = self.graph.offset_of(id).unwrap_or(Position2D::ZERO);
        self.previous = root;
        self.load(id);
        true
    }

    /// Advances the layout and processes one pointer sample; clicks load.
    pub fn frame(&mut self, viewport: Viewport, pointer: Option<Pointer>) -> Option<GraphEvent> {
        self.graph.update(viewport, FRAME_ITERATIONS);
        let event = self.events.update(&mut self.graph, pointer?);
        if let Some(GraphEvent::Clicked(id)) = &event {
            self.click(id);
        }
        event
    }

    /// Draws the graph unfolding from the clicked node's position.
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R, options: &DrawOptions) {
        let options = DrawOptions {
            dx: options.dx + self.unfold.x,
            dy: options.dy + self.unfold.y,
            ..options.clone()
        };
        self.graph.draw(renderer, &options);
        self.unfold = self.unfold * UNFOLD_DECAY;
    }
}

impl<S> Deref for DynamicGraph<S> {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        &self.graph
    }
}

impl<S> DerefMut for DynamicGraph<S> {
    fn deref_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }
}
