//! Styling and drawing collaborators
//!
//! The engine never draws anything itself. A [`Styles`] registry holds named
//! [`Style`]s and a [`StyleGuide`] of rules that pick a style per node; a
//! host-supplied [`Renderer`] receives one callback per drawing pass.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{Edge, Graph, Node};
use crate::proximity::EigenvectorOptions;
use crate::value_objects::{Color, Position2D};

pub const DEFAULT: &str = "default";
/// Marks shortest paths
pub const HIGHLIGHT: &str = "highlight";
pub const ROOT: &str = "root";
/// Nodes directly connected to the root
pub const LIGHT: &str = "light";
/// Nodes with many connections
pub const DARK: &str = "dark";
/// The previously visited root of a dynamic graph
pub const BACK: &str = "back";
/// Nodes with a high eigenvalue
pub const IMPORTANT: &str = "important";
pub const MARKED: &str = "marked";
/// Adjustment scaling node radius by eigenvalue
pub const BALANCE: &str = "balance";
/// Adjustment pulling leaves towards their parent
pub const NURSE: &str = "nurse";

/// Colors and typography of one drawing style; `None` disables a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub name: String,
    pub background: Option<Color>,
    pub traffic: Option<Color>,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub text: Option<Color>,
    pub font: String,
    pub font_size: f64,
    pub text_width: f64,
    /// Draw shadows and gradients
    pub depth: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            name: DEFAULT.to_string(),
            background: Some(Color::from_unit(0.45, 0.45, 0.5, 1.0)),
            traffic: Some(Color::from_unit(0.0, 0.0, 0.0, 0.07)),
            fill: Some(Color::from_unit(0.0, 0.0, 0.0, 0.10)),
            stroke: Some(Color::from_unit(0.8, 0.8, 0.8, 0.75)),
            stroke_width: 0.5,
            text: Some(Color::from_unit(1.0, 1.0, 1.0, 0.85)),
            font: "sans-serif".to_string(),
            font_size: 10.0,
            text_width: 100.0,
            depth: true,
        }
    }
}

impl Style {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Copy of this style under another name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// Decides whether a style applies to a node
pub type StyleRule = Arc<dyn Fn(&Graph, &Node) -> bool + Send + Sync>;

/// Reshapes a node after styling, e.g. its radius or the length of its edges
pub type StyleAdjustment = Arc<dyn Fn(&mut Graph, &str) + Send + Sync>;

/// Ordered `(tag, rule)` pairs; the first matching rule picks the style.
///
/// Adjustments run after the rules, in order, on every node.
#[derive(Clone, Default)]
pub struct StyleGuide {
    rules: Vec<(String, StyleRule)>,
    adjustments: Vec<(String, StyleAdjustment)>,
}

impl fmt::Debug for StyleGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let adjustments: Vec<&str> = self.adjustments.iter().map(|(t, _)| t.as_str()).collect();
        f.debug_struct("StyleGuide")
            .field("tags", &self.tags())
            .field("adjustments", &adjustments)
            .finish()
    }
}

impl StyleGuide {
    /// Adds a rule at the end; a rule with the same tag is replaced in place.
    pub fn append<F>(&mut self, tag: impl Into<String>, rule: F)
    where
        F: Fn(&Graph, &Node) -> bool + Send + Sync + 'static,
    {
        let tag = tag.into();
        let rule: StyleRule = Arc::new(rule);
        match self.rules.iter_mut().find(|(t, _)| *t == tag) {
            Some(existing) => existing.1 = rule,
            None => self.rules.push((tag, rule)),
        }
    }

    /// Adds an adjustment at the end; one with the same tag is replaced in place.
    pub fn adjust<F>(&mut self, tag: impl Into<String>, adjustment: F)
    where
        F: Fn(&mut Graph, &str) + Send + Sync + 'static,
    {
        let tag = tag.into();
        let adjustment: StyleAdjustment = Arc::new(adjustment);
        match self.adjustments.iter_mut().find(|(t, _)| *t == tag) {
            Some(existing) => existing.1 = adjustment,
            None => self.adjustments.push((tag, adjustment)),
        }
    }

    /// Removes the rule and the adjustment with this tag
    pub fn remove(&mut self, tag: &str) {
        self.rules.retain(|(t, _)| t != tag);
        self.adjustments.retain(|(t, _)| t != tag);
    }

    pub fn clear(&mut self) {
        self.rules.clear();
        self.adjustments.clear();
    }

    pub fn tags(&self) -> Vec<&str> {
        self.rules.iter().map(|(t, _)| t.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Tag of the first rule matching the node
    pub fn style_for(&self, graph: &Graph, node: &Node) -> Option<&str> {
        self.rules
            .iter()
            .find(|(_, rule)| rule(graph, node))
            .map(|(tag, _)| tag.as_str())
    }
}

/// Named styles plus the guide that assigns them.
///
/// The default style always exists and stands in for unknown names.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    default: Style,
    named: IndexMap<String, Style>,
    pub guide: StyleGuide,
}

impl Styles {
    /// The stock style set: light, dark, back, important, highlight, marked
    /// and root styles, with rules for the light, dark, important and root
    /// styles.
    ///
    /// Two adjustments follow the rules: `balance` scales each radius by the
    /// node's eigenvalue, `nurse` halves the edge length of leaves so they
    /// cluster close to their parent. Both compound when styles are applied
    /// again.
    pub fn predefined() -> Self {
        let mut s = Self::default();
        s.create(LIGHT, None).fill = Some(Color::from_unit(0.0, 0.0, 0.0, 0.20));
        s.create(DARK, None).fill = Some(Color::from_unit(0.3, 0.5, 0.7, 0.75));
        s.create(BACK, None).fill = Some(Color::from_unit(0.5, 0.8, 0.0, 0.50));
        s.create(IMPORTANT, None).fill = Some(Color::from_unit(0.3, 0.6, 0.8, 0.75));
        let highlight = s.create(HIGHLIGHT, None);
        highlight.stroke = Some(Color::from_unit(1.0, 0.0, 0.5, 1.0));
        highlight.stroke_width = 1.5;
        s.create(MARKED, None);
        let root = s.create(ROOT, None);
        root.text = Some(Color::from_unit(1.0, 0.0, 0.4, 1.0));
        root.stroke = Some(Color::from_unit(0.8, 0.8, 0.8, 0.60));
        root.stroke_width = 1.5;
        root.font_size = 16.0;
        root.text_width = 150.0;

        s.guide.append(ROOT, |g: &Graph, n: &Node| g.root() == Some(n));
        s.guide.append(IMPORTANT, |_: &Graph, n: &Node| {
            n.eigenvalue().value().unwrap_or(0.0) > 0.75
        });
        s.guide.append(DARK, |_: &Graph, n: &Node| n.degree() > 4);
        s.guide.append(LIGHT, |g: &Graph, n: &Node| {
            g.root().is_some_and(|r| n.links().contains(r.id()))
        });

        s.guide.adjust(BALANCE, |g: &mut Graph, id: &str| {
            if let Some(node) = g.node_mut(id) {
                let weight = node.eigenvalue().value().unwrap_or(0.0);
                node.radius = node.radius * 0.75 + node.radius * weight * 0.75;
            }
        });
        s.guide.adjust(NURSE, |g: &mut Graph, id: &str| {
            let edge = g
                .node(id)
                .filter(|n| n.is_leaf())
                .and_then(|n| n.links().iter().next().and_then(|l| n.links().edge(l)));
            if let Some(edge) = edge.and_then(|e| g.edge_mut(e)) {
                let length = edge.length();
                edge.set_length(length * 0.5);
            }
        });
        s
    }

    /// Creates a style from a template (the default style when `None`).
    pub fn create(&mut self, name: &str, template: Option<&str>) -> &mut Style {
        let style = self.resolve(template.unwrap_or(DEFAULT)).renamed(name);
        self.append(style);
        if name == DEFAULT {
            return &mut self.default;
        }
        &mut self.named[name]
    }

    pub fn append(&mut self, style: Style) {
        if style.name == DEFAULT {
            self.default = style;
        } else {
            self.named.insert(style.name.clone(), style);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        if name == DEFAULT {
            return Some(&self.default);
        }
        self.named.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Style> {
        if name == DEFAULT {
            return Some(&mut self.default);
        }
        self.named.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        std::iter::once(DEFAULT)
            .chain(self.named.keys().map(String::as_str))
            .collect()
    }

    /// The named style, or the default style when there is none
    pub fn resolve(&self, name: &str) -> &Style {
        self.named.get(name).unwrap_or(&self.default)
    }

    pub fn default_style(&self) -> &Style {
        &self.default
    }
}

/// An edge with its endpoints in drawing space
#[derive(Debug, Clone, Copy)]
pub struct EdgeSegment<'a> {
    pub edge: &'a Edge,
    pub from: Position2D,
    pub to: Position2D,
}

/// Drawing backend; every callback defaults to doing nothing.
///
/// Positions are relative to the graph translation passed to
/// [`Renderer::begin`].
pub trait Renderer {
    fn begin(&mut self, _translation: Position2D) {}
    fn graph_background(&mut self, _style: &Style) {}
    fn graph_traffic(&mut self, _style: &Style, _node: &Node, _at: Position2D, _alpha: f64) {}
    fn edges(
        &mut self,
        _style: &Style,
        _edges: &[EdgeSegment<'_>],
        _alpha: f64,
        _weighted: bool,
        _directed: bool,
    ) {
    }
    fn node(&mut self, _style: &Style, _node: &Node, _at: Position2D, _alpha: f64) {}
    fn path(&mut self, _style: &Style, _points: &[Position2D]) {}
    fn node_label(&mut self, _style: &Style, _node: &Node, _at: Position2D, _alpha: f64) {}
    fn end(&mut self) {}
}

/// Per-frame drawing switches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawOptions {
    /// Extra translation on top of the centering offset
    pub dx: f64,
    pub dy: f64,
    pub weighted: bool,
    pub directed: bool,
    /// Ids of a path to highlight
    pub highlight: Vec<String>,
    /// Number of high-traffic nodes to mark
    pub traffic: Option<usize>,
}

impl Graph {
    /// Assigns each node the style of the first matching guide rule, then
    /// runs the guide's adjustments on every node.
    ///
    /// Nodes no rule matches keep their style. Missing eigenvalues are
    /// computed first, since rules and adjustments may read them.
    pub fn apply_styles(&mut self) {
        let guide = self.styles().guide.clone();
        if guide.is_empty() && guide.adjustments.is_empty() {
            return;
        }
        if self.nodes().any(|n| !n.eigenvalue().is_computed()) {
            self.eigenvector_centrality(&EigenvectorOptions::default());
        }

        let assigned: Vec<(String, String)> = self
            .nodes()
            .filter_map(|n| {
                guide
                    .style_for(self, n)
                    .map(|tag| (n.id().to_string(), tag.to_string()))
            })
            .collect();
        debug!(styled = assigned.len(), "styles applied");
        for (id, tag) in assigned {
            if let Some(node) = self.node_mut(&id) {
                node.style = tag;
            }
        }

        for id in self.node_ids() {
            for (_, adjustment) in &guide.adjustments {
                adjustment(self, &id);
            }
        }
    }

    /// Sends the current frame to the renderer.
    ///
    /// Order: background, traffic, edges, nodes, highlighted path, labels.
    /// Drawing does not advance the layout; call [`Graph::update`] first.
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R, options: &DrawOptions) {
        let traffic: Vec<String> = match options.traffic {
            Some(count) if count > 0 => self
                .nodes_by_betweenness(0.0)
                .into_iter()
                .take(count)
                .map(|n| n.id().to_string())
                .collect(),
            _ => Vec::new(),
        };

        let styles = self.styles();
        let alpha = self.alpha();
        let at = |n: &Node| self.scaled_position(n);

        renderer.graph_background(styles.default_style());
        renderer.begin(self.offset() + Position2D::new(options.dx, options.dy));

        for node in traffic.iter().filter_map(|id| self.node(id)) {
            renderer.graph_traffic(styles.resolve(&node.style), node, at(node), alpha);
        }

        let segments: Vec<EdgeSegment<'_>> = self
            .edges()
            .filter_map(|edge| {
                let from = self.node(edge.node1())?;
                let to = self.node(edge.node2())?;
                Some(EdgeSegment {
                    edge,
                    from: at(from),
                    to: at(to),
                })
            })
            .collect();
        if !segments.is_empty() {
            renderer.edges(
                styles.default_style(),
                &segments,
                alpha,
                options.weighted,
                options.directed,
            );
        }

        for node in self.nodes() {
            renderer.node(styles.resolve(&node.style), node, at(node), alpha);
        }

        let path: Vec<Position2D> = options
            .highlight
            .iter()
            .filter_map(|id| self.node(id))
            .map(at)
            .collect();
        if !path.is_empty() {
            renderer.path(styles.resolve(HIGHLIGHT), &path);
        }

        for node in self.nodes() {
            renderer.node_label(styles.resolve(&node.style), node, at(node), alpha);
        }
        renderer.end();
    }
}
