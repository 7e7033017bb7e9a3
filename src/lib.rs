//! Graph computation and layout engine
//!
//! An in-memory graph of string-keyed nodes and weighted edges with an
//! incremental, frame-driven layout (spring or circle), proximity analytics
//! (shortest paths, betweenness and eigenvector centrality, reachability) and
//! cluster operations (subgraphs, set algebra, cliques, components).
//!
//! Drawing and pointer input stay outside the engine: a host feeds a
//! [`Viewport`] and [`Pointer`] samples in and receives [`Renderer`] callbacks.
//!
//! ```
//! use cim_graph_layout::{EdgeOptions, Graph};
//!
//! let mut graph = Graph::new();
//! graph.add_edge("a", "b", EdgeOptions::default());
//! graph.add_edge("b", "c", EdgeOptions::default());
//! graph.solve();
//!
//! assert_eq!(graph.shortest_path("a", "c").unwrap(), vec!["a", "b", "c"]);
//! ```

pub mod aggregate;
pub mod cluster;
pub mod events;
pub mod layout;
pub mod proximity;
pub mod style;
pub mod value_objects;

// Re-export main types
pub use aggregate::*;
pub use events::{Events, GraphEvent, Pointer};
pub use layout::{CircleConfig, Layout, LayoutKind, LayoutState, SpringConfig};
pub use proximity::{EigenvectorOptions, Heuristic};
pub use style::{DrawOptions, EdgeSegment, Renderer, Style, StyleAdjustment, StyleGuide, Styles};
pub use value_objects::{Bounds, Centrality, Color, Position2D, Properties, Viewport};
