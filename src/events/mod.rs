//! Pointer interaction with a drawn graph
//!
//! The host samples the pointer once per frame and feeds it to
//! [`Events::update`], which tracks hovered, pressed, dragged and clicked
//! nodes and reports what happened as a [`GraphEvent`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::Graph;
use crate::layout::LayoutKind;
use crate::value_objects::Position2D;

/// One pointer sample in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
    pub down: bool,
}

impl Pointer {
    pub fn new(x: f64, y: f64, down: bool) -> Self {
        Self { x, y, down }
    }

    pub fn position(&self) -> Position2D {
        Position2D::new(self.x, self.y)
    }
}

/// What a pointer sample did to the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphEvent {
    Hovered(String),
    Dragged(String),
    Clicked(String),
}

/// Pointer state machine over the nodes of a graph
#[derive(Debug, Clone, Default)]
pub struct Events {
    hovered: Option<String>,
    pressed: Option<String>,
    dragged: Option<String>,
    clicked: Option<String>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state that still remembers the last clicked node
    pub fn copy(&self) -> Self {
        Self {
            clicked: self.clicked.clone(),
            ..Self::default()
        }
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn pressed(&self) -> Option<&str> {
        self.pressed.as_deref()
    }

    pub fn dragged(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    pub fn clicked(&self) -> Option<&str> {
        self.clicked.as_deref()
    }

    /// Feeds one pointer sample.
    ///
    /// Pressing a node and releasing over it clicks it and restarts the
    /// layout animation. Pressing and moving off the node drags it, which
    /// rekindles a spring layout.
    pub fn update(&mut self, graph: &mut Graph, pointer: Pointer) -> Option<GraphEvent> {
        let point = pointer.position();

        if pointer.down {
            if self.pressed.is_none() && self.dragged.is_none() {
                self.pressed = graph.node_at(point).map(|n| n.id().to_string());
                return None;
            }

            if let Some(pressed) = self.pressed.take() {
                if graph.covers(&pressed, point) {
                    self.pressed = Some(pressed);
                } else {
                    self.dragged = Some(pressed);
                }
                return None;
            }

            let dragged = self.dragged.clone()?;
            if !graph.contains(&dragged) {
                self.dragged = None;
                return None;
            }
            if graph.layout().kind() != LayoutKind::Spring {
                return None;
            }
            graph.drag_node_to(&dragged, point);
            let n = graph.layout().iterations();
            graph
                .layout_mut()
                .set_iteration(n.saturating_sub(100).clamp(2, 100));
            return Some(GraphEvent::Dragged(dragged));
        }

        if let Some(pressed) = self.pressed.take() {
            if graph.covers(&pressed, point) {
                debug!(node = %pressed, "node clicked");
                graph.layout_mut().set_iteration(2);
                self.clicked = Some(pressed.clone());
                return Some(GraphEvent::Clicked(pressed));
            }
        }

        self.dragged = None;
        self.hovered = graph.node_at(point).map(|n| n.id().to_string());
        self.hovered.clone().map(GraphEvent::Hovered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::EdgeOptions;
    use crate::value_objects::Viewport;

    /// A solved two-node graph and the drawn position of node "a"
    fn graph() -> (Graph, Position2D) {
        let mut g = Graph::new();
        g.add_edge("a", "b", EdgeOptions::default());
        g.solve();
        g.update(Viewport::new(400.0, 400.0), 10);
        let a = g.node("a").unwrap();
        let at = g.offset() + g.scaled_position(a);
        (g, at)
    }

    #[test]
    fn test_hover() {
        let (mut g, at) = graph();
        let mut events = Events::new();

        let event = events.update(&mut g, Pointer::new(at.x, at.y, false));
        assert_eq!(event, Some(GraphEvent::Hovered("a".into())));
        assert_eq!(events.hovered(), Some("a"));

        assert_eq!(events.update(&mut g, Pointer::new(-500.0, -500.0, false)), None);
        assert_eq!(events.hovered(), None);
    }

    #[test]
    fn test_click_restarts_animation() {
        let (mut g, at) = graph();
        let mut events = Events::new();
        assert!(g.is_done());

        assert_eq!(events.update(&mut g, Pointer::new(at.x, at.y, true)), None);
        assert_eq!(events.pressed(), Some("a"));

        let event = events.update(&mut g, Pointer::new(at.x + 1.0, at.y, false));
        assert_eq!(event, Some(GraphEvent::Clicked("a".into())));
        assert_eq!(events.clicked(), Some("a"));
        assert_eq!(g.layout().iteration(), 2);
        assert_eq!(events.copy().clicked(), Some("a"));
    }

    #[test]
    fn test_drag_moves_node() {
        let (mut g, at) = graph();
        let mut events = Events::new();

        events.update(&mut g, Pointer::new(at.x, at.y, true));
        // Moving off the node turns the press into a drag.
        events.update(&mut g, Pointer::new(at.x + 100.0, at.y, true));
        assert_eq!(events.dragged(), Some("a"));

        let target = Position2D::new(at.x + 100.0, at.y + 50.0);
        let event = events.update(&mut g, Pointer::new(target.x, target.y, true));
        assert_eq!(event, Some(GraphEvent::Dragged("a".into())));

        let a = g.node("a").unwrap();
        let drawn = g.offset() + g.scaled_position(a);
        assert!((drawn.x - target.x).abs() < 1e-9);
        assert!((drawn.y - target.y).abs() < 1e-9);
        assert_eq!(g.layout().iteration(), 100);

        events.update(&mut g, Pointer::new(target.x, target.y, false));
        assert_eq!(events.dragged(), None);
    }

    #[test]
    fn test_press_on_empty_space() {
        let (mut g, _) = graph();
        let mut events = Events::new();

        assert_eq!(events.update(&mut g, Pointer::new(-500.0, -500.0, true)), None);
        assert_eq!(events.pressed(), None);
        assert_eq!(events.update(&mut g, Pointer::new(-500.0, -500.0, false)), None);
    }
}
