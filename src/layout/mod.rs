//! Graph layout algorithms module
//!
//! A [`Layout`] owns one of two interchangeable strategies, the spring
//! (force-directed) simulator and the static circle placement, plus the
//! iteration counter that drives the per-frame state machine:
//!
//! ```text
//! NotStarted --prepare--> Preparing --iterate--> Iterating --i >= n--> Done
//! ```

pub mod circle;
pub mod spring;

pub use circle::{CircleConfig, CircleLayout};
pub use spring::{SpringConfig, SpringLayout};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{Edge, EdgeId, Node};
use crate::value_objects::{Bounds, Position2D};

/// Which layout strategy a graph uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Spring,
    Circle,
}

/// Progress of a layout through its iteration budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    NotStarted,
    /// Positions are seeded, the first physics step is pending
    Preparing,
    Iterating,
    Done,
}

/// The parts of a graph a layout strategy may touch.
///
/// Node positions are written, edges are only read.
pub struct LayoutContext<'a> {
    pub nodes: &'a mut IndexMap<String, Node>,
    pub edges: &'a IndexMap<EdgeId, Edge>,
    /// Pixel distance per layout unit (the graph's `d`)
    pub scale: f64,
}

#[derive(Debug, Clone)]
pub enum Strategy {
    Spring(SpringLayout),
    Circle(CircleLayout),
}

/// Graph visualizer that calculates relative node positions.
#[derive(Debug, Clone)]
pub struct Layout {
    strategy: Strategy,
    i: usize,
    n: usize,
}

impl Layout {
    pub fn new(kind: LayoutKind, iterations: usize) -> Self {
        match kind {
            LayoutKind::Spring => Self::spring(iterations, SpringConfig::default()),
            LayoutKind::Circle => Self::circle(iterations, CircleConfig::default()),
        }
    }

    pub fn spring(iterations: usize, config: SpringConfig) -> Self {
        Self {
            strategy: Strategy::Spring(SpringLayout::new(config)),
            i: 0,
            n: iterations,
        }
    }

    pub fn circle(iterations: usize, config: CircleConfig) -> Self {
        Self {
            strategy: Strategy::Circle(CircleLayout::new(config)),
            i: 0,
            n: iterations,
        }
    }

    /// Same strategy and parameters, counters back at the start
    pub fn copy(&self) -> Self {
        let strategy = match &self.strategy {
            Strategy::Spring(s) => Strategy::Spring(SpringLayout::new(s.config.clone())),
            Strategy::Circle(c) => Strategy::Circle(c.clone()),
        };
        Self {
            strategy,
            i: 0,
            n: self.n,
        }
    }

    pub fn kind(&self) -> LayoutKind {
        match self.strategy {
            Strategy::Spring(_) => LayoutKind::Spring,
            Strategy::Circle(_) => LayoutKind::Circle,
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut Strategy {
        &mut self.strategy
    }

    /// Current iteration counter
    pub fn iteration(&self) -> usize {
        self.i
    }

    /// Iteration budget
    pub fn iterations(&self) -> usize {
        self.n
    }

    pub fn set_iterations(&mut self, n: usize) {
        self.n = n;
    }

    pub(crate) fn set_iteration(&mut self, i: usize) {
        self.i = i;
    }

    pub fn is_done(&self) -> bool {
        self.i >= self.n
    }

    pub fn state(&self) -> LayoutState {
        match self.i {
            _ if self.is_done() => LayoutState::Done,
            0 => LayoutState::NotStarted,
            1 => LayoutState::Preparing,
            _ => LayoutState::Iterating,
        }
    }

    /// Seeds initial positions and clears accumulated forces.
    pub fn prepare(&mut self, ctx: &mut LayoutContext<'_>) {
        for node in ctx.nodes.values_mut() {
            node.force = Position2D::ZERO;
        }
        match &mut self.strategy {
            Strategy::Spring(spring) => {
                spring.prepare(ctx);
                self.i = self.i.max(1);
            }
            Strategy::Circle(circle) => {
                circle.place(ctx, 1.0);
                self.i = self.i.max(self.n).max(1);
            }
        }
        debug!(kind = ?self.kind(), nodes = ctx.nodes.len(), "layout prepared");
    }

    /// Runs one step; returns whether the layout is done afterwards.
    ///
    /// A finished layout is left untouched.
    pub fn iterate(&mut self, ctx: &mut LayoutContext<'_>) -> bool {
        if self.is_done() {
            return true;
        }
        match &mut self.strategy {
            Strategy::Spring(spring) => spring.iterate(ctx),
            Strategy::Circle(circle) => {
                let progress = (std::f64::consts::FRAC_PI_2 * self.i as f64 / self.n as f64).sin();
                circle.place(ctx, progress);
            }
        }
        self.i += 1;
        if self.is_done() {
            debug!(iterations = self.i, "layout done");
        }
        self.is_done()
    }

    /// Advances the layout by one frame's worth of work.
    ///
    /// The first call prepares, the second runs exactly one step, and later
    /// calls run `min(budget, i / 10 + 1)` steps so that early frames stay
    /// cheap and later frames converge faster.
    pub fn step(&mut self, ctx: &mut LayoutContext<'_>, budget: usize) {
        match self.i {
            0 => self.prepare(ctx),
            1 => {
                self.iterate(ctx);
            }
            i if i < self.n => {
                let steps = budget.min(i / 10 + 1);
                for _ in 0..steps {
                    if self.iterate(ctx) {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    /// Iterates until done, without a frame budget.
    pub fn solve(&mut self, ctx: &mut LayoutContext<'_>) {
        if self.i == 0 {
            self.prepare(ctx);
        }
        while !self.iterate(ctx) {}
    }

    pub fn reset(&mut self) {
        self.i = 0;
    }

    /// Rekindles a finished animation halfway through the budget.
    pub fn refresh(&mut self) {
        self.i = self.n / 2;
    }

    /// Changes spring parameters without restarting the layout.
    ///
    /// A finished layout is rekindled so that the new parameters take effect.
    /// Returns `false` for circle layouts, which have no spring parameters.
    pub fn tweak(&mut self, config: SpringConfig) -> bool {
        let Strategy::Spring(spring) = &mut self.strategy else {
            debug!("tweak ignored for circle layout");
            return false;
        };
        spring.config = config;
        if self.is_done() {
            self.refresh();
        }
        true
    }

    /// Min/max corner of all node positions
    pub fn bounds(nodes: &IndexMap<String, Node>) -> Option<Bounds> {
        Bounds::enclosing(nodes.values().map(Node::position))
    }
}
