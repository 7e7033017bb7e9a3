//! Spring (force-directed) layout
//!
//! Edges act as springs pulling their endpoints towards the edge's rest
//! length, and every pair of nodes closer than the repulsion radius pushes
//! apart. Movement per step is capped, which keeps the animation smooth.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::LayoutContext;
use crate::value_objects::Position2D;

/// Spring layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Force strength
    pub k: f64,
    /// Force multiplier applied when moving a node
    pub m: f64,
    /// Edge weight multiplier
    pub w: f64,
    /// Maximum movement per step along each axis
    pub d: f64,
    /// Maximum repulsion radius
    pub r: f64,
    /// Seed for the position jitter; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            k: 2.0,
            m: 0.01,
            w: 15.0,
            d: 0.5,
            r: 15.0,
            seed: None,
        }
    }
}

impl SpringConfig {
    pub fn force(mut self, m: f64) -> Self {
        self.m = m;
        self
    }

    pub fn repulsion(mut self, r: f64) -> Self {
        self.r = r;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SpringLayout {
    pub(crate) config: SpringConfig,
    rng: StdRng,
}

impl SpringLayout {
    pub fn new(config: SpringConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Scatters nodes over a small square around the origin.
    pub(crate) fn prepare(&mut self, ctx: &mut LayoutContext<'_>) {
        for node in ctx.nodes.values_mut() {
            node.vx = self.rng.gen_range(-1.0..1.0);
            node.vy = self.rng.gen_range(-1.0..1.0);
        }
    }

    pub(crate) fn iterate(&mut self, ctx: &mut LayoutContext<'_>) {
        let positions: Vec<Position2D> = ctx.nodes.values().map(|n| n.position()).collect();
        let mut forces = vec![Position2D::ZERO; positions.len()];

        // Forces on all nodes due to node-node repulsions.
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                self.repulse(&positions, &mut forces, i, j);
            }
        }

        // Forces on nodes due to edge attractions.
        for edge in ctx.edges.values() {
            let (Some(a), Some(b)) = (
                ctx.nodes.get_index_of(edge.node1()),
                ctx.nodes.get_index_of(edge.node2()),
            ) else {
                debug_assert!(false, "edge {} references a missing node", edge.id());
                continue;
            };
            let strength = self.config.w * edge.weight();
            self.attract(&positions, &mut forces, a, b, strength, 1.0 / edge.length());
        }

        // Move by the accumulated force, capped per step.
        let (m, cap) = (self.config.m, self.config.d);
        for (node, force) in ctx.nodes.values_mut().zip(forces) {
            node.force += force;
            node.vx += (m * node.force.x).clamp(-cap, cap);
            node.vy += (m * node.force.y).clamp(-cap, cap);
            node.force = Position2D::ZERO;
        }
    }

    /// Offset from `p1` to `p2` and its length; coinciding nodes get a small
    /// random offset so they can separate.
    fn distance(&mut self, p1: Position2D, p2: Position2D) -> (Position2D, f64) {
        let mut delta = p2 - p1;
        if delta.x * delta.x + delta.y * delta.y < 0.01 {
            delta = Position2D::new(
                self.rng.gen::<f64>() * 0.1 + 0.1,
                self.rng.gen::<f64>() * 0.1 + 0.1,
            );
        }
        let d = delta.length();
        (delta, d)
    }

    fn repulse(&mut self, positions: &[Position2D], forces: &mut [Position2D], i: usize, j: usize) {
        let (delta, d) = self.distance(positions[i], positions[j]);
        if d < self.config.r {
            let f = self.config.k.powi(2) / d.powi(2);
            forces[j] += delta * f;
            forces[i] -= delta * f;
        }
    }

    fn attract(
        &mut self,
        positions: &[Position2D],
        forces: &mut [Position2D],
        i: usize,
        j: usize,
        strength: f64,
        length: f64,
    ) {
        let (delta, d) = self.distance(positions[i], positions[j]);
        let d = d.min(self.config.r);
        let k = self.config.k;

        let mut f = (d.powi(2) - k.powi(2)) / k * length;
        f *= strength * 0.5 + 1.0;
        f /= d;

        forces[j] -= delta * f;
        forces[i] += delta * f;
    }
}
