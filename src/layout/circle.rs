//! Circle layout: nodes arranged on one or more concentric orbits.
//!
//! Nodes are ordered by betweenness centrality, so nodes with a lot of passing
//! traffic land on the inner orbits. Outer orbits hold quadratically more
//! nodes than inner ones.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use super::LayoutContext;
use crate::aggregate::DEFAULT_NODE_RADIUS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleConfig {
    /// Outer orbit radius in layout units
    pub radius: f64,
    /// Number of concentric orbits
    pub orbits: usize,
    /// Angle of the first node on every orbit, in radians
    pub start_angle: f64,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            orbits: 2,
            start_angle: FRAC_PI_2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CircleLayout {
    pub config: CircleConfig,
}

impl CircleLayout {
    pub fn new(config: CircleConfig) -> Self {
        Self { config }
    }

    /// Places every node; `progress` (0.0 - 1.0) scales the orbit radii.
    pub(crate) fn place(&self, ctx: &mut LayoutContext<'_>, progress: f64) {
        let count = ctx.nodes.len();
        if count <= 1 {
            for node in ctx.nodes.values_mut() {
                node.vx = 0.0;
                node.vy = 0.0;
            }
            return;
        }

        // Most central first; ties keep insertion order.
        let mut order: Vec<usize> = (0..count).collect();
        order.sort_by(|&a, &b| {
            let score = |i: usize| {
                ctx.nodes[i].betweenness().value().unwrap_or(0.0)
            };
            score(b).total_cmp(&score(a))
        });

        let orbits = self.config.orbits.max(1);
        let mut rings: Vec<&[usize]> = Vec::with_capacity(orbits);
        let mut rest = order.as_slice();
        for i in 0..orbits {
            let share = 1.0 / ((orbits - i) as f64).powi(2);
            let take = ((share * count as f64) as usize).max(1).min(rest.len());
            let (ring, tail) = rest.split_at(take);
            rings.push(ring);
            rest = tail;
        }

        let total = rings.len() as f64;
        for (ring_index, ring) in rings.iter().enumerate() {
            if ring.is_empty() {
                continue;
            }
            let fraction = (ring_index + 1) as f64 / total;
            let r = self.config.radius * progress * fraction;

            // Node diameter against the orbit circumference decides the spacing.
            let circumference = self.config.radius * ctx.scale * TAU * fraction;
            let s = DEFAULT_NODE_RADIUS * 2.0 / circumference * 2.0;
            let step = (TAU * s).min(TAU / ring.len() as f64);

            let mut angle = self.config.start_angle;
            for &index in ring.iter() {
                let node = &mut ctx.nodes[index];
                node.vx = r * angle.cos();
                node.vy = r * angle.sin();
                angle += step;
            }
        }
    }
}
