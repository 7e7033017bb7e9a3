//! Node centrality measures
//!
//! Betweenness measures passing traffic, eigenvector centrality measures
//! incoming influence. Both write their scores into the node caches, which
//! stay valid until the next structural change.

use std::collections::{HashMap, VecDeque};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::aggregate::{Graph, Node};
use crate::value_objects::Centrality;

/// Parameters of the eigenvector power iteration
#[derive(Debug, Clone, PartialEq)]
pub struct EigenvectorOptions {
    /// Scale scores so that the highest is 1.0
    pub normalized: bool,
    /// Measure incoming influence (`node1 -> node2`) instead of outgoing
    pub reversed: bool,
    /// Stronger edges carry less influence (`1 - weight / 2`), as in path costs
    pub weighted: bool,
    /// Per-node importance multipliers, 1.0 when absent
    pub rating: HashMap<String, f64>,
    /// Starting vector; uniform when absent, missing ids start at zero
    pub start: Option<HashMap<String, f64>>,
    pub iterations: usize,
    pub tolerance: f64,
}

impl Default for EigenvectorOptions {
    fn default() -> Self {
        Self {
            normalized: true,
            reversed: true,
            weighted: true,
            rating: HashMap::new(),
            start: None,
            iterations: 100,
            tolerance: 0.0001,
        }
    }
}

/// Outcome of a power iteration run
#[derive(Debug, Clone)]
struct PowerIteration {
    scores: Vec<f64>,
    iterations: usize,
    converged: bool,
}

/// Unique undirected neighbours per node index
fn neighbor_indices(graph: &Graph) -> Vec<Vec<usize>> {
    let nodes = graph.nodes_map();
    nodes
        .values()
        .map(|node| {
            let mut neighbors: Vec<usize> = node
                .links()
                .iter()
                .filter_map(|id| nodes.get_index_of(id))
                .collect();
            neighbors.sort_unstable();
            neighbors.dedup();
            neighbors
        })
        .collect()
}

/// Brandes' algorithm with breadth-first search from every node.
fn brandes(graph: &Graph, normalized: bool) -> Vec<f64> {
    let adjacency = neighbor_indices(graph);
    let n = adjacency.len();
    let mut scores = vec![0.0; n];

    for s in 0..n {
        let mut stack = Vec::with_capacity(n);
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0_f64; n];
        let mut dist: Vec<Option<usize>> = vec![None; n];
        sigma[s] = 1.0;
        dist[s] = Some(0);

        let mut queue = VecDeque::from([s]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let next = dist[v].map_or(0, |d| d + 1);
            for &w in &adjacency[v] {
                if dist[w].is_none() {
                    dist[w] = Some(next);
                    queue.push_back(w);
                }
                if dist[w] == Some(next) {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0; n];
        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                scores[w] += delta[w];
            }
        }
    }

    // Every unordered pair was counted from both ends.
    let scale = if normalized && n > 2 {
        ((n - 1) * (n - 2)) as f64
    } else {
        2.0
    };
    scores.iter_mut().for_each(|s| *s /= scale);
    scores
}

fn normalize_sum(x: &mut [f64]) {
    let s: f64 = x.iter().sum();
    if s != 0.0 {
        x.iter_mut().for_each(|v| *v /= s);
    }
}

fn power_iteration(graph: &Graph, options: &EigenvectorOptions) -> PowerIteration {
    let nodes = graph.nodes_map();
    let n = nodes.len();

    // rows[target] lists (source, strength) of the edges feeding target
    let mut rows: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    for edge in graph.edges() {
        let (Some(a), Some(b)) = (
            nodes.get_index_of(edge.node1()),
            nodes.get_index_of(edge.node2()),
        ) else {
            continue;
        };
        let (source, target) = if options.reversed { (a, b) } else { (b, a) };
        let strength = if options.weighted {
            1.0 - edge.weight() * 0.5
        } else {
            1.0
        };
        rows[target].push((source, strength));
    }

    let rating: Vec<f64> = nodes
        .keys()
        .map(|id| options.rating.get(id).copied().unwrap_or(1.0))
        .collect();

    let mut x: Vec<f64> = match &options.start {
        Some(start) => nodes
            .keys()
            .map(|id| start.get(id).copied().unwrap_or(0.0))
            .collect(),
        None => vec![1.0; n],
    };
    normalize_sum(&mut x);

    for iteration in 1..=options.iterations {
        let x0 = std::mem::replace(&mut x, vec![0.0; n]);
        for (target, row) in rows.iter().enumerate() {
            for &(source, strength) in row {
                x[target] += 0.01 + x0[source] * strength * rating[target];
            }
        }
        normalize_sum(&mut x);

        let change: f64 = x.iter().zip(&x0).map(|(a, b)| (a - b).abs()).sum();
        if change < n as f64 * options.tolerance {
            return PowerIteration {
                scores: x,
                iterations: iteration,
                converged: true,
            };
        }
    }

    PowerIteration {
        scores: x,
        iterations: options.iterations,
        converged: n == 0,
    }
}

impl Graph {
    /// Betweenness of every node, cached on the nodes.
    pub fn betweenness_centrality(&mut self, normalized: bool) -> IndexMap<String, f64> {
        let scores = brandes(self, normalized);
        debug!(nodes = scores.len(), normalized, "betweenness computed");
        self.store_scores(scores, |node, score| {
            node.betweenness = Centrality::Computed(score)
        })
    }

    /// Eigenvector centrality of every node, cached on the nodes.
    ///
    /// Logs a warning and keeps the last estimate when the power iteration
    /// does not converge within `options.iterations` steps.
    pub fn eigenvector_centrality(&mut self, options: &EigenvectorOptions) -> IndexMap<String, f64> {
        let run = power_iteration(self, options);
        if run.converged {
            debug!(iterations = run.iterations, "eigenvector centrality converged");
        } else {
            warn!(
                iterations = run.iterations,
                "eigenvector centrality did not converge, keeping the last estimate"
            );
        }

        let mut scores = run.scores;
        if options.normalized {
            let max = scores.iter().copied().fold(0.0, f64::max);
            if max != 0.0 {
                scores.iter_mut().for_each(|s| *s /= max);
            }
        }
        self.store_scores(scores, |node, score| {
            node.eigenvalue = Centrality::Computed(score)
        })
    }

    /// Cached betweenness, computed for the whole graph on first use
    pub fn betweenness(&mut self, id: &str) -> Option<f64> {
        if !self.node(id)?.betweenness().is_computed() {
            self.betweenness_centrality(true);
        }
        self.node(id)?.betweenness().value()
    }

    /// Cached eigenvalue, computed with default options on first use
    pub fn eigenvalue(&mut self, id: &str) -> Option<f64> {
        if !self.node(id)?.eigenvalue().is_computed() {
            self.eigenvector_centrality(&EigenvectorOptions::default());
        }
        self.node(id)?.eigenvalue().value()
    }

    /// Nodes above the threshold, the most passing traffic first.
    pub fn nodes_by_betweenness(&mut self, threshold: f64) -> Vec<&Node> {
        if self.nodes().any(|n| !n.betweenness().is_computed()) {
            self.betweenness_centrality(true);
        }
        ranked(self, threshold, Node::betweenness)
    }

    pub fn nodes_by_traffic(&mut self, threshold: f64) -> Vec<&Node> {
        self.nodes_by_betweenness(threshold)
    }

    /// Nodes above the threshold, the most incoming influence first.
    pub fn nodes_by_eigenvalue(&mut self, threshold: f64) -> Vec<&Node> {
        if self.nodes().any(|n| !n.eigenvalue().is_computed()) {
            self.eigenvector_centrality(&EigenvectorOptions::default());
        }
        ranked(self, threshold, Node::eigenvalue)
    }

    pub fn nodes_by_weight(&mut self, threshold: f64) -> Vec<&Node> {
        self.nodes_by_eigenvalue(threshold)
    }

    fn store_scores<F>(&mut self, scores: Vec<f64>, mut write: F) -> IndexMap<String, f64>
    where
        F: FnMut(&mut Node, f64),
    {
        let nodes = self.nodes_map_mut();
        debug_assert_eq!(nodes.len(), scores.len());
        nodes
            .values_mut()
            .zip(scores)
            .map(|(node, score)| {
                write(node, score);
                (node.id().to_string(), score)
            })
            .collect()
    }
}

/// Stable descending sort; ties keep insertion order.
fn ranked<F>(graph: &Graph, threshold: f64, score: F) -> Vec<&Node>
where
    F: Fn(&Node) -> Centrality,
{
    let mut nodes: Vec<(&Node, f64)> = graph
        .nodes()
        .filter_map(|n| score(n).value().map(|s| (n, s)))
        .filter(|(_, s)| *s > threshold)
        .collect();
    nodes.sort_by(|a, b| b.1.total_cmp(&a.1));
    nodes.into_iter().map(|(n, _)| n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::EdgeOptions;

    fn star() -> Graph {
        let mut g = Graph::new();
        for leaf in ["l1", "l2", "l3", "l4"] {
            g.add_edge("C", leaf, EdgeOptions::default());
        }
        g
    }

    fn cycle(count: usize) -> Graph {
        let mut g = Graph::new();
        for i in 0..count {
            g.add_edge(
                &format!("n{i}"),
                &format!("n{}", (i + 1) % count),
                EdgeOptions::new().weight(0.5),
            );
        }
        g
    }

    #[test]
    fn test_star_betweenness() {
        let mut g = star();
        let scores = g.betweenness_centrality(true);

        assert!((scores["C"] - 1.0).abs() < 1e-9);
        for leaf in ["l1", "l2", "l3", "l4"] {
            assert_eq!(scores[leaf], 0.0);
        }
        assert_eq!(g.node("C").unwrap().betweenness(), Centrality::Computed(1.0));
    }

    #[test]
    fn test_path_betweenness_unnormalized() {
        let mut g = Graph::new();
        g.add_edge("a", "b", EdgeOptions::default());
        g.add_edge("b", "c", EdgeOptions::default());
        g.add_edge("c", "d", EdgeOptions::default());

        let scores = g.betweenness_centrality(false);
        // b lies on a-c and a-d, c on a-d and b-d
        assert_eq!(scores["b"], 2.0);
        assert_eq!(scores["c"], 2.0);
        assert_eq!(scores["a"], 0.0);
    }

    #[test]
    fn test_duplicate_edges_do_not_double_count() {
        let mut g = star();
        g.add_edge("l1", "C", EdgeOptions::default());
        let scores = g.betweenness_centrality(true);
        assert!((scores["C"] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cycle_eigenvector_equal() {
        let mut g = cycle(6);
        let options = EigenvectorOptions::default();
        let scores = g.eigenvector_centrality(&options);

        let first = scores["n0"];
        for score in scores.values() {
            assert!((score - first).abs() < options.tolerance);
        }
        assert!((first - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_incoming_edges_scores_zero() {
        let mut g = Graph::new();
        g.add_edge("src", "hub", EdgeOptions::default());
        g.add_edge("other", "hub", EdgeOptions::default());

        let scores = g.eigenvector_centrality(&EigenvectorOptions::default());
        assert_eq!(scores["src"], 0.0);
        assert_eq!(scores["hub"], 1.0);

        let outgoing = g.eigenvector_centrality(&EigenvectorOptions {
            reversed: false,
            ..EigenvectorOptions::default()
        });
        assert_eq!(outgoing["hub"], 0.0);
    }

    #[test]
    fn test_non_convergence_keeps_estimate() {
        let mut g = star();
        let scores = g.eigenvector_centrality(&EigenvectorOptions {
            iterations: 0,
            normalized: false,
            ..EigenvectorOptions::default()
        });

        // The uniform start vector comes back unchanged.
        for score in scores.values() {
            assert!((score - 0.2).abs() < 1e-9);
        }
        assert!(g.node("C").unwrap().eigenvalue().is_computed());
    }

    #[test]
    fn test_lazy_readers_and_invalidation() {
        let mut g = star();
        assert!(!g.node("C").unwrap().betweenness().is_computed());
        assert_eq!(g.betweenness("C"), Some(1.0));
        assert!(g.node("l1").unwrap().betweenness().is_computed());

        g.add_node("C");
        assert!(g.node("l1").unwrap().betweenness().is_computed());

        g.add_edge("l1", "l2", EdgeOptions::default());
        assert!(!g.node("l1").unwrap().betweenness().is_computed());
        assert!(g.betweenness("missing").is_none());
        assert!(g.eigenvalue("C").is_some());
    }

    #[test]
    fn test_nodes_by_betweenness() {
        let mut g = Graph::new();
        g.add_edge("a", "b", EdgeOptions::default());
        g.add_edge("b", "c", EdgeOptions::default());
        g.add_edge("c", "d", EdgeOptions::default());
        g.add_edge("d", "e", EdgeOptions::default());

        let ranked: Vec<&str> = g.nodes_by_traffic(0.0).into_iter().map(Node::id).collect();
        assert_eq!(ranked, vec!["c", "b", "d"]);
    }
}
