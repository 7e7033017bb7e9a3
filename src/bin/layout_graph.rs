//! Lay out an edge list and print node positions and centralities
//!
//! Reads a JSON array of `{"from", "to", "weight", "length"}` objects, solves
//! the layout and writes one JSON record per node to stdout.
//!
//! ```text
//! layout-graph edges.json [config.json]
//! ```
//!
//! Set `RUST_LOG=debug` to watch the layout progress.

use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use cim_graph_layout::{EdgeOptions, EigenvectorOptions, Graph, GraphConfig};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    #[serde(default)]
    weight: f64,
    #[serde(default = "default_length")]
    length: f64,
}

fn default_length() -> f64 {
    1.0
}

#[derive(Debug, Serialize)]
struct NodeReport {
    id: String,
    x: f64,
    y: f64,
    betweenness: f64,
    eigenvalue: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(edges_path) = args.next() else {
        bail!("usage: layout-graph <edges.json> [config.json]");
    };

    let config = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {path}"))?;
            GraphConfig::from_json(&json).with_context(|| format!("invalid config {path}"))?
        }
        None => GraphConfig::default(),
    };

    let json = fs::read_to_string(&edges_path)
        .with_context(|| format!("failed to read edge list {edges_path}"))?;
    let records: Vec<EdgeRecord> =
        serde_json::from_str(&json).with_context(|| format!("invalid edge list {edges_path}"))?;

    let mut graph = Graph::with_config(config);
    for record in &records {
        let options = EdgeOptions::new()
            .weight(record.weight)
            .length(record.length);
        if graph.add_edge(&record.from, &record.to, options).is_none() {
            info!(node = %record.from, "skipping self-loop");
        }
    }
    info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "edge list loaded"
    );

    graph.solve();
    let betweenness = graph.betweenness_centrality(true);
    let eigenvalues = graph.eigenvector_centrality(&EigenvectorOptions::default());
    info!(iterations = graph.layout().iteration(), "layout solved");

    let report: Vec<NodeReport> = graph
        .nodes()
        .map(|n| NodeReport {
            id: n.id().to_string(),
            x: n.vx,
            y: n.vy,
            betweenness: betweenness.get(n.id()).copied().unwrap_or_default(),
            eigenvalue: eigenvalues.get(n.id()).copied().unwrap_or_default(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
