//! Graph aggregates

pub mod dynamic_graph;
pub mod edge;
pub mod graph;
pub mod node;

pub use dynamic_graph::*;
pub use edge::*;
pub use graph::*;
pub use node::*;

/// Errors that can occur in graph operations
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Edge not found: {0} - {1}")]
    EdgeNotFound(String, String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
