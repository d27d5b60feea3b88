//! Error types shared by the model, the topology builder and the solvers.
//!
//! Every fallible public API returns [`IsingError`]; library code never panics
//! on bad input.

use thiserror::Error;

/// Reasons an edge set fails to be a spanning tree on `node_count` nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// An edge endpoint, bias key or root lies outside `[0, node_count)`.
    #[error("node {node} is out of range for a model with {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },

    /// An edge connects a node to itself. Biases are not edges.
    #[error("edge ({node}, {node}) is a self-loop")]
    SelfLoop { node: usize },

    /// The same unordered pair appears twice.
    #[error("edge ({u}, {v}) is listed more than once")]
    DuplicateEdge { u: usize, v: usize },

    /// Adding edge `(u, v)` closes a cycle.
    #[error("edge ({u}, {v}) closes a cycle")]
    Cycle { u: usize, v: usize },

    /// The edges leave the graph split into several components.
    #[error("graph is disconnected ({components} components)")]
    Disconnected { components: usize },
}

/// Errors returned by model construction, solving, parsing and rendering.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum IsingError {
    /// The model has no nodes.
    #[error("model has no nodes")]
    EmptyModel,

    /// The coupling graph is not a spanning tree.
    #[error("invalid topology: {0}")]
    InvalidTopology(#[from] TopologyError),

    /// The exhaustive solver refuses models above its enumeration limit.
    #[error("model has {nodes} nodes, exhaustive enumeration is limited to {limit}")]
    ModelTooLarge { nodes: usize, limit: usize },

    /// Σ|bias| + Σ|coupling| does not fit in `i64`, so some energy would not.
    #[error("total weight magnitude {magnitude} exceeds the i64 energy range")]
    Overflow { magnitude: u128 },

    /// An assignment does not cover every node exactly once.
    #[error("assignment has {found} spins, model has {expected} nodes")]
    AssignmentLength { expected: usize, found: usize },

    /// Malformed edge-list record or glyph string.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IsingError>;
