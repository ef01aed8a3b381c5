//! Error taxonomy for graph construction and shortest path queries.
//!
//! Only node-level edge attachment and the algorithm entry points return
//! errors. Graph-level mutations report failure through `bool`/`Option`
//! and lookups return `Option`.

use std::fmt;

use thiserror::Error;

/// Which edge map of a node an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Incoming => f.write_str("incoming"),
            Direction::Outgoing => f.write_str("outgoing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node handle or argument does not belong to the graph being queried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A node already has an edge with this id in the given direction.
    #[error("duplicate {direction} edge id {id}")]
    DuplicateIdentifier { direction: Direction, id: String },

    /// General mode found a negative-weight cycle reachable from the source.
    #[error("negative-weight cycle reachable from node {origin}")]
    NegativeCycle { origin: String },

    /// Acyclic mode found a directed cycle.
    #[error("directed cycle reachable from node {origin}")]
    CycleDetected { origin: String },

    /// Nonnegative mode relaxed an edge with a negative weight.
    #[error("edge {edge} has a negative weight; use the general strategy")]
    NegativeWeight { edge: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GraphError::InvalidArgument(msg.into())
    }
}
