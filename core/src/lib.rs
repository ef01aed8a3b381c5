//! route-graph-core: identifier-keyed directed graph with shortest paths.
//!
//! A pure Rust library holding a weighted directed graph whose nodes and
//! edges are keyed by caller-chosen identifiers, and three single-source
//! shortest path strategies selected by a declared [`GraphType`].
//!
//! Nodes own their inbound/outbound edge maps; edges are shared between
//! the graph registry and both endpoints and refer back to nodes only by
//! [`NodeHandle`], so there is no ownership cycle.

use std::fmt::Debug;
use std::hash::Hash;

mod edge;
mod error;
mod graph;
mod node;
mod path;
mod shortest_path;
mod traversal;
mod weight;

pub use edge::Edge;
pub use error::{Direction, GraphError, Result};
pub use graph::Graph;
pub use node::{Node, NodeHandle};
pub use path::Path;
pub use shortest_path::{shortest_path, shortest_paths, GraphType};
pub use traversal::{reachable_nodes, topological_order};
pub use weight::Weight;

/// Key type usable for node and edge ids.
pub trait Identifier: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Identifier for T {}
