use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::edge::Edge;
use crate::error::Direction;
use crate::node::{Node, NodeHandle};
use crate::Identifier;

/// Owning registry of nodes and edges.
///
/// Nodes are stored by value under their id. Edges are shared as
/// `Arc<Edge>` between the edge registry and the in/out maps of both
/// endpoints. Every registered edge is attached to the exact node
/// instances its handles name.
#[derive(Debug)]
pub struct Graph<N, E, W = f64> {
    nodes: HashMap<N, Node<N, E, W>>,
    edges: HashMap<E, Arc<Edge<N, E, W>>>,
}

impl<N: Identifier, E: Identifier, W> Graph<N, E, W> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity(node_count),
            edges: HashMap::with_capacity(edge_count),
        }
    }

    /// Register a node. Returns false if a node with the same id exists.
    pub fn add_node(&mut self, node: Node<N, E, W>) -> bool {
        if self.nodes.contains_key(node.id()) {
            debug!(node = ?node.id(), "rejecting node: id already registered");
            return false;
        }
        self.nodes.insert(node.id().clone(), node);
        true
    }

    pub fn node(&self, id: &N) -> Option<&Node<N, E, W>> {
        self.nodes.get(id)
    }

    /// Resolve a handle to the registered node, if it names that exact instance.
    pub fn resolve(&self, handle: &NodeHandle<N>) -> Option<&Node<N, E, W>> {
        self.nodes.get(handle.id()).filter(|n| n.is_instance(handle))
    }

    pub fn contains(&self, handle: &NodeHandle<N>) -> bool {
        self.resolve(handle).is_some()
    }

    /// Remove a node and every edge incident to it.
    ///
    /// Incident edges leave the edge registry and the opposite endpoint's
    /// maps. The returned node keeps its own in/out maps as a detached
    /// snapshot.
    pub fn remove_node(&mut self, id: &N) -> Option<Node<N, E, W>> {
        let node = self.nodes.remove(id)?;

        for edge in node.out_edges() {
            self.unregister(edge);
            if let Some(target) = self.nodes.get_mut(edge.to_node().id()) {
                target.detach(edge, Direction::Incoming);
            }
        }
        for edge in node.in_edges() {
            self.unregister(edge);
            if let Some(source) = self.nodes.get_mut(edge.from_node().id()) {
                source.detach(edge, Direction::Outgoing);
            }
        }

        debug!(
            node = ?id,
            in_degree = node.in_degree(),
            out_degree = node.out_degree(),
            "removed node"
        );
        Some(node)
    }

    /// Register an edge and attach it to both endpoints.
    ///
    /// Fails without touching any structure if the edge id is taken, if
    /// either endpoint is not the instance registered under its id, or if
    /// an endpoint already carries an edge with this id in that direction.
    pub fn add_edge(&mut self, edge: Edge<N, E, W>) -> bool {
        if self.edges.contains_key(edge.id()) {
            debug!(edge = ?edge.id(), "rejecting edge: id already registered");
            return false;
        }

        let (Some(from), Some(to)) = (self.resolve(edge.from_node()), self.resolve(edge.to_node()))
        else {
            debug!(
                edge = ?edge.id(),
                from = ?edge.from_node().id(),
                to = ?edge.to_node().id(),
                "rejecting edge: endpoint is not a registered node instance"
            );
            return false;
        };

        if from.out_edge(edge.id()).is_some() || to.in_edge(edge.id()).is_some() {
            debug!(edge = ?edge.id(), "rejecting edge: id already attached to an endpoint");
            return false;
        }

        let edge = Arc::new(edge);
        // Both endpoints were checked above, so neither map holds this id.
        if let Some(from) = self.nodes.get_mut(edge.from_node().id()) {
            if let Err(err) = from.add_out_edge(Arc::clone(&edge)) {
                debug!(error = %err, "outbound attach failed after validation");
            }
        }
        if let Some(to) = self.nodes.get_mut(edge.to_node().id()) {
            if let Err(err) = to.add_in_edge(Arc::clone(&edge)) {
                debug!(error = %err, "inbound attach failed after validation");
            }
        }
        self.edges.insert(edge.id().clone(), edge);
        true
    }

    pub fn edge(&self, id: &E) -> Option<&Arc<Edge<N, E, W>>> {
        self.edges.get(id)
    }

    /// Unregister an edge and detach it from both endpoints.
    pub fn remove_edge(&mut self, id: &E) -> Option<Arc<Edge<N, E, W>>> {
        let edge = self.edges.remove(id)?;
        if let Some(from) = self.nodes.get_mut(edge.from_node().id()) {
            from.detach(&edge, Direction::Outgoing);
        }
        if let Some(to) = self.nodes.get_mut(edge.to_node().id()) {
            to.detach(&edge, Direction::Incoming);
        }
        Some(edge)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node<N, E, W>> + '_ {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Arc<Edge<N, E, W>>> + '_ {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Drop `edge` from the registry if that exact instance is registered.
    fn unregister(&mut self, edge: &Arc<Edge<N, E, W>>) {
        if self
            .edges
            .get(edge.id())
            .is_some_and(|stored| Arc::ptr_eq(stored, edge))
        {
            self.edges.remove(edge.id());
        }
    }
}

impl<N: Identifier, E: Identifier, W> Default for Graph<N, E, W> {
    fn default() -> Self {
        Self::new()
    }
}
