use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::edge::Edge;
use crate::error::{Direction, GraphError, Result};
use crate::Identifier;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Non-owning reference to one node instance.
///
/// Two nodes constructed with the same id get different handles, so a
/// look-alike node cannot stand in for the one registered in a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeHandle<N> {
    id: N,
    instance: u64,
}

impl<N> NodeHandle<N> {
    pub fn id(&self) -> &N {
        &self.id
    }
}

/// A vertex with its own inbound and outbound edge maps, keyed by edge id.
///
/// Edges are attached by [`crate::Graph::add_edge`]; the `add_*_edge`
/// methods here are the low-level path and treat a repeated id as a
/// programming error.
#[derive(Debug)]
pub struct Node<N, E, W = f64> {
    id: N,
    instance: u64,
    inbound: HashMap<E, Arc<Edge<N, E, W>>>,
    outbound: HashMap<E, Arc<Edge<N, E, W>>>,
}

impl<N: Identifier, E: Identifier, W> Node<N, E, W> {
    pub fn new(id: N) -> Self {
        Self {
            id,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            inbound: HashMap::new(),
            outbound: HashMap::new(),
        }
    }

    pub fn id(&self) -> &N {
        &self.id
    }

    pub fn handle(&self) -> NodeHandle<N> {
        NodeHandle {
            id: self.id.clone(),
            instance: self.instance,
        }
    }

    /// True if `handle` was taken from this exact node.
    pub fn is_instance(&self, handle: &NodeHandle<N>) -> bool {
        self.instance == handle.instance && self.id == handle.id
    }

    pub fn add_in_edge(&mut self, edge: Arc<Edge<N, E, W>>) -> Result<()> {
        attach(&mut self.inbound, edge, Direction::Incoming)
    }

    pub fn add_out_edge(&mut self, edge: Arc<Edge<N, E, W>>) -> Result<()> {
        attach(&mut self.outbound, edge, Direction::Outgoing)
    }

    pub fn in_edge(&self, id: &E) -> Option<&Arc<Edge<N, E, W>>> {
        self.inbound.get(id)
    }

    pub fn out_edge(&self, id: &E) -> Option<&Arc<Edge<N, E, W>>> {
        self.outbound.get(id)
    }

    pub fn remove_in_edge(&mut self, id: &E) -> bool {
        self.inbound.remove(id).is_some()
    }

    pub fn remove_out_edge(&mut self, id: &E) -> bool {
        self.outbound.remove(id).is_some()
    }

    pub fn in_edges(&self) -> impl Iterator<Item = &Arc<Edge<N, E, W>>> + '_ {
        self.inbound.values()
    }

    pub fn out_edges(&self) -> impl Iterator<Item = &Arc<Edge<N, E, W>>> + '_ {
        self.outbound.values()
    }

    pub fn in_degree(&self) -> usize {
        self.inbound.len()
    }

    pub fn out_degree(&self) -> usize {
        self.outbound.len()
    }

    /// Detach `edge` from the map for `direction`, but only if that exact
    /// edge instance is the one stored under its id.
    pub(crate) fn detach(&mut self, edge: &Arc<Edge<N, E, W>>, direction: Direction) -> bool {
        let map = match direction {
            Direction::Incoming => &mut self.inbound,
            Direction::Outgoing => &mut self.outbound,
        };
        match map.get(edge.id()) {
            Some(stored) if Arc::ptr_eq(stored, edge) => map.remove(edge.id()).is_some(),
            _ => false,
        }
    }
}

fn attach<N: Identifier, E: Identifier, W>(
    map: &mut HashMap<E, Arc<Edge<N, E, W>>>,
    edge: Arc<Edge<N, E, W>>,
    direction: Direction,
) -> Result<()> {
    if map.contains_key(edge.id()) {
        return Err(GraphError::DuplicateIdentifier {
            direction,
            id: format!("{:?}", edge.id()),
        });
    }
    map.insert(edge.id().clone(), edge);
    Ok(())
}
