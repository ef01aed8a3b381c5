use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::edge::Edge;
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::node::{Node, NodeHandle};
use crate::Identifier;

/// Dense, read-only view of a graph for a single algorithm call.
///
/// Nodes get indices `0..len()` in the graph's iteration order, which is
/// stable for an unmodified graph, so ties resolve the same way on every
/// call against it.
pub(crate) struct Frame<'g, N, E, W> {
    graph: &'g Graph<N, E, W>,
    nodes: Vec<&'g Node<N, E, W>>,
    index: HashMap<&'g N, usize>,
}

impl<'g, N: Identifier, E: Identifier, W> Frame<'g, N, E, W> {
    pub(crate) fn new(graph: &'g Graph<N, E, W>) -> Self {
        let nodes: Vec<&'g Node<N, E, W>> = graph.nodes().collect();
        let index = nodes.iter().enumerate().map(|(i, n)| (n.id(), i)).collect();
        Self {
            graph,
            nodes,
            index,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, i: usize) -> &'g Node<N, E, W> {
        self.nodes[i]
    }

    /// Index of the node instance named by `handle`, if it is registered.
    pub(crate) fn index_of(&self, handle: &NodeHandle<N>) -> Option<usize> {
        let &i = self.index.get(handle.id())?;
        self.nodes[i].is_instance(handle).then_some(i)
    }

    /// Like [`Frame::index_of`], but an absent handle is a caller error.
    pub(crate) fn require(&self, handle: &NodeHandle<N>, role: &str) -> Result<usize> {
        self.index_of(handle).ok_or_else(|| {
            GraphError::invalid(format!(
                "{} node {:?} is not registered in this graph",
                role,
                handle.id()
            ))
        })
    }

    /// Outbound edges of node `i` paired with the target index.
    ///
    /// Only edges held in the graph's edge registry are followed. Edges
    /// attached to a node before it was inserted are skipped, even when
    /// their endpoints name registered instances.
    pub(crate) fn successors(
        &self,
        i: usize,
    ) -> impl Iterator<Item = (&'g Arc<Edge<N, E, W>>, usize)> + '_ {
        let node = self.nodes[i];
        node.out_edges()
            .filter(move |e| self.is_registered(e))
            .filter_map(move |e| self.index_of(e.to_node()).map(|t| (e, t)))
    }

    fn is_registered(&self, edge: &Arc<Edge<N, E, W>>) -> bool {
        self.graph
            .edge(edge.id())
            .is_some_and(|stored| Arc::ptr_eq(stored, edge))
    }

    /// BFS over outbound edges. Returns a membership mask.
    pub(crate) fn reachable_from(&self, start: usize) -> Vec<bool> {
        let mut visited = vec![false; self.len()];
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for (_, next) in self.successors(current) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        visited
    }

    /// Kahn's algorithm restricted to the nodes set in `members`.
    ///
    /// Returns the order found. It is shorter than the member count when a
    /// cycle blocks part of the set; the second value is then a node on or
    /// behind that cycle.
    pub(crate) fn topological(&self, members: &[bool]) -> (Vec<usize>, Option<usize>) {
        let mut in_degree = vec![0usize; self.len()];
        for i in (0..self.len()).filter(|&i| members[i]) {
            for (_, t) in self.successors(i) {
                if members[t] {
                    in_degree[t] += 1;
                }
            }
        }

        let mut queue: VecDeque<usize> = (0..self.len())
            .filter(|&i| members[i] && in_degree[i] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.len());

        while let Some(current) = queue.pop_front() {
            order.push(current);
            for (_, t) in self.successors(current) {
                if !members[t] {
                    continue;
                }
                in_degree[t] -= 1;
                if in_degree[t] == 0 {
                    queue.push_back(t);
                }
            }
        }

        let blocked = (0..self.len()).find(|&i| members[i] && in_degree[i] > 0);
        (order, blocked)
    }
}

/// All node ids reachable from `source` over outbound edges, `source` included.
pub fn reachable_nodes<N: Identifier, E: Identifier, W>(
    graph: &Graph<N, E, W>,
    source: &NodeHandle<N>,
) -> Result<HashSet<N>> {
    let frame = Frame::new(graph);
    let start = frame.require(source, "source")?;
    let mask = frame.reachable_from(start);
    Ok((0..frame.len())
        .filter(|&i| mask[i])
        .map(|i| frame.node(i).id().clone())
        .collect())
}

/// Node ids in an order where every edge points forward.
///
/// Fails with [`GraphError::CycleDetected`] if the graph has a directed cycle.
pub fn topological_order<N: Identifier, E: Identifier, W>(
    graph: &Graph<N, E, W>,
) -> Result<Vec<N>> {
    let frame = Frame::new(graph);
    let everything = vec![true; frame.len()];
    let (order, blocked) = frame.topological(&everything);
    if let Some(i) = blocked {
        return Err(GraphError::CycleDetected {
            origin: format!("{:?}", frame.node(i).id()),
        });
    }
    Ok(order.into_iter().map(|i| frame.node(i).id().clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestGraph = Graph<u64, u64, u32>;

    fn make_graph(node_count: u64, edges: &[(u64, u64)]) -> TestGraph {
        let mut g = TestGraph::new();
        for id in 0..node_count {
            g.add_node(Node::new(id));
        }
        for (i, &(from, to)) in edges.iter().enumerate() {
            let edge = Edge::new(i as u64, g.node(&from).unwrap(), g.node(&to).unwrap(), 1u32);
            assert!(g.add_edge(edge));
        }
        g
    }

    fn make_chain(n: u64) -> TestGraph {
        let edges: Vec<(u64, u64)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        make_graph(n, &edges)
    }

    fn handle(g: &TestGraph, id: u64) -> NodeHandle<u64> {
        g.node(&id).unwrap().handle()
    }

    #[test]
    fn test_reachable_chain() {
        let g = make_chain(5);
        let from_two = reachable_nodes(&g, &handle(&g, 2)).unwrap();
        assert_eq!(from_two, HashSet::from([2, 3, 4]));
    }

    #[test]
    fn test_reachable_is_directed() {
        let g = make_chain(3);
        let from_last = reachable_nodes(&g, &handle(&g, 2)).unwrap();
        assert_eq!(from_last, HashSet::from([2]));
    }

    #[test]
    fn test_reachable_cycle_no_infinite_loop() {
        let g = make_graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(reachable_nodes(&g, &handle(&g, 1)).unwrap().len(), 4);
    }

    #[test]
    fn test_reachable_foreign_source() {
        let g = make_chain(3);
        let stranger: Node<u64, u64, u32> = Node::new(0);
        let err = reachable_nodes(&g, &stranger.handle()).unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }

    #[test]
    fn test_topological_order_respects_edges() {
        let edges = [(0, 2), (1, 2), (2, 3), (1, 3), (3, 4)];
        let g = make_graph(5, &edges);
        let order = topological_order(&g).unwrap();
        assert_eq!(order.len(), 5);
        let pos = |id: u64| order.iter().position(|&n| n == id).unwrap();
        for (from, to) in edges {
            assert!(pos(from) < pos(to), "{} must precede {}", from, to);
        }
    }

    #[test]
    fn test_topological_order_detects_cycle() {
        let g = make_graph(3, &[(0, 1), (1, 2), (2, 1)]);
        let err = topological_order(&g).unwrap_err();
        assert!(matches!(err, GraphError::CycleDetected { .. }));
    }

    #[test]
    fn test_topological_order_self_loop_is_cycle() {
        let g = make_graph(2, &[(0, 1), (1, 1)]);
        assert!(topological_order(&g).is_err());
    }

    #[test]
    fn test_topological_order_empty_graph() {
        let g = TestGraph::new();
        assert!(topological_order(&g).unwrap().is_empty());
    }

    #[test]
    fn test_preattached_foreign_edge_ignored() {
        let mut a: Node<u64, u64, u32> = Node::new(0);
        let outsider = Node::new(1);
        a.add_out_edge(Arc::new(Edge::new(0, &a, &outsider, 1u32))).unwrap();

        let mut g = TestGraph::new();
        g.add_node(a);
        g.add_node(Node::new(1));
        let reached = reachable_nodes(&g, &handle(&g, 0)).unwrap();
        assert_eq!(reached, HashSet::from([0]));
    }

    #[test]
    fn test_unregistered_edge_to_registered_node_ignored() {
        let mut g = TestGraph::new();
        g.add_node(Node::new(1));
        let mut a: Node<u64, u64, u32> = Node::new(0);
        a.add_out_edge(Arc::new(Edge::new(7, &a, g.node(&1).unwrap(), 1u32)))
            .unwrap();
        g.add_node(a);

        assert!(g.edge(&7).is_none());
        let reached = reachable_nodes(&g, &handle(&g, 0)).unwrap();
        assert_eq!(reached, HashSet::from([0]));
        assert_eq!(topological_order(&g).unwrap().len(), 2);
    }
}
