use std::sync::Arc;

use crate::edge::Edge;
use crate::weight::Weight;
use crate::Identifier;

/// One route between two nodes: the traversed edges in order plus their
/// summed weight.
///
/// Reachability is carried by the weight alone. An unreachable target has
/// `W::INFINITY` and no edges; a source-to-self path has `W::ZERO` and no
/// edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<N, E, W = f64> {
    edges: Vec<Arc<Edge<N, E, W>>>,
    total_weight: W,
}

impl<N: Identifier, E: Identifier, W: Weight> Path<N, E, W> {
    pub(crate) fn new(edges: Vec<Arc<Edge<N, E, W>>>, total_weight: W) -> Self {
        Self {
            edges,
            total_weight,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), W::ZERO)
    }

    pub fn unreachable() -> Self {
        Self::new(Vec::new(), W::INFINITY)
    }

    pub fn edges(&self) -> &[Arc<Edge<N, E, W>>] {
        &self.edges
    }

    pub fn total_weight(&self) -> W {
        self.total_weight
    }

    /// Number of edges traversed.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn is_reachable(&self) -> bool {
        !self.total_weight.is_infinite()
    }

    /// Ids of the nodes visited, source first. Empty for an empty path.
    pub fn node_ids(&self) -> Vec<&N> {
        let Some(first) = self.edges.first() else {
            return Vec::new();
        };
        let mut ids = Vec::with_capacity(self.edges.len() + 1);
        ids.push(first.from_node().id());
        ids.extend(self.edges.iter().map(|e| e.to_node().id()));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn test_empty_and_unreachable() {
        let empty: Path<u32, u32, i32> = Path::empty();
        assert!(empty.is_empty());
        assert!(empty.is_reachable());
        assert_eq!(empty.total_weight(), 0);
        assert!(empty.node_ids().is_empty());

        let none: Path<u32, u32, f64> = Path::unreachable();
        assert!(none.is_empty());
        assert!(!none.is_reachable());
        assert_eq!(none.total_weight(), f64::INFINITY);
    }

    #[test]
    fn test_node_ids_follow_edges() {
        let a: Node<char, u8, u32> = Node::new('a');
        let b = Node::new('b');
        let c = Node::new('c');
        let path = Path::new(
            vec![
                Arc::new(Edge::new(1, &a, &b, 2u32)),
                Arc::new(Edge::new(2, &b, &c, 3u32)),
            ],
            5,
        );
        assert_eq!(path.len(), 2);
        assert_eq!(path.node_ids(), vec![&'a', &'b', &'c']);
    }
}
