use crate::node::{Node, NodeHandle};
use crate::Identifier;

/// A directed, weighted connection between two node instances.
///
/// The edge refers to its endpoints by [`NodeHandle`] and never owns them.
/// Equality compares id, endpoints and weight; the graph itself tracks
/// edge identity through `Arc::ptr_eq`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<N, E, W = f64> {
    id: E,
    from: NodeHandle<N>,
    to: NodeHandle<N>,
    weight: W,
}

impl<N: Identifier, E: Identifier, W> Edge<N, E, W> {
    pub fn new(id: E, from: &Node<N, E, W>, to: &Node<N, E, W>, weight: impl Into<W>) -> Self {
        Self {
            id,
            from: from.handle(),
            to: to.handle(),
            weight: weight.into(),
        }
    }

    pub fn id(&self) -> &E {
        &self.id
    }

    pub fn from_node(&self) -> &NodeHandle<N> {
        &self.from
    }

    pub fn to_node(&self) -> &NodeHandle<N> {
        &self.to
    }

    pub fn weight(&self) -> &W {
        &self.weight
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_accessors() {
        let a: Node<u32, u32> = Node::new(1);
        let b = Node::new(2);
        let e = Edge::new(10, &a, &b, 2.5);
        assert_eq!(*e.id(), 10);
        assert_eq!(e.from_node(), &a.handle());
        assert_eq!(e.to_node(), &b.handle());
        assert_eq!(*e.from_node().id(), 1);
        assert_eq!(*e.weight(), 2.5);
        assert!(!e.is_self_loop());
    }

    #[test]
    fn test_raw_numeric_weight_converts() {
        let a: Node<u32, u32, f64> = Node::new(1);
        let e = Edge::new(1, &a, &a, 7u32);
        assert_eq!(*e.weight(), 7.0);
        assert!(e.is_self_loop());
    }

    #[test]
    fn test_equal_constructions_compare_equal() {
        let a: Node<&str, &str, i32> = Node::new("a");
        let b = Node::new("b");
        assert_eq!(Edge::new("ab", &a, &b, 4), Edge::new("ab", &a, &b, 4));
        assert_ne!(Edge::new("ab", &a, &b, 4), Edge::new("ab", &a, &b, 5));

        // Same ids, different node instances
        let b2 = Node::new("b");
        assert_ne!(Edge::new("ab", &a, &b, 4), Edge::new("ab", &a, &b2, 4));
    }
}
