use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{GraphError, Result};
use crate::traversal::Frame;
use crate::weight::Weight;
use crate::Identifier;

use super::Relaxation;

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance first,
/// lowest node index on ties.
struct Frontier<W> {
    dist: W,
    idx: usize,
}

impl<W: Weight> PartialEq for Frontier<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for Frontier<W> {}

impl<W: Weight> PartialOrd for Frontier<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for Frontier<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

/// Dijkstra with lazy deletion: stale heap entries are skipped on pop.
///
/// A negative edge met during relaxation fails the call, since settled
/// distances would no longer be final.
pub(super) fn relax<'g, N, E, W>(
    frame: &Frame<'g, N, E, W>,
    source: usize,
) -> Result<Relaxation<'g, N, E, W>>
where
    N: Identifier,
    E: Identifier,
    W: Weight,
{
    let mut table = Relaxation::new(frame.len(), source);
    let mut settled = vec![false; frame.len()];
    let mut open = BinaryHeap::new();
    open.push(Frontier {
        dist: W::ZERO,
        idx: source,
    });

    while let Some(Frontier { dist, idx }) = open.pop() {
        if settled[idx] || dist.total_cmp(&table.dist(idx)).is_gt() {
            continue;
        }
        settled[idx] = true;

        for (edge, next) in frame.successors(idx) {
            if edge.weight().is_negative() {
                return Err(GraphError::NegativeWeight {
                    edge: format!("{:?}", edge.id()),
                });
            }
            if settled[next] {
                continue;
            }
            let candidate = table.candidate(idx, edge);
            if table.improve(next, candidate, edge) {
                open.push(Frontier {
                    dist: candidate,
                    idx: next,
                });
            }
        }
    }
    Ok(table)
}
