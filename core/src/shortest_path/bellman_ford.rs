use std::sync::Arc;

use crate::edge::Edge;
use crate::error::{GraphError, Result};
use crate::traversal::Frame;
use crate::weight::Weight;
use crate::Identifier;

use super::Relaxation;

/// Bellman-Ford: up to `V - 1` passes over every edge, stopping early once
/// a pass changes nothing. If the last allowed pass still changed
/// something, one more pass decides whether a negative cycle is reachable.
pub(super) fn relax<'g, N, E, W>(
    frame: &Frame<'g, N, E, W>,
    source: usize,
) -> Result<Relaxation<'g, N, E, W>>
where
    N: Identifier,
    E: Identifier,
    W: Weight,
{
    let edges: Vec<(usize, &'g Arc<Edge<N, E, W>>, usize)> = (0..frame.len())
        .flat_map(move |from| frame.successors(from).map(move |(e, to)| (from, e, to)))
        .collect();

    let mut table = Relaxation::new(frame.len(), source);
    let mut converged = false;
    for _ in 1..frame.len() {
        if !pass(&mut table, &edges) {
            converged = true;
            break;
        }
    }

    if !converged && pass(&mut table, &edges) {
        return Err(GraphError::NegativeCycle {
            origin: format!("{:?}", frame.node(source).id()),
        });
    }
    Ok(table)
}

/// Relax every edge once. Returns true if any distance dropped.
fn pass<'g, N, E, W>(
    table: &mut Relaxation<'g, N, E, W>,
    edges: &[(usize, &'g Arc<Edge<N, E, W>>, usize)],
) -> bool
where
    N: Identifier,
    E: Identifier,
    W: Weight,
{
    let mut changed = false;
    for &(from, edge, to) in edges {
        if table.dist(from).is_infinite() {
            continue;
        }
        let candidate = table.candidate(from, edge);
        changed |= table.improve(to, candidate, edge);
    }
    changed
}
