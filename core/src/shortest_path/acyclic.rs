use crate::error::{GraphError, Result};
use crate::traversal::Frame;
use crate::weight::Weight;
use crate::Identifier;

use super::Relaxation;

/// One relaxation pass over the sub-graph reachable from `source`, in
/// topological order. Only cycles reachable from `source` are rejected.
pub(super) fn relax<'g, N, E, W>(
    frame: &Frame<'g, N, E, W>,
    source: usize,
) -> Result<Relaxation<'g, N, E, W>>
where
    N: Identifier,
    E: Identifier,
    W: Weight,
{
    let reachable = frame.reachable_from(source);
    let (order, blocked) = frame.topological(&reachable);
    if let Some(i) = blocked {
        return Err(GraphError::CycleDetected {
            origin: format!("{:?}", frame.node(i).id()),
        });
    }

    let mut table: Relaxation<N, E, W> = Relaxation::new(frame.len(), source);
    for current in order {
        if table.dist(current).is_infinite() {
            continue;
        }
        for (edge, next) in frame.successors(current) {
            let candidate = table.candidate(current, edge);
            table.improve(next, candidate, edge);
        }
    }
    Ok(table)
}
