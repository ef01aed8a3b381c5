//! Single-source shortest paths over a [`Graph`].
//!
//! The caller declares what the graph satisfies through [`GraphType`] and
//! the matching strategy runs:
//!
//! | GraphType | Strategy | Complexity |
//! |---|---|---|
//! | [`GraphType::Acyclic`] | relaxation in topological order | O(V + E) |
//! | [`GraphType::NonnegativeWeights`] | Dijkstra, binary heap | O((V + E) log V) |
//! | [`GraphType::General`] | Bellman-Ford | O(V * E) |
//!
//! All three fill the same distance/predecessor table, and paths are
//! rebuilt from the predecessor edges. A declared precondition that turns
//! out false is reported as an error instead of a wrong answer.

mod acyclic;
mod bellman_ford;
mod dijkstra;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::edge::Edge;
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::node::NodeHandle;
use crate::path::Path;
use crate::traversal::Frame;
use crate::weight::Weight;
use crate::Identifier;

/// Caller-declared property of the graph, selecting the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphType {
    /// No directed cycle is reachable from the source. Weights may be negative.
    Acyclic,
    /// Every edge weight is at least zero.
    NonnegativeWeights,
    /// No assumption. Negative weights allowed; negative cycles are an error.
    General,
}

impl GraphType {
    pub const ALL: [GraphType; 3] = [
        GraphType::Acyclic,
        GraphType::NonnegativeWeights,
        GraphType::General,
    ];

    fn relax<'g, N, E, W>(
        self,
        frame: &Frame<'g, N, E, W>,
        source: usize,
    ) -> Result<Relaxation<'g, N, E, W>>
    where
        N: Identifier,
        E: Identifier,
        W: Weight,
    {
        match self {
            GraphType::Acyclic => acyclic::relax(frame, source),
            GraphType::NonnegativeWeights => dijkstra::relax(frame, source),
            GraphType::General => bellman_ford::relax(frame, source),
        }
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphType::Acyclic => f.pad("acyclic"),
            GraphType::NonnegativeWeights => f.pad("nonnegative"),
            GraphType::General => f.pad("general"),
        }
    }
}

impl FromStr for GraphType {
    type Err = GraphError;

    /// Accepts the strategy names as well as the graph-type names, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "acyclic" | "dag" => Ok(GraphType::Acyclic),
            "nonnegative" | "nonnegative-weights" | "dijkstra" => Ok(GraphType::NonnegativeWeights),
            "general" | "bellman-ford" => Ok(GraphType::General),
            other => Err(GraphError::invalid(format!(
                "unknown graph type '{}' (use 'acyclic', 'nonnegative' or 'general')",
                other
            ))),
        }
    }
}

/// Distance and predecessor table filled in by one strategy run.
pub(crate) struct Relaxation<'g, N, E, W> {
    source: usize,
    dist: Vec<W>,
    pred: Vec<Option<&'g Arc<Edge<N, E, W>>>>,
    relaxations: usize,
}

impl<'g, N: Identifier, E: Identifier, W: Weight> Relaxation<'g, N, E, W> {
    fn new(node_count: usize, source: usize) -> Self {
        let mut dist = vec![W::INFINITY; node_count];
        dist[source] = W::ZERO;
        Self {
            source,
            dist,
            pred: vec![None; node_count],
            relaxations: 0,
        }
    }

    fn dist(&self, i: usize) -> W {
        self.dist[i]
    }

    /// Tentative distance to `to` through `edge` from `from`.
    fn candidate(&self, from: usize, edge: &Edge<N, E, W>) -> W {
        self.dist[from].plus(*edge.weight())
    }

    /// Lower the distance of `to` if `candidate` strictly improves it.
    fn improve(&mut self, to: usize, candidate: W, edge: &'g Arc<Edge<N, E, W>>) -> bool {
        if candidate.total_cmp(&self.dist[to]).is_lt() {
            self.dist[to] = candidate;
            self.pred[to] = Some(edge);
            self.relaxations += 1;
            true
        } else {
            false
        }
    }

    /// Walk predecessor edges back from `target` to the source.
    fn path_to(&self, frame: &Frame<'g, N, E, W>, target: usize) -> Path<N, E, W> {
        let total = self.dist[target];
        if total.is_infinite() {
            return Path::unreachable();
        }

        let mut edges = Vec::new();
        let mut current = target;
        while current != self.source && edges.len() < frame.len() {
            let Some(edge) = self.pred[current] else {
                break;
            };
            edges.push(Arc::clone(edge));
            match frame.index_of(edge.from_node()) {
                Some(prev) => current = prev,
                None => break,
            }
        }
        edges.reverse();
        Path::new(edges, total)
    }
}

/// Shortest path from `source` to `target`.
///
/// Both handles must name node instances registered in `graph`; otherwise
/// the call fails with [`GraphError::InvalidArgument`] before any work.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(graph_type = %graph_type, source = ?source.id(), target = ?target.id())
)]
pub fn shortest_path<N, E, W>(
    graph: &Graph<N, E, W>,
    graph_type: GraphType,
    source: &NodeHandle<N>,
    target: &NodeHandle<N>,
) -> Result<Path<N, E, W>>
where
    N: Identifier,
    E: Identifier,
    W: Weight,
{
    let frame = Frame::new(graph);
    let s = frame.require(source, "source")?;
    let t = frame.require(target, "target")?;

    let table = run(&frame, graph_type, s)?;
    Ok(table.path_to(&frame, t))
}

/// Shortest paths from `source` to every node reachable from it.
///
/// The map is keyed by node id and includes `source` itself with an empty
/// path. Unreachable nodes are omitted.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(graph_type = %graph_type, source = ?source.id())
)]
pub fn shortest_paths<N, E, W>(
    graph: &Graph<N, E, W>,
    graph_type: GraphType,
    source: &NodeHandle<N>,
) -> Result<HashMap<N, Path<N, E, W>>>
where
    N: Identifier,
    E: Identifier,
    W: Weight,
{
    let frame = Frame::new(graph);
    let s = frame.require(source, "source")?;

    let table = run(&frame, graph_type, s)?;
    Ok((0..frame.len())
        .filter(|&i| !table.dist(i).is_infinite())
        .map(|i| (frame.node(i).id().clone(), table.path_to(&frame, i)))
        .collect())
}

fn run<'g, N, E, W>(
    frame: &Frame<'g, N, E, W>,
    graph_type: GraphType,
    source: usize,
) -> Result<Relaxation<'g, N, E, W>>
where
    N: Identifier,
    E: Identifier,
    W: Weight,
{
    match graph_type.relax(frame, source) {
        Ok(table) => {
            trace!(
                nodes = frame.len(),
                relaxations = table.relaxations,
                "relaxation complete"
            );
            Ok(table)
        }
        Err(err) => {
            debug!(error = %err, "shortest path precondition failed");
            Err(err)
        }
    }
}
