mod config;
mod logging;

use std::time::Instant;

use route_graph_core::{shortest_paths, Edge, Graph, GraphType, Node};
use tracing::{error, info};

use config::{BenchConfig, Generator, Mode, NODES_ENV};

type RoadGraph = Graph<u64, u64, f64>;

fn main() {
    let env_nodes = std::env::var(NODES_ENV).ok();
    let cfg = match BenchConfig::parse(std::env::args().skip(1), env_nodes) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("route-graph-bench: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = logging::init_tracing(cfg.json_logs) {
        eprintln!("route-graph-bench: cannot initialise logging: {}", e);
    }

    if cfg.mode == Mode::Help {
        print_help();
        return;
    }

    println!("route-graph-bench");
    println!("=================");
    println!();

    for generator in cfg.generators() {
        run_benchmark(generator, cfg.node_count);
    }
}

fn print_help() {
    println!("Usage: route-graph-bench [mode] [node_count] [--json-logs]");
    println!();
    println!("Modes:");
    println!("  all       Run all generators and benchmark each (default)");
    println!("  lattice   One-way street lattice (acyclic)");
    println!("  grid      Two-way street grid (cycles everywhere)");
    println!("  random    Erdos-Renyi random one-way streets");
    println!("  rebate    One-way lattice with negative-weight toll rebates");
    println!();
    println!("Default node_count: {}", config::DEFAULT_NODE_COUNT);
    println!(
        "Environment: {} (node count), {} (log filter)",
        NODES_ENV,
        logging::LOG_ENV
    );
}

/// Strategies whose preconditions a generator's graphs satisfy.
fn valid_strategies(generator: Generator) -> &'static [GraphType] {
    match generator {
        Generator::Lattice => &GraphType::ALL,
        Generator::Grid | Generator::Random => {
            &[GraphType::NonnegativeWeights, GraphType::General]
        }
        Generator::Rebate => &[GraphType::Acyclic, GraphType::General],
    }
}

fn run_benchmark(generator: Generator, node_count: u64) {
    println!("--- {} ---", generator);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generate(generator, node_count);
    println!(
        "Generated in {:.2}s: {} nodes, {} edges",
        t.elapsed().as_secs_f64(),
        graph.node_count(),
        graph.edge_count()
    );
    info!(%generator, nodes = graph.node_count(), edges = graph.edge_count(), "graph generated");

    let Some(source) = graph.node(&0).map(|n| n.handle()) else {
        error!(%generator, "generator produced no node 0");
        return;
    };
    let far_node = graph.node_count() as u64 - 1;

    println!();
    println!(
        "{:>12} {:>10} {:>8} {:>12} {:>10}",
        "strategy", "reached", "hops", "distance", "time"
    );
    println!("{:->12} {:->10} {:->8} {:->12} {:->10}", "", "", "", "", "");

    for &graph_type in valid_strategies(generator) {
        let t = Instant::now();
        let result = shortest_paths(&graph, graph_type, &source);
        let elapsed = t.elapsed();

        match result {
            Ok(paths) => {
                let (hops, distance) = match paths.get(&far_node) {
                    Some(p) => (p.len().to_string(), format!("{:.1}", p.total_weight())),
                    None => ("-".to_string(), "unreachable".to_string()),
                };
                println!(
                    "{:>12} {:>10} {:>8} {:>12} {:>8.1}ms",
                    graph_type,
                    paths.len(),
                    hops,
                    distance,
                    elapsed.as_secs_f64() * 1000.0
                );
            }
            Err(e) => {
                error!(%generator, %graph_type, error = %e, "strategy failed");
                println!("{:>12} failed: {}", graph_type, e);
            }
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, O(nodes + edges)
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Sequential edge ids and insertion for generated graphs.
struct Builder {
    graph: RoadGraph,
    next_edge: u64,
}

impl Builder {
    fn with_nodes(node_count: u64, edge_hint: usize) -> Self {
        let mut graph = RoadGraph::with_capacity(node_count as usize, edge_hint);
        for id in 0..node_count {
            graph.add_node(Node::new(id));
        }
        Self {
            graph,
            next_edge: 0,
        }
    }

    fn connect(&mut self, from: u64, to: u64, weight: f64) {
        let (Some(a), Some(b)) = (self.graph.node(&from), self.graph.node(&to)) else {
            return;
        };
        let edge = Edge::new(self.next_edge, a, b, weight);
        if self.graph.add_edge(edge) {
            self.next_edge += 1;
        }
    }
}

fn generate(generator: Generator, node_count: u64) -> RoadGraph {
    match generator {
        Generator::Lattice => gen_lattice(node_count, 0.0),
        Generator::Grid => gen_grid(node_count),
        Generator::Random => gen_random(node_count),
        Generator::Rebate => gen_lattice(node_count, 0.1),
    }
}

fn side_for(node_count: u64) -> u64 {
    ((node_count as f64).sqrt() as u64).max(2)
}

/// Lattice of one-way streets running east and south, so every edge
/// points to a higher id.
///
/// With `rebate_chance > 0` some streets get a negative weight; the
/// lattice stays acyclic so no negative cycle can form.
fn gen_lattice(node_count: u64, rebate_chance: f64) -> RoadGraph {
    let side = side_for(node_count);
    let mut b = Builder::with_nodes(node_count, (node_count * 2) as usize);
    let mut rng = FastRng::new(42);

    for id in 0..node_count {
        let east = (id % side + 1 < side).then_some(id + 1);
        let south = Some(id + side).filter(|&n| n < node_count);
        for next in [east, south].into_iter().flatten() {
            let mut weight = 1.0 + rng.next(20) as f64;
            if rng.next_f64() < rebate_chance {
                weight = -weight / 2.0;
            }
            b.connect(id, next, weight);
        }
    }
    b.graph
}

/// Two-way street grid: each cell links to its east and south neighbours
/// in both directions.
fn gen_grid(node_count: u64) -> RoadGraph {
    let side = side_for(node_count);
    let mut b = Builder::with_nodes(node_count, (node_count * 4) as usize);
    let mut rng = FastRng::new(12345);

    for id in 0..node_count {
        let east = (id % side + 1 < side).then_some(id + 1);
        let south = Some(id + side).filter(|&n| n < node_count);
        for next in [east, south].into_iter().flatten() {
            let weight = 1.0 + rng.next(30) as f64;
            b.connect(id, next, weight);
            b.connect(next, id, weight);
        }
    }
    b.graph
}

/// Erdos-Renyi: ~4 random one-way streets per node, nonnegative weights.
fn gen_random(node_count: u64) -> RoadGraph {
    let target_edges = node_count * 4;
    let mut b = Builder::with_nodes(node_count, target_edges as usize);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            b.connect(from, to, rng.next_f64() * 100.0);
        }
    }
    b.graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_graph_core::{topological_order, Weight};

    #[test]
    fn test_lattice_is_acyclic() {
        let g = gen_lattice(100, 0.0);
        assert_eq!(g.node_count(), 100);
        assert!(topological_order(&g).is_ok());
        assert!(g.edges().all(|e| e.to_node().id() > e.from_node().id()));
    }

    #[test]
    fn test_rebate_has_negative_edges() {
        let g = gen_lattice(400, 0.1);
        assert!(g.edges().any(|e| e.weight().is_negative()));
        assert!(topological_order(&g).is_ok());
    }

    #[test]
    fn test_grid_streets_are_two_way() {
        let g = gen_grid(16);
        assert_eq!(g.edge_count(), 2 * (3 * 4 + 3 * 4));
        assert!(topological_order(&g).is_err());
    }

    #[test]
    fn test_every_valid_strategy_succeeds() {
        for generator in Generator::ALL {
            let g = generate(generator, 64);
            let source = g.node(&0).unwrap().handle();
            let results: Vec<_> = valid_strategies(generator)
                .iter()
                .map(|&t| shortest_paths(&g, t, &source).unwrap())
                .collect();
            for paths in &results[1..] {
                assert_eq!(paths.len(), results[0].len(), "{}", generator);
                for (id, p) in paths {
                    let expected = results[0][id].total_weight();
                    assert!(
                        (p.total_weight() - expected).abs() < 1e-9,
                        "{} node {}",
                        generator,
                        id
                    );
                }
            }
        }
    }

    #[test]
    fn test_generators_are_deterministic() {
        let a = gen_random(200);
        let b = gen_random(200);
        assert_eq!(a.edge_count(), b.edge_count());
        for e in a.edges() {
            let other = b.edge(e.id()).unwrap();
            assert_eq!(e.from_node().id(), other.from_node().id());
            assert_eq!(e.weight(), other.weight());
        }
    }
}
