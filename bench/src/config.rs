use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Environment override for the node count when none is given positionally.
pub const NODES_ENV: &str = "ROUTE_GRAPH_BENCH_NODES";

pub const DEFAULT_NODE_COUNT: u64 = 40_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown mode '{0}'; use --help for options")]
    UnknownMode(String),
    #[error("invalid node count '{0}'")]
    InvalidNodeCount(String),
    #[error("node count must be at least {min}, got {got}")]
    TooFewNodes { min: u64, got: u64 },
}

/// Graph generators the bench knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// One-way lattice, streets run east and south only.
    Lattice,
    /// Two-way street grid.
    Grid,
    /// Erdos-Renyi random one-way streets.
    Random,
    /// Lattice with toll rebates: acyclic, some negative weights.
    Rebate,
}

impl Generator {
    pub const ALL: [Generator; 4] = [
        Generator::Lattice,
        Generator::Grid,
        Generator::Random,
        Generator::Rebate,
    ];
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Lattice => f.pad("lattice"),
            Generator::Grid => f.pad("grid"),
            Generator::Random => f.pad("random"),
            Generator::Rebate => f.pad("rebate"),
        }
    }
}

impl FromStr for Generator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Generator::ALL
            .into_iter()
            .find(|g| g.to_string() == s.to_lowercase())
            .ok_or_else(|| ConfigError::UnknownMode(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Help,
    All,
    Only(Generator),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub mode: Mode,
    pub node_count: u64,
    pub json_logs: bool,
}

impl BenchConfig {
    /// Parse `[mode] [node_count] [--json-logs]` (program name excluded).
    ///
    /// `env_nodes` is the value of [`NODES_ENV`], used when no node count
    /// is given on the command line.
    pub fn parse<I>(args: I, env_nodes: Option<String>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut json_logs = false;
        let mut positional = Vec::new();
        for arg in args {
            if arg == "--json-logs" {
                json_logs = true;
            } else {
                positional.push(arg);
            }
        }

        let mode = match positional.first().map(String::as_str) {
            None | Some("all") => Mode::All,
            Some("help") | Some("--help") | Some("-h") => Mode::Help,
            Some(other) => Mode::Only(other.parse()?),
        };
        if mode == Mode::Help {
            return Ok(Self {
                mode,
                node_count: DEFAULT_NODE_COUNT,
                json_logs,
            });
        }

        let node_count = match positional.get(1).cloned().or(env_nodes) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNodeCount(raw.clone()))?,
            None => DEFAULT_NODE_COUNT,
        };
        if node_count < 4 {
            return Err(ConfigError::TooFewNodes {
                min: 4,
                got: node_count,
            });
        }

        Ok(Self {
            mode,
            node_count,
            json_logs,
        })
    }

    /// Generators selected by the mode. Empty for help.
    pub fn generators(&self) -> Vec<Generator> {
        match self.mode {
            Mode::Help => Vec::new(),
            Mode::All => Generator::ALL.to_vec(),
            Mode::Only(g) => vec![g],
        }
    }
}
