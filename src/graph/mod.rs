//! Graph engine for topological sorting and cycle detection.

pub mod dfs;
pub mod digraph;
pub mod kahn;

pub use dfs::dfs_sort;
pub use digraph::{Graph, Vertex};
pub use kahn::kahn_sort;

use crate::error::Error;
use crate::trace::{DfsStep, KahnStep, SortOutcome, Step, TraceRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering engine selector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Breadth-first, indegree counting
    #[default]
    Kahn,
    /// Depth-first postorder with back-edge detection
    Dfs,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Kahn => "kahn",
            Algorithm::Dfs => "dfs",
        }
    }

    /// Run the selected engine over `graph`.
    pub fn run<V: Vertex>(self, graph: &Graph<V>) -> Report<V> {
        match self {
            Algorithm::Kahn => Report::Kahn(kahn_sort(graph)),
            Algorithm::Dfs => Report::Dfs(dfs_sort(graph)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kahn" => Ok(Algorithm::Kahn),
            "dfs" => Ok(Algorithm::Dfs),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Outcome of either engine, tagged by algorithm when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum Report<V> {
    Kahn(SortOutcome<V, KahnStep<V>>),
    Dfs(SortOutcome<V, DfsStep<V>>),
}

/// Engine-independent view of one trace record.
#[derive(Debug, Clone, Copy)]
pub struct StepView<'a, V> {
    pub kind: &'static str,
    pub message: &'a str,
    pub current_node: Option<&'a V>,
    pub source_node: Option<&'a V>,
    pub target_node: Option<&'a V>,
    pub order: &'a [V],
}

impl<'a, V> StepView<'a, V> {
    fn of<S: Step<Vertex = V>>(record: &'a TraceRecord<S>) -> Self {
        Self {
            kind: record.step.kind(),
            message: &record.message,
            current_node: record.step.current_node(),
            source_node: record.step.source_node(),
            target_node: record.step.target_node(),
            order: record.step.order(),
        }
    }
}

impl<V: Vertex> Report<V> {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Report::Kahn(_) => Algorithm::Kahn,
            Report::Dfs(_) => Algorithm::Dfs,
        }
    }

    pub fn order(&self) -> &[V] {
        match self {
            Report::Kahn(outcome) => &outcome.order,
            Report::Dfs(outcome) => &outcome.order,
        }
    }

    pub fn has_cycle(&self) -> bool {
        match self {
            Report::Kahn(outcome) => outcome.has_cycle,
            Report::Dfs(outcome) => outcome.has_cycle,
        }
    }

    pub fn trace_len(&self) -> usize {
        match self {
            Report::Kahn(outcome) => outcome.trace.len(),
            Report::Dfs(outcome) => outcome.trace.len(),
        }
    }

    /// Uniform views over the trace, in emission order.
    pub fn steps(&self) -> Vec<StepView<'_, V>> {
        match self {
            Report::Kahn(outcome) => outcome.trace.iter().map(StepView::of).collect(),
            Report::Dfs(outcome) => outcome.trace.iter().map(StepView::of).collect(),
        }
    }
}
