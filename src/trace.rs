//! Step records emitted by the ordering engines.
//!
//! Every record owns a full copy of the engine state at the moment it was
//! emitted, so a renderer can redraw any step on its own.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Common view over the step enums of both engines.
pub trait Step {
    type Vertex;

    /// Snake-case tag, identical to the serialized `kind` field.
    fn kind(&self) -> &'static str;

    fn current_node(&self) -> Option<&Self::Vertex>;

    fn source_node(&self) -> Option<&Self::Vertex> {
        None
    }

    fn target_node(&self) -> Option<&Self::Vertex> {
        None
    }

    /// Output accumulated when the step was emitted.
    fn order(&self) -> &[Self::Vertex];

    /// Human-readable description, for display only.
    fn describe(&self) -> String;
}

/// One entry of a trace: the step plus its display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceRecord<S> {
    pub message: String,
    #[serde(flatten)]
    pub step: S,
}

impl<S: Step> TraceRecord<S> {
    pub fn new(step: S) -> Self {
        Self {
            message: step.describe(),
            step,
        }
    }
}

/// Result of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOutcome<V, S> {
    pub order: Vec<V>,
    pub has_cycle: bool,
    pub trace: Vec<TraceRecord<S>>,
}

// --- Kahn ---

/// Kahn engine state at one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KahnState<V> {
    pub queue: Vec<V>,
    pub indegree: BTreeMap<V, usize>,
    pub order: Vec<V>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KahnStep<V> {
    /// A zero-indegree vertex entered the initial queue.
    Seed {
        current_node: V,
        #[serde(flatten)]
        state: KahnState<V>,
    },
    /// A vertex left the queue and joined the order.
    Process {
        current_node: V,
        #[serde(flatten)]
        state: KahnState<V>,
    },
    /// The edge `source_node -> current_node` was consumed.
    UpdateIndegree {
        current_node: V,
        source_node: V,
        new_indegree: usize,
        #[serde(flatten)]
        state: KahnState<V>,
    },
    /// A vertex reached zero indegree and was queued.
    Enqueue {
        current_node: V,
        #[serde(flatten)]
        state: KahnState<V>,
    },
    Cycle {
        unprocessed: usize,
        #[serde(flatten)]
        state: KahnState<V>,
    },
    Done {
        #[serde(flatten)]
        state: KahnState<V>,
    },
}

impl<V> KahnStep<V> {
    pub fn state(&self) -> &KahnState<V> {
        match self {
            KahnStep::Seed { state, .. }
            | KahnStep::Process { state, .. }
            | KahnStep::UpdateIndegree { state, .. }
            | KahnStep::Enqueue { state, .. }
            | KahnStep::Cycle { state, .. }
            | KahnStep::Done { state } => state,
        }
    }
}

impl<V: Display> Step for KahnStep<V> {
    type Vertex = V;

    fn kind(&self) -> &'static str {
        match self {
            KahnStep::Seed { .. } => "seed",
            KahnStep::Process { .. } => "process",
            KahnStep::UpdateIndegree { .. } => "update_indegree",
            KahnStep::Enqueue { .. } => "enqueue",
            KahnStep::Cycle { .. } => "cycle",
            KahnStep::Done { .. } => "done",
        }
    }

    fn current_node(&self) -> Option<&V> {
        match self {
            KahnStep::Seed { current_node, .. }
            | KahnStep::Process { current_node, .. }
            | KahnStep::UpdateIndegree { current_node, .. }
            | KahnStep::Enqueue { current_node, .. } => Some(current_node),
            KahnStep::Cycle { .. } | KahnStep::Done { .. } => None,
        }
    }

    fn source_node(&self) -> Option<&V> {
        match self {
            KahnStep::UpdateIndegree { source_node, .. } => Some(source_node),
            _ => None,
        }
    }

    fn order(&self) -> &[V] {
        &self.state().order
    }

    fn describe(&self) -> String {
        match self {
            KahnStep::Seed { current_node, .. } => {
                format!("{current_node} has indegree 0, queued as a starting vertex.")
            }
            KahnStep::Process {
                current_node,
                state,
            } => format!(
                "Took {current_node} from the queue and appended it to the order. Queue: [{}].",
                join(&state.queue)
            ),
            KahnStep::UpdateIndegree {
                current_node,
                source_node,
                new_indegree,
                ..
            } => format!(
                "Edge {source_node} -> {current_node} consumed, indegree of {current_node} is now {new_indegree}."
            ),
            KahnStep::Enqueue { current_node, .. } => {
                format!("{current_node} has no remaining incoming edges, queued.")
            }
            KahnStep::Cycle { unprocessed, .. } => format!(
                "Cycle detected: {unprocessed} vertices never reached indegree 0."
            ),
            KahnStep::Done { state } => format!(
                "Topological order complete: [{}].",
                join(&state.order)
            ),
        }
    }
}

// --- Depth-first ---

/// Exploration status of a vertex in the depth-first walk.
///
/// Serialized as its ordinal: 0 unvisited, 1 visiting, 2 visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum VisitStatus {
    Unvisited,
    Visiting,
    Visited,
}

impl From<VisitStatus> for u8 {
    fn from(status: VisitStatus) -> u8 {
        match status {
            VisitStatus::Unvisited => 0,
            VisitStatus::Visiting => 1,
            VisitStatus::Visited => 2,
        }
    }
}

/// Depth-first engine state at one step.
///
/// `order` holds the postorder collected so far, except on the `final`
/// step where it holds the returned order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DfsState<V> {
    pub visited_status: BTreeMap<V, VisitStatus>,
    pub recursion_stack: BTreeMap<V, bool>,
    pub order: Vec<V>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DfsStep<V> {
    Visit {
        current_node: V,
        #[serde(flatten)]
        state: DfsState<V>,
    },
    /// Descending along `current_node -> target_node` into an unvisited vertex.
    ExploreEdge {
        current_node: V,
        target_node: V,
        #[serde(flatten)]
        state: DfsState<V>,
    },
    /// Back edge `current_node -> target_node`; the walk stops here.
    CycleDetected {
        current_node: V,
        target_node: V,
        #[serde(flatten)]
        state: DfsState<V>,
    },
    Finish {
        current_node: V,
        #[serde(flatten)]
        state: DfsState<V>,
    },
    Final {
        has_cycle: bool,
        #[serde(flatten)]
        state: DfsState<V>,
    },
}

impl<V> DfsStep<V> {
    pub fn state(&self) -> &DfsState<V> {
        match self {
            DfsStep::Visit { state, .. }
            | DfsStep::ExploreEdge { state, .. }
            | DfsStep::CycleDetected { state, .. }
            | DfsStep::Finish { state, .. }
            | DfsStep::Final { state, .. } => state,
        }
    }
}

impl<V: Display> Step for DfsStep<V> {
    type Vertex = V;

    fn kind(&self) -> &'static str {
        match self {
            DfsStep::Visit { .. } => "visit",
            DfsStep::ExploreEdge { .. } => "explore_edge",
            DfsStep::CycleDetected { .. } => "cycle_detected",
            DfsStep::Finish { .. } => "finish",
            DfsStep::Final { .. } => "final",
        }
    }

    fn current_node(&self) -> Option<&V> {
        match self {
            DfsStep::Visit { current_node, .. }
            | DfsStep::ExploreEdge { current_node, .. }
            | DfsStep::CycleDetected { current_node, .. }
            | DfsStep::Finish { current_node, .. } => Some(current_node),
            DfsStep::Final { .. } => None,
        }
    }

    fn target_node(&self) -> Option<&V> {
        match self {
            DfsStep::ExploreEdge { target_node, .. }
            | DfsStep::CycleDetected { target_node, .. } => Some(target_node),
            _ => None,
        }
    }

    fn order(&self) -> &[V] {
        &self.state().order
    }

    fn describe(&self) -> String {
        match self {
            DfsStep::Visit { current_node, .. } => format!("Entering {current_node}."),
            DfsStep::ExploreEdge {
                current_node,
                target_node,
                ..
            } => format!(
                "Following {current_node} -> {target_node}; {target_node} is unvisited, descending."
            ),
            DfsStep::CycleDetected {
                current_node,
                target_node,
                ..
            } => format!(
                "Back edge {current_node} -> {target_node}: {target_node} is still on the recursion stack. Cycle found."
            ),
            DfsStep::Finish { current_node, .. } => {
                format!("All successors of {current_node} settled, appended to postorder.")
            }
            DfsStep::Final { has_cycle: true, .. } => {
                "No topological order exists: the graph has a cycle.".to_string()
            }
            DfsStep::Final { state, .. } => format!(
                "Topological order complete (reversed postorder): [{}].",
                join(&state.order)
            ),
        }
    }
}

fn join<V: Display>(items: &[V]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
