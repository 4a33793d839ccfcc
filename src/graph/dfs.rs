//! Depth-first topological sorting with back-edge cycle detection.
//!
//! The walk keeps its own frame stack instead of recursing, so deep acyclic
//! chains are not limited by the thread's call stack. The trace is the same
//! one a recursive walk would produce.

use super::digraph::{Graph, Vertex};
use crate::trace::{DfsState, DfsStep, SortOutcome, TraceRecord, VisitStatus};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// A vertex on the exploration path and the index of its next successor.
struct Frame<V> {
    vertex: V,
    next: usize,
}

/// How a single walk from a root ended.
enum Walk<V> {
    Settled,
    BackEdge { from: V, to: V },
}

struct DfsRun<'g, V> {
    graph: &'g Graph<V>,
    status: BTreeMap<V, VisitStatus>,
    on_stack: BTreeMap<V, bool>,
    postorder: Vec<V>,
    steps: Vec<TraceRecord<DfsStep<V>>>,
}

impl<'g, V: Vertex> DfsRun<'g, V> {
    fn new(graph: &'g Graph<V>) -> Self {
        let status: BTreeMap<V, VisitStatus> = graph
            .vertices_sorted()
            .map(|v| (v.clone(), VisitStatus::Unvisited))
            .collect();
        let on_stack: BTreeMap<V, bool> =
            graph.vertices_sorted().map(|v| (v.clone(), false)).collect();

        Self {
            graph,
            status,
            on_stack,
            postorder: Vec::with_capacity(graph.vertex_count()),
            steps: Vec::new(),
        }
    }

    fn snapshot(&self) -> DfsState<V> {
        DfsState {
            visited_status: self.status.clone(),
            recursion_stack: self.on_stack.clone(),
            order: self.postorder.clone(),
        }
    }

    fn record(&mut self, step: DfsStep<V>) {
        self.steps.push(TraceRecord::new(step));
    }

    fn status_of(&self, vertex: &V) -> VisitStatus {
        self.status
            .get(vertex)
            .copied()
            .unwrap_or(VisitStatus::Unvisited)
    }

    fn is_on_stack(&self, vertex: &V) -> bool {
        self.on_stack.get(vertex).copied().unwrap_or(false)
    }

    fn enter(&mut self, vertex: &V, path: &mut Vec<Frame<V>>) {
        self.status.insert(vertex.clone(), VisitStatus::Visiting);
        self.on_stack.insert(vertex.clone(), true);
        path.push(Frame {
            vertex: vertex.clone(),
            next: 0,
        });

        let state = self.snapshot();
        self.record(DfsStep::Visit {
            current_node: vertex.clone(),
            state,
        });
    }

    fn leave(&mut self, vertex: V) {
        self.on_stack.insert(vertex.clone(), false);
        self.status.insert(vertex.clone(), VisitStatus::Visited);
        self.postorder.push(vertex.clone());

        let state = self.snapshot();
        self.record(DfsStep::Finish {
            current_node: vertex,
            state,
        });
    }

    /// Explore everything reachable from `root`, stopping at the first back edge.
    fn walk(&mut self, root: &V) -> Walk<V> {
        let graph = self.graph;
        let mut path = Vec::new();
        self.enter(root, &mut path);

        while let Some(frame) = path.last_mut() {
            let current = frame.vertex.clone();
            let Some(next) = graph.successors(&current).get(frame.next) else {
                path.pop();
                self.leave(current);
                continue;
            };
            frame.next += 1;

            if self.status_of(next) == VisitStatus::Unvisited {
                let state = self.snapshot();
                self.record(DfsStep::ExploreEdge {
                    current_node: current,
                    target_node: next.clone(),
                    state,
                });
                self.enter(next, &mut path);
            } else if self.is_on_stack(next) {
                let state = self.snapshot();
                self.record(DfsStep::CycleDetected {
                    current_node: current.clone(),
                    target_node: next.clone(),
                    state,
                });
                return Walk::BackEdge {
                    from: current,
                    to: next.clone(),
                };
            } else {
                trace!(from = %current, to = %next, "edge into settled vertex");
            }
        }

        Walk::Settled
    }

    fn finish(mut self, back_edge: Option<(V, V)>) -> SortOutcome<V, DfsStep<V>> {
        let has_cycle = back_edge.is_some();
        let order: Vec<V> = if has_cycle {
            Vec::new()
        } else {
            self.postorder.iter().rev().cloned().collect()
        };

        let mut state = self.snapshot();
        state.order = order.clone();
        self.record(DfsStep::Final { has_cycle, state });

        match &back_edge {
            Some((from, to)) => debug!(
                %from,
                %to,
                steps = self.steps.len(),
                "dfs run stopped at back edge"
            ),
            None => debug!(
                vertices = self.graph.vertex_count(),
                steps = self.steps.len(),
                "dfs run finished"
            ),
        }

        SortOutcome {
            order,
            has_cycle,
            trace: self.steps,
        }
    }
}

/// Sort `graph` by reversed depth-first postorder.
///
/// Roots are tried in identifier order and successors in insertion order. The
/// first back edge aborts the whole walk; a cyclic graph yields an empty order.
pub fn dfs_sort<V: Vertex>(graph: &Graph<V>) -> SortOutcome<V, DfsStep<V>> {
    let mut run = DfsRun::new(graph);
    let mut back_edge = None;

    for root in graph.vertices_sorted() {
        if run.status_of(root) != VisitStatus::Unvisited {
            continue;
        }
        if let Walk::BackEdge { from, to } = run.walk(root) {
            back_edge = Some((from, to));
            break;
        }
    }

    run.finish(back_edge)
}
