//! Topological sorting using Kahn's algorithm.

use super::digraph::{Graph, Vertex};
use crate::trace::{KahnState, KahnStep, SortOutcome, TraceRecord};
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, trace};

/// Working state of one Kahn run. The graph itself is never touched.
struct KahnRun<'g, V> {
    graph: &'g Graph<V>,
    in_degree: BTreeMap<V, usize>,
    queue: VecDeque<V>,
    order: Vec<V>,
    steps: Vec<TraceRecord<KahnStep<V>>>,
}

impl<'g, V: Vertex> KahnRun<'g, V> {
    fn new(graph: &'g Graph<V>) -> Self {
        Self {
            graph,
            in_degree: graph.indegree_table(),
            queue: VecDeque::new(),
            order: Vec::with_capacity(graph.vertex_count()),
            steps: Vec::new(),
        }
    }

    fn snapshot(&self) -> KahnState<V> {
        KahnState {
            queue: self.queue.iter().cloned().collect(),
            indegree: self.in_degree.clone(),
            order: self.order.clone(),
        }
    }

    fn record(&mut self, step: KahnStep<V>) {
        self.steps.push(TraceRecord::new(step));
    }

    fn seed(&mut self) {
        let graph = self.graph;
        for vertex in graph.vertices_sorted() {
            if self.in_degree.get(vertex).copied().unwrap_or(0) == 0 {
                self.queue.push_back(vertex.clone());
                let state = self.snapshot();
                self.record(KahnStep::Seed {
                    current_node: vertex.clone(),
                    state,
                });
            }
        }
    }

    fn drain(&mut self) {
        let graph = self.graph;
        while let Some(current) = self.queue.pop_front() {
            self.order.push(current.clone());
            let state = self.snapshot();
            self.record(KahnStep::Process {
                current_node: current.clone(),
                state,
            });

            for next in graph.successors(&current) {
                let degree = self.in_degree.entry(next.clone()).or_insert(0);
                *degree = degree.saturating_sub(1);
                let new_indegree = *degree;
                trace!(from = %current, to = %next, new_indegree, "edge consumed");

                let state = self.snapshot();
                self.record(KahnStep::UpdateIndegree {
                    current_node: next.clone(),
                    source_node: current.clone(),
                    new_indegree,
                    state,
                });

                if new_indegree == 0 {
                    self.queue.push_back(next.clone());
                    let state = self.snapshot();
                    self.record(KahnStep::Enqueue {
                        current_node: next.clone(),
                        state,
                    });
                }
            }
        }
    }

    fn finish(mut self) -> SortOutcome<V, KahnStep<V>> {
        let unprocessed = self.graph.vertex_count() - self.order.len();
        let has_cycle = unprocessed > 0;
        let state = self.snapshot();

        if has_cycle {
            self.record(KahnStep::Cycle { unprocessed, state });
        } else {
            self.record(KahnStep::Done { state });
        }

        debug!(
            vertices = self.graph.vertex_count(),
            ordered = self.order.len(),
            steps = self.steps.len(),
            has_cycle,
            "kahn run finished"
        );

        SortOutcome {
            order: self.order,
            has_cycle,
            trace: self.steps,
        }
    }
}

/// Sort `graph` breadth-first by repeatedly removing zero-indegree vertices.
///
/// Ties are broken FIFO: initial candidates in identifier order, later ones in
/// the order their last incoming edge was consumed. On a cycle the returned
/// order holds only the vertices that could be processed.
pub fn kahn_sort<V: Vertex>(graph: &Graph<V>) -> SortOutcome<V, KahnStep<V>> {
    let mut run = KahnRun::new(graph);
    run.seed();
    run.drain();
    run.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Step;

    fn kinds(outcome: &SortOutcome<&str, KahnStep<&str>>) -> Vec<&'static str> {
        outcome.trace.iter().map(|r| r.step.kind()).collect()
    }

    fn assert_valid_order(graph: &Graph<&str>, order: &[&str]) {
        let position = |v: &&str| order.iter().position(|o| o == v).unwrap();
        for (u, v) in graph.edges() {
            assert!(position(u) < position(v), "edge {u} -> {v} out of order");
        }
    }

    #[test]
    fn test_diamond() {
        let graph = Graph::from_edges([("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        let outcome = kahn_sort(&graph);

        assert!(!outcome.has_cycle);
        assert_eq!(outcome.order, vec!["A", "B", "C", "D"]);
        assert_eq!(
            kinds(&outcome),
            vec![
                "seed",
                "process",
                "update_indegree",
                "enqueue",
                "update_indegree",
                "enqueue",
                "process",
                "update_indegree",
                "process",
                "update_indegree",
                "enqueue",
                "process",
                "done",
            ]
        );
    }

    #[test]
    fn test_successor_order_breaks_ties() {
        let graph = Graph::from_edges([("A", "C"), ("A", "B"), ("B", "D"), ("C", "D")]);
        let outcome = kahn_sort(&graph);
        assert_eq!(outcome.order, vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn test_complex_dag_with_two_components() {
        let graph = Graph::from_edges([
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("C", "E"),
            ("D", "F"),
            ("E", "F"),
            ("G", "H"),
            ("G", "I"),
            ("H", "J"),
            ("I", "J"),
        ]);
        let outcome = kahn_sort(&graph);

        assert!(!outcome.has_cycle);
        assert_eq!(outcome.order.len(), graph.vertex_count());
        assert_valid_order(&graph, &outcome.order);
    }

    #[test]
    fn test_three_cycle() {
        let graph = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "A")]);
        let outcome = kahn_sort(&graph);

        assert!(outcome.has_cycle);
        assert!(outcome.order.is_empty());
        assert_eq!(kinds(&outcome), vec!["cycle"]);
        assert!(matches!(
            outcome.trace[0].step,
            KahnStep::Cycle { unprocessed: 3, .. }
        ));
    }

    #[test]
    fn test_cycle_keeps_processable_prefix() {
        // R feeds a B <-> C cycle; S is independent.
        let graph = Graph::from_edges([("R", "B"), ("B", "C"), ("C", "B"), ("S", "T")]);
        let outcome = kahn_sort(&graph);

        assert!(outcome.has_cycle);
        assert_eq!(outcome.order, vec!["R", "S", "T"]);
        assert!(outcome.order.len() < graph.vertex_count());
    }

    #[test]
    fn test_self_loop() {
        let graph = Graph::from_edges([("A", "A")]);
        let outcome = kahn_sort(&graph);

        assert!(outcome.has_cycle);
        assert!(outcome.order.is_empty());
    }

    #[test]
    fn test_isolated_vertices_seed_in_sorted_order() {
        let mut graph = Graph::new();
        graph.add_isolated_vertex("Y");
        graph.add_edge("E", "F");
        graph.add_isolated_vertex("X");

        let outcome = kahn_sort(&graph);

        assert!(!outcome.has_cycle);
        assert_eq!(outcome.order, vec!["E", "X", "Y", "F"]);
    }

    #[test]
    fn test_empty_graph() {
        let graph: Graph<&str> = Graph::new();
        let outcome = kahn_sort(&graph);

        assert!(!outcome.has_cycle);
        assert!(outcome.order.is_empty());
        assert_eq!(kinds(&outcome), vec!["done"]);
    }

    #[test]
    fn test_multi_edge_needs_both_consumed() {
        let graph = Graph::from_edges([("A", "B"), ("A", "B")]);
        let outcome = kahn_sort(&graph);

        assert_eq!(outcome.order, vec!["A", "B"]);
        let updates: Vec<usize> = outcome
            .trace
            .iter()
            .filter_map(|r| match r.step {
                KahnStep::UpdateIndegree { new_indegree, .. } => Some(new_indegree),
                _ => None,
            })
            .collect();
        assert_eq!(updates, vec![1, 0]);
    }

    #[test]
    fn test_seed_snapshots_grow_queue() {
        let graph = Graph::from_edges([("A", "C"), ("B", "C")]);
        let outcome = kahn_sort(&graph);

        let seed_queues: Vec<Vec<&str>> = outcome
            .trace
            .iter()
            .filter(|r| r.step.kind() == "seed")
            .map(|r| r.step.state().queue.clone())
            .collect();
        assert_eq!(seed_queues, vec![vec!["A"], vec!["A", "B"]]);
    }

    #[test]
    fn test_snapshots_are_not_retroactively_changed() {
        let graph = Graph::from_edges([("A", "B"), ("B", "C")]);
        let outcome = kahn_sort(&graph);

        let first = &outcome.trace[0].step;
        assert_eq!(first.kind(), "seed");
        assert!(first.order().is_empty());
        assert_eq!(first.state().indegree.get("B"), Some(&1));
        assert_eq!(first.state().indegree.get("C"), Some(&1));

        let last = outcome.trace.last().unwrap();
        assert_eq!(last.step.order(), &["A", "B", "C"]);
        assert_eq!(last.step.state().indegree.get("C"), Some(&0));
    }

    #[test]
    fn test_deterministic() {
        let graph = Graph::from_edges([("B", "D"), ("A", "D"), ("C", "A"), ("C", "B")]);
        assert_eq!(kahn_sort(&graph), kahn_sort(&graph));
    }

    #[test]
    fn test_update_indegree_names_edge() {
        let graph = Graph::from_edges([("A", "B")]);
        let outcome = kahn_sort(&graph);

        let update = outcome
            .trace
            .iter()
            .find(|r| r.step.kind() == "update_indegree")
            .unwrap();
        assert_eq!(update.step.source_node(), Some(&"A"));
        assert_eq!(update.step.current_node(), Some(&"B"));
    }
}
