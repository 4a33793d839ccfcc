//! Directed graph with successor lists and an incrementally maintained indegree table.

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

/// Identifier bound shared by the graph and both engines.
///
/// `Ord` gives the stable seeding order; `Display` feeds trace messages.
pub trait Vertex: Ord + Clone + Display + Debug {}

impl<T: Ord + Clone + Display + Debug> Vertex for T {}

/// A directed graph, possibly with multi-edges and self-loops.
///
/// Every vertex ever named owns an adjacency entry (possibly empty) and an
/// indegree entry (possibly zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<V> {
    adjacency: BTreeMap<V, Vec<V>>,
    indegree: BTreeMap<V, usize>,
    edge_count: usize,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self {
            adjacency: BTreeMap::new(),
            indegree: BTreeMap::new(),
            edge_count: 0,
        }
    }
}

impl<V: Vertex> Graph<V> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph holding a single isolated vertex.
    pub fn with_vertex(vertex: V) -> Self {
        let mut graph = Self::new();
        graph.add_isolated_vertex(vertex);
        graph
    }

    /// Build a graph from `(source, target)` pairs, in order.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Self::new();
        for (source, target) in edges {
            graph.add_edge(source, target);
        }
        graph
    }

    /// Add the edge `source -> target`, registering both endpoints.
    ///
    /// Duplicate edges are kept and counted again.
    pub fn add_edge(&mut self, source: V, target: V) {
        self.register(&source);
        self.register(&target);

        *self.indegree.entry(target.clone()).or_insert(0) += 1;
        self.adjacency.entry(source).or_default().push(target);
        self.edge_count += 1;
    }

    /// Declare a vertex with no edges. No-op if it already exists.
    pub fn add_isolated_vertex(&mut self, vertex: V) {
        self.register(&vertex);
    }

    fn register(&mut self, vertex: &V) {
        if !self.adjacency.contains_key(vertex) {
            self.adjacency.insert(vertex.clone(), Vec::new());
            self.indegree.insert(vertex.clone(), 0);
        }
    }

    /// Vertices in ascending identifier order.
    pub fn vertices_sorted(&self) -> impl Iterator<Item = &V> + '_ {
        self.adjacency.keys()
    }

    /// Successors of `vertex` in insertion order. Empty if unknown.
    pub fn successors(&self, vertex: &V) -> &[V] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of edges ending at `vertex`. Zero if unknown.
    pub fn indegree_of(&self, vertex: &V) -> usize {
        self.indegree.get(vertex).copied().unwrap_or(0)
    }

    /// Owned copy of the full indegree table.
    pub fn indegree_table(&self) -> BTreeMap<V, usize> {
        self.indegree.clone()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// All edges, grouped by source in identifier order, targets in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(source, targets)| targets.iter().map(move |target| (source, target)))
    }
}
