//! Weighted graph model.
//!
//! `DirectedGraph` stores one arc per inserted edge. `UndirectedGraph` mirrors
//! every edge into both directions and also keeps the endpoint order of the
//! edge list, which is the vertex set the solvers work on.

use crate::edge::{Edge, Vertex, Weight};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Weight returned by [`WeightedGraph::weight`] when the arc does not exist.
pub const NO_EDGE: Weight = -1;

/// Adjacency and weight queries shared by both graph kinds.
pub trait WeightedGraph<V: Vertex> {
    /// True iff `from` has a recorded outgoing arc to `to`
    fn is_adjacent(&self, from: &V, to: &V) -> bool;

    /// Weight of the arc `from -> to`, or [`NO_EDGE`] if there is none
    fn weight(&self, from: &V, to: &V) -> Weight;

    /// Weight of the arc `from -> to`, `None` if there is none. Unlike
    /// [`weight`](Self::weight), a real weight of -1 stays distinguishable.
    fn arc_weight(&self, from: &V, to: &V) -> Option<Weight>;

    /// Vertices reachable from `v` in one step
    fn neighbors(&self, v: &V) -> HashSet<&V>;
}

/// Weighted directed graph keyed by source vertex.
///
/// Only sources get an entry: a vertex with incoming arcs only is not a key,
/// and `neighbors` reports it as having no successors.
#[derive(Debug, Clone)]
pub struct DirectedGraph<V: Vertex> {
    adjacency: HashMap<V, HashMap<V, Weight>>,
}

impl<V: Vertex> DirectedGraph<V> {
    pub fn new() -> Self {
        DirectedGraph {
            adjacency: HashMap::new(),
        }
    }

    /// Build a graph with one arc per edge
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a Edge<V>>,
        V: 'a,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge.source.clone(), edge.target.clone(), edge.weight);
        }
        graph
    }

    /// Insert or overwrite the arc `from -> to`
    pub fn add_edge(&mut self, from: V, to: V, weight: Weight) {
        self.adjacency.entry(from).or_default().insert(to, weight);
    }

    /// Number of vertices with at least one outgoing arc
    pub fn source_count(&self) -> usize {
        self.adjacency.len()
    }

    fn arc(&self, from: &V, to: &V) -> Option<Weight> {
        self.adjacency.get(from).and_then(|targets| targets.get(to)).copied()
    }
}

impl<V: Vertex> Default for DirectedGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> WeightedGraph<V> for DirectedGraph<V> {
    fn is_adjacent(&self, from: &V, to: &V) -> bool {
        self.arc(from, to).is_some()
    }

    fn weight(&self, from: &V, to: &V) -> Weight {
        self.arc(from, to).unwrap_or(NO_EDGE)
    }

    fn arc_weight(&self, from: &V, to: &V) -> Option<Weight> {
        self.arc(from, to)
    }

    fn neighbors(&self, v: &V) -> HashSet<&V> {
        match self.adjacency.get(v) {
            Some(targets) => targets.keys().collect(),
            None => HashSet::new(),
        }
    }
}

/// Weighted undirected graph: each edge is stored as two arcs of equal weight.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<V: Vertex> {
    arcs: DirectedGraph<V>,
    /// Endpoints in the order they first appeared in the edge list
    order: Vec<V>,
}

impl<V: Vertex> UndirectedGraph<V> {
    pub fn new() -> Self {
        UndirectedGraph {
            arcs: DirectedGraph::new(),
            order: Vec::new(),
        }
    }

    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a Edge<V>>,
        V: 'a,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge.source.clone(), edge.target.clone(), edge.weight);
        }
        debug!(
            "Built undirected graph with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        graph
    }

    /// Insert or overwrite the edge `{a, b}` in both directions
    pub fn add_edge(&mut self, a: V, b: V, weight: Weight) {
        if !self.arcs.adjacency.contains_key(&a) {
            self.order.push(a.clone());
        }
        if b != a && !self.arcs.adjacency.contains_key(&b) {
            self.order.push(b.clone());
        }
        self.arcs.add_edge(a.clone(), b.clone(), weight);
        self.arcs.add_edge(b, a, weight);
    }

    /// Every vertex that is an endpoint of some edge, in first-seen order
    pub fn vertices(&self) -> &[V] {
        &self.order
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// Number of distinct undirected edges, self-loops included
    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Weight of `{from, to}`, `None` if the vertices are not joined
    pub fn edge_weight(&self, from: &V, to: &V) -> Option<Weight> {
        self.arcs.arc(from, to)
    }

    /// Each undirected edge once, with `source <= target`, ordered by
    /// source then target
    pub fn edges(&self) -> Vec<Edge<V>> {
        let mut edges: Vec<Edge<V>> = self
            .arcs
            .adjacency
            .iter()
            .flat_map(|(from, targets)| {
                targets
                    .iter()
                    .filter(move |(to, _)| from <= *to)
                    .map(move |(to, &w)| Edge::new(from.clone(), to.clone(), w))
            })
            .collect();
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));
        edges
    }

    /// True if every pair of distinct vertices is joined
    pub fn is_complete(&self) -> bool {
        let n = self.vertex_count();
        self.order.iter().all(|v| {
            let degree = self.arcs.neighbors(v).into_iter().filter(|u| *u != v).count();
            degree + 1 == n
        })
    }

    /// Get statistics about the graph
    pub fn statistics(&self) -> GraphStatistics {
        let weights: Vec<Weight> = self.edges().iter().map(|e| e.weight).collect();
        let avg_weight = if weights.is_empty() {
            0.0
        } else {
            weights.iter().sum::<Weight>() as f64 / weights.len() as f64
        };

        GraphStatistics {
            vertices: self.vertex_count(),
            edges: weights.len(),
            complete: self.is_complete(),
            min_weight: weights.iter().min().copied(),
            max_weight: weights.iter().max().copied(),
            avg_weight,
        }
    }
}

impl<V: Vertex> Default for UndirectedGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> WeightedGraph<V> for UndirectedGraph<V> {
    fn is_adjacent(&self, from: &V, to: &V) -> bool {
        self.arcs.is_adjacent(from, to)
    }

    fn weight(&self, from: &V, to: &V) -> Weight {
        self.arcs.weight(from, to)
    }

    fn arc_weight(&self, from: &V, to: &V) -> Option<Weight> {
        self.arcs.arc(from, to)
    }

    fn neighbors(&self, v: &V) -> HashSet<&V> {
        self.arcs.neighbors(v)
    }
}

/// Summary of an undirected graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub vertices: usize,
    pub edges: usize,
    pub complete: bool,
    pub min_weight: Option<Weight>,
    pub max_weight: Option<Weight>,
    pub avg_weight: f64,
}

impl std::fmt::Display for GraphStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Graph")?;
        writeln!(f, "  Vertices: {}", self.vertices)?;
        writeln!(f, "  Edges: {}", self.edges)?;
        writeln!(f, "  Complete: {}", self.complete)?;
        match (self.min_weight, self.max_weight) {
            (Some(min), Some(max)) => writeln!(f, "  Weights: min {} / max {}", min, max)?,
            _ => writeln!(f, "  Weights: -")?,
        }
        writeln!(f, "  Avg weight: {:.2}", self.avg_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Edge<&'static str>> {
        vec![
            Edge::new("A", "B", 1),
            Edge::new("B", "C", 1),
            Edge::new("A", "C", 5),
        ]
    }

    #[test]
    fn test_directed_graph_is_asymmetric() {
        let graph = DirectedGraph::from_edges(&triangle());

        assert!(graph.is_adjacent(&"A", &"B"));
        assert!(!graph.is_adjacent(&"B", &"A"));
        assert_eq!(graph.weight(&"A", &"C"), 5);
        assert_eq!(graph.weight(&"C", &"A"), NO_EDGE);
        // C only has incoming arcs
        assert!(graph.neighbors(&"C").is_empty());
        assert_eq!(graph.source_count(), 2);
    }

    #[test]
    fn test_directed_add_edge_overwrites() {
        let mut graph = DirectedGraph::new();
        graph.add_edge("A", "B", 4);
        graph.add_edge("A", "B", 9);

        assert_eq!(graph.weight(&"A", &"B"), 9);
        assert_eq!(graph.neighbors(&"A"), HashSet::from([&"B"]));
    }

    #[test]
    fn test_undirected_graph_mirrors_edges() {
        let graph = UndirectedGraph::from_edges(&triangle());

        for edge in triangle() {
            assert_eq!(graph.edge_weight(&edge.source, &edge.target), Some(edge.weight));
            assert_eq!(graph.edge_weight(&edge.target, &edge.source), Some(edge.weight));
            assert_eq!(graph.weight(&edge.target, &edge.source), edge.weight);
        }
        assert_eq!(graph.edge_weight(&"A", &"D"), None);
        assert_eq!(graph.vertices(), &["A", "B", "C"]);
    }

    #[test]
    fn test_zero_weight_edge_is_not_missing() {
        let graph = UndirectedGraph::from_edges(&[Edge::new("A", "B", 0)]);

        assert_eq!(graph.edge_weight(&"A", &"B"), Some(0));
        assert!(graph.is_adjacent(&"B", &"A"));
    }

    #[test]
    fn test_negative_one_weight_is_not_missing() {
        let graph = UndirectedGraph::from_edges(&[Edge::new("A", "B", -1)]);

        assert_eq!(graph.arc_weight(&"A", &"B"), Some(-1));
        assert_eq!(graph.arc_weight(&"A", &"C"), None);
        // The sentinel query cannot tell these apart
        assert_eq!(graph.weight(&"A", &"B"), graph.weight(&"A", &"C"));
    }

    #[test]
    fn test_edges_lists_each_pair_once() {
        let graph = UndirectedGraph::from_edges(&triangle());
        let edges = graph.edges();

        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], Edge::new("A", "B", 1));
        assert_eq!(edges[1], Edge::new("A", "C", 5));
        assert_eq!(edges[2], Edge::new("B", "C", 1));
    }

    #[test]
    fn test_statistics() {
        let graph = UndirectedGraph::from_edges(&triangle());
        let stats = graph.statistics();

        assert_eq!(stats.vertices, 3);
        assert_eq!(stats.edges, 3);
        assert!(stats.complete);
        assert_eq!(stats.min_weight, Some(1));
        assert_eq!(stats.max_weight, Some(5));
        assert!((stats.avg_weight - 7.0 / 3.0).abs() < 1e-10);

        let path = UndirectedGraph::from_edges(&triangle()[..2]);
        assert!(!path.is_complete());
    }
}
