//! Tour results and tour/path weight evaluation.

use crate::edge::{Vertex, Weight};
use crate::graph::{WeightedGraph, NO_EDGE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Weight of an open path: the sum of its consecutive arcs.
///
/// Returns [`NO_EDGE`] (-1) when the path is missing, has fewer than two
/// vertices, or uses an arc the graph does not have. The path is not closed
/// back to its first vertex. Sums saturate at `Weight::MAX`.
pub fn path_weight<V, G>(graph: &G, path: Option<&[V]>) -> Weight
where
    V: Vertex,
    G: WeightedGraph<V>,
{
    match path {
        Some(p) if p.len() >= 2 => open_weight(graph, p).unwrap_or(NO_EDGE),
        _ => NO_EDGE,
    }
}

/// Weight of `tour` closed back to its first vertex, `None` if an arc is
/// missing or the tour has fewer than two vertices.
pub fn circuit_weight<V, G>(graph: &G, tour: &[V]) -> Option<Weight>
where
    V: Vertex,
    G: WeightedGraph<V>,
{
    let (first, last) = match (tour.first(), tour.last()) {
        (Some(first), Some(last)) if tour.len() >= 2 => (first, last),
        _ => return None,
    };
    let open = open_weight(graph, tour)?;
    let closing = graph.arc_weight(last, first)?;
    Some(open.saturating_add(closing))
}

fn open_weight<V, G>(graph: &G, path: &[V]) -> Option<Weight>
where
    V: Vertex,
    G: WeightedGraph<V>,
{
    if path.len() < 2 {
        return None;
    }
    path.windows(2).try_fold(0 as Weight, |total, step| {
        graph
            .arc_weight(&step[0], &step[1])
            .map(|w| total.saturating_add(w))
    })
}

/// Represents the outcome of one solver run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution<V> {
    /// Visit order. Closed (first vertex repeated at the end) for exact
    /// results, open for greedy results.
    pub tour: Vec<V>,
    /// Total weight of the closed circuit, `None` when no circuit was found
    pub cost: Option<Weight>,
    /// Whether the tour visits every vertex of the graph as one circuit
    pub complete: bool,
    /// Algorithm that generated this solution
    pub algorithm: String,
    /// Computation time in seconds
    pub computation_time: f64,
    /// Permutations or edges examined
    pub iterations: Option<u64>,
}

impl<V: Vertex> Solution<V> {
    /// Create an empty solution (no tour found)
    pub fn new(algorithm: &str) -> Self {
        Solution {
            tour: Vec::new(),
            cost: None,
            complete: false,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
            iterations: None,
        }
    }

    /// Create a solution from a circuit whose last vertex repeats the first
    pub fn from_circuit<G: WeightedGraph<V>>(
        graph: &G,
        vertex_count: usize,
        tour: Vec<V>,
        algorithm: &str,
    ) -> Self {
        let cost = open_weight(graph, &tour);
        let closed = tour.len() > 1 && tour.first() == tour.last();
        let complete = cost.is_some() && closed && visits_each_once(&tour[1..], vertex_count);

        Solution {
            tour,
            cost,
            complete,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
            iterations: None,
        }
    }

    /// Create a solution from an open visit order; the closing arc from the
    /// last vertex back to the first is implied. A tour that misses a vertex
    /// has no cost even if its ends happen to be joined.
    pub fn from_open_tour<G: WeightedGraph<V>>(
        graph: &G,
        vertex_count: usize,
        tour: Vec<V>,
        algorithm: &str,
    ) -> Self {
        let cost = circuit_weight(graph, &tour).filter(|_| visits_each_once(&tour, vertex_count));
        let complete = cost.is_some();

        Solution {
            tour,
            cost,
            complete,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
            iterations: None,
        }
    }

    /// The tour with its first vertex repeated at the end
    pub fn closed_tour(&self) -> Vec<V> {
        let mut closed = self.tour.clone();
        if closed.len() > 1 && closed.first() != closed.last() {
            closed.push(closed[0].clone());
        }
        closed
    }

    /// Number of distinct vertices on the tour
    pub fn distinct_vertices(&self) -> usize {
        self.tour.iter().collect::<HashSet<_>>().len()
    }
}

fn visits_each_once<V: Vertex>(order: &[V], vertex_count: usize) -> bool {
    order.len() == vertex_count && order.iter().collect::<HashSet<_>>().len() == vertex_count
}

impl<V: Vertex> std::fmt::Display for Solution<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        match self.cost {
            Some(cost) => writeln!(f, "  Cost: {}", cost)?,
            None => writeln!(f, "  Cost: -")?,
        }
        writeln!(f, "  Complete: {}", self.complete)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        if let Some(iter) = self.iterations {
            writeln!(f, "  Iterations: {}", iter)?;
        }
        writeln!(f, "  Tour: {:?}", self.tour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::graph::{DirectedGraph, UndirectedGraph};

    fn square() -> UndirectedGraph<&'static str> {
        UndirectedGraph::from_edges(&[
            Edge::new("A", "B", 2),
            Edge::new("B", "C", 3),
            Edge::new("C", "D", 4),
            Edge::new("D", "A", 5),
        ])
    }

    #[test]
    fn test_path_weight_short_or_missing() {
        let graph = square();

        assert_eq!(path_weight(&graph, None::<&[&str]>), -1);
        assert_eq!(path_weight(&graph, Some(&[] as &[&str])), -1);
        assert_eq!(path_weight(&graph, Some(&["A"][..])), -1);
    }

    #[test]
    fn test_path_weight_sums_open_path() {
        let graph = square();

        assert_eq!(path_weight(&graph, Some(&["A", "B", "C"][..])), 5);
        assert_eq!(path_weight(&graph, Some(&["A", "B", "C", "D", "A"][..])), 14);
    }

    #[test]
    fn test_path_weight_short_circuits_on_missing_edge() {
        let graph = square();

        // A-B exists, B-D does not
        assert_eq!(path_weight(&graph, Some(&["A", "B", "D", "A"][..])), -1);
    }

    #[test]
    fn test_path_weight_follows_arc_direction() {
        let graph = DirectedGraph::from_edges(&[Edge::new("A", "B", 1), Edge::new("B", "C", 1)]);

        assert_eq!(path_weight(&graph, Some(&["A", "B", "C"][..])), 2);
        assert_eq!(path_weight(&graph, Some(&["C", "B", "A"][..])), -1);
    }

    #[test]
    fn test_circuit_weight_adds_closing_edge() {
        let graph = square();

        assert_eq!(circuit_weight(&graph, &["A", "B", "C", "D"]), Some(14));
        assert_eq!(circuit_weight(&graph, &["A", "C", "B", "D"]), None);
        assert_eq!(circuit_weight(&graph, &["A"]), None);
    }

    #[test]
    fn test_solution_from_circuit() {
        let graph = square();
        let sol = Solution::from_circuit(&graph, 4, vec!["A", "B", "C", "D", "A"], "test");

        assert_eq!(sol.cost, Some(14));
        assert!(sol.complete);
        assert_eq!(sol.closed_tour(), sol.tour);
        assert_eq!(sol.distinct_vertices(), 4);
    }

    #[test]
    fn test_solution_from_partial_open_tour() {
        let graph = square();
        let sol = Solution::from_open_tour(&graph, 4, vec!["A", "B", "C"], "test");

        assert_eq!(sol.cost, None);
        assert!(!sol.complete);
        assert_eq!(sol.closed_tour(), vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_partial_tour_with_joined_ends_has_no_cost() {
        // A and C are adjacent, but D is never visited
        let graph = UndirectedGraph::from_edges(&[
            Edge::new("A", "B", 1),
            Edge::new("B", "C", 1),
            Edge::new("C", "A", 1),
            Edge::new("C", "D", 1),
        ]);
        let sol = Solution::from_open_tour(&graph, 4, vec!["A", "B", "C"], "test");

        assert_eq!(circuit_weight(&graph, &sol.tour), Some(3));
        assert_eq!(sol.cost, None);
        assert!(!sol.complete);
    }

    #[test]
    fn test_negative_weights_are_real_costs() {
        let graph = UndirectedGraph::from_edges(&[
            Edge::new("A", "B", -3),
            Edge::new("B", "C", 1),
            Edge::new("A", "C", 1),
        ]);

        assert_eq!(circuit_weight(&graph, &["A", "B", "C"]), Some(-1));

        let closed = Solution::from_circuit(&graph, 3, vec!["A", "B", "C", "A"], "test");
        assert_eq!(closed.cost, Some(-1));
        assert!(closed.complete);

        let open = Solution::from_open_tour(&graph, 3, vec!["A", "B", "C"], "test");
        assert_eq!(open.cost, Some(-1));
        assert!(open.complete);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let graph = UndirectedGraph::from_edges(&[
            Edge::new("A", "B", Weight::MAX),
            Edge::new("B", "C", 1),
            Edge::new("C", "A", 1),
        ]);

        assert_eq!(path_weight(&graph, Some(&["A", "B", "C"][..])), Weight::MAX);
        assert_eq!(circuit_weight(&graph, &["A", "B", "C"]), Some(Weight::MAX));
    }

    #[test]
    fn test_empty_solution() {
        let sol: Solution<&str> = Solution::new("none");
        assert!(sol.tour.is_empty());
        assert!(!sol.complete);
        assert_eq!(sol.cost, None);
    }
}
