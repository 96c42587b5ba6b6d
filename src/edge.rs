//! Weighted edge records and the vertex bound used across the crate.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

/// Edge weight. Non-negative by convention, not enforced.
pub type Weight = i64;

/// Anything usable as a vertex label: totally ordered for canonical
/// permutation order, hashable for adjacency lookup.
pub trait Vertex: Clone + Ord + Hash + Debug {}

impl<T: Clone + Ord + Hash + Debug> Vertex for T {}

/// A weighted edge from `source` to `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<V> {
    pub source: V,
    pub target: V,
    pub weight: Weight,
}

impl<V> Edge<V> {
    pub fn new(source: V, target: V, weight: Weight) -> Self {
        Edge { source, target, weight }
    }

    /// Compare two edges by weight only. Edges of equal weight compare equal,
    /// so callers needing a reproducible order should use a stable sort.
    pub fn cmp_by_weight(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight)
    }
}

impl<V: std::fmt::Display> std::fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.source, self.target, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_by_weight_ignores_endpoints() {
        let a = Edge::new("A", "Z", 3);
        let b = Edge::new("B", "C", 3);
        let c = Edge::new("A", "B", 7);

        assert_eq!(a.cmp_by_weight(&b), Ordering::Equal);
        assert_eq!(a.cmp_by_weight(&c), Ordering::Less);
        assert_eq!(c.cmp_by_weight(&b), Ordering::Greater);
    }

    #[test]
    fn test_stable_sort_keeps_insertion_order_on_ties() {
        let mut edges = vec![
            Edge::new("C", "D", 2),
            Edge::new("A", "B", 1),
            Edge::new("B", "C", 2),
        ];
        edges.sort_by(Edge::cmp_by_weight);

        assert_eq!(edges[0].source, "A");
        assert_eq!(edges[1].source, "C");
        assert_eq!(edges[2].source, "B");
    }
}
