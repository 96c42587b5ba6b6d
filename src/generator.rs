//! Random complete-graph instances.

use crate::edge::{Edge, Weight};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

pub const MIN_WEIGHT: Weight = 1;
pub const MAX_WEIGHT: Weight = 500;

/// Label of the `i`-th generated vertex (1-based)
pub fn vertex_label(i: usize) -> String {
    format!("Vert{}", i)
}

/// Every edge of the complete graph on `Vert1..VertN`, listed once with the
/// lower index as source, weights uniform in `[1, 500]`. Deterministic via seed.
pub fn generate_complete_graph(num_vertices: usize, seed: u64) -> Vec<Edge<String>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_complete_graph_with(num_vertices, &mut rng)
}

pub fn generate_complete_graph_with<R: Rng>(num_vertices: usize, rng: &mut R) -> Vec<Edge<String>> {
    let mut edges = Vec::with_capacity(num_vertices * num_vertices.saturating_sub(1) / 2);
    for i in 1..=num_vertices {
        for j in i + 1..=num_vertices {
            let weight = rng.gen_range(MIN_WEIGHT..=MAX_WEIGHT);
            edges.push(Edge::new(vertex_label(i), vertex_label(j), weight));
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::UndirectedGraph;

    #[test]
    fn test_complete_graph_shape() {
        let edges = generate_complete_graph(6, 42);

        assert_eq!(edges.len(), 15);
        assert!(edges.iter().all(|e| (MIN_WEIGHT..=MAX_WEIGHT).contains(&e.weight)));
        assert_eq!(edges[0].source, "Vert1");
        assert_eq!(edges[0].target, "Vert2");

        let graph = UndirectedGraph::from_edges(&edges);
        assert_eq!(graph.vertex_count(), 6);
        assert!(graph.is_complete());
    }

    #[test]
    fn test_same_seed_same_graph() {
        assert_eq!(generate_complete_graph(5, 9), generate_complete_graph(5, 9));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(generate_complete_graph(0, 1).is_empty());
        assert!(generate_complete_graph(1, 1).is_empty());
        assert_eq!(generate_complete_graph(2, 1).len(), 1);
    }
}
