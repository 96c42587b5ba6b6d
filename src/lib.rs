//! Weighted TSP Solver Library
//!
//! Traveling Salesman tours over graphs built from weighted edge lists.
//!
//! # Features
//!
//! - Directed and undirected weighted graphs with sentinel and `Option`
//!   weight queries
//! - Exact solver enumerating every vertex permutation, with a vertex
//!   ceiling, time limit and cancellation
//! - Greedy edge-matching heuristic
//! - Edge-list file I/O and a random complete-graph generator
//! - Benchmarking of the heuristic against the exact optimum
//!
//! # Example
//!
//! ```
//! use weighted_tsp::edge::Edge;
//! use weighted_tsp::graph::UndirectedGraph;
//! use weighted_tsp::exact::shortest_circuit;
//! use weighted_tsp::heuristics::approx_shortest_circuit;
//! use weighted_tsp::solution::path_weight;
//!
//! let edges = vec![
//!     Edge::new("A", "B", 1),
//!     Edge::new("B", "C", 1),
//!     Edge::new("A", "C", 5),
//! ];
//! let graph = UndirectedGraph::from_edges(&edges);
//!
//! let exact = shortest_circuit(&graph).unwrap();
//! assert_eq!(exact, vec!["A", "B", "C", "A"]);
//! assert_eq!(path_weight(&graph, Some(&exact[..])), 7);
//!
//! let greedy = approx_shortest_circuit(&graph);
//! assert_eq!(greedy.len(), 3);
//! ```

pub mod benchmark;
pub mod edge;
pub mod edge_list;
pub mod error;
pub mod exact;
pub mod generator;
pub mod graph;
pub mod heuristics;
pub mod solution;

pub use edge::{Edge, Vertex, Weight};
pub use error::{Error, Result};
pub use graph::{DirectedGraph, UndirectedGraph, WeightedGraph, NO_EDGE};
pub use solution::{path_weight, Solution};
