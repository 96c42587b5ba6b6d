//! Greedy edge-matching construction of a tour.

use crate::edge::{Edge, Vertex};
use crate::graph::UndirectedGraph;
use crate::solution::Solution;
use log::{debug, info};
use std::collections::{HashMap, HashSet};

pub trait ConstructionHeuristic {
    fn construct<V: Vertex>(&self, graph: &UndirectedGraph<V>) -> Solution<V>;
    fn name(&self) -> &str;
}

/// Greedy edge-matching heuristic
///
/// Takes edges cheapest first and keeps one when both endpoints still have
/// degree below two and it does not close a cycle early. The only cycle
/// allowed is the one formed by the N-th accepted edge, which covers every
/// vertex. On sparse graphs the edge list can run out first; the result is
/// then a set of path fragments and the solution is marked incomplete.
pub struct GreedyEdgeHeuristic;

impl GreedyEdgeHeuristic {
    pub fn new() -> Self {
        GreedyEdgeHeuristic
    }
}

impl Default for GreedyEdgeHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepted-edge bookkeeping for one construction run
struct ConstructionState<V: Vertex> {
    degree: HashMap<V, u8>,
    links: HashMap<V, Vec<V>>,
    accepted: usize,
    /// Vertices in the order they first joined an accepted edge
    touched: Vec<V>,
}

impl<V: Vertex> ConstructionState<V> {
    fn new(vertices: &[V]) -> Self {
        ConstructionState {
            degree: vertices.iter().map(|v| (v.clone(), 0)).collect(),
            links: HashMap::new(),
            accepted: 0,
            touched: Vec::new(),
        }
    }

    fn degree(&self, v: &V) -> u8 {
        self.degree.get(v).copied().unwrap_or(0)
    }

    fn can_accept(&self, u: &V, v: &V, vertex_count: usize) -> bool {
        if self.degree(u) >= 2 || self.degree(v) >= 2 {
            return false;
        }
        !self.connected(u, v) || self.accepted + 1 == vertex_count
    }

    /// Depth-first reachability over accepted edges
    fn connected(&self, from: &V, to: &V) -> bool {
        let mut stack = vec![from];
        let mut seen: HashSet<&V> = HashSet::new();
        seen.insert(from);

        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            for next in self.links.get(current).into_iter().flatten() {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        false
    }

    fn accept(&mut self, u: &V, v: &V) {
        for (a, b) in [(u, v), (v, u)] {
            let degree = self.degree.entry(a.clone()).or_insert(0);
            if *degree == 0 {
                self.touched.push(a.clone());
            }
            *degree += 1;
            self.links.entry(a.clone()).or_default().push(b.clone());
        }
        self.accepted += 1;
    }

    /// Visit order along the accepted edges. A closed cycle is walked from
    /// the first touched vertex; fragments are walked end to end.
    fn into_tour(self, closed: bool) -> Vec<V> {
        let mut emitted = HashSet::new();
        let mut tour = Vec::with_capacity(self.touched.len());

        if closed {
            if let Some(start) = self.touched.first() {
                self.walk_from(start, &mut emitted, &mut tour);
            }
        } else {
            for start in &self.touched {
                if self.degree(start) == 1 && !emitted.contains(start) {
                    self.walk_from(start, &mut emitted, &mut tour);
                }
            }
        }
        tour
    }

    fn walk_from(&self, start: &V, emitted: &mut HashSet<V>, tour: &mut Vec<V>) {
        let mut current = start.clone();
        loop {
            emitted.insert(current.clone());
            tour.push(current.clone());
            let next = self
                .links
                .get(&current)
                .and_then(|next| next.iter().find(|n| !emitted.contains(*n)))
                .cloned();
            match next {
                Some(n) => current = n,
                None => break,
            }
        }
    }
}

impl ConstructionHeuristic for GreedyEdgeHeuristic {
    fn construct<V: Vertex>(&self, graph: &UndirectedGraph<V>) -> Solution<V> {
        let start = std::time::Instant::now();
        let n = graph.vertex_count();
        let mut state = ConstructionState::new(graph.vertices());

        // Sorted by endpoints already, so the stable sort breaks weight ties
        // by vertex order
        let mut candidates: Vec<Edge<V>> = graph
            .edges()
            .into_iter()
            .filter(|e| e.source != e.target)
            .collect();
        candidates.sort_by(Edge::cmp_by_weight);

        let mut examined = 0u64;
        for edge in &candidates {
            if state.accepted == n {
                break;
            }
            examined += 1;
            if state.can_accept(&edge.source, &edge.target, n) {
                debug!("Accepted {:?} - {:?} ({})", edge.source, edge.target, edge.weight);
                state.accept(&edge.source, &edge.target);
            } else {
                debug!("Rejected {:?} - {:?} ({})", edge.source, edge.target, edge.weight);
            }
        }

        let closed = n > 0 && state.accepted == n;
        if !closed {
            debug!(
                "Greedy construction stalled with {} of {} edges accepted",
                state.accepted, n
            );
        }

        let tour = state.into_tour(closed);
        let mut solution = Solution::from_open_tour(graph, n, tour, self.name());
        solution.computation_time = start.elapsed().as_secs_f64();
        solution.iterations = Some(examined);

        info!(
            "{} built a tour over {} of {} vertices (complete: {})",
            self.name(),
            solution.tour.len(),
            n,
            solution.complete
        );
        solution
    }

    fn name(&self) -> &str {
        "GreedyEdge"
    }
}

/// Greedy visit order; shorter than the vertex count when construction
/// could not complete a circuit.
///
/// The order follows the accepted edges around the cycle (or along each
/// fragment), not the order in which endpoints were first accepted.
pub fn approx_shortest_circuit<V: Vertex>(graph: &UndirectedGraph<V>) -> Vec<V> {
    GreedyEdgeHeuristic::new().construct(graph).tour
}
