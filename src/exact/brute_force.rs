//! Exhaustive search over every vertex ordering.
//!
//! The vertices are sorted, then each lexicographic permutation is scored as
//! a closed circuit. The first permutation reaching the lowest cost wins, so
//! the result is deterministic for a given labelling and set of weights.

use crate::edge::{Vertex, Weight};
use crate::error::{Error, Result};
use crate::exact::permutation::next_permutation;
use crate::graph::UndirectedGraph;
use crate::solution::Solution;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Cost of a permutation that needs a missing edge. Never selected.
pub const INFEASIBLE_COST: Weight = Weight::MAX;

/// Default vertex ceiling; 12! is already about 479 million orderings.
pub const DEFAULT_MAX_VERTICES: usize = 12;

/// How often (in permutations) the wall clock is read
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Shared flag used to stop a running search from another thread
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub struct ExactConfig {
    /// Refuse graphs with more vertices than this; `None` disables the check
    pub max_vertices: Option<usize>,
    /// Wall-clock limit in seconds
    pub time_limit: Option<f64>,
    pub cancel: Option<CancelToken>,
}

impl ExactConfig {
    /// No vertex ceiling, no time limit
    pub fn unbounded() -> Self {
        ExactConfig {
            max_vertices: None,
            time_limit: None,
            cancel: None,
        }
    }
}

impl Default for ExactConfig {
    fn default() -> Self {
        ExactConfig {
            max_vertices: Some(DEFAULT_MAX_VERTICES),
            time_limit: None,
            cancel: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExactStatus {
    /// Every permutation was scored and a circuit exists
    Optimal,
    /// Every permutation was scored and none is a circuit
    NoFeasibleCircuit,
    TimeLimit,
    Cancelled,
}

impl std::fmt::Display for ExactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ExactStatus::Optimal => "optimal",
            ExactStatus::NoFeasibleCircuit => "no feasible circuit",
            ExactStatus::TimeLimit => "time limit reached",
            ExactStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct ExactResult<V> {
    /// Best circuit found; empty tour when none was found
    pub solution: Solution<V>,
    pub status: ExactStatus,
    /// True only when the search ran to completion and found a circuit
    pub optimal: bool,
    pub permutations: u64,
}

struct Search<V> {
    best: Option<Vec<V>>,
    status: ExactStatus,
    permutations: u64,
}

pub struct BruteForceSolver {
    pub config: ExactConfig,
}

impl BruteForceSolver {
    pub fn new(config: ExactConfig) -> Self {
        BruteForceSolver { config }
    }

    pub fn name(&self) -> &str {
        "BruteForce"
    }

    pub fn solve<V: Vertex>(&self, graph: &UndirectedGraph<V>) -> Result<ExactResult<V>> {
        let n = graph.vertex_count();
        if let Some(limit) = self.config.max_vertices {
            if n > limit {
                return Err(Error::TooManyVertices { vertices: n, limit });
            }
        }

        info!("Exact search over {} vertices", n);
        let start = Instant::now();
        let search = search(graph, |permutations| self.interruption(start, permutations));

        let mut solution = match search.best {
            Some(tour) => Solution::from_circuit(graph, n, tour, self.name()),
            None => Solution::new(self.name()),
        };
        solution.computation_time = start.elapsed().as_secs_f64();
        solution.iterations = Some(search.permutations);

        info!(
            "Exact search finished ({}) after {} permutations in {:.4}s",
            search.status, search.permutations, solution.computation_time
        );

        Ok(ExactResult {
            optimal: search.status == ExactStatus::Optimal,
            status: search.status,
            permutations: search.permutations,
            solution,
        })
    }

    fn interruption(&self, start: Instant, permutations: u64) -> Option<ExactStatus> {
        if self.config.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            warn!("Exact search cancelled after {} permutations", permutations);
            return Some(ExactStatus::Cancelled);
        }
        if let Some(limit) = self.config.time_limit {
            if permutations % CLOCK_CHECK_INTERVAL == 0 && start.elapsed().as_secs_f64() >= limit {
                warn!("Exact search hit the {}s time limit", limit);
                return Some(ExactStatus::TimeLimit);
            }
        }
        None
    }
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self::new(ExactConfig::default())
    }
}

/// Shortest circuit through every vertex, closed by repeating the first
/// vertex at the end. `None` if the graph is empty or has no Hamiltonian
/// cycle. Runs without a vertex ceiling.
pub fn shortest_circuit<V: Vertex>(graph: &UndirectedGraph<V>) -> Option<Vec<V>> {
    search(graph, |_| None).best
}

/// Closed-circuit cost of `order`, [`INFEASIBLE_COST`] if an edge is missing
pub fn tour_cost<V: Vertex>(graph: &UndirectedGraph<V>, order: &[V]) -> Weight {
    let (first, last) = match (order.first(), order.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return INFEASIBLE_COST,
    };

    let mut cost: Weight = 0;
    for step in order.windows(2) {
        match graph.edge_weight(&step[0], &step[1]) {
            Some(w) => cost = cost.saturating_add(w),
            None => return INFEASIBLE_COST,
        }
    }
    match graph.edge_weight(last, first) {
        Some(w) => cost.saturating_add(w),
        None => INFEASIBLE_COST,
    }
}

fn search<V, F>(graph: &UndirectedGraph<V>, mut interrupted: F) -> Search<V>
where
    V: Vertex,
    F: FnMut(u64) -> Option<ExactStatus>,
{
    let mut order = graph.vertices().to_vec();
    if order.is_empty() {
        return Search {
            best: None,
            status: ExactStatus::NoFeasibleCircuit,
            permutations: 0,
        };
    }
    order.sort();

    let mut best = None;
    let mut best_cost = INFEASIBLE_COST;
    let mut permutations = 0u64;

    let status = loop {
        let cost = tour_cost(graph, &order);
        permutations += 1;
        if cost < best_cost {
            debug!("New best circuit {:?} with cost {}", order, cost);
            best_cost = cost;
            let mut tour = order.clone();
            tour.push(order[0].clone());
            best = Some(tour);
        }

        if let Some(status) = interrupted(permutations) {
            break status;
        }
        if !next_permutation(&mut order) {
            break if best.is_some() {
                ExactStatus::Optimal
            } else {
                ExactStatus::NoFeasibleCircuit
            };
        }
    };

    Search {
        best,
        status,
        permutations,
    }
}
