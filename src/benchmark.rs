//! Benchmarking module.
//!
//! Runs the exact and greedy solvers side by side on random complete graphs,
//! records per-run results and reports how far the greedy tours land from
//! the optimum.

use crate::edge::Weight;
use crate::error::Result;
use crate::exact::{BruteForceSolver, ExactConfig};
use crate::generator::generate_complete_graph;
use crate::graph::UndirectedGraph;
use crate::heuristics::{ConstructionHeuristic, GreedyEdgeHeuristic};
use crate::solution::Solution;

use indicatif::{ProgressBar, ProgressStyle};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Result of running a single algorithm on an instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmResult {
    pub algorithm: String,
    /// Instance name, `n<vertices>-s<seed>`
    pub instance: String,
    pub vertices: usize,
    pub seed: u64,
    /// Circuit cost, empty when no circuit was produced
    pub cost: Option<Weight>,
    pub complete: bool,
    /// Computation time in seconds
    pub time: f64,
    pub iterations: Option<u64>,
    /// Optimal circuit cost from the exact solver
    pub optimal_cost: Option<Weight>,
    /// Percentage above the optimum
    pub gap: Option<f64>,
}

/// Aggregated statistics for an algorithm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmStatistics {
    pub algorithm: String,
    pub num_instances: usize,
    pub num_complete: usize,
    pub avg_gap: Option<f64>,
    pub std_gap: Option<f64>,
    pub worst_gap: Option<f64>,
    pub avg_time: f64,
    pub total_time: f64,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Smallest instance size
    pub min_vertices: usize,
    /// Largest instance size, also bounded by the exact solver's ceiling
    pub max_vertices: usize,
    /// Random instances per size
    pub num_runs: usize,
    /// Run `r` of every size uses seed `seed + r`
    pub seed: u64,
    /// Run instances in parallel
    pub parallel: bool,
    pub show_progress: bool,
    pub exact: ExactConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            min_vertices: 4,
            max_vertices: 8,
            num_runs: 5,
            seed: 42,
            parallel: true,
            show_progress: true,
            exact: ExactConfig::default(),
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    results: Vec<AlgorithmResult>,
    /// Runs where the greedy tour came out cheaper than the exact one
    violations: usize,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            results: Vec::new(),
            violations: 0,
        }
    }

    /// `(vertices, seed)` for every run
    pub fn instances(&self) -> Vec<(usize, u64)> {
        let mut instances = Vec::new();
        for n in self.config.min_vertices..=self.config.max_vertices {
            for run in 0..self.config.num_runs {
                instances.push((n, self.config.seed + run as u64));
            }
        }
        instances
    }

    /// Run both solvers on every instance
    pub fn run(&mut self) -> Result<()> {
        let instances = self.instances();
        log::info!(
            "Benchmarking {} instances ({}..={} vertices)",
            instances.len(),
            self.config.min_vertices,
            self.config.max_vertices
        );

        let pb = if self.config.show_progress {
            create_progress_bar(instances.len() as u64)
        } else {
            ProgressBar::hidden()
        };

        let outcomes: Vec<Result<Vec<AlgorithmResult>>> = if self.config.parallel {
            instances
                .par_iter()
                .map(|&(n, seed)| {
                    let outcome = self.run_instance(n, seed);
                    pb.inc(1);
                    outcome
                })
                .collect()
        } else {
            instances
                .iter()
                .map(|&(n, seed)| {
                    let outcome = self.run_instance(n, seed);
                    pb.inc(1);
                    outcome
                })
                .collect()
        };
        pb.finish_and_clear();

        for outcome in outcomes {
            for result in outcome? {
                self.record_result(result);
            }
        }
        Ok(())
    }

    /// Solve one random instance with both solvers
    pub fn run_instance(&self, n: usize, seed: u64) -> Result<Vec<AlgorithmResult>> {
        let edges = generate_complete_graph(n, seed);
        let graph = UndirectedGraph::from_edges(&edges);
        let name = format!("n{}-s{}", n, seed);

        let exact = BruteForceSolver::new(self.config.exact.clone()).solve(&graph)?;
        let optimal_cost = if exact.optimal { exact.solution.cost } else { None };
        let greedy = GreedyEdgeHeuristic::new().construct(&graph);

        Ok(vec![
            to_result(&exact.solution, &name, n, seed, optimal_cost),
            to_result(&greedy, &name, n, seed, optimal_cost),
        ])
    }

    /// Record a result
    fn record_result(&mut self, result: AlgorithmResult) {
        if result.gap.is_some_and(|gap| gap < 0.0) {
            log::warn!(
                "{} beat the optimum on {}: {:?} < {:?}",
                result.algorithm,
                result.instance,
                result.cost,
                result.optimal_cost
            );
            self.violations += 1;
        }
        self.results.push(result);
    }

    /// Compute statistics for each algorithm
    pub fn compute_statistics(&self) -> Vec<AlgorithmStatistics> {
        let mut stats_map: HashMap<&str, Vec<&AlgorithmResult>> = HashMap::new();
        for result in &self.results {
            stats_map.entry(&result.algorithm).or_default().push(result);
        }

        let mut statistics: Vec<AlgorithmStatistics> = stats_map
            .into_iter()
            .map(|(algorithm, results)| {
                let gaps: Vec<f64> = results.iter().filter_map(|r| r.gap).collect();
                let times: Vec<f64> = results.iter().map(|r| r.time).collect();

                let (avg_gap, std_gap, worst_gap) = if gaps.is_empty() {
                    (None, None, None)
                } else {
                    let std = if gaps.len() > 1 {
                        Some(Statistics::std_dev(gaps.iter()))
                    } else {
                        Some(0.0)
                    };
                    let worst = gaps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                    (Some(Statistics::mean(gaps.iter())), std, Some(worst))
                };

                AlgorithmStatistics {
                    algorithm: algorithm.to_string(),
                    num_instances: results.len(),
                    num_complete: results.iter().filter(|r| r.complete).count(),
                    avg_gap,
                    std_gap,
                    worst_gap,
                    avg_time: Statistics::mean(times.iter()),
                    total_time: times.iter().sum(),
                }
            })
            .collect();

        statistics.sort_by(|a, b| {
            let gap = |s: &AlgorithmStatistics| OrderedFloat(s.avg_gap.unwrap_or(f64::INFINITY));
            gap(a).cmp(&gap(b)).then_with(|| a.algorithm.cmp(&b.algorithm))
        });
        statistics
    }

    /// Mean greedy gap per instance size
    pub fn gap_by_size(&self, algorithm: &str) -> Vec<(usize, f64)> {
        let mut by_size: HashMap<usize, Vec<f64>> = HashMap::new();
        for result in self.results.iter().filter(|r| r.algorithm == algorithm) {
            if let Some(gap) = result.gap {
                by_size.entry(result.vertices).or_default().push(gap);
            }
        }

        let mut sizes: Vec<(usize, f64)> = by_size
            .into_iter()
            .map(|(n, gaps)| (n, Statistics::mean(gaps.iter())))
            .collect();
        sizes.sort_by_key(|&(n, _)| n);
        sizes
    }

    /// Export results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for result in &self.results {
            writer.serialize(result)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Export statistics to CSV
    pub fn export_statistics_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for stat in self.compute_statistics() {
            writer.serialize(stat)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("        TSP Benchmark Report\n");
        report.push_str("========================================\n");
        report.push_str(&format!(
            "Generated: {}\n\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));

        report.push_str("Algorithm Performance Summary:\n");
        report.push_str("-".repeat(80).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<15} {:>10} {:>12} {:>12} {:>12} {:>12}\n",
            "Algorithm", "Complete", "Avg Gap%", "Std Gap%", "Worst Gap%", "Avg Time"
        ));
        report.push_str("-".repeat(80).as_str());
        report.push('\n');

        let fmt_gap = |gap: Option<f64>| gap.map(|g| format!("{:.2}", g)).unwrap_or_else(|| "-".to_string());
        for stat in self.compute_statistics() {
            report.push_str(&format!(
                "{:<15} {:>10} {:>12} {:>12} {:>12} {:>12.6}\n",
                stat.algorithm,
                format!("{}/{}", stat.num_complete, stat.num_instances),
                fmt_gap(stat.avg_gap),
                fmt_gap(stat.std_gap),
                fmt_gap(stat.worst_gap),
                stat.avg_time
            ));
        }
        report.push_str("-".repeat(80).as_str());
        report.push('\n');

        report.push_str("\nGreedy gap by size:\n");
        for (n, gap) in self.gap_by_size(GreedyEdgeHeuristic::new().name()) {
            report.push_str(&format!("  n={:<3} {:>8.2}%\n", n, gap));
        }

        report.push_str(&format!("\nRuns below the optimum: {}\n", self.violations));
        report
    }

    /// Get all results
    pub fn results(&self) -> &[AlgorithmResult] {
        &self.results
    }

    pub fn violations(&self) -> usize {
        self.violations
    }
}

fn to_result<V>(
    solution: &Solution<V>,
    instance: &str,
    vertices: usize,
    seed: u64,
    optimal_cost: Option<Weight>,
) -> AlgorithmResult {
    let gap = match (solution.cost, optimal_cost) {
        (Some(cost), Some(best)) if best > 0 => Some((cost - best) as f64 / best as f64 * 100.0),
        _ => None,
    };

    AlgorithmResult {
        algorithm: solution.algorithm.clone(),
        instance: instance.to_string(),
        vertices,
        seed,
        cost: solution.cost,
        complete: solution.complete,
        time: solution.computation_time,
        iterations: solution.iterations,
        optimal_cost,
        gap,
    }
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} instances ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig {
            min_vertices: 4,
            max_vertices: 6,
            num_runs: 3,
            show_progress: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_benchmark_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.num_runs, 5);
        assert!(config.parallel);
    }

    #[test]
    fn test_instances_cover_sizes_and_seeds() {
        let benchmark = Benchmark::new(small_config());
        let instances = benchmark.instances();

        assert_eq!(instances.len(), 9);
        assert_eq!(instances[0], (4, 42));
        assert_eq!(instances[8], (6, 44));
    }

    #[test]
    fn test_run_records_both_solvers() {
        let mut benchmark = Benchmark::new(small_config());
        benchmark.run().unwrap();

        assert_eq!(benchmark.results().len(), 18);
        assert_eq!(benchmark.violations(), 0);
        assert!(benchmark.results().iter().all(|r| r.complete));
        assert!(benchmark.results().iter().all(|r| r.gap.unwrap() >= 0.0));

        let stats = benchmark.compute_statistics();
        assert_eq!(stats.len(), 2);
        // Exact always sits at 0% and sorts first
        assert_eq!(stats[0].algorithm, "BruteForce");
        assert_eq!(stats[0].avg_gap, Some(0.0));
        assert_eq!(stats[1].algorithm, "GreedyEdge");
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let mut parallel = Benchmark::new(small_config());
        parallel.run().unwrap();
        let mut sequential = Benchmark::new(BenchmarkConfig {
            parallel: false,
            ..small_config()
        });
        sequential.run().unwrap();

        let costs = |b: &Benchmark| b.results().iter().map(|r| r.cost).collect::<Vec<_>>();
        assert_eq!(costs(&parallel), costs(&sequential));
    }

    #[test]
    fn test_ceiling_error_propagates() {
        let mut benchmark = Benchmark::new(BenchmarkConfig {
            min_vertices: 5,
            max_vertices: 5,
            num_runs: 1,
            show_progress: false,
            exact: ExactConfig {
                max_vertices: Some(4),
                ..Default::default()
            },
            ..Default::default()
        });

        assert!(benchmark.run().is_err());
    }

    #[test]
    fn test_csv_and_report() {
        let mut benchmark = Benchmark::new(small_config());
        benchmark.run().unwrap();

        let dir = tempfile::tempdir().unwrap();
        benchmark.export_to_csv(dir.path().join("results.csv")).unwrap();
        benchmark.export_statistics_csv(dir.path().join("statistics.csv")).unwrap();

        let csv = std::fs::read_to_string(dir.path().join("results.csv")).unwrap();
        assert_eq!(csv.lines().count(), 19);
        assert!(csv.starts_with("algorithm,instance,vertices,seed,cost"));

        let report = benchmark.generate_report();
        assert!(report.contains("GreedyEdge"));
        assert!(report.contains("Runs below the optimum: 0"));
    }
}
