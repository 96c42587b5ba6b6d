//! Weighted TSP Solver - Command Line Interface
//!
//! Generates random instances, solves edge-list graphs exactly or greedily,
//! and benchmarks the two against each other.

use clap::{Parser, Subcommand, ValueEnum};
use weighted_tsp::benchmark::{Benchmark, BenchmarkConfig};
use weighted_tsp::edge_list::{parse_vertex_list, read_edges, write_edges};
use weighted_tsp::exact::{BruteForceSolver, ExactConfig, DEFAULT_MAX_VERTICES};
use weighted_tsp::generator::generate_complete_graph;
use weighted_tsp::graph::UndirectedGraph;
use weighted_tsp::heuristics::{ConstructionHeuristic, GreedyEdgeHeuristic};
use weighted_tsp::solution::{path_weight, Solution};

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "weighted-tsp")]
#[command(version = "1.0")]
#[command(about = "Exact and greedy Traveling Salesman solvers for weighted edge lists")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a random complete graph as an edge list
    Generate {
        /// Number of vertices
        #[arg(short = 'n', long)]
        vertices: usize,

        /// Edge-list file to create
        #[arg(short, long)]
        output: PathBuf,

        /// Random seed (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Find a tour through every vertex of an edge-list graph
    Solve {
        /// Edge-list file (source,target,weight per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "both")]
        algorithm: Algorithm,

        /// Refuse exact search above this many vertices
        #[arg(long, default_value_t = DEFAULT_MAX_VERTICES)]
        max_vertices: usize,

        /// Disable the exact search vertex ceiling
        #[arg(long)]
        no_ceiling: bool,

        /// Exact search time limit in seconds
        #[arg(short, long)]
        time_limit: Option<f64>,

        /// Write the solutions as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Weight of an open path, -1 if it is not a valid path
    PathWeight {
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated vertex labels, e.g. A,B,C
        #[arg(short, long)]
        path: String,
    },

    /// Print graph statistics
    Analyze {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Compare the greedy heuristic with the exact optimum on random graphs
    Benchmark {
        /// Smallest instance size
        #[arg(long, default_value = "4")]
        min_size: usize,

        /// Largest instance size
        #[arg(long, default_value = "8")]
        max_size: usize,

        /// Random instances per size
        #[arg(short, long, default_value = "5")]
        runs: usize,

        /// Base random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Run instances one at a time
        #[arg(long)]
        sequential: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Algorithm {
    /// Enumerate every permutation
    Exact,
    /// Greedy edge matching
    Approx,
    /// Run both and compare
    Both,
}

fn main() {
    let cli = Cli::parse();
    init_logger(matches!(&cli.command, Commands::Solve { verbose: true, .. }));

    match cli.command {
        Commands::Generate { vertices, output, seed } => {
            generate(vertices, &output, seed);
        }

        Commands::Solve { input, algorithm, max_vertices, no_ceiling, time_limit, output, verbose } => {
            let config = ExactConfig {
                max_vertices: if no_ceiling { None } else { Some(max_vertices) },
                time_limit,
                cancel: None,
            };
            solve(&input, algorithm, config, output, verbose);
        }

        Commands::PathWeight { input, path } => {
            print_path_weight(&input, &path);
        }

        Commands::Analyze { input } => {
            analyze(&input);
        }

        Commands::Benchmark { min_size, max_size, runs, seed, output, sequential } => {
            let config = BenchmarkConfig {
                min_vertices: min_size,
                max_vertices: max_size,
                num_runs: runs,
                seed,
                parallel: !sequential,
                ..Default::default()
            };
            run_benchmark(config, &output);
        }
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_graph(path: &Path) -> UndirectedGraph<String> {
    match read_edges(path) {
        Ok(edges) => UndirectedGraph::from_edges(&edges),
        Err(e) => {
            eprintln!("Error loading graph from {:?}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn generate(vertices: usize, output: &Path, seed: Option<u64>) {
    let seed = seed.unwrap_or_else(rand::random);
    let edges = generate_complete_graph(vertices, seed);

    match write_edges(&edges, output) {
        Ok(count) => println!("{}", count),
        Err(e) => {
            eprintln!("Error writing to {:?}: {}", output, e);
            std::process::exit(1);
        }
    }
}

fn solve(path: &Path, algorithm: Algorithm, config: ExactConfig, output: Option<PathBuf>, verbose: bool) {
    let graph = load_graph(path);
    if verbose {
        println!("{}", graph.statistics());
    }

    let mut solutions: Vec<Solution<String>> = Vec::new();

    if matches!(algorithm, Algorithm::Exact | Algorithm::Both) {
        let solver = BruteForceSolver::new(config);
        match solver.solve(&graph) {
            Ok(result) => {
                println!("Status: {}", result.status);
                println!("Permutations: {}", result.permutations);
                solutions.push(result.solution);
            }
            Err(e) => {
                eprintln!("Exact solver error: {}", e);
                std::process::exit(1);
            }
        }
    }

    if matches!(algorithm, Algorithm::Approx | Algorithm::Both) {
        solutions.push(GreedyEdgeHeuristic::new().construct(&graph));
    }

    println!("\n========== Results ==========");
    for solution in &solutions {
        println!("Algorithm: {}", solution.algorithm);
        match solution.cost {
            Some(cost) => println!("Cost: {}", cost),
            None => println!("Cost: no circuit"),
        }
        println!("Complete: {}", solution.complete);
        if !solution.complete {
            println!(
                "Visited {} of {} vertices",
                solution.distinct_vertices(),
                graph.vertex_count()
            );
        }
        println!("Time: {:.4}s", solution.computation_time);
        println!("Tour: {}", solution.tour.join(" -> "));
        if verbose {
            if let Some(iter) = solution.iterations {
                println!("Iterations: {}", iter);
            }
        }
        println!();
    }

    if let [exact, approx] = solutions.as_slice() {
        if let (Some(best), Some(cost)) = (exact.cost, approx.cost) {
            if best > 0 {
                println!("Greedy gap: {:.2}%", (cost - best) as f64 / best as f64 * 100.0);
            }
        }
    }

    if let Some(out_path) = output {
        let json = match serde_json::to_string_pretty(&solutions) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to serialize solutions: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(&out_path, json) {
            eprintln!("Failed to write {:?}: {}", out_path, e);
            std::process::exit(1);
        }
        println!("Solutions saved to {:?}", out_path);
    }
}

fn print_path_weight(input: &Path, path: &str) {
    let vertices = match parse_vertex_list(path) {
        Ok(vertices) => vertices,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let graph = load_graph(input);

    println!("{}", path_weight(&graph, Some(&vertices[..])));
}

fn analyze(input: &Path) {
    let graph = load_graph(input);

    println!("========== Graph Analysis ==========\n");
    println!("{}", graph.statistics());

    let greedy = GreedyEdgeHeuristic::new().construct(&graph);
    println!("Quick Solution Estimate:");
    match greedy.cost {
        Some(cost) => println!("  Greedy edge: {} (complete: {})", cost, greedy.complete),
        None => println!("  Greedy edge: no circuit ({} vertices reached)", greedy.distinct_vertices()),
    }
}

fn run_benchmark(config: BenchmarkConfig, output: &Path) {
    if let Err(e) = std::fs::create_dir_all(output) {
        eprintln!("Failed to create output directory {:?}: {}", output, e);
        std::process::exit(1);
    }

    let mut benchmark = Benchmark::new(config);
    if let Err(e) = benchmark.run() {
        eprintln!("Benchmark failed: {}", e);
        std::process::exit(1);
    }

    let results_path = output.join("results.csv");
    let stats_path = output.join("statistics.csv");
    let exported = benchmark
        .export_to_csv(&results_path)
        .and_then(|_| benchmark.export_statistics_csv(&stats_path));
    if let Err(e) = exported {
        eprintln!("Failed to export results: {}", e);
        std::process::exit(1);
    }
    println!("Results exported to {:?}", results_path);
    println!("Statistics exported to {:?}", stats_path);

    let report = benchmark.generate_report();
    println!("\n{}", report);

    let report_path = output.join("report.txt");
    match std::fs::write(&report_path, &report) {
        Ok(()) => println!("Report saved to {:?}", report_path),
        Err(e) => eprintln!("Failed to save report: {}", e),
    }
}
