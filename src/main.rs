//! Command-line driver: generates a random instance and solves it.

use chromatic::graph::Graph;
use chromatic::pipeline::{self, SolveConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

struct Args {
    order: usize,
    density: f64,
    seed: Option<u64>,
    deadline_secs: u64,
    workers: Option<usize>,
    bounds_only: bool,
}

fn usage_and_exit(program: &str) -> ! {
    eprintln!(
        "Usage: {program} [--order N] [--density P] [--seed S] \
         [--deadline SECS] [--workers W] [--bounds-only]"
    );
    std::process::exit(2);
}

fn next_value<T: std::str::FromStr>(args: &mut std::env::Args, program: &str) -> T {
    match args.next().and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => usage_and_exit(program),
    }
}

fn parse_args() -> Args {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "chromatic".into());
    let mut parsed = Args {
        order: 20,
        density: 0.5,
        seed: None,
        deadline_secs: 120,
        workers: None,
        bounds_only: false,
    };
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--order" => parsed.order = next_value(&mut args, &program),
            "--density" => parsed.density = next_value(&mut args, &program),
            "--seed" => parsed.seed = Some(next_value(&mut args, &program)),
            "--deadline" => parsed.deadline_secs = next_value(&mut args, &program),
            "--workers" => parsed.workers = Some(next_value(&mut args, &program)),
            "--bounds-only" => parsed.bounds_only = true,
            _ => usage_and_exit(&program),
        }
    }
    parsed
}

fn main() {
    let args = parse_args();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = SmallRng::seed_from_u64(seed);
    let graph = Graph::random(&mut rng, args.order, args.density);

    println!("--------------------------------------------------");
    println!(
        "Chromatic search: n={} m={} density={:.3} seed={seed}",
        graph.order(),
        graph.edge_count(),
        graph.density()
    );
    println!("--------------------------------------------------");

    let start = Instant::now();
    if args.bounds_only {
        let report = pipeline::heuristic_bounds(&graph);
        println!("Clique lower bound: {} (witness {:?})", report.lower, report.clique);
        println!("Greedy upper bound: {}", report.greedy);
        println!("DSATUR upper bound: {}", report.dsatur);
        println!("Elapsed: {:.3}s", start.elapsed().as_secs_f64());
        return;
    }

    let config = SolveConfig {
        deadline: Duration::from_secs(args.deadline_secs),
        max_workers: args
            .workers
            .unwrap_or_else(|| SolveConfig::default().max_workers),
    };
    match pipeline::solve(&graph, &config) {
        Ok(solution) => {
            let label = if solution.proven {
                "exact"
            } else {
                "best effort, deadline reached"
            };
            println!("Chromatic number: {} ({label})", solution.chromatic_number);
            println!("Coloring: {:?}", solution.coloring);
            println!("Elapsed: {:.3}s", start.elapsed().as_secs_f64());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
