// Demo driver for the batch scheduler.
//
// Generates a seeded synthetic workload with random priorities and token
// counts, feeds it to the scheduler with a short stagger between submissions
// to simulate arrival, then shuts down and prints the aggregate report.

use inferline::{BatchScheduler, SchedulerConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::process;
use std::thread;
use std::time::Duration;

/// Command-line options parsed from program arguments.
struct CliOptions {
    /// Worker thread count.
    workers: usize,
    /// Maximum requests per batch.
    max_batch: usize,
    /// Number of synthetic requests to submit.
    requests: usize,
    /// Workload RNG seed (runs are reproducible for a fixed seed).
    seed: u64,
    /// Emit the report as JSON instead of the formatted stats block.
    json: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            workers: 4,
            max_batch: 8,
            requests: 200,
            seed: 42,
            json: false,
        }
    }
}

/// Parse command-line arguments into `CliOptions`.
///
/// Supports both `--key=value` and `--key value` forms. Unparseable values
/// fall back to the defaults.
fn parse_cli_options() -> CliOptions {
    let mut options = CliOptions::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (key, inline) = match arg.split_once('=') {
            Some((key, value)) => (key.to_string(), Some(value.to_string())),
            None => (arg, None),
        };
        match key.as_str() {
            "--workers" => {
                if let Some(value) = inline.or_else(|| args.next()) {
                    if let Ok(parsed) = value.parse::<usize>() {
                        options.workers = parsed;
                    }
                }
            }
            "--batch" => {
                if let Some(value) = inline.or_else(|| args.next()) {
                    if let Ok(parsed) = value.parse::<usize>() {
                        options.max_batch = parsed;
                    }
                }
            }
            "--requests" => {
                if let Some(value) = inline.or_else(|| args.next()) {
                    if let Ok(parsed) = value.parse::<usize>() {
                        options.requests = parsed;
                    }
                }
            }
            "--seed" => {
                if let Some(value) = inline.or_else(|| args.next()) {
                    if let Ok(parsed) = value.parse::<u64>() {
                        options.seed = parsed;
                    }
                }
            }
            "--json" => options.json = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("unknown argument: {other}");
                print_usage();
                process::exit(2);
            }
        }
    }
    options
}

fn print_usage() {
    println!(
        "usage: inferline [--workers N] [--batch N] [--requests N] [--seed N] [--json]"
    );
}

fn main() {
    let options = parse_cli_options();

    println!(
        "starting batch scheduler: workers={} batch={} requests={}",
        options.workers, options.max_batch, options.requests
    );

    let config = SchedulerConfig {
        workers: options.workers,
        max_batch: options.max_batch,
        ..SchedulerConfig::default()
    };
    let scheduler = match BatchScheduler::new(config) {
        Ok(scheduler) => scheduler,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    scheduler.start();

    // Seeded workload: random priorities and token counts, staggered to
    // simulate arrival.
    let mut rng = StdRng::seed_from_u64(options.seed);
    for _ in 0..options.requests {
        let priority: i32 = rng.gen_range(1..=10);
        let tokens: u32 = rng.gen_range(50..=500);
        scheduler.submit(priority, tokens);
        thread::sleep(Duration::from_micros(200));
    }

    // Let in-flight batches settle before draining.
    thread::sleep(Duration::from_millis(500));
    scheduler.shutdown();

    let report = scheduler.report();
    if options.json {
        match serde_json::to_string_pretty(&report) {
            Ok(encoded) => println!("{encoded}"),
            Err(err) => eprintln!("failed to encode report: {err}"),
        }
    } else {
        println!();
        println!("=== Batch Scheduler Stats ===");
        println!("Workers:     {}", options.workers);
        println!("Batch size:  {}", options.max_batch);
        println!("Processed:   {}", report.processed);
        println!("Elapsed:     {:.1} ms", report.elapsed.as_secs_f64() * 1_000.0);
        println!("Throughput:  {:.1} req/s", report.throughput);
        println!("Latency p50: {:.2} ms", report.p50.as_secs_f64() * 1_000.0);
        println!("Latency p95: {:.2} ms", report.p95.as_secs_f64() * 1_000.0);
        println!("Latency p99: {:.2} ms", report.p99.as_secs_f64() * 1_000.0);
        println!("=============================");
    }
}
