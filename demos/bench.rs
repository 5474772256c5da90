//! Generate a batch of mazes and time both solvers on each.
//!
//! ```text
//! maze-bench --rows 50 --cols 50 --mazes 30 --threads 4 --out results/
//! ```

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use maze_bench::{BenchConfig, run_batch};

#[derive(Parser, Debug)]
#[command(name = "maze-bench", about = "Time sequential vs parallel best-first maze solving")]
struct Args {
    /// Maze rows (even sizes put the exit on a room).
    #[arg(long, default_value_t = 50)]
    rows: i32,

    /// Maze columns.
    #[arg(long, default_value_t = 50)]
    cols: i32,

    /// Number of mazes in the batch.
    #[arg(long, default_value_t = 30)]
    mazes: usize,

    /// Worker threads for the parallel solver (defaults to available cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Seed for reproducible mazes.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory to write benchmark_results.txt and benchmark_results.csv into.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let defaults = BenchConfig::default();
    let config = BenchConfig {
        rows: args.rows,
        cols: args.cols,
        mazes: args.mazes,
        threads: args.threads.unwrap_or(defaults.threads).max(1),
        seed: args.seed,
    };

    let manager = run_batch(&config)?;

    print!("{manager}");

    if let Some(dir) = args.out {
        fs::create_dir_all(&dir)?;
        let txt = dir.join("benchmark_results.txt");
        let csv = dir.join("benchmark_results.csv");
        fs::write(&txt, manager.to_string())?;
        fs::write(&csv, manager.to_csv())?;
        info!("wrote {} and {}", txt.display(), csv.display());
    }
    Ok(())
}
