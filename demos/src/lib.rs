//! Batch benchmark of the two maze solvers.
//!
//! [`run_batch`] generates a series of mazes and times a sequential and a
//! parallel solve of each. Results accumulate in a [`BenchmarkManager`],
//! which renders a plain-text table (`Display`) and CSV rows. Writing them
//! anywhere is up to the caller.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};
use maze_core::{Grid, GridError};
use maze_paths::{
    ParallelPathfinder, PathError, Pathfinder, SequentialPathfinder, SolveOutcome, SolverConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Errors raised while running a batch.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("maze generation failed: {0}")]
    Grid(#[from] GridError),

    #[error("solver failed: {0}")]
    Path(#[from] PathError),

    /// The two engines disagreed on whether maze `maze` is solvable.
    #[error("maze {maze}: sequential {sequential:?} but parallel {parallel:?}")]
    Disagreement {
        maze: usize,
        sequential: SolveOutcome,
        parallel: SolveOutcome,
    },
}

/// Parameters of one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BenchConfig {
    pub rows: i32,
    pub cols: i32,
    pub mazes: usize,
    pub threads: usize,
    /// Seed for reproducible mazes; `None` draws from the thread rng.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            mazes: 30,
            threads: SolverConfig::default().worker_count(),
            seed: None,
        }
    }
}

impl BenchConfig {
    /// Size label, e.g. `50x50`.
    pub fn maze_size(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }
}

/// Which engine a timing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    Sequential,
    Parallel,
}

/// One timed solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    /// 1-based maze number within the batch.
    pub maze: usize,
    pub kind: SolverKind,
    pub label: String,
    pub elapsed: Duration,
}

/// Sequential and parallel timings of one maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeTimings {
    pub maze: usize,
    pub sequential: Option<Duration>,
    pub parallel: Option<Duration>,
}

/// Collects timings for a batch of mazes.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkManager {
    results: Vec<BenchmarkResult>,
    maze_counter: usize,
    maze_size: String,
    batch_count: usize,
    threads: usize,
}

impl BenchmarkManager {
    pub fn new() -> Self {
        Self {
            maze_size: "N/A".to_string(),
            ..Self::default()
        }
    }

    /// Drop previous results and describe the next batch.
    pub fn configure_batch(&mut self, maze_size: impl Into<String>, count: usize, threads: usize) {
        self.results.clear();
        self.maze_counter = 0;
        self.maze_size = maze_size.into();
        self.batch_count = count;
        self.threads = threads;
    }

    /// Advance to the next maze; subsequent results are attributed to it.
    pub fn next_maze(&mut self) {
        self.maze_counter += 1;
    }

    pub fn add_result(&mut self, kind: SolverKind, label: impl Into<String>, elapsed: Duration) {
        self.results.push(BenchmarkResult {
            maze: self.maze_counter,
            kind,
            label: label.into(),
            elapsed,
        });
    }

    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    /// Timings grouped per maze, in maze order. When an engine was timed
    /// more than once for a maze the first timing is kept.
    pub fn per_maze(&self) -> Vec<MazeTimings> {
        let mut rows: Vec<MazeTimings> = Vec::new();
        for r in &self.results {
            let idx = match rows.iter().position(|t| t.maze == r.maze) {
                Some(i) => i,
                None => {
                    rows.push(MazeTimings {
                        maze: r.maze,
                        sequential: None,
                        parallel: None,
                    });
                    rows.len() - 1
                }
            };
            let slot = match r.kind {
                SolverKind::Sequential => &mut rows[idx].sequential,
                SolverKind::Parallel => &mut rows[idx].parallel,
            };
            slot.get_or_insert(r.elapsed);
        }
        rows
    }

    /// CSV rendering with a header row.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("maze,sequential_ms,parallel_ms,maze_size,maze_count,threads\n");
        for t in self.per_maze() {
            out.push_str(&format!(
                "{},{:.3},{:.3},{},{},{}\n",
                t.maze,
                millis(t.sequential),
                millis(t.parallel),
                self.maze_size,
                self.batch_count,
                self.threads
            ));
        }
        out
    }
}

fn millis(d: Option<Duration>) -> f64 {
    d.map_or(0.0, |d| d.as_secs_f64() * 1000.0)
}

impl fmt::Display for BenchmarkManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Benchmark of {} mazes of size {} with {} threads:",
            self.batch_count, self.maze_size, self.threads
        )?;
        writeln!(f)?;
        writeln!(f, "{:<10} {:<20} {:<20}", "maze", "sequential (ms)", "parallel (ms)")?;
        writeln!(f, "{:<10} {:<20} {:<20}", "-".repeat(10), "-".repeat(20), "-".repeat(20))?;
        for t in self.per_maze() {
            writeln!(
                f,
                "{:<10} {:<20.3} {:<20.3}",
                t.maze,
                millis(t.sequential),
                millis(t.parallel)
            )?;
        }
        Ok(())
    }
}

fn timed(pf: &mut dyn Pathfinder, grid: &Arc<Grid>) -> Result<(SolveOutcome, Duration), BenchError> {
    let started = Instant::now();
    let outcome = pf.solve(Arc::clone(grid), grid.start(), grid.end())?;
    Ok((outcome, started.elapsed()))
}

/// Run a batch with mazes drawn from `config.seed`, or from the thread rng
/// when no seed is set.
pub fn run_batch(config: &BenchConfig) -> Result<BenchmarkManager, BenchError> {
    match config.seed {
        Some(seed) => run_batch_with(config, &mut StdRng::seed_from_u64(seed)),
        None => run_batch_with(config, &mut rand::rng()),
    }
}

/// Generate `config.mazes` mazes from `rng` and time both engines on each.
/// `config.seed` is ignored.
///
/// Fails if either engine errors or if they disagree on solvability.
pub fn run_batch_with<R: Rng>(
    config: &BenchConfig,
    rng: &mut R,
) -> Result<BenchmarkManager, BenchError> {
    let mut manager = BenchmarkManager::new();
    manager.configure_batch(config.maze_size(), config.mazes, config.threads);

    for i in 1..=config.mazes {
        info!("generating and solving maze {i} of {}", config.mazes);
        let grid = Arc::new(maze_gen::generate_with(config.rows, config.cols, &mut *rng)?);
        manager.next_maze();

        let mut seq = SequentialPathfinder::new();
        let (seq_outcome, seq_time) = timed(&mut seq, &grid)?;
        manager.add_result(SolverKind::Sequential, seq.label(), seq_time);

        let mut par = ParallelPathfinder::new(config.threads);
        let (par_outcome, par_time) = timed(&mut par, &grid)?;
        manager.add_result(SolverKind::Parallel, par.label(), par_time);

        if seq_outcome != par_outcome {
            return Err(BenchError::Disagreement {
                maze: i,
                sequential: seq_outcome,
                parallel: par_outcome,
            });
        }
        debug!("maze {i}: {seq_outcome:?}, sequential {seq_time:?}, parallel {par_time:?}");
    }
    Ok(manager)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_from_partial_json() {
        let cfg: BenchConfig = serde_json::from_str(r#"{"rows": 20, "seed": 7}"#).unwrap();
        assert_eq!(cfg.rows, 20);
        assert_eq!(cfg.cols, 50);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.threads, BenchConfig::default().threads);
    }
}
