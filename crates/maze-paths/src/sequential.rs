use std::sync::Arc;
use std::time::Instant;

use log::{debug, trace, warn};
use maze_core::{Grid, Point};

use crate::cancel::{CancelToken, StopCondition};
use crate::config::SolverConfig;
use crate::error::{PathError, Result};
use crate::frontier::Frontier;
use crate::neighbors::Neighbors;
use crate::node::SearchNode;
use crate::reconstruct::reconstruct;
use crate::traits::{Pathfinder, SolveOutcome, check_end, check_start};

/// Single-threaded best-first search.
///
/// Visited flags and predecessors live in flat vectors indexed by
/// [`Grid::idx`], sized once per [`initialize`](Pathfinder::initialize).
#[derive(Default)]
pub struct SequentialPathfinder {
    config: SolverConfig,
    cancel: CancelToken,
    grid: Option<Arc<Grid>>,
    start: Point,
    frontier: Frontier,
    visited: Vec<bool>,
    came_from: Vec<Option<Point>>,
    trace: Vec<Point>,
    solution: Vec<Point>,
    nbuf: Neighbors,
}

impl SequentialPathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config`; only its deadline applies here.
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Stop early when `token` is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Number of nodes waiting in the frontier.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}

impl Pathfinder for SequentialPathfinder {
    fn initialize(&mut self, grid: Arc<Grid>, start: Point) -> Result<()> {
        check_start(&grid, start)?;
        let n = grid.cell_count();

        self.frontier.clear();
        self.trace.clear();
        self.solution.clear();
        self.visited.clear();
        self.visited.resize(n, false);
        self.came_from.clear();
        self.came_from.resize(n, None);

        if let Some(si) = grid.idx(start) {
            self.visited[si] = true;
        }
        self.frontier.push(SearchNode::start(start));
        self.start = start;
        self.grid = Some(grid);
        Ok(())
    }

    fn step(&mut self, end: Point) -> Result<bool> {
        let grid = self.grid.as_deref().ok_or(PathError::NotInitialized)?;
        check_end(grid, end)?;
        if !self.solution.is_empty() {
            return Ok(false);
        }

        let Some(current) = self.frontier.pop_min() else {
            return Ok(false);
        };
        trace!("pop {} f={}", current.pos, current.f);
        self.trace.push(current.pos);

        if current.pos == end {
            let came_from = &self.came_from;
            self.solution = reconstruct(
                |p| grid.idx(p).and_then(|i| came_from[i]),
                self.start,
                end,
                grid.cell_count(),
            )?;
            return Ok(false);
        }

        for &n in self.nbuf.passable(grid, current.pos) {
            let Some(ni) = grid.idx(n) else {
                continue;
            };
            if self.visited[ni] {
                continue;
            }
            self.visited[ni] = true;
            self.came_from[ni] = Some(current.pos);
            self.frontier.push(SearchNode::scored(n, end));
        }
        Ok(true)
    }

    fn solve(&mut self, grid: Arc<Grid>, start: Point, end: Point) -> Result<SolveOutcome> {
        self.initialize(grid, start)?;
        let stop = StopCondition::new(
            self.cancel.clone(),
            self.config.deadline.map(|d| Instant::now() + d),
        );

        let outcome = loop {
            if stop.should_stop() {
                warn!("sequential solve stopped after {} pops", self.trace.len());
                break SolveOutcome::Cancelled;
            }
            if !self.step(end)? {
                break if self.solution.is_empty() {
                    SolveOutcome::Exhausted
                } else {
                    SolveOutcome::Found
                };
            }
        };

        debug!(
            "sequential solve {start} -> {end}: {outcome:?}, {} pops, path length {}",
            self.trace.len(),
            self.solution.len()
        );
        Ok(outcome)
    }

    fn explored_trace(&self) -> Vec<Point> {
        self.trace.clone()
    }

    fn solution_path(&self) -> Vec<Point> {
        self.solution.clone()
    }

    fn predecessor(&self, p: Point) -> Option<Point> {
        let grid = self.grid.as_deref()?;
        grid.idx(p).and_then(|i| self.came_from[i])
    }

    fn label(&self) -> String {
        "sequential".to_string()
    }
}
