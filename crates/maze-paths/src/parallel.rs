//! Worker-pool best-first search.
//!
//! One coordinating task runs inside a rayon pool and pops nodes one at a
//! time. The carved neighbours of each popped node are handed to the pool
//! with `par_iter`; each worker claims its coordinate in the shared
//! [`ClaimSet`], records the predecessor and pushes the new node. The
//! coordinator joins that fan-out before popping again, so at most four
//! claims race per round and rounds never overlap.
//!
//! Because the neighbours of one node are distinct and earlier rounds are
//! complete before a round starts, no two workers ever contend for the same
//! coordinate inside a round. Claims are still atomic, and a second
//! predecessor write is reported as [`PathError::DuplicateClaim`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use log::{debug, trace, warn};
use maze_core::{Grid, Point};
use parking_lot::Mutex;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::cancel::{CancelToken, StopCondition};
use crate::claim::{ClaimSet, PredecessorSlots};
use crate::config::SolverConfig;
use crate::error::{PathError, Result};
use crate::frontier::SharedFrontier;
use crate::neighbors::Neighbors;
use crate::node::SearchNode;
use crate::reconstruct::reconstruct;
use crate::traits::{Pathfinder, SolveOutcome, check_end, check_start};

/// State shared between the coordinator and the workers for one run.
struct SharedSearch {
    grid: Arc<Grid>,
    start: Point,
    frontier: SharedFrontier,
    visited: ClaimSet,
    came_from: PredecessorSlots,
    found: AtomicBool,
    solution: OnceLock<Vec<Point>>,
    trace: Mutex<Vec<Point>>,
}

impl SharedSearch {
    fn new(grid: Arc<Grid>, start: Point) -> Result<Self> {
        check_start(&grid, start)?;
        let n = grid.cell_count();
        let search = Self {
            start,
            frontier: SharedFrontier::new(),
            visited: ClaimSet::new(n),
            came_from: PredecessorSlots::new(n),
            found: AtomicBool::new(false),
            solution: OnceLock::new(),
            trace: Mutex::new(Vec::new()),
            grid,
        };
        if let Some(si) = search.grid.idx(start) {
            search.visited.claim(si);
        }
        search.frontier.push(SearchNode::start(start));
        Ok(search)
    }

    fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// Coordinator loop: pop and expand until the goal is recorded, the
    /// frontier empties or `stop` fires.
    fn run(&self, end: Point, stop: &StopCondition) -> Result<SolveOutcome> {
        while !self.is_found() {
            if stop.should_stop() {
                warn!("parallel solve stopped after {} pops", self.trace.lock().len());
                return Ok(SolveOutcome::Cancelled);
            }
            if !self.advance(end)? {
                break;
            }
        }
        Ok(if self.is_found() {
            SolveOutcome::Found
        } else {
            SolveOutcome::Exhausted
        })
    }

    /// Pop one node and process it. Returns `false` when nothing is left to
    /// do.
    fn advance(&self, end: Point) -> Result<bool> {
        let Some(current) = self.frontier.pop_min() else {
            return Ok(false);
        };
        trace!("pop {} f={}", current.pos, current.f);
        self.trace.lock().push(current.pos);

        if current.pos == end {
            self.finish(end)?;
            return Ok(false);
        }
        self.expand(current.pos, end)?;
        Ok(true)
    }

    /// Fan the carved neighbours of `from` out across the current pool and
    /// wait for all of them. The first error from any worker is returned.
    fn expand(&self, from: Point, end: Point) -> Result<()> {
        let mut nbuf = Neighbors::new();
        nbuf.passable(&self.grid, from)
            .par_iter()
            .try_for_each(|&to| self.try_claim(from, to, end))
    }

    fn try_claim(&self, from: Point, to: Point, end: Point) -> Result<()> {
        let Some(idx) = self.grid.idx(to) else {
            return Ok(());
        };
        if !self.visited.claim(idx) {
            return Ok(());
        }
        self.came_from.record(idx, to, from)?;
        self.frontier.push(SearchNode::scored(to, end));
        Ok(())
    }

    /// Rebuild the path to `end` and publish it. Only the first caller to
    /// flip `found` stores its path.
    fn finish(&self, end: Point) -> Result<()> {
        let path = reconstruct(
            |p| self.grid.idx(p).and_then(|i| self.came_from.get(i)),
            self.start,
            end,
            self.grid.cell_count(),
        )?;
        if self
            .found
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.solution.get_or_init(|| path);
        }
        Ok(())
    }
}

fn build_pool(workers: usize) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("maze-worker-{i}"))
        .build()?;
    Ok(pool)
}

/// Best-first search with concurrent neighbour expansion.
///
/// [`solve`](Pathfinder::solve) builds a fresh pool of
/// [`SolverConfig::worker_count`] threads and drops it before returning, on
/// success, exhaustion, error or panic alike. [`step`](Pathfinder::step)
/// lazily builds a pool for the current run and keeps it until the next
/// [`initialize`](Pathfinder::initialize).
#[derive(Default)]
pub struct ParallelPathfinder {
    config: SolverConfig,
    cancel: CancelToken,
    search: Option<SharedSearch>,
    step_pool: Option<ThreadPool>,
}

impl ParallelPathfinder {
    /// Engine with `threads` workers (at least 1).
    pub fn new(threads: usize) -> Self {
        Self::with_config(SolverConfig::with_parallelism(threads))
    }

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

    /// Resolved worker count.
    pub fn workers(&self) -> usize {
        self.config.worker_count()
    }

    /// Whether `p` has been claimed in the current run.
    pub fn is_visited(&self, p: Point) -> bool {
        self.search
            .as_ref()
            .and_then(|s| s.grid.idx(p).map(|i| s.visited.is_claimed(i)))
            .unwrap_or(false)
    }

    /// Number of coordinates claimed so far in the current run.
    pub fn visited_count(&self) -> usize {
        self.search.as_ref().map_or(0, |s| s.visited.count())
    }
}

impl Pathfinder for ParallelPathfinder {
    fn initialize(&mut self, grid: Arc<Grid>, start: Point) -> Result<()> {
        self.step_pool = None;
        self.search = Some(SharedSearch::new(grid, start)?);
        Ok(())
    }

    fn step(&mut self, end: Point) -> Result<bool> {
        let search = self.search.as_ref().ok_or(PathError::NotInitialized)?;
        check_end(&search.grid, end)?;
        if search.is_found() {
            return Ok(false);
        }
        let pool = match self.step_pool.take() {
            Some(pool) => pool,
            None => build_pool(self.config.worker_count())?,
        };
        let more = pool.install(|| search.advance(end));
        self.step_pool = Some(pool);
        more
    }

    fn solve(&mut self, grid: Arc<Grid>, start: Point, end: Point) -> Result<SolveOutcome> {
        self.initialize(grid, start)?;
        let search = self.search.as_ref().ok_or(PathError::NotInitialized)?;
        check_end(&search.grid, end)?;

        let workers = self.config.worker_count();
        let stop = StopCondition::new(
            self.cancel.clone(),
            self.config.deadline.map(|d| Instant::now() + d),
        );
        let pool = build_pool(workers)?;
        let outcome = pool.install(|| search.run(end, &stop))?;

        debug!(
            "parallel solve {start} -> {end} on {workers} workers: {outcome:?}, {} pops, {} claimed",
            search.trace.lock().len(),
            search.visited.count()
        );
        Ok(outcome)
    }

    fn explored_trace(&self) -> Vec<Point> {
        self.search
            .as_ref()
            .map(|s| s.trace.lock().clone())
            .unwrap_or_default()
    }

    fn solution_path(&self) -> Vec<Point> {
        self.search
            .as_ref()
            .and_then(|s| s.solution.get().cloned())
            .unwrap_or_default()
    }

    fn predecessor(&self, p: Point) -> Option<Point> {
        let search = self.search.as_ref()?;
        search.grid.idx(p).and_then(|i| search.came_from.get(i))
    }

    fn label(&self) -> String {
        format!("parallel ({} threads)", self.workers())
    }
}
