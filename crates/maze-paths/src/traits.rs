use std::sync::Arc;

use maze_core::{Grid, Point};

use crate::error::{PathError, Result};

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveOutcome {
    /// The goal was popped; [`Pathfinder::solution_path`] is non-empty.
    Found,
    /// The frontier ran dry without reaching the goal.
    Exhausted,
    /// The cancel token fired or the deadline passed.
    Cancelled,
}

/// Common interface of the sequential and parallel engines.
///
/// Both engines seed the frontier with `start` at score 0, expand carved
/// orthogonal neighbours in `+x, -x, +y, -y` order, score discoveries with
/// [`SearchNode::scored`](crate::SearchNode::scored) and record the first
/// discoverer as predecessor.
pub trait Pathfinder {
    /// Reset all per-run state and seed the frontier with `start`.
    fn initialize(&mut self, grid: Arc<Grid>, start: Point) -> Result<()>;

    /// Pop and expand one node. Returns `false` once the goal has been
    /// reached or the frontier is empty.
    fn step(&mut self, end: Point) -> Result<bool>;

    /// Initialize and run to completion.
    fn solve(&mut self, grid: Arc<Grid>, start: Point, end: Point) -> Result<SolveOutcome>;

    /// Coordinates in the order they were popped.
    fn explored_trace(&self) -> Vec<Point>;

    /// `start..=end` if the goal was reached, otherwise empty.
    fn solution_path(&self) -> Vec<Point>;

    /// The coordinate `p` was discovered from, if any.
    fn predecessor(&self, p: Point) -> Option<Point>;

    /// Short name used to label timings.
    fn label(&self) -> String;
}

pub(crate) fn check_start(grid: &Grid, start: Point) -> Result<()> {
    if !grid.contains(start) {
        return Err(PathError::OutOfBounds(start));
    }
    if !grid.is_path(start) {
        return Err(PathError::StartIsWall(start));
    }
    Ok(())
}

pub(crate) fn check_end(grid: &Grid, end: Point) -> Result<()> {
    if grid.contains(end) {
        Ok(())
    } else {
        Err(PathError::OutOfBounds(end))
    }
}
