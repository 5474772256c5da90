//! Error types for the pathfinding engines.

use maze_core::Point;
use thiserror::Error;

/// Errors returned by [`Pathfinder`](crate::Pathfinder) operations.
///
/// Not finding a path is not an error; see
/// [`SolveOutcome::Exhausted`](crate::SolveOutcome::Exhausted).
#[derive(Debug, Error)]
pub enum PathError {
    /// `step` was called before `initialize`.
    #[error("pathfinder stepped before initialize")]
    NotInitialized,

    /// An endpoint lies outside the grid.
    #[error("endpoint {0} is outside the grid")]
    OutOfBounds(Point),

    /// The start coordinate is a wall.
    #[error("start {0} is not a path cell")]
    StartIsWall(Point),

    /// A coordinate was given a second predecessor.
    #[error("{point} claimed twice: reached from {first} and again from {second}")]
    DuplicateClaim {
        point: Point,
        first: Point,
        second: Point,
    },

    /// The predecessor chain from the goal does not lead back to a root.
    #[error("predecessor chain broken at {at} after {len} links")]
    BrokenChain { at: Point, len: usize },

    /// The worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Result alias for pathfinding operations.
pub type Result<T> = std::result::Result<T, PathError>;
