//! Best-first maze solvers.
//!
//! Two engines implement the [`Pathfinder`] trait with identical scoring and
//! frontier ordering:
//!
//! - [`SequentialPathfinder`]: single-threaded search over a binary heap.
//! - [`ParallelPathfinder`]: one coordinating task on a rayon pool; the
//!   neighbours of each popped node are claimed and pushed concurrently.
//!
//! Scoring is `f = 1 + manhattan(node, end)`: the cost term is a constant
//! unit step rather than the accumulated path length, so the search is greedy
//! best-first and the solution is not necessarily the shortest path. Ties on
//! `f` pop the lexicographically smaller coordinate first.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use maze_core::Grid;
//! use maze_paths::{Pathfinder, SequentialPathfinder, SolveOutcome};
//!
//! let grid = Arc::new(Grid::from_rows(&[
//!     "######",
//!     "#...##",
//!     "##.#.#",
//!     "#...##",
//!     "######",
//!     "######",
//! ]).unwrap());
//! let (start, end) = (grid.start(), grid.end());
//! let mut solver = SequentialPathfinder::new();
//! let outcome = solver.solve(grid, start, end).unwrap();
//! assert_eq!(outcome, SolveOutcome::Found);
//! assert_eq!(solver.solution_path().first(), Some(&start));
//! assert_eq!(solver.solution_path().last(), Some(&end));
//! ```

mod cancel;
mod claim;
mod config;
mod distance;
mod error;
mod frontier;
mod neighbors;
mod node;
mod parallel;
mod reconstruct;
mod sequential;
mod traits;

pub use cancel::CancelToken;
pub use config::SolverConfig;
pub use distance::manhattan;
pub use error::{PathError, Result};
pub use frontier::{Frontier, SharedFrontier};
pub use neighbors::Neighbors;
pub use node::{STEP_COST, SearchNode};
pub use parallel::ParallelPathfinder;
pub use reconstruct::reconstruct;
pub use sequential::SequentialPathfinder;
pub use traits::{Pathfinder, SolveOutcome};
