//! Maze generation for the maze grid.
//!
//! [`MazeGenerator`] carves a perfect maze (a spanning tree over the odd
//! room lattice) with a randomized depth-first walk. [`generate`] is the
//! one-shot entry point; the generator itself can also be stepped for
//! animation.

pub mod generator;

pub use generator::{MazeGenerator, generate, generate_with};
