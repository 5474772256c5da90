//! **maze-core** provides grid types shared by the maze generator and the
//! pathfinding engines.
//!
//! A [`Grid`] is a rows×cols matrix of [`CellState`] values with fixed
//! `start` and `end` coordinates. Coordinates are [`Point`]s whose `x`
//! indexes rows and `y` indexes columns.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::{GridError, Result};
pub use geom::Point;
pub use grid::{CellState, Grid, MIN_SIDE};
