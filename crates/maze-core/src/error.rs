//! Error types for grid construction.

use thiserror::Error;

use crate::geom::Point;

/// Errors raised while building a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Dimensions too small to place `start` and `end` inside the border.
    #[error("grid {rows}x{cols} is too small (both sides must be at least {min})")]
    TooSmall { rows: i32, cols: i32, min: i32 },

    /// `rows * cols` does not fit the `i32` coordinate space.
    #[error("grid {rows}x{cols} is too large")]
    TooLarge { rows: i32, cols: i32 },

    /// Stored cells do not match the declared dimensions.
    #[error("grid {rows}x{cols} needs {expected} cells, found {found}")]
    CellCount {
        rows: i32,
        cols: i32,
        expected: usize,
        found: usize,
    },

    /// Stored endpoints differ from the fixed `(1, 1)` and
    /// `(rows - 3, cols - 3)`.
    #[error("endpoints {start} -> {end} do not match the grid dimensions")]
    Endpoints { start: Point, end: Point },

    /// A text row has a different length than the first one.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A text cell is neither `#` nor `.`.
    #[error("unexpected character {ch:?} at ({row}, {col})")]
    InvalidChar { ch: char, row: usize, col: usize },
}

/// Result alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GridError::TooSmall {
            rows: 3,
            cols: 9,
            min: 5,
        };
        assert_eq!(
            format!("{err}"),
            "grid 3x9 is too small (both sides must be at least 5)"
        );

        let err = GridError::InvalidChar {
            ch: 'x',
            row: 1,
            col: 2,
        };
        assert!(format!("{err}").contains("'x'"));

        let err = GridError::TooLarge {
            rows: 50_000,
            cols: 50_000,
        };
        assert_eq!(err.to_string(), "grid 50000x50000 is too large");
    }
}
