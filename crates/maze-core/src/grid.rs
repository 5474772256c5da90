//! The maze grid.
//!
//! [`Grid`] stores one [`CellState`] per cell in row-major order, together
//! with the fixed endpoints `start = (1, 1)` and `end = (rows - 3, cols - 3)`.
//! Generators mutate a grid while carving it; once handed to a pathfinder it
//! is only read.

use std::fmt;

use crate::error::{GridError, Result};
use crate::geom::Point;

/// Smallest allowed side length: `end` must land strictly inside the border.
pub const MIN_SIDE: i32 = 5;

/// State of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Wall,
    Path,
}

impl CellState {
    /// Character used by the text form: `#` for walls, `.` for paths.
    pub const fn symbol(self) -> char {
        match self {
            CellState::Wall => '#',
            CellState::Path => '.',
        }
    }

    fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(CellState::Wall),
            '.' => Some(CellState::Path),
            _ => None,
        }
    }
}

/// A rows×cols wall/path matrix with fixed start and end coordinates.
///
/// `rows * cols` always fits in an `i32`, so row-major indices computed from
/// in-bounds points never overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<CellState>,
    start: Point,
    end: Point,
}

impl Grid {
    /// Create a grid with every cell set to [`CellState::Wall`].
    ///
    /// Fails with [`GridError::TooSmall`] when either side is below
    /// [`MIN_SIDE`] and with [`GridError::TooLarge`] when the cell count
    /// does not fit in an `i32`.
    pub fn new(rows: i32, cols: i32) -> Result<Self> {
        let len = Self::checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::Wall; len],
            start: Point::new(1, 1),
            end: Point::new(rows - 3, cols - 3),
        })
    }

    fn checked_len(rows: i32, cols: i32) -> Result<usize> {
        if rows < MIN_SIDE || cols < MIN_SIDE {
            return Err(GridError::TooSmall {
                rows,
                cols,
                min: MIN_SIDE,
            });
        }
        rows.checked_mul(cols)
            .map(|n| n as usize)
            .ok_or(GridError::TooLarge { rows, cols })
    }

    /// Parse the text form produced by `Display`: one string per row,
    /// `#` for walls and `.` for paths.
    pub fn from_rows<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.as_ref().chars().count());
        let side = |n: usize| i32::try_from(n).unwrap_or(i32::MAX);
        let mut grid = Self::new(side(rows), side(cols))?;
        for (x, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::RaggedRow {
                    row: x,
                    expected: cols,
                    found,
                });
            }
            for (y, ch) in line.chars().enumerate() {
                let state =
                    CellState::from_symbol(ch).ok_or(GridError::InvalidChar { ch, row: x, col: y })?;
                grid.set(Point::new(x as i32, y as i32), state);
            }
        }
        Ok(grid)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Fixed start coordinate, `(1, 1)`.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Fixed end coordinate, `(rows - 3, cols - 3)`.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.rows && p.y >= 0 && p.y < self.cols
    }

    /// Row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.x * self.cols + p.y) as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Grid::idx`].
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let i = idx as i32;
        Point::new(i / self.cols, i % self.cols)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<CellState> {
        self.idx(p).map(|i| self.cells[i])
    }

    /// Whether `p` is in bounds and carved.
    #[inline]
    pub fn is_path(&self, p: Point) -> bool {
        self.at(p) == Some(CellState::Path)
    }

    /// Set the cell at `p`. Returns `false` (and does nothing) if out of
    /// bounds.
    pub fn set(&mut self, p: Point, state: CellState) -> bool {
        match self.idx(p) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// Fill the whole grid with `state`.
    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Count cells equal to `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Iterate over `(Point, CellState)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (self.point(i), c))
    }

    /// Orthogonal neighbours of `p` that are carved, in
    /// [`Point::DIRECTIONS`] order.
    pub fn path_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.is_path(n))
    }
}

/// Serialized shape of a [`Grid`], validated before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    rows: i32,
    cols: i32,
    cells: Vec<CellState>,
    start: Point,
    end: Point,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self> {
        let mut grid = Grid::new(repr.rows, repr.cols)?;
        if repr.cells.len() != grid.cells.len() {
            return Err(GridError::CellCount {
                rows: repr.rows,
                cols: repr.cols,
                expected: grid.cells.len(),
                found: repr.cells.len(),
            });
        }
        if repr.start != grid.start || repr.end != grid.end {
            return Err(GridError::Endpoints {
                start: repr.start,
                end: repr.end,
            });
        }
        grid.cells = repr.cells;
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for c in row {
                write!(f, "{}", c.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_all_walls_with_fixed_endpoints() {
        let g = Grid::new(7, 9).unwrap();
        assert_eq!(g.rows(), 7);
        assert_eq!(g.cols(), 9);
        assert_eq!(g.cell_count(), 63);
        assert_eq!(g.count(CellState::Wall), 63);
        assert_eq!(g.start(), Point::new(1, 1));
        assert_eq!(g.end(), Point::new(4, 6));
    }

    #[test]
    fn too_small_fails_fast() {
        assert_eq!(
            Grid::new(4, 10),
            Err(GridError::TooSmall {
                rows: 4,
                cols: 10,
                min: MIN_SIDE
            })
        );
        assert!(Grid::new(5, 3).is_err());
        assert!(Grid::new(-1, 7).is_err());
        assert!(Grid::new(5, 5).is_ok());
    }

    #[test]
    fn too_large_fails_fast() {
        assert_eq!(
            Grid::new(46_341, 46_341),
            Err(GridError::TooLarge {
                rows: 46_341,
                cols: 46_341
            })
        );
        assert!(matches!(
            Grid::new(i32::MAX, 5),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn idx_and_point_are_inverse() {
        let g = Grid::new(5, 6).unwrap();
        for i in 0..g.cell_count() {
            assert_eq!(g.idx(g.point(i)), Some(i));
        }
        assert_eq!(g.idx(Point::new(5, 0)), None);
        assert_eq!(g.idx(Point::new(0, -1)), None);
        assert_eq!(g.idx(Point::new(1, 2)), Some(8));
    }

    #[test]
    fn set_and_at() {
        let mut g = Grid::new(5, 5).unwrap();
        assert!(g.set(Point::new(2, 3), CellState::Path));
        assert!(!g.set(Point::new(9, 9), CellState::Path));
        assert_eq!(g.at(Point::new(2, 3)), Some(CellState::Path));
        assert_eq!(g.at(Point::new(9, 9)), None);
        assert!(g.is_path(Point::new(2, 3)));
        assert!(!g.is_path(Point::new(2, 2)));
        assert_eq!(g.count(CellState::Path), 1);
    }

    #[test]
    fn path_neighbors_skip_walls_and_border() {
        let g = Grid::from_rows(&[
            ".....", //
            ".#...",
            ".....",
            "#####",
            "#####",
        ])
        .unwrap();
        let n: Vec<Point> = g.path_neighbors(Point::new(0, 0)).collect();
        assert_eq!(n, vec![Point::new(1, 0), Point::new(0, 1)]);
        let n: Vec<Point> = g.path_neighbors(Point::new(2, 1)).collect();
        assert_eq!(n, vec![Point::new(2, 2), Point::new(2, 0)]);
    }

    #[test]
    fn text_form_round_trips() {
        let lines = ["#####", "#...#", "#.#.#", "#...#", "#####"];
        let g = Grid::from_rows(&lines).unwrap();
        assert_eq!(g.to_string(), lines.join("\n"));
        assert_eq!(g.count(CellState::Path), 8);
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        let ragged = ["#####", "#...#", "#..#", "#...#", "#####"];
        assert_eq!(
            Grid::from_rows(&ragged),
            Err(GridError::RaggedRow {
                row: 2,
                expected: 5,
                found: 4
            })
        );
        let bad = ["#####", "#.x.#", "#...#", "#...#", "#####"];
        assert_eq!(
            Grid::from_rows(&bad),
            Err(GridError::InvalidChar {
                ch: 'x',
                row: 1,
                col: 2
            })
        );
        assert!(Grid::from_rows(&["###", "###", "###"]).is_err());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::from_rows(&["#####", "#...#", "#.#.#", "#...#", "#####"]).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
        assert!(back.is_path(Point::new(1, 1)));
    }

    fn corrupt(json: &str) -> String {
        serde_json::from_str::<Grid>(json).unwrap_err().to_string()
    }

    #[test]
    fn corrupt_grid_is_rejected() {
        let g = Grid::new(5, 5).unwrap();
        let mut value = serde_json::to_value(&g).unwrap();

        value["cells"] = serde_json::json!([]);
        assert!(corrupt(&value.to_string()).contains("needs 25 cells, found 0"));

        let mut small = serde_json::to_value(&g).unwrap();
        small["rows"] = serde_json::json!(4);
        assert!(corrupt(&small.to_string()).contains("too small"));

        let mut moved = serde_json::to_value(&g).unwrap();
        moved["end"] = serde_json::json!({"x": 9, "y": 9});
        assert!(corrupt(&moved.to_string()).contains("do not match"));

        value = serde_json::to_value(&g).unwrap();
        value["cols"] = serde_json::json!(i32::MAX);
        value["rows"] = serde_json::json!(i32::MAX);
        assert!(corrupt(&value.to_string()).contains("too large"));
    }
}
