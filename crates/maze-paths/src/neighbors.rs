use maze_core::{Grid, Point};

/// Reusable neighbour buffer.
///
/// Enumerates the orthogonal neighbours of a point in
/// [`Point::DIRECTIONS`] order without allocating per call.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the 4 orthogonal neighbours of `p`, keeping only those for
    /// which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for n in p.neighbors_4() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }

    /// Carved orthogonal neighbours of `p` in `grid`.
    pub fn passable(&mut self, grid: &Grid, p: Point) -> &[Point] {
        self.cardinal(p, |n| grid.is_path(n))
    }
}
