//! Randomized depth-first maze carving.
//!
//! Rooms sit on odd coordinates; the cells between two rooms are walls until
//! the walk carves through them. Every room reachable from `start` ends up
//! connected by exactly one simple path.
//!
//! `end = (rows - 3, cols - 3)` is a room only when both sides are even, so
//! even sizes are the ones that yield a solvable maze.

use log::{debug, trace, warn};
use maze_core::{CellState, Grid, Point, Result};
use rand::Rng;
use rand::seq::SliceRandom;

/// Generate a maze with a thread-local random source.
pub fn generate(rows: i32, cols: i32) -> Result<Grid> {
    generate_with(rows, cols, rand::rng())
}

/// Generate a maze drawing randomness from `rng`.
pub fn generate_with<R: Rng>(rows: i32, cols: i32, rng: R) -> Result<Grid> {
    let mut mg = MazeGenerator::new(rows, cols, rng)?;
    mg.run();
    let grid = mg.into_grid();
    if !grid.is_path(grid.end()) {
        warn!(
            "end {} of a {rows}x{cols} maze is off the room lattice and stays walled",
            grid.end()
        );
    }
    Ok(grid)
}

/// Stepwise maze generator.
///
/// Each [`step`](MazeGenerator::step) either carves one corridor or
/// backtracks once, so callers can animate the carving. [`run`](MazeGenerator::run)
/// drives it to completion.
pub struct MazeGenerator<R: Rng> {
    pub rng: R,
    grid: Grid,
    stack: Vec<Point>,
    done: bool,
    carved: usize,
}

impl<R: Rng> MazeGenerator<R> {
    /// Create a generator for a `rows`×`cols` maze with `start` already
    /// carved and pushed.
    pub fn new(rows: i32, cols: i32, rng: R) -> Result<Self> {
        let grid = Grid::new(rows, cols)?;
        let mut mg = Self {
            rng,
            grid,
            stack: Vec::new(),
            done: false,
            carved: 0,
        };
        mg.reset();
        Ok(mg)
    }

    /// Wall the grid back up and restart from `start`.
    pub fn reset(&mut self) {
        self.grid.fill(CellState::Wall);
        self.stack.clear();
        let start = self.grid.start();
        self.grid.set(start, CellState::Path);
        self.stack.push(start);
        self.done = false;
        self.carved = 1;
    }

    /// Advance the walk by one move. Returns `false` once the stack is empty.
    pub fn step(&mut self) -> bool {
        let Some(&current) = self.stack.last() else {
            if !self.done {
                self.done = true;
                debug!(
                    "maze {}x{} carved: {} path cells",
                    self.grid.rows(),
                    self.grid.cols(),
                    self.carved
                );
            }
            return false;
        };

        let mut dirs = Point::DIRECTIONS;
        dirs.shuffle(&mut self.rng);

        for d in dirs {
            let target = current + d * 2;
            if self.is_uncarved_room(target) {
                self.grid.set(current + d, CellState::Path);
                self.grid.set(target, CellState::Path);
                self.carved += 2;
                self.stack.push(target);
                trace!("carve {current} -> {target}");
                return true;
            }
        }

        // Dead end: backtrack.
        self.stack.pop();
        true
    }

    /// Step until the walk finishes.
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Whether the walk has finished.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The grid as carved so far.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consume the generator and return its grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// A room strictly inside the outer border that is still walled.
    fn is_uncarved_room(&self, p: Point) -> bool {
        p.x > 0
            && p.x < self.grid.rows() - 1
            && p.y > 0
            && p.y < self.grid.cols() - 1
            && self.grid.at(p) == Some(CellState::Wall)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use super::*;
    use maze_core::GridError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn reachable(grid: &Grid, from: Point) -> HashSet<Point> {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        while let Some(p) = queue.pop_front() {
            for n in grid.path_neighbors(p) {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    #[test]
    fn end_is_reachable_from_start() {
        for seed in 0..20 {
            for (rows, cols) in [(6, 6), (8, 8), (20, 20), (16, 30), (50, 50)] {
                let grid = generate_with(rows, cols, StdRng::seed_from_u64(seed)).unwrap();
                assert!(grid.is_path(grid.start()));
                assert!(grid.is_path(grid.end()));
                assert!(
                    reachable(&grid, grid.start()).contains(&grid.end()),
                    "seed {seed}, {rows}x{cols}:\n{grid}"
                );
            }
        }
    }

    #[test]
    fn carving_forms_a_spanning_tree_over_rooms() {
        let (rows, cols) = (21, 25);
        let grid = generate_with(rows, cols, StdRng::seed_from_u64(7)).unwrap();
        let rooms = ((rows - 1) / 2 * ((cols - 1) / 2)) as usize;

        // Every room is carved and every path cell is reachable.
        for x in (1..rows - 1).step_by(2) {
            for y in (1..cols - 1).step_by(2) {
                assert!(grid.is_path(Point::new(x, y)));
            }
        }
        let paths = grid.count(CellState::Path);
        assert_eq!(reachable(&grid, grid.start()).len(), paths);

        // A tree over `rooms` nodes has `rooms - 1` corridors.
        assert_eq!(paths, 2 * rooms - 1);
    }

    #[test]
    fn odd_sizes_leave_end_walled() {
        let grid = generate_with(7, 7, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(grid.end(), Point::new(4, 4));
        assert!(!grid.is_path(grid.end()));
    }

    #[test]
    fn border_stays_walled() {
        let grid = generate_with(11, 13, StdRng::seed_from_u64(3)).unwrap();
        for (p, c) in grid.iter() {
            if p.x == 0 || p.y == 0 || p.x == grid.rows() - 1 || p.y == grid.cols() - 1 {
                assert_eq!(c, CellState::Wall, "border cell {p} carved");
            }
        }
    }

    #[test]
    fn stepping_reports_completion() {
        let mut mg = MazeGenerator::new(9, 9, StdRng::seed_from_u64(11)).unwrap();
        assert!(!mg.is_done());
        let mut steps = 0;
        while mg.step() {
            steps += 1;
        }
        assert!(mg.is_done());
        // 16 rooms: 15 carves + 16 backtracks.
        assert_eq!(steps, 31);
        assert!(!mg.step());

        mg.reset();
        assert!(!mg.is_done());
        assert_eq!(mg.grid().count(CellState::Path), 1);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate_with(15, 15, StdRng::seed_from_u64(99)).unwrap();
        let b = generate_with(15, 15, StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_tiny_grids() {
        assert!(matches!(
            generate(3, 3),
            Err(GridError::TooSmall { rows: 3, cols: 3, .. })
        ));
    }
}
