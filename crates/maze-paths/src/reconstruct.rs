use maze_core::Point;

use crate::error::{PathError, Result};

/// Walk a predecessor map back from `goal` and return the path in
/// start-to-goal order.
///
/// `predecessor` returns the coordinate a point was reached from, or `None`
/// for the root. The walk must end at `start` within `limit` points;
/// anything else means the map is corrupt and yields
/// [`PathError::BrokenChain`].
pub fn reconstruct<F>(predecessor: F, start: Point, goal: Point, limit: usize) -> Result<Vec<Point>>
where
    F: Fn(Point) -> Option<Point>,
{
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = predecessor(current) {
        if path.len() >= limit {
            return Err(PathError::BrokenChain {
                at: prev,
                len: path.len(),
            });
        }
        path.push(prev);
        current = prev;
    }
    if current != start {
        return Err(PathError::BrokenChain {
            at: current,
            len: path.len(),
        });
    }
    path.reverse();
    Ok(path)
}
