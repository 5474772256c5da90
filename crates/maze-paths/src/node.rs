use std::cmp::Ordering;

use maze_core::Point;

use crate::distance::manhattan;

/// Cost term added to every discovered node.
///
/// It is a constant rather than the distance travelled from the start, which
/// makes the search greedy best-first.
pub const STEP_COST: i32 = 1;

/// A frontier entry: a coordinate and its priority.
///
/// Ordered so that a max-heap pops the lowest `f` first; equal `f` pops the
/// smaller coordinate first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    pub pos: Point,
    pub f: i32,
}

impl SearchNode {
    /// The seed node, scored 0.
    pub fn start(pos: Point) -> Self {
        Self { pos, f: 0 }
    }

    /// A newly discovered node scored `STEP_COST + manhattan(pos, end)`.
    pub fn scored(pos: Point, end: Point) -> Self {
        Self {
            pos,
            f: STEP_COST + manhattan(pos, end),
        }
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys for BinaryHeap.
        other.f.cmp(&self.f).then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
