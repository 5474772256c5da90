//! Open lists ordered by [`SearchNode`] priority.
//!
//! [`Frontier`] is the single-threaded heap; [`SharedFrontier`] wraps the
//! same heap in a mutex so workers can push while the coordinator pops.
//! Both pop in exactly the same order.

use std::collections::BinaryHeap;

use parking_lot::Mutex;

use crate::node::SearchNode;

/// Single-threaded min-priority frontier.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<SearchNode>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) {
        self.heap.push(node);
    }

    /// Remove and return the lowest-scored node.
    pub fn pop_min(&mut self) -> Option<SearchNode> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

/// Thread-safe min-priority frontier.
#[derive(Debug, Default)]
pub struct SharedFrontier {
    heap: Mutex<BinaryHeap<SearchNode>>,
}

impl SharedFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, node: SearchNode) {
        self.heap.lock().push(node);
    }

    /// Remove and return the lowest-scored node.
    pub fn pop_min(&self) -> Option<SearchNode> {
        self.heap.lock().pop()
    }

    pub fn len(&self) -> usize {
        self.heap.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.lock().is_empty()
    }

    pub fn clear(&self) {
        self.heap.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Point;
    use rayon::prelude::*;

    fn nodes() -> Vec<SearchNode> {
        [(3, 1, 1), (1, 2, 2), (1, 0, 5), (2, 0, 0), (1, 2, 1), (0, 9, 9)]
            .into_iter()
            .map(|(f, x, y)| SearchNode {
                pos: Point::new(x, y),
                f,
            })
            .collect()
    }

    fn expected() -> Vec<(i32, Point)> {
        vec![
            (0, Point::new(9, 9)),
            (1, Point::new(0, 5)),
            (1, Point::new(2, 1)),
            (1, Point::new(2, 2)),
            (2, Point::new(0, 0)),
            (3, Point::new(1, 1)),
        ]
    }

    #[test]
    fn pops_by_score_then_coordinate() {
        let mut fr = Frontier::new();
        for n in nodes() {
            fr.push(n);
        }
        assert_eq!(fr.len(), 6);
        let mut order = Vec::new();
        while let Some(n) = fr.pop_min() {
            order.push((n.f, n.pos));
        }
        assert_eq!(order, expected());
        assert!(fr.is_empty());
        assert_eq!(fr.pop_min(), None);
    }

    #[test]
    fn shared_frontier_matches_sequential_order() {
        let fr = SharedFrontier::new();
        nodes().into_par_iter().for_each(|n| fr.push(n));
        assert_eq!(fr.len(), 6);
        let mut order = Vec::new();
        while let Some(n) = fr.pop_min() {
            order.push((n.f, n.pos));
        }
        assert_eq!(order, expected());
    }

    #[test]
    fn clear_empties() {
        let mut fr = Frontier::new();
        let shared = SharedFrontier::new();
        for n in nodes() {
            fr.push(n);
            shared.push(n);
        }
        fr.clear();
        shared.clear();
        assert!(fr.is_empty());
        assert!(shared.is_empty());
    }
}
