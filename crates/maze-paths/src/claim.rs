//! Lock-free per-cell state for the parallel engine.
//!
//! [`ClaimSet`] is the visited set: one atomic flag per grid cell, claimed
//! with a single `swap` so exactly one caller wins. [`PredecessorSlots`]
//! holds one set-once slot per cell; a second write is reported instead of
//! overwriting the first.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use maze_core::Point;

use crate::error::{PathError, Result};

/// Visited set with atomic test-and-set membership.
#[derive(Debug)]
pub(crate) struct ClaimSet {
    flags: Vec<AtomicBool>,
}

impl ClaimSet {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            flags: (0..len).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    /// Mark `idx` visited. Returns `true` only for the first caller.
    #[inline]
    pub(crate) fn claim(&self, idx: usize) -> bool {
        !self.flags[idx].swap(true, Ordering::AcqRel)
    }

    #[inline]
    pub(crate) fn is_claimed(&self, idx: usize) -> bool {
        self.flags[idx].load(Ordering::Acquire)
    }

    pub(crate) fn count(&self) -> usize {
        self.flags
            .iter()
            .filter(|f| f.load(Ordering::Acquire))
            .count()
    }
}

/// Predecessor map with write-once slots.
#[derive(Debug)]
pub(crate) struct PredecessorSlots {
    slots: Vec<OnceLock<Point>>,
}

impl PredecessorSlots {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Record that the cell at `idx` (`point`) was reached from `from`.
    pub(crate) fn record(&self, idx: usize, point: Point, from: Point) -> Result<()> {
        let slot = &self.slots[idx];
        slot.set(from).map_err(|second| PathError::DuplicateClaim {
            point,
            first: slot.get().copied().unwrap_or(second),
            second,
        })
    }

    #[inline]
    pub(crate) fn get(&self, idx: usize) -> Option<Point> {
        self.slots[idx].get().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn only_first_claim_wins() {
        let set = ClaimSet::new(4);
        assert!(!set.is_claimed(2));
        assert!(set.claim(2));
        assert!(!set.claim(2));
        assert!(set.is_claimed(2));
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn concurrent_claims_have_one_winner_per_cell() {
        let set = ClaimSet::new(16);
        let winners = AtomicUsize::new(0);
        (0..16 * 64).into_par_iter().for_each(|i| {
            if set.claim(i % 16) {
                winners.fetch_add(1, Ordering::Relaxed);
            }
        });
        assert_eq!(winners.load(Ordering::Relaxed), 16);
        assert_eq!(set.count(), 16);
    }

    #[test]
    fn second_predecessor_write_is_rejected() {
        let slots = PredecessorSlots::new(9);
        let p = Point::new(1, 2);
        assert_eq!(slots.get(5), None);
        slots.record(5, p, Point::new(1, 1)).unwrap();
        let err = slots.record(5, p, Point::new(2, 2)).unwrap_err();
        assert!(matches!(
            err,
            PathError::DuplicateClaim { point, first, second }
                if point == p && first == Point::new(1, 1) && second == Point::new(2, 2)
        ));
        assert_eq!(slots.get(5), Some(Point::new(1, 1)));
    }
}
