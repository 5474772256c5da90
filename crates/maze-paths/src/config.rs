//! Solver configuration.

use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

/// Tuning knobs shared by both engines.
///
/// The sequential engine only honours `deadline`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Worker threads for the parallel engine. `None` uses the available
    /// hardware parallelism. Values below 1 are raised to 1.
    pub parallelism: Option<usize>,
    /// Give up (with [`SolveOutcome::Cancelled`](crate::SolveOutcome::Cancelled))
    /// once a solve has run this long.
    pub deadline: Option<Duration>,
}

impl SolverConfig {
    /// Config with an explicit worker count.
    pub fn with_parallelism(threads: usize) -> Self {
        Self {
            parallelism: Some(threads),
            ..Self::default()
        }
    }

    /// Set the per-solve deadline.
    pub fn deadline(mut self, limit: Duration) -> Self {
        self.deadline = Some(limit);
        self
    }

    /// Resolved worker count, always at least 1.
    pub fn worker_count(&self) -> usize {
        match self.parallelism {
            Some(n) => n.max(1),
            None => thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}
