//! Cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// A cloneable flag that asks a running solve to stop between rounds.
///
/// All clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Cancellation token plus an optional absolute deadline, checked by the
/// solve loops once per popped node.
#[derive(Debug, Clone)]
pub(crate) struct StopCondition {
    token: CancelToken,
    deadline: Option<Instant>,
}

impl StopCondition {
    pub(crate) fn new(token: CancelToken, deadline: Option<Instant>) -> Self {
        Self { token, deadline }
    }

    pub(crate) fn should_stop(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn stop_condition_checks_token_and_deadline() {
        let token = CancelToken::new();
        let open = StopCondition::new(token.clone(), None);
        assert!(!open.should_stop());

        let past = StopCondition::new(CancelToken::new(), Some(Instant::now()));
        assert!(past.should_stop());

        let future = StopCondition::new(
            CancelToken::new(),
            Some(Instant::now() + Duration::from_secs(3600)),
        );
        assert!(!future.should_stop());

        token.cancel();
        assert!(open.should_stop());
    }
}
