//! Deadlines and cancellation for long-running searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A shared stop flag. Clones observe the same flag, so another thread can stop a search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    stopped: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops every search holding a clone of this token.
    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// Whether `cancel` has been called on any clone.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// When a search must give up. The default never expires.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    deadline: Option<Instant>,
    cancel: Option<CancelToken>,
}

impl SearchLimits {
    /// No deadline and no cancellation.
    pub fn none() -> Self {
        Self::default()
    }

    /// Gives up once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Gives up `limit` from now.
    pub fn with_time_limit(self, limit: Duration) -> Self {
        self.with_deadline(Instant::now() + limit)
    }

    /// Gives up once `token` is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Checked once per node (or once per simulation), never per leaf.
    #[inline]
    pub fn is_expired(&self) -> bool {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
