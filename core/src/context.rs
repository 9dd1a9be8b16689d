//! Caller-controlled lifetime for network calls.
//!
//! A `Context` is a cheap, clonable handle: clones share the same
//! cancellation flag, so canceling any clone cancels them all. An optional
//! deadline bounds the call independently of the transport timeout.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Why a context is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("context canceled")]
    Canceled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation and deadline handle passed to every network operation.
#[derive(Debug, Clone)]
pub struct Context {
    canceled: Arc<watch::Sender<bool>>,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never done until explicitly canceled.
    pub fn background() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            canceled: Arc::new(tx),
            deadline: None,
        }
    }

    /// Returns a context sharing this one's cancellation that also expires
    /// after `timeout`. An earlier existing deadline is kept.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Returns a context sharing this one's cancellation that expires at
    /// `deadline`. An earlier existing deadline is kept.
    #[must_use]
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        };
        Self {
            canceled: Arc::clone(&self.canceled),
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels this context and every clone of it.
    pub fn cancel(&self) {
        self.canceled.send_replace(true);
    }

    /// `None` while the context is live, otherwise the reason it is done.
    /// Cancellation wins over an elapsed deadline.
    pub fn err(&self) -> Option<ContextError> {
        if *self.canceled.borrow() {
            return Some(ContextError::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is done.
    pub async fn done(&self) -> ContextError {
        let mut rx = self.canceled.subscribe();
        let canceled = async move {
            // The sender lives as long as `self`, so this only returns once
            // the flag flips.
            let _ = rx.wait_for(|canceled| *canceled).await;
        };
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                () = canceled => ContextError::Canceled,
                () = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
            },
            None => {
                canceled.await;
                ContextError::Canceled
            }
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}
