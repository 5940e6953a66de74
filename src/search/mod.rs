//! Debounced search scheduling
//!
//! A timer-based single-flight scheduler: each submission (re)starts a
//! fixed-delay timer, and only a timer that runs to completion without
//! being superseded triggers its action. Actions already past the timer
//! are not cancelled; last-response-wins is the caller's concern.

use crate::constants::search::DEBOUNCE_MS;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Single-flight debounce timer
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer with a custom quiet period
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The configured quiet period
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule an action, superseding any still-waiting one
    pub fn submit<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    /// Drop any still-waiting action without running it
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Wait for the currently scheduled action, if any, to finish
    pub async fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            let _ = pending.await;
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
