//! Debounced write scheduling.
//!
//! Every cart mutation re-arms a single delayed write. Arming aborts the
//! pending write and restarts the delay, so a burst of mutations inside the
//! window produces exactly one write of the final state.
//!
//! The write itself is blocking file or storage I/O, so it runs on Tokio's
//! blocking pool instead of stalling the runtime's worker thread.
//!
//! A process that exits inside the window loses the burst. Callers that need
//! the state on disk before exiting use [`crate::Cart::flush`].

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Default delay between the last mutation and the write.
pub const DEFAULT_PERSIST_DELAY: Duration = Duration::from_millis(1000);

/// Owns the single pending delayed write.
///
/// The write runs on a Tokio task. Dropping the scheduler detaches a pending
/// write rather than aborting it; call [`Self::cancel`] to discard it.
#[derive(Debug)]
pub struct PersistScheduler {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl PersistScheduler {
    /// Create a scheduler with the given debounce delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The debounce delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `write` to run once the delay elapses, superseding any
    /// pending write.
    ///
    /// Outside a Tokio runtime there is nothing to host the timer, so `write`
    /// runs immediately.
    pub fn arm<F>(&mut self, write: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.cancel() {
            debug!("Superseded pending cart write");
        }

        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime available, writing cart immediately");
            write();
            return;
        };

        // Deadline is fixed at arm time, not at the task's first poll
        let deadline = tokio::time::Instant::now() + self.delay;
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Err(e) = tokio::task::spawn_blocking(write).await {
                error!(error = %e, "Cart write task failed");
            }
        }));
    }

    /// Discard the pending write, if any.
    ///
    /// Returns `true` if a write was pending and will now never run.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some_and(|handle| {
            let was_pending = !handle.is_finished();
            handle.abort();
            was_pending
        })
    }

    /// Whether a write is armed and has not yet run.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for PersistScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_PERSIST_DELAY)
    }
}
