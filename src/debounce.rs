//! Delay-based coalescing of rapid repeated triggers
//!
//! Every [`Debouncer::call`] cancels the call still waiting before it
//! and starts a fresh delay. Only the last call of a quiet period runs.
//! Once a call has fired it is no longer pending and is never
//! cancelled by the debouncer.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// A scheduled call: its cancellation token and the task running it.
#[derive(Debug)]
struct Pending {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<Pending>>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action` to run after the delay, replacing any call
    /// that has not fired yet.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.clone();
        let delay = self.delay;

        let task = tokio::spawn(async move {
            tokio::select! {
                () = child.cancelled() => {
                    trace!("Debounced call superseded");
                }
                () = tokio::time::sleep(delay) => {
                    // Fired: from here on the call cannot be cancelled.
                    child.cancel();
                    action.await;
                }
            }
        });

        let previous = self.lock().replace(Pending {
            token,
            task: Some(task),
        });
        if let Some(previous) = previous {
            previous.token.cancel();
        }
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.lock().take() {
            pending.token.cancel();
        }
    }

    /// Whether a call is waiting for its delay to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|p| !p.token.is_cancelled())
    }

    /// Wait until the most recently scheduled call has either run to
    /// completion or been superseded.
    pub async fn settle(&self) {
        let task = self.lock().as_mut().and_then(|p| p.task.take());
        if let Some(task) = task {
            let _ = task.await;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
