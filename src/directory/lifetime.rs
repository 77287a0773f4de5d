use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Liveness token shared by a store and every action running against it.
///
/// Closing it makes late remote completions no-ops: the controller races
/// each call against [`Lifetime::closed`] and the store refuses dispatches.
#[derive(Clone, Default)]
pub struct Lifetime {
    closed: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Mark the owner as gone. Returns `true` the first time only.
    pub fn close(&self) -> bool {
        let first = !self.closed.swap(true, Ordering::SeqCst);
        if first {
            self.notify.notify_waiters();
        }
        first
    }

    /// Resolves once [`close`](Self::close) has been called.
    pub async fn closed(&self) {
        // Register interest before checking the flag, otherwise a close()
        // between the check and the await would be missed.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_closed() {
            return;
        }
        notified.await;
    }
}
