//! Single-flight bookkeeping and the busy bracket.

use std::collections::HashSet;

use parking_lot::Mutex;
use scopeguard::ScopeGuard;

use crate::directory::Store;

use super::outcome::ActionKind;

/// Tracks which action kinds are in flight.
///
/// `busy` is raised when the first action starts and lowered when the last
/// one ends, so overlapping actions of different kinds still produce a
/// single `false -> true -> false` bracket.
pub(crate) struct Flights {
    running: Mutex<HashSet<ActionKind>>,
    store: Store,
}

impl Flights {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            running: Mutex::new(HashSet::new()),
            store,
        }
    }

    pub(crate) fn is_running(&self, kind: ActionKind) -> bool {
        self.running.lock().contains(&kind)
    }

    /// Claim `kind`. The returned guard releases it on every exit path,
    /// including early returns and a dropped future.
    pub(crate) fn begin(
        &self,
        kind: ActionKind,
    ) -> Option<ScopeGuard<ActionKind, impl FnOnce(ActionKind) + '_>> {
        let mut running = self.running.lock();
        if !running.insert(kind) {
            tracing::debug!(kind = %kind, "Action already in flight");
            return None;
        }
        if running.len() == 1 {
            self.store.set_busy(true);
        }
        drop(running);

        Some(scopeguard::guard(kind, move |kind| self.finish(kind)))
    }

    fn finish(&self, kind: ActionKind) {
        let mut running = self.running.lock();
        running.remove(&kind);
        if running.is_empty() {
            self.store.set_busy(false);
        }
    }
}
