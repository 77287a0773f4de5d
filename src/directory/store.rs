//! Session-scoped directory store.
//!
//! Holds the current [`DirectoryState`] behind a mutex and applies
//! [`DirectoryIntent`]s through [`DirectoryReducer`], one at a time. Every
//! resulting snapshot is pushed to subscribers so a renderer (or a test)
//! sees the full transition trace, not just the latest state.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::mvi::Reducer;
use crate::remote::{Message, User, UserId};

use super::intent::{DirectoryIntent, DraftPatch};
use super::lifetime::Lifetime;
use super::reducer::DirectoryReducer;
use super::state::DirectoryState;

/// Cheaply clonable handle to one session's state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: Mutex<DirectoryState>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<DirectoryState>>>,
    lifetime: Lifetime,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(DirectoryState::default())
    }

    pub fn with_state(state: DirectoryState) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(state),
                subscribers: Mutex::new(Vec::new()),
                lifetime: Lifetime::new(),
            }),
        }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> DirectoryState {
        self.inner.state.lock().clone()
    }

    /// Borrow the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&DirectoryState) -> R) -> R {
        f(&self.inner.state.lock())
    }

    /// Receive every snapshot produced after this call.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<DirectoryState> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.subscribers.lock().push(tx);
        rx
    }

    /// Apply one intent atomically. Returns `false` once the store is torn down.
    pub fn dispatch(&self, intent: DirectoryIntent) -> bool {
        if self.inner.lifetime.is_closed() {
            tracing::debug!(?intent, "Dropping intent for torn-down store");
            return false;
        }

        let mut state = self.inner.state.lock();
        *state = DirectoryReducer::reduce(std::mem::take(&mut *state), intent);
        self.publish(&state);
        true
    }

    /// Choose intents from the current state and apply them as one
    /// transition: the check and the change happen under the same lock, and
    /// subscribers see a single snapshot.
    ///
    /// Returns `false` when the store is torn down or `plan` chose nothing.
    pub fn dispatch_with(
        &self,
        plan: impl FnOnce(&DirectoryState) -> Vec<DirectoryIntent>,
    ) -> bool {
        if self.inner.lifetime.is_closed() {
            tracing::debug!("Dropping planned intents for torn-down store");
            return false;
        }

        let mut state = self.inner.state.lock();
        let intents = plan(&state);
        if intents.is_empty() {
            return false;
        }
        *state = DirectoryReducer::reduce_all(std::mem::take(&mut *state), intents);
        self.publish(&state);
        true
    }

    // Called with the state lock held so subscribers see snapshots in
    // dispatch order.
    fn publish(&self, state: &DirectoryState) {
        let mut subscribers = self.inner.subscribers.lock();
        subscribers.retain(|tx| tx.send(state.clone()).is_ok());
    }

    pub fn lifetime(&self) -> &Lifetime {
        &self.inner.lifetime
    }

    pub fn is_live(&self) -> bool {
        !self.inner.lifetime.is_closed()
    }

    /// End the session: later dispatches are ignored, pending actions are
    /// abandoned, and subscriber channels close.
    pub fn teardown(&self) {
        if self.inner.lifetime.close() {
            self.inner.subscribers.lock().clear();
            tracing::debug!("Directory store torn down");
        }
    }

    pub fn set_users(&self, users: Vec<User>) {
        self.dispatch(DirectoryIntent::SetUsers { users });
    }

    pub fn set_messages(&self, messages: Vec<Message>) {
        self.dispatch(DirectoryIntent::SetMessages { messages });
    }

    pub fn append_user(&self, user: User) {
        self.dispatch(DirectoryIntent::AppendUser { user });
    }

    pub fn remove_user(&self, id: UserId) {
        self.dispatch(DirectoryIntent::RemoveUser { id });
    }

    pub fn set_selection(&self, id: Option<UserId>) {
        self.dispatch(DirectoryIntent::SetSelection { id });
    }

    pub fn set_draft(&self, patch: DraftPatch) {
        self.dispatch(DirectoryIntent::SetDraft { patch });
    }

    pub fn clear_draft(&self) {
        self.dispatch(DirectoryIntent::ClearDraft);
    }

    pub fn set_form_open(&self, open: bool) {
        self.dispatch(DirectoryIntent::SetFormOpen { open });
    }

    pub fn toggle_form(&self) {
        self.dispatch(DirectoryIntent::ToggleForm);
    }

    pub fn set_busy(&self, busy: bool) {
        self.dispatch(DirectoryIntent::SetBusy { busy });
    }

    pub fn set_error(&self, message: Option<String>) {
        self.dispatch(DirectoryIntent::SetError { message });
    }
}
