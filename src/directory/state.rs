//! Reconciled view-model state.

use crate::mvi::ViewState;
use crate::remote::{Message, User, UserDraft, UserId};

/// One immutable snapshot of the directory.
///
/// Only [`DirectoryReducer`](super::DirectoryReducer) produces new
/// snapshots; everything else reads clones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryState {
    /// Users in display order. Ids are unique.
    pub users: Vec<User>,
    /// The latest message snapshot, already truncated by the fetch.
    pub messages: Vec<Message>,
    /// Focused user, by identity. Always present in `users` when set.
    pub selection: Option<UserId>,
    /// Creation form contents.
    pub draft: UserDraft,
    /// Whether the creation form is shown.
    pub form_open: bool,
    /// An action is in flight.
    pub busy: bool,
    /// Last failure, cleared when a new action starts.
    pub error: Option<String>,
}

impl ViewState for DirectoryState {}

impl DirectoryState {
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn contains_user(&self, id: UserId) -> bool {
        self.user(id).is_some()
    }

    pub fn is_idle(&self) -> bool {
        !self.busy
    }
}
