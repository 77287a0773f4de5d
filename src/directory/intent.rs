//! Store operations, expressed as intents.

use crate::mvi::Intent;
use crate::remote::{Message, User, UserDraft, UserId};

/// Every transition the directory store supports.
#[derive(Debug, Clone)]
pub enum DirectoryIntent {
    /// Replace the user collection wholesale. Selection is left alone.
    SetUsers { users: Vec<User> },
    /// Replace the message collection wholesale.
    SetMessages { messages: Vec<Message> },
    /// Add a server-confirmed user at the end of the collection.
    AppendUser { user: User },
    /// Remove a user; clears the selection if it pointed there.
    RemoveUser { id: UserId },
    SetSelection { id: Option<UserId> },
    /// Merge the fields present in the patch into the draft.
    SetDraft { patch: DraftPatch },
    ClearDraft,
    SetFormOpen { open: bool },
    ToggleForm,
    SetBusy { busy: bool },
    SetError { message: Option<String> },
}

impl Intent for DirectoryIntent {}

/// Partial update of the creation form. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

impl DraftPatch {
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            name: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self {
            email: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn username(value: impl Into<String>) -> Self {
        Self {
            username: Some(value.into()),
            ..Self::default()
        }
    }

    /// A patch that sets every field, as when a whole form is submitted at once.
    pub fn from_draft(draft: UserDraft) -> Self {
        Self {
            name: Some(draft.name),
            email: Some(draft.email),
            username: Some(draft.username),
        }
    }

    pub fn apply(self, draft: &mut UserDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(email) = self.email {
            draft.email = email;
        }
        if let Some(username) = self.username {
            draft.username = username;
        }
    }
}
