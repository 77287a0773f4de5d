//! Reducer for the directory store.

use std::collections::HashSet;

use crate::mvi::Reducer;
use crate::remote::User;

use super::intent::DirectoryIntent;
use super::state::DirectoryState;

/// Pure transitions for [`DirectoryState`].
///
/// Side effects (remote calls, logging, busy bookkeeping) live in the
/// controller around the dispatch call.
pub struct DirectoryReducer;

impl Reducer for DirectoryReducer {
    type State = DirectoryState;
    type Intent = DirectoryIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DirectoryIntent::SetUsers { users } => DirectoryState {
                users: dedup_by_id(users),
                ..state
            },

            DirectoryIntent::SetMessages { messages } => DirectoryState { messages, ..state },

            DirectoryIntent::AppendUser { user } => {
                let mut users = state.users;
                // The server is the source of truth for identity: an id we
                // already hold is replaced rather than duplicated.
                match users.iter_mut().find(|existing| existing.id == user.id) {
                    Some(existing) => *existing = user,
                    None => users.push(user),
                }
                DirectoryState { users, ..state }
            }

            DirectoryIntent::RemoveUser { id } => {
                let mut users = state.users;
                users.retain(|user| user.id != id);
                let selection = state.selection.filter(|selected| *selected != id);
                DirectoryState {
                    users,
                    selection,
                    ..state
                }
            }

            DirectoryIntent::SetSelection { id } => DirectoryState {
                selection: id,
                ..state
            },

            DirectoryIntent::SetDraft { patch } => {
                let mut draft = state.draft;
                patch.apply(&mut draft);
                DirectoryState { draft, ..state }
            }

            DirectoryIntent::ClearDraft => DirectoryState {
                draft: Default::default(),
                ..state
            },

            DirectoryIntent::SetFormOpen { open } => DirectoryState {
                form_open: open,
                ..state
            },

            DirectoryIntent::ToggleForm => DirectoryState {
                form_open: !state.form_open,
                ..state
            },

            DirectoryIntent::SetBusy { busy } => DirectoryState { busy, ..state },

            DirectoryIntent::SetError { message } => DirectoryState {
                error: message,
                ..state
            },
        }
    }
}

/// Keep the first occurrence of each id, preserving order.
fn dedup_by_id(users: Vec<User>) -> Vec<User> {
    let mut seen = HashSet::with_capacity(users.len());
    users.into_iter().filter(|user| seen.insert(user.id)).collect()
}
