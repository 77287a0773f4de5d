//! Derived presentation data.
//!
//! Everything here is a pure function of one [`DirectoryState`] snapshot and
//! is recomputed on every call; nothing is cached between state changes.

use crate::remote::{Message, User, UserDraft, UserId};

use super::state::DirectoryState;

/// Placeholder for optional contact fields.
pub const NOT_AVAILABLE: &str = "No disponible";

/// Shown in the details panel when the user has no posts in the snapshot.
pub const NO_POSTS: &str = "No hay posts disponibles";

/// Messages authored by `user_id`, in snapshot order.
pub fn messages_for_user(state: &DirectoryState, user_id: UserId) -> Vec<&Message> {
    state
        .messages
        .iter()
        .filter(|message| message.user_id == user_id)
        .collect()
}

pub fn post_count(state: &DirectoryState, user_id: UserId) -> usize {
    messages_for_user(state, user_id).len()
}

/// True iff name, email, and username are all non-blank.
pub fn draft_is_valid(draft: &UserDraft) -> bool {
    [&draft.name, &draft.email, &draft.username]
        .iter()
        .all(|field| !field.trim().is_empty())
}

pub fn selected_user(state: &DirectoryState) -> Option<&User> {
    state.selection.and_then(|id| state.user(id))
}

/// Render model for the whole directory screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    pub users: Vec<UserRow>,
    pub details: Option<UserDetails>,
    pub form: Option<FormView>,
    pub busy: bool,
    pub error: Option<String>,
}

/// One entry of the user list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: UserId,
    pub name: String,
    pub handle: String,
    pub email: String,
    pub post_count: usize,
    pub selected: bool,
}

/// Details panel for the focused user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub handle: String,
    pub website: String,
    pub phone: String,
    pub posts: Vec<PostView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub title: String,
    pub body: String,
}

/// The creation form, present only while it is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub draft: UserDraft,
    pub can_submit: bool,
}

impl DirectoryView {
    pub fn from_state(state: &DirectoryState) -> Self {
        let users = state
            .users
            .iter()
            .map(|user| UserRow {
                id: user.id,
                name: user.name.clone(),
                handle: format!("@{}", user.username),
                email: user.email.clone(),
                post_count: post_count(state, user.id),
                selected: state.selection == Some(user.id),
            })
            .collect();

        let details = selected_user(state).map(|user| UserDetails {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            handle: format!("@{}", user.username),
            website: or_not_available(user.website.as_deref()),
            phone: or_not_available(user.phone.as_deref()),
            posts: messages_for_user(state, user.id)
                .into_iter()
                .map(|message| PostView {
                    title: message.title.clone(),
                    body: message.body.clone(),
                })
                .collect(),
        });

        let form = state.form_open.then(|| FormView {
            draft: state.draft.clone(),
            can_submit: draft_is_valid(&state.draft) && !state.busy,
        });

        Self {
            users,
            details,
            form,
            busy: state.busy,
            error: state.error.clone(),
        }
    }
}

fn or_not_available(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MessageId;

    fn message(id: u64, user_id: u64) -> Message {
        Message {
            id: MessageId(id),
            user_id: UserId(user_id),
            title: format!("title {id}"),
            body: format!("body {id}"),
        }
    }

    fn user(id: u64, name: &str) -> User {
        User {
            id: UserId(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            username: name.to_lowercase(),
            website: None,
            phone: None,
        }
    }

    fn draft(name: &str, email: &str, username: &str) -> UserDraft {
        UserDraft {
            name: name.into(),
            email: email.into(),
            username: username.into(),
        }
    }

    #[test]
    fn messages_for_user_filters_by_author() {
        let state = DirectoryState {
            messages: vec![message(1, 7), message(2, 8)],
            ..Default::default()
        };
        let found = messages_for_user(&state, UserId(7));
        assert_eq!(found, vec![&state.messages[0]]);
    }

    #[test]
    fn orphaned_author_yields_nothing() {
        let state = DirectoryState {
            messages: vec![message(1, 7)],
            ..Default::default()
        };
        assert!(messages_for_user(&state, UserId(99)).is_empty());
        assert_eq!(post_count(&state, UserId(99)), 0);
    }

    #[test]
    fn post_count_agrees_with_listed_messages() {
        let state = DirectoryState {
            messages: vec![message(1, 7), message(2, 8), message(3, 7), message(4, 99)],
            ..Default::default()
        };
        for id in [7, 8, 99, 5] {
            let id = UserId(id);
            assert_eq!(post_count(&state, id), messages_for_user(&state, id).len());
        }
        assert_eq!(post_count(&state, UserId(7)), 2);
    }

    #[test]
    fn draft_requires_every_field() {
        assert!(!draft_is_valid(&draft("", "a@b.com", "u")));
        assert!(draft_is_valid(&draft("Ann", "a@b.com", "ann")));
    }

    #[test]
    fn whitespace_only_field_is_invalid() {
        assert!(!draft_is_valid(&draft("Ann", "   ", "ann")));
        assert!(!draft_is_valid(&UserDraft::default()));
    }

    #[test]
    fn selected_user_ignores_dangling_selection() {
        let state = DirectoryState {
            users: vec![user(1, "Leanne")],
            selection: Some(UserId(5)),
            ..Default::default()
        };
        assert!(selected_user(&state).is_none());
    }

    #[test]
    fn view_counts_posts_and_marks_selection() {
        let state = DirectoryState {
            users: vec![user(1, "Leanne"), user(2, "Ervin")],
            messages: vec![message(1, 1), message(2, 1), message(3, 2)],
            selection: Some(UserId(1)),
            ..Default::default()
        };
        let view = DirectoryView::from_state(&state);

        assert_eq!(view.users[0].post_count, 2);
        assert!(view.users[0].selected);
        assert_eq!(view.users[1].post_count, 1);
        assert!(!view.users[1].selected);
        assert_eq!(view.users[0].handle, "@leanne");

        let details = view.details.unwrap();
        assert_eq!(details.posts.len(), 2);
        assert_eq!(details.website, NOT_AVAILABLE);
        assert_eq!(details.phone, NOT_AVAILABLE);
    }

    #[test]
    fn form_hidden_until_opened() {
        let mut state = DirectoryState::default();
        assert!(DirectoryView::from_state(&state).form.is_none());

        state.form_open = true;
        state.draft = draft("Ann", "a@b.com", "ann");
        let form = DirectoryView::from_state(&state).form.unwrap();
        assert!(form.can_submit);

        state.busy = true;
        let form = DirectoryView::from_state(&state).form.unwrap();
        assert!(!form.can_submit);
    }
}
