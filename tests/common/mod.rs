//! Shared test utilities and fake remote services.

#![allow(dead_code, unused_imports)]

pub mod mock_remote;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chat_directory::directory::{DirectoryState, Store};
use chat_directory::remote::{
    DirectoryApi, Message, MessageId, RemoteError, User, UserDraft, UserId,
};
use parking_lot::Mutex;
use tokio::sync::{mpsc, Semaphore};

// -- Sample data ---------------------------------------------------------------

pub fn user(id: u64, name: &str) -> User {
    let handle = name.split_whitespace().next().unwrap_or(name).to_lowercase();
    User {
        id: UserId(id),
        name: name.to_string(),
        email: format!("{handle}@example.com"),
        username: handle,
        website: None,
        phone: None,
    }
}

pub fn message(id: u64, user_id: u64, title: &str) -> Message {
    Message {
        id: MessageId(id),
        user_id: UserId(user_id),
        title: title.to_string(),
        body: format!("{title} body"),
    }
}

pub fn sample_users() -> Vec<User> {
    vec![user(1, "Ann Lee"), user(2, "Bob Stone")]
}

/// Three posts by user 1, none by user 2.
pub fn sample_messages() -> Vec<Message> {
    vec![
        message(1, 1, "first"),
        message(2, 1, "second"),
        message(3, 1, "third"),
    ]
}

pub fn draft(name: &str, email: &str, username: &str) -> UserDraft {
    UserDraft {
        name: name.to_string(),
        email: email.to_string(),
        username: username.to_string(),
    }
}

// -- Fake API ------------------------------------------------------------------

/// In-memory [`DirectoryApi`] with scripted results.
///
/// Every call can be held at a gate (see [`FakeApi::gated`]) so tests can
/// overlap actions deterministically.
pub struct FakeApi {
    users: Mutex<Result<Vec<User>, RemoteError>>,
    messages: Mutex<Result<Vec<Message>, RemoteError>>,
    create: Mutex<Option<Result<User, RemoteError>>>,
    delete: Mutex<Result<(), RemoteError>>,
    gate: Option<Semaphore>,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<UserDraft>>,
    list_users_calls: AtomicUsize,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            users: Mutex::new(Ok(sample_users())),
            messages: Mutex::new(Ok(sample_messages())),
            create: Mutex::new(None),
            delete: Mutex::new(Ok(())),
            gate: None,
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            list_users_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls block until [`FakeApi::release`] hands out a permit each.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    pub fn with_users(self, users: Result<Vec<User>, RemoteError>) -> Self {
        *self.users.lock() = users;
        self
    }

    pub fn with_messages(self, messages: Result<Vec<Message>, RemoteError>) -> Self {
        *self.messages.lock() = messages;
        self
    }

    /// Fixed create result; without one, the draft is echoed back with id 11.
    pub fn with_create(self, result: Result<User, RemoteError>) -> Self {
        *self.create.lock() = Some(result);
        self
    }

    pub fn with_delete(self, result: Result<(), RemoteError>) -> Self {
        *self.delete.lock() = result;
        self
    }

    pub fn set_users(&self, users: Result<Vec<User>, RemoteError>) {
        *self.users.lock() = users;
    }

    /// Let `n` gated calls through.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Names of the calls received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn created(&self) -> Vec<UserDraft> {
        self.created.lock().clone()
    }

    pub fn list_users_calls(&self) -> usize {
        self.list_users_calls.load(Ordering::SeqCst)
    }

    async fn enter(&self, call: String) {
        self.calls.lock().push(call);
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }
}

impl DirectoryApi for FakeApi {
    async fn list_users(&self) -> Result<Vec<User>, RemoteError> {
        self.list_users_calls.fetch_add(1, Ordering::SeqCst);
        self.enter("list_users".to_string()).await;
        self.users.lock().clone()
    }

    async fn get_user(&self, id: UserId) -> Result<User, RemoteError> {
        self.enter(format!("get_user {id}")).await;
        let users = self.users.lock().clone()?;
        users
            .into_iter()
            .find(|user| user.id == id)
            .ok_or(RemoteError::Status {
                status: 404,
                body: "{}".to_string(),
            })
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<User, RemoteError> {
        self.created.lock().push(draft.clone());
        self.enter("create_user".to_string()).await;
        let scripted = self.create.lock().clone();
        scripted.unwrap_or_else(|| {
            Ok(User {
                id: UserId(11),
                name: draft.name.clone(),
                email: draft.email.clone(),
                username: draft.username.clone(),
                website: None,
                phone: None,
            })
        })
    }

    async fn update_user(&self, id: UserId, draft: &UserDraft) -> Result<User, RemoteError> {
        self.enter(format!("update_user {id}")).await;
        Ok(User {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            username: draft.username.clone(),
            website: None,
            phone: None,
        })
    }

    async fn delete_user(&self, id: UserId) -> Result<(), RemoteError> {
        self.enter(format!("delete_user {id}")).await;
        self.delete.lock().clone()
    }

    async fn list_messages(&self) -> Result<Vec<Message>, RemoteError> {
        self.enter("list_messages".to_string()).await;
        self.messages.lock().clone()
    }

    async fn list_messages_for_user(&self, user_id: UserId) -> Result<Vec<Message>, RemoteError> {
        self.enter(format!("list_messages_for_user {user_id}")).await;
        let messages = self.messages.lock().clone()?;
        Ok(messages
            .into_iter()
            .filter(|message| message.user_id == user_id)
            .collect())
    }
}

// -- Store helpers -------------------------------------------------------------

/// Drain every snapshot already published to `rx`.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<DirectoryState>) -> Vec<DirectoryState> {
    let mut trace = Vec::new();
    while let Ok(state) = rx.try_recv() {
        trace.push(state);
    }
    trace
}

/// Number of `false -> true` edges of `busy`, starting from an idle store.
pub fn busy_rises(trace: &[DirectoryState]) -> usize {
    let mut previous = false;
    let mut rises = 0;
    for state in trace {
        if state.busy && !previous {
            rises += 1;
        }
        previous = state.busy;
    }
    rises
}

pub fn status_error(status: u16) -> RemoteError {
    RemoteError::Status {
        status,
        body: "{}".to_string(),
    }
}

pub fn store_with_users(users: Vec<User>) -> Store {
    Store::with_state(DirectoryState {
        users,
        ..DirectoryState::default()
    })
}
