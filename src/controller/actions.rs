use std::future::Future;

use tracing::Instrument;
use uuid::Uuid;

use crate::directory::{draft_is_valid, DirectoryIntent, DirectoryView, DraftPatch, Store};
use crate::remote::{DirectoryApi, RemoteError, User, UserId};

use super::confirm::Confirm;
use super::flight::Flights;
use super::outcome::{ActionKind, ActionOutcome, RefreshOutcome};

pub const USERS_LOAD_FAILED: &str = "Error al cargar usuarios";
pub const MESSAGES_LOAD_FAILED: &str = "Error al cargar mensajes";
pub const CREATE_FAILED: &str = "Error al crear usuario";
pub const DELETE_FAILED: &str = "Error al eliminar usuario";
pub const REQUIRED_FIELDS: &str = "Todos los campos son obligatorios";
pub const DELETE_CONFIRMATION: &str = "¿Estás seguro de eliminar este usuario?";

/// How many messages a refresh keeps unless configured otherwise.
pub const DEFAULT_MESSAGE_LIMIT: usize = 10;

/// Turns operator actions into remote calls and store transitions.
///
/// Every networked action is bracketed by the busy flag, refuses to run
/// twice concurrently, and is abandoned if the store is torn down while
/// the call is outstanding.
pub struct DirectoryController<A, C> {
    api: A,
    store: Store,
    confirm: C,
    flights: Flights,
    message_limit: usize,
}

impl<A: DirectoryApi, C: Confirm> DirectoryController<A, C> {
    pub fn new(api: A, store: Store, confirm: C) -> Self {
        Self {
            api,
            flights: Flights::new(store.clone()),
            store,
            confirm,
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }

    pub fn with_message_limit(mut self, limit: usize) -> Self {
        self.message_limit = limit;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Derive the render model from the current snapshot.
    pub fn view(&self) -> DirectoryView {
        self.store.read(DirectoryView::from_state)
    }

    /// Initial load when a session starts.
    pub async fn mount(&self) -> RefreshOutcome {
        tracing::debug!("Mounting directory");
        self.refresh().await
    }

    /// Reload users and messages concurrently. A messages failure never
    /// reaches the visible error.
    ///
    /// Both kinds are claimed before either call starts, so a refresh shows
    /// one busy bracket however the two calls interleave.
    pub async fn refresh(&self) -> RefreshOutcome {
        let users_flight = self.flights.begin(ActionKind::FetchUsers);
        let messages_flight = self.flights.begin(ActionKind::FetchMessages);
        let (claimed_users, claimed_messages) = (users_flight.is_some(), messages_flight.is_some());

        let (users, messages) = tokio::join!(
            async {
                if claimed_users {
                    self.load_users().await
                } else {
                    ActionOutcome::AlreadyRunning
                }
            },
            async {
                if claimed_messages {
                    self.load_messages().await
                } else {
                    ActionOutcome::AlreadyRunning
                }
            },
        );

        drop((users_flight, messages_flight));
        RefreshOutcome { users, messages }
    }

    pub async fn fetch_users(&self) -> ActionOutcome {
        let Some(_flight) = self.flights.begin(ActionKind::FetchUsers) else {
            return ActionOutcome::AlreadyRunning;
        };
        self.load_users().await
    }

    pub async fn fetch_messages(&self) -> ActionOutcome {
        let Some(_flight) = self.flights.begin(ActionKind::FetchMessages) else {
            return ActionOutcome::AlreadyRunning;
        };
        self.load_messages().await
    }

    /// Submit the current draft.
    pub async fn create_user(&self) -> ActionOutcome {
        let kind = ActionKind::CreateUser;
        async {
            let draft = self.store.read(|state| state.draft.clone());
            if !draft_is_valid(&draft) {
                tracing::debug!("Draft incomplete, not submitting");
                self.store.set_error(Some(REQUIRED_FIELDS.to_string()));
                return ActionOutcome::Invalid;
            }

            let Some(_flight) = self.flights.begin(kind) else {
                return ActionOutcome::AlreadyRunning;
            };
            self.store.set_error(None);

            match self.call(self.api.create_user(&draft)).await {
                None => ActionOutcome::Discarded,
                Some(Ok(user)) => {
                    tracing::info!(user_id = %user.id, username = %user.username, "User created");
                    self.store.append_user(user);
                    self.store.clear_draft();
                    self.store.set_form_open(false);
                    ActionOutcome::Completed
                }
                // The draft stays as typed so it can be corrected and resubmitted.
                Some(Err(err)) => self.fail(CREATE_FAILED, &err),
            }
        }
        .instrument(action_span(kind))
        .await
    }

    /// Delete a user after the operator confirms.
    pub async fn delete_user(&self, id: UserId) -> ActionOutcome {
        let kind = ActionKind::DeleteUser;
        async {
            if self.flights.is_running(kind) {
                return ActionOutcome::AlreadyRunning;
            }
            if !self.confirm.confirm(DELETE_CONFIRMATION) {
                tracing::debug!(user_id = %id, "Delete declined");
                return ActionOutcome::Declined;
            }

            let Some(_flight) = self.flights.begin(kind) else {
                return ActionOutcome::AlreadyRunning;
            };
            self.store.set_error(None);

            match self.call(self.api.delete_user(id)).await {
                None => ActionOutcome::Discarded,
                Some(Ok(())) => {
                    self.store.remove_user(id);
                    tracing::info!(user_id = %id, "User deleted");
                    ActionOutcome::Completed
                }
                Some(Err(err)) => self.fail(DELETE_FAILED, &err),
            }
        }
        .instrument(action_span(kind))
        .await
    }

    /// Focus a user from the current collection, or clear focus with `None`.
    ///
    /// Returns `false` (and changes nothing) for an id not in the collection.
    pub fn select_user(&self, id: Option<UserId>) -> bool {
        self.store.dispatch_with(|state| match id {
            Some(id) if !state.contains_user(id) => {
                tracing::warn!(user_id = %id, "Ignoring selection of unknown user");
                Vec::new()
            }
            _ => vec![DirectoryIntent::SetSelection { id }],
        })
    }

    pub fn edit_draft(&self, patch: DraftPatch) {
        self.store.set_draft(patch);
    }

    pub fn toggle_form(&self) {
        self.store.toggle_form();
    }

    async fn load_users(&self) -> ActionOutcome {
        async {
            self.store.set_error(None);
            match self.call(self.api.list_users()).await {
                None => ActionOutcome::Discarded,
                Some(Ok(users)) => {
                    let count = users.len();
                    self.replace_users(users);
                    tracing::info!(count, "Users loaded");
                    ActionOutcome::Completed
                }
                Some(Err(err)) => self.fail(USERS_LOAD_FAILED, &err),
            }
        }
        .instrument(action_span(ActionKind::FetchUsers))
        .await
    }

    async fn load_messages(&self) -> ActionOutcome {
        async {
            match self.call(self.api.list_messages()).await {
                None => ActionOutcome::Discarded,
                Some(Ok(mut messages)) => {
                    let total = messages.len();
                    messages.truncate(self.message_limit);
                    tracing::info!(total, kept = messages.len(), "Messages loaded");
                    self.store.set_messages(messages);
                    ActionOutcome::Completed
                }
                Some(Err(err)) => {
                    // Messages are supplementary: log only, leave `error` alone.
                    tracing::warn!(kind = err.kind(), error = %err, "{MESSAGES_LOAD_FAILED}");
                    ActionOutcome::Failed(format!("{MESSAGES_LOAD_FAILED}: {err}"))
                }
            }
        }
        .instrument(action_span(ActionKind::FetchMessages))
        .await
    }

    /// Await a remote call unless the store goes away first.
    async fn call<T>(
        &self,
        request: impl Future<Output = Result<T, RemoteError>>,
    ) -> Option<Result<T, RemoteError>> {
        let lifetime = self.store.lifetime();
        let result = tokio::select! {
            biased;
            _ = lifetime.closed() => None,
            result = request => Some(result),
        };

        if result.is_none() || lifetime.is_closed() {
            tracing::debug!("Store torn down, discarding completion");
            return None;
        }
        result
    }

    /// A refresh may drop the focused user. The collection and the cleared
    /// selection land in one transition so no snapshot has it dangling.
    fn replace_users(&self, users: Vec<User>) {
        self.store.dispatch_with(|state| {
            let dangling = state
                .selection
                .filter(|id| !users.iter().any(|user| user.id == *id));
            let mut intents = vec![DirectoryIntent::SetUsers { users }];
            if let Some(id) = dangling {
                tracing::debug!(user_id = %id, "Selected user no longer listed, clearing selection");
                intents.push(DirectoryIntent::SetSelection { id: None });
            }
            intents
        });
    }

    fn fail(&self, prefix: &str, err: &RemoteError) -> ActionOutcome {
        let message = format!("{prefix}: {err}");
        tracing::warn!(kind = err.kind(), error = %err, "{prefix}");
        self.store.set_error(Some(message.clone()));
        ActionOutcome::Failed(message)
    }
}

fn action_span(kind: ActionKind) -> tracing::Span {
    tracing::info_span!("action", kind = %kind, action_id = %Uuid::new_v4())
}
