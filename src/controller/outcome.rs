use std::fmt;

/// The four action classes that touch the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    FetchUsers,
    FetchMessages,
    CreateUser,
    DeleteUser,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::FetchUsers => "fetch_users",
            ActionKind::FetchMessages => "fetch_messages",
            ActionKind::CreateUser => "create_user",
            ActionKind::DeleteUser => "delete_user",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The remote call succeeded and the store was updated.
    Completed,
    /// The remote call failed; carries the operator-facing message.
    Failed(String),
    /// The draft was incomplete; nothing was sent.
    Invalid,
    /// The operator declined the confirmation prompt.
    Declined,
    /// An action of the same kind is still in flight.
    AlreadyRunning,
    /// The store was torn down before the call completed.
    Discarded,
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed)
    }
}

/// Both halves of a refresh, which run independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub users: ActionOutcome,
    pub messages: ActionOutcome,
}
