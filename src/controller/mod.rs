//! Interaction controller: refresh, create, delete, select.
//!
//! Each networked action follows the same shape:
//!
//! ```text
//! Idle ──begin──→ Busy ──remote call──→ Success | Failure ──guard drop──→ Idle
//! ```
//!
//! Entering Busy raises `busy` and clears the previous error; the exit is a
//! scope guard, so no path can leave the store busy.

mod actions;
mod confirm;
mod flight;
mod outcome;

pub use actions::{
    DirectoryController, CREATE_FAILED, DEFAULT_MESSAGE_LIMIT, DELETE_CONFIRMATION,
    DELETE_FAILED, MESSAGES_LOAD_FAILED, REQUIRED_FIELDS, USERS_LOAD_FAILED,
};
pub use confirm::{AssumeYes, Confirm};
pub use outcome::{ActionKind, ActionOutcome, RefreshOutcome};
