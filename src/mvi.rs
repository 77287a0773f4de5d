//! Model-View-Intent primitives shared by the directory store.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Every change to a session's state is an [`Intent`] folded in by a
//! [`Reducer`]; views only ever see whole [`ViewState`] snapshots.

/// A requested transition: an operator action (select, edit the draft) or
/// the result of a remote call being applied.
pub trait Intent: Send + 'static {}

/// Snapshot type. Cloned to publish, compared to detect changes, and
/// defaulted when a session starts.
pub trait ViewState: Clone + PartialEq + Default + Send + 'static {}

/// The only place state transitions happen: `(State, Intent) -> State`,
/// with no side effects.
pub trait Reducer {
    type State: ViewState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Fold a sequence of intents, in order.
    fn reduce_all<I>(state: Self::State, intents: I) -> Self::State
    where
        I: IntoIterator<Item = Self::Intent>,
    {
        intents.into_iter().fold(state, Self::reduce)
    }
}
