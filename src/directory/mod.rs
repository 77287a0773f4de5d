//! View-model store and derivation layer for the user directory.

pub mod derive;
mod intent;
mod lifetime;
mod reducer;
mod state;
mod store;

pub use derive::{
    draft_is_valid, messages_for_user, post_count, selected_user, DirectoryView, FormView,
    PostView, UserDetails, UserRow,
};
pub use intent::{DirectoryIntent, DraftPatch};
pub use lifetime::Lifetime;
pub use reducer::DirectoryReducer;
pub use state::DirectoryState;
pub use store::Store;
