//! Client-side manager for a chat-style user directory backed by a REST
//! service.
//!
//! The crate reconciles three independently fetched streams (users,
//! messages, and the results of create/delete calls) into one
//! [`DirectoryState`](directory::DirectoryState):
//!
//! - [`remote`]: HTTP client for the `users` and `posts` resources
//! - [`directory`]: the store, its reducer, and pure derivations
//! - [`controller`]: operator actions with busy/error lifecycle
//! - [`config`]: TOML configuration
//! - [`logging`]: tracing subscriber setup for hosts

pub mod config;
pub mod controller;
pub mod directory;
pub mod logging;
pub mod mvi;
pub mod remote;
