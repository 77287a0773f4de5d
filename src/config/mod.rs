//! Configuration for the directory session.
//!
//! Loaded once from `~/.config/chat-directory/config.toml` (or the platform
//! equivalent). A missing file means defaults; the `CHAT_DIRECTORY_BASE_URL`
//! environment variable overrides the file's base URL.

mod loader;
mod types;

pub use loader::{ConfigError, BASE_URL_ENV};
pub use types::{ApiConfig, Config, DirectoryConfig};
