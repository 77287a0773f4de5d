//! Remote resource client for the `users` and `posts` collections.
//!
//! The controller only talks to [`DirectoryApi`]; [`HttpDirectoryClient`] is
//! the production implementation and tests substitute an in-memory one.
//! There is no retry policy at this layer: a failure is returned once.

mod client;
mod error;
mod types;

use std::future::Future;
use std::sync::Arc;

pub use client::HttpDirectoryClient;
pub use error::RemoteError;
pub use types::{Message, MessageId, User, UserDraft, UserId};

/// Operations offered by the remote directory service.
pub trait DirectoryApi: Send + Sync {
    /// `GET /users`
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, RemoteError>> + Send;

    /// `GET /users/{id}`
    fn get_user(&self, id: UserId) -> impl Future<Output = Result<User, RemoteError>> + Send;

    /// `POST /users`. The returned entity carries the server-assigned id.
    fn create_user(
        &self,
        draft: &UserDraft,
    ) -> impl Future<Output = Result<User, RemoteError>> + Send;

    /// `PUT /users/{id}`. Not used by the reconciliation logic.
    fn update_user(
        &self,
        id: UserId,
        draft: &UserDraft,
    ) -> impl Future<Output = Result<User, RemoteError>> + Send;

    /// `DELETE /users/{id}`
    fn delete_user(&self, id: UserId) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// `GET /posts`
    fn list_messages(&self) -> impl Future<Output = Result<Vec<Message>, RemoteError>> + Send;

    /// `GET /posts?userId={id}`, filtered by the server.
    fn list_messages_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Message>, RemoteError>> + Send;
}

impl<T: DirectoryApi> DirectoryApi for Arc<T> {
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, RemoteError>> + Send {
        (**self).list_users()
    }

    fn get_user(&self, id: UserId) -> impl Future<Output = Result<User, RemoteError>> + Send {
        (**self).get_user(id)
    }

    fn create_user(
        &self,
        draft: &UserDraft,
    ) -> impl Future<Output = Result<User, RemoteError>> + Send {
        (**self).create_user(draft)
    }

    fn update_user(
        &self,
        id: UserId,
        draft: &UserDraft,
    ) -> impl Future<Output = Result<User, RemoteError>> + Send {
        (**self).update_user(id, draft)
    }

    fn delete_user(&self, id: UserId) -> impl Future<Output = Result<(), RemoteError>> + Send {
        (**self).delete_user(id)
    }

    fn list_messages(&self) -> impl Future<Output = Result<Vec<Message>, RemoteError>> + Send {
        (**self).list_messages()
    }

    fn list_messages_for_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Message>, RemoteError>> + Send {
        (**self).list_messages_for_user(user_id)
    }
}
