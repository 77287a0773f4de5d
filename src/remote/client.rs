use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::remote::error::RemoteError;
use crate::remote::types::{Message, User, UserDraft, UserId};
use crate::remote::DirectoryApi;

/// `DirectoryApi` over HTTP, speaking JSON to a REST `users`/`posts` service.
pub struct HttpDirectoryClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    connect_timeout: Duration,
}

impl HttpDirectoryClient {
    /// Build the client once per session from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| RemoteError::network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            connect_timeout: config.connect_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}/{}", self.base_url, path))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
        let request = builder
            .build()
            .map_err(|e| RemoteError::InvalidUrl(e.to_string()))?;
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| self.classify(e))
            .inspect_err(|err| log_failure(&method, &url, err))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            let err = RemoteError::Status { status, body };
            log_failure(&method, &url, &err);
            return Err(err);
        }

        tracing::debug!(method = %method, url = %url, status = response.status().as_u16(), "Remote call succeeded");
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, RemoteError> {
        let response = self.send(builder).await?;
        let url = response.url().to_string();
        response
            .json::<T>()
            .await
            .map_err(|e| self.classify(e))
            .inspect_err(|err| tracing::warn!(url = %url, kind = err.kind(), error = %err, "Undecodable response"))
    }

    fn classify(&self, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            self.timeout_error(err.is_connect())
        } else if err.is_decode() {
            let detail = std::error::Error::source(&err)
                .map(|source| source.to_string())
                .unwrap_or_else(|| err.to_string());
            RemoteError::Decode(detail)
        } else if err.is_builder() {
            RemoteError::InvalidUrl(err.to_string())
        } else {
            RemoteError::network(err.to_string())
        }
    }

    /// Name the limit that actually expired.
    fn timeout_error(&self, while_connecting: bool) -> RemoteError {
        let limit = if while_connecting {
            self.connect_timeout
        } else {
            self.timeout
        };
        RemoteError::Timeout {
            seconds: limit.as_secs(),
        }
    }
}

fn log_failure(method: &Method, url: &str, err: &RemoteError) {
    tracing::warn!(
        method = %method,
        url = %url,
        kind = err.kind(),
        error = %err,
        "Remote call failed"
    );
}

impl DirectoryApi for HttpDirectoryClient {
    async fn list_users(&self) -> Result<Vec<User>, RemoteError> {
        self.fetch(self.request(Method::GET, "users")).await
    }

    async fn get_user(&self, id: UserId) -> Result<User, RemoteError> {
        self.fetch(self.request(Method::GET, &format!("users/{id}")))
            .await
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<User, RemoteError> {
        self.fetch(self.request(Method::POST, "users").json(draft))
            .await
    }

    async fn update_user(&self, id: UserId, draft: &UserDraft) -> Result<User, RemoteError> {
        self.fetch(self.request(Method::PUT, &format!("users/{id}")).json(draft))
            .await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), RemoteError> {
        self.send(self.request(Method::DELETE, &format!("users/{id}")))
            .await
            .map(|_| ())
    }

    async fn list_messages(&self) -> Result<Vec<Message>, RemoteError> {
        self.fetch(self.request(Method::GET, "posts")).await
    }

    async fn list_messages_for_user(&self, user_id: UserId) -> Result<Vec<Message>, RemoteError> {
        self.fetch(self.request(Method::GET, &format!("posts?userId={user_id}")))
            .await
    }
}
