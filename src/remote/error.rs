//! Failure type for the remote resource client.
//!
//! Every way a remote call can go wrong (transport, timeout, non-success
//! status, undecodable body) collapses into one `RemoteError`. Its `Display`
//! output is the human-readable reason appended to the operator-facing
//! error message.

use thiserror::Error;

/// A remote call was rejected, timed out, or returned something unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced a response.
    #[error("{message}")]
    Network { message: String },

    /// The request exceeded the client timeout.
    #[error("timeout of {seconds}s exceeded")]
    Timeout { seconds: u64 },

    /// The server answered with a non-success status.
    #[error("request failed with status code {status}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected entity.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The configured base URL cannot address the resource.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl RemoteError {
    /// Shorthand for a transport failure with a plain message.
    pub fn network(message: impl Into<String>) -> Self {
        RemoteError::Network {
            message: message.into(),
        }
    }

    /// Short machine-friendly tag, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::Network { .. } => "network",
            RemoteError::Timeout { .. } => "timeout",
            RemoteError::Status { .. } => "status",
            RemoteError::Decode(_) => "decode",
            RemoteError::InvalidUrl(_) => "invalid_url",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_displays_bare_message() {
        let err = RemoteError::network("timeout");
        assert_eq!(err.to_string(), "timeout");
        assert_eq!(err.kind(), "network");
    }

    #[test]
    fn status_display_omits_body() {
        let err = RemoteError::Status {
            status: 404,
            body: "{}".into(),
        };
        assert_eq!(err.to_string(), "request failed with status code 404");
        assert_eq!(err.kind(), "status");
    }

    #[test]
    fn timeout_mentions_duration() {
        let err = RemoteError::Timeout { seconds: 5 };
        assert_eq!(err.to_string(), "timeout of 5s exceeded");
    }
}
