//! Error types for the employee API client.
//!
//! # Design
//! `NotFound` and `Unauthorized` get dedicated variants because callers and
//! logs distinguish them. Rejected payloads (400/422) are split out from the
//! remaining non-2xx statuses, which land in `Status` with the raw code and
//! body. `Transport` and `Status` together form the transport-error class.

use thiserror::Error;

/// Errors returned by `EmployeeClient` parse methods and both repository
/// variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response: connection refused, DNS, timeout.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned a non-2xx status with no more specific meaning.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The server returned 404; the requested employee does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 401.
    #[error("unauthorized")]
    Unauthorized,

    /// The server rejected the payload shape (400 or 422).
    #[error("payload rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The client configuration cannot produce valid requests: an unusable
    /// base URL or a token that does not fit in a header.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Status { .. })
    }

    /// Map a non-2xx status code to the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            400 | 422 => ApiError::Rejected { status, body },
            _ => ApiError::Status { status, body },
        }
    }
}
