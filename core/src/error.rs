//! Error types for the device service client.
//!
//! # Design
//! Every non-2xx response lands in `RequestError`, whatever its body, with
//! the method, route path, status code and a truncated copy of the body.
//! Transport failures keep the transport's own error as their source.

use thiserror::Error;

use crate::http::HttpMethod;

/// Longest response body, in bytes, kept on a `RequestError`.
pub const MAX_ERROR_BODY: usize = 512;

/// Errors returned by `DeviceClient` parse methods and `LiquidApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside `[200, 299]`.
    #[error("{method} {path} failed with HTTP {status}")]
    RequestError {
        method: HttpMethod,
        path: String,
        status: u16,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    TransportError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    pub(crate) fn request(method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
        ApiError::RequestError {
            method,
            path: path.to_string(),
            status,
            body: truncate(body, MAX_ERROR_BODY).to_string(),
        }
    }

    /// HTTP status of a `RequestError`, `None` for every other variant.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Cut `s` to at most `max` bytes without splitting a character.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
