//! `ApiError` - error reported by the Pink Visual API.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Error body returned by the API on non-200 responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    /// Server-supplied error description.
    error: Value,
}

/// A non-200 response from the API.
///
/// Carried inside `anyhow::Error`; use `downcast_ref::<ApiError>()` to
/// inspect the status and the server message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// The body's `error` field, or the raw body when it has none.
    pub message: String,
}

impl ApiError {
    /// Builds an error from a response status and its body text.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                error: Value::String(message),
            }) => message,
            Ok(ErrorBody { error }) if !error.is_null() => error.to_string(),
            _ if !body.trim().is_empty() => String::from(body.trim()),
            _ => String::from(status.canonical_reason().unwrap_or("unknown error")),
        };

        Self {
            status: status.as_u16(),
            message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PinkVisual API error (HTTP {}): {}",
            self.status, self.message
        )
    }
}

impl std::error::Error for ApiError {}
