//! # Error taxonomy for remote calls
//!
//! Three failure classes, each rendered differently by the views:
//!
//! | Variant | Meaning | Shown as |
//! |---------|---------|----------|
//! | [`ApiError::Network`] | The request never completed (DNS, connect, timeout). | Generic connectivity message. |
//! | [`ApiError::Server`] | The server answered with a non-success status. | The server's structured message, verbatim. |
//! | [`ApiError::SessionExpired`] | 401/403 on an authenticated call; the session has been cleared. | Redirect to login with an explanatory message. |
//!
//! [`ApiError::Validation`] covers client-side short-circuits (empty slip,
//! insufficient funds) that never reach the wire; the server re-validates
//! regardless.
//!
//! Malformed response *shapes* (expected a list, got an object) are not
//! errors at all — list decoders degrade to empty so views keep rendering.
//! No failure is retried automatically.

use serde_json::Value;
use store::NavRequest;

use crate::http::ApiResponse;

/// Message shown when an authenticated call bounces with 401/403.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received; the detail is for diagnostics only.
    #[error("network error: {0}")]
    Network(String),

    /// The server returned a structured error; `message` is shown verbatim.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Client-side pre-flight check failed; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The session was cleared after a 401/403. `redirect` is `Some` only
    /// for the call that actually cleared it, so concurrent failures
    /// redirect exactly once.
    #[error("Your session has expired. Please log in again.")]
    SessionExpired { redirect: Option<NavRequest> },
}

impl ApiError {
    /// Build a [`ApiError::Server`] from a non-success response, preferring
    /// the structured `message` body field and falling back to a generic
    /// status line.
    pub fn from_response(response: &ApiResponse) -> Self {
        let message = response
            .body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error! status: {}", response.status));
        Self::Server {
            status: response.status,
            message,
        }
    }
}

/// Pass a successful response through, or map it to [`ApiError::Server`].
pub(crate) fn expect_success(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_response(&response))
    }
}
