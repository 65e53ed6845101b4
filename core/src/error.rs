//! Error types for the facility API client.
//!
//! # Design
//! Every non-2xx response becomes `ApiError::Http` carrying an
//! `ErrorEnvelope`: the status, headers and the decoded error body. The
//! backend is not consistent about where it puts the human-readable text, so
//! `ErrorEnvelope::message` checks the known shapes in a fixed order.

use serde_json::Value;

/// Errors returned by `ApiClient` and `ApiSession`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {}: {}", .0.status, .0.message())]
    Http(ErrorEnvelope),

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request was aborted through its cancellation token.
    #[error("request cancelled")]
    Cancelled,

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A 401 could not be recovered by refreshing the access token.
    #[error("session expired, sign in again")]
    SessionExpired,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(envelope) => Some(envelope.status),
            _ => None,
        }
    }

    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            ApiError::Http(envelope) => Some(envelope),
            _ => None,
        }
    }
}

/// Decoded failure response.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// JSON error body; a non-JSON body is kept as a JSON string and an empty
    /// body as `null`.
    pub error: Value,
}

impl ErrorEnvelope {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: &str) -> Self {
        let error = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
        };
        Self {
            status,
            headers,
            error,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Human-readable message of the error body.
    ///
    /// Looks under `error` (string), `error.message`, `message`, then
    /// `detail`. Falls back to a plain string body, then to the status.
    pub fn message(&self) -> String {
        extract_message(&self.error)
            .unwrap_or_else(|| format!("request failed with status {}", self.status))
    }
}

fn extract_message(body: &Value) -> Option<String> {
    if let Value::String(text) = body {
        return non_empty(text);
    }
    let candidates = [
        body.get("error").and_then(Value::as_str),
        body.get("error")
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str),
        body.get("message").and_then(Value::as_str),
    ];
    if let Some(found) = candidates.into_iter().flatten().find_map(non_empty) {
        return Some(found);
    }
    match body.get("detail")? {
        Value::String(text) => non_empty(text),
        // Validation failures arrive as a list of `{ "msg": ... }` entries.
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            non_empty(&messages.join("; "))
        }
        _ => None,
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
