use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SopApiError {
    #[error("invalid header value for {0}")]
    InvalidHeader(String),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("retry budget exhausted (status: {status:?}, last error: {last_error:?})")]
    RetryExhausted {
        status: Option<StatusCode>,
        last_error: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: Option<Value>,
}

/// Extract a human-readable failure message from an error response body.
///
/// The backend reports failures as `{"detail": "..."}`. Validation errors
/// carry structured detail; those are rendered as compact JSON. Anything
/// undecodable falls back to the raw body, then to the status line.
#[must_use]
pub fn parse_error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        match payload.detail {
            Some(Value::String(detail)) if !detail.trim().is_empty() => return detail,
            Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
