//! Error types for fetching and mapping weather data.

use serde_json::Value;
use thiserror::Error;

/// An outbound request to the provider could not complete.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider responded with status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("provider response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Why a fetch produced no [`Weather`](crate::Weather).
///
/// Every variant is terminal for the attempt; nothing here is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The provider answered but reported no results or an error. The raw
    /// payload is kept so callers can inspect it.
    #[error("provider reported an error or returned no results")]
    Provider { payload: Value },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

const NO_RESULTS_MESSAGE: &str = "Error: no results. See console log for details.";

impl FetchError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        FetchError::MalformedResponse(msg.into())
    }

    /// Message for the error panel shown in place of the widget.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Provider { payload } => payload
                .pointer("/query/results/channel/item/title")
                .and_then(Value::as_str)
                .map(|title| format!("Error: {title}. See console log for details."))
                .unwrap_or_else(|| NO_RESULTS_MESSAGE.to_string()),
            _ => NO_RESULTS_MESSAGE.to_string(),
        }
    }

    /// Raw provider payload, when the provider itself reported the failure.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            FetchError::Provider { payload } => Some(payload),
            _ => None,
        }
    }
}

/// Shorten a response body for inclusion in error messages.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
