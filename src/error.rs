use thiserror::Error;

/// Failures surfaced by the portal API layer. The UI reduces all of these to
/// a generic banner or panel; only login keeps the server-supplied message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request failed with status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("failed to parse response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Server-supplied error text for non-2xx responses, when the portal
    /// included one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}
