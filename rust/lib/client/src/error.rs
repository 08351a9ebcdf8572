use std::time::Duration;

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx answer (other than a not-found on a single-record lookup).
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("server unreachable: {0}")]
    Unreachable(String),

    #[error("network: {0}")]
    Network(#[source] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    #[error("invalid server address {input:?}: {reason}")]
    InvalidEndpoint { input: String, reason: String },
}

impl ApiError {
    /// Connectivity failures: the request never got a server answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout(_) | ApiError::Unreachable(_) | ApiError::Network(_)
        )
    }

    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a `Server` error from a response body. JSON bodies of the form
    /// `{"message": ..}` or `{"error": ..}` are reduced to that text.
    pub(crate) fn server(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.trim().to_string());
        ApiError::Server { status, message }
    }
}
