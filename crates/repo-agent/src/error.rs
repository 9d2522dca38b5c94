//! Error types for agent tool calls

/// Errors that can occur while calling a service
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Connection, timeout or transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service returned {status}: {detail}")]
    Service {
        /// HTTP status code
        status: u16,
        /// `detail` field of the error body, or the raw body
        detail: String,
    },

    /// The response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for agent tool calls
pub type Result<T> = std::result::Result<T, AgentError>;
