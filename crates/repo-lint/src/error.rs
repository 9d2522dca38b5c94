//! Error types for repo-lint

use std::time::Duration;

/// Result type for repo-lint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the linter invocation itself.
///
/// Findings in the analysed code are never errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error analyzing code with {program}: failed to start: {source}")]
    ToolInvocation {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error analyzing code with {program}: exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Error analyzing code with {program}: timed out after {}s", .timeout.as_secs())]
    Timeout { program: String, timeout: Duration },

    #[error("Failed to prepare scratch file: {0}")]
    ScratchFile(#[source] std::io::Error),
}
