//! Error types and HTTP status translation for the services

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::protocol::ErrorBody;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a request
#[derive(Debug, Error)]
pub enum Error {
    /// Error from workspace or repository operations
    #[error(transparent)]
    Git(#[from] repo_git::Error),

    /// Error from file access or configuration loading
    #[error(transparent)]
    Fs(#[from] repo_fs::Error),

    /// Error starting or running the linter
    #[error(transparent)]
    Lint(#[from] repo_lint::Error),

    /// Request body missing, malformed or of the wrong shape
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// A blocking worker panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status for this error.
    ///
    /// Not-found classes map to 404, rejected paths to 400, any body the JSON
    /// extractor refuses to 422, everything else is 500. Repository
    /// inspection and file read failures are reported as 404 like the
    /// lookups they belong to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Git(e) => git_status(e),
            Self::Fs(e) => fs_status(e),
            Self::InvalidRequest { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Lint(_) | Self::Task(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn git_status(e: &repo_git::Error) -> StatusCode {
    match e {
        repo_git::Error::Fs(inner) => fs_status(inner),
        repo_git::Error::NotARepository { .. } | repo_git::Error::Inspection { .. } => {
            StatusCode::NOT_FOUND
        }
        repo_git::Error::CloneFailed { .. } | repo_git::Error::Git(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn fs_status(e: &repo_fs::Error) -> StatusCode {
    match e {
        repo_fs::Error::InvalidPath { .. } => StatusCode::BAD_REQUEST,
        repo_fs::Error::Access { .. } => StatusCode::NOT_FOUND,
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %detail, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %detail, "Request rejected");
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}
