//! Error types for repo-git

use std::path::PathBuf;

/// Result type for repo-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in repo-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Fs(#[from] repo_fs::Error),

    #[error("Git clone of {url} (branch '{branch}') failed: {message}")]
    CloneFailed {
        url: String,
        branch: String,
        message: String,
    },

    #[error("Invalid git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("Failed to inspect repository at {path}: {message}")]
    Inspection { path: PathBuf, message: String },
}
