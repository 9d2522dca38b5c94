//! Point-in-time status of a workspace repository

use std::path::Path;

use git2::{Delta, ErrorCode, Repository, StatusOptions};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Placeholder reported as the last commit message of an unborn branch.
pub const NO_COMMITS_YET: &str = "No commits yet";

/// Summary of a workspace's version-control state.
///
/// Recomputed on every request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Active branch name
    pub branch: String,

    /// Staged, unstaged or untracked changes exist
    pub is_dirty: bool,

    /// Work tree entries that differ from the index
    pub uncommitted_changes_count: usize,

    /// Untracked files, counted recursively
    pub untracked_files_count: usize,

    /// Paths modified in the work tree relative to the index
    pub modified_files: Vec<String>,

    /// Paths deleted from the work tree relative to the index
    pub deleted_files: Vec<String>,

    /// Trimmed message of the HEAD commit, or [`NO_COMMITS_YET`]
    pub last_commit_message: String,
}

/// Inspect the repository whose work tree is `path`.
///
/// Parent directories are not searched: `path` itself must hold the
/// repository.
///
/// # Errors
/// - `NotARepository` when `path` is not a git work tree
/// - `Inspection` for detached HEAD or any other read failure
pub fn inspect(path: &Path) -> Result<StatusSnapshot> {
    let repo = Repository::open(path).map_err(|e| match e.code() {
        ErrorCode::NotFound => Error::NotARepository {
            path: path.to_path_buf(),
        },
        _ => inspection(path, &e),
    })?;

    let branch = active_branch(&repo, path)?;

    let diff = repo
        .diff_index_to_workdir(None, None)
        .map_err(|e| inspection(path, &e))?;

    let mut modified_files = Vec::new();
    let mut deleted_files = Vec::new();
    for delta in diff.deltas() {
        let file = delta
            .old_file()
            .path()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        match delta.status() {
            Delta::Modified => modified_files.push(file),
            Delta::Deleted => deleted_files.push(file),
            _ => {}
        }
    }
    let uncommitted_changes_count = diff.deltas().len();

    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);
    let statuses = repo
        .statuses(Some(&mut opts))
        .map_err(|e| inspection(path, &e))?;

    let untracked_files_count = statuses
        .iter()
        .filter(|entry| entry.status().is_wt_new())
        .count();
    let is_dirty = statuses
        .iter()
        .any(|entry| !entry.status().is_ignored() && !entry.status().is_empty());

    let last_commit_message = last_commit_message(&repo, path)?;

    Ok(StatusSnapshot {
        branch,
        is_dirty,
        uncommitted_changes_count,
        untracked_files_count,
        modified_files,
        deleted_files,
        last_commit_message,
    })
}

/// Name of the branch HEAD points at, born or not.
fn active_branch(repo: &Repository, path: &Path) -> Result<String> {
    let head = repo
        .find_reference("HEAD")
        .map_err(|e| inspection(path, &e))?;

    match head.symbolic_target() {
        Some(target) => Ok(target
            .strip_prefix("refs/heads/")
            .unwrap_or(target)
            .to_string()),
        None => Err(Error::Inspection {
            path: path.to_path_buf(),
            message: "HEAD is detached; no active branch".to_string(),
        }),
    }
}

fn last_commit_message(repo: &Repository, path: &Path) -> Result<String> {
    match repo.head() {
        Ok(head) => {
            let commit = head.peel_to_commit().map_err(|e| inspection(path, &e))?;
            Ok(String::from_utf8_lossy(commit.message_bytes())
                .trim()
                .to_string())
        }
        Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(NO_COMMITS_YET.to_string()),
        Err(e) => Err(inspection(path, &e)),
    }
}

fn inspection(path: &Path, e: &git2::Error) -> Error {
    Error::Inspection {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    }
}
