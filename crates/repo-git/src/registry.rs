//! Workspace registry and eviction
//!
//! The registry is derived from the workspace root on every call. Each
//! workspace is dated by its creation time (or its modification time where
//! the platform has no creation time).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use repo_fs::{Error as FsError, RepoPath, WorkspaceRoot};
use serde::{Deserialize, Serialize};

use crate::Result;

/// One workspace under the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    /// Identifier relative to the workspace root
    pub local_path: String,

    pub created_at: DateTime<Utc>,

    /// Whether a `.git` directory is present
    pub is_repository: bool,
}

/// Which workspaces to evict.
///
/// Age is applied first, then the count limit removes the oldest survivors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvictionPolicy {
    pub max_age: Option<Duration>,
    pub max_count: Option<usize>,
}

/// List workspaces, oldest first.
///
/// A directory holding `.git` is one workspace, however deep it sits, so
/// nested clone identifiers such as `team/proj` are reported as such.
/// Directories only grouping other workspaces are walked through; a
/// directory tree with no repository inside is reported as one workspace.
pub fn list(root: &WorkspaceRoot) -> Result<Vec<WorkspaceRecord>> {
    let native_root = root.path().to_native();
    if !native_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for child in subdirectories(&native_root)? {
        records.extend(collect(&child.path, child.name)?);
    }

    records.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.local_path.cmp(&b.local_path))
    });
    Ok(records)
}

struct Subdirectory {
    path: PathBuf,
    name: String,
}

/// Real (non-symlink) subdirectories with UTF-8 names.
fn subdirectories(dir: &Path) -> Result<Vec<Subdirectory>> {
    let read_dir = fs::read_dir(dir).map_err(|e| FsError::io(dir, e))?;

    let mut dirs = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| FsError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| FsError::io(&path, e))?;
        if !file_type.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => dirs.push(Subdirectory { path, name }),
            Err(_) => {
                tracing::warn!(path = %path.display(), "Skipping workspace with non UTF-8 name");
            }
        }
    }
    Ok(dirs)
}

fn collect(dir: &Path, local_path: String) -> Result<Vec<WorkspaceRecord>> {
    if dir.join(RepoPath::GitDir).is_dir() {
        return Ok(vec![record(dir, local_path, true)?]);
    }

    let mut nested = Vec::new();
    for child in subdirectories(dir)? {
        nested.extend(collect(&child.path, format!("{local_path}/{}", child.name))?);
    }

    if nested.iter().any(|r| r.is_repository) {
        Ok(nested)
    } else {
        Ok(vec![record(dir, local_path, false)?])
    }
}

fn record(dir: &Path, local_path: String, is_repository: bool) -> Result<WorkspaceRecord> {
    let meta = fs::metadata(dir).map_err(|e| FsError::io(dir, e))?;
    let stamp = meta
        .created()
        .or_else(|_| meta.modified())
        .map_err(|e| FsError::io(dir, e))?;

    Ok(WorkspaceRecord {
        local_path,
        created_at: DateTime::<Utc>::from(stamp),
        is_repository,
    })
}

/// Pick the workspaces `policy` evicts at time `now`.
///
/// `records` must be sorted oldest first, as [`list`] returns them.
pub fn select_evictions(
    records: &[WorkspaceRecord],
    policy: &EvictionPolicy,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut evicted = Vec::new();
    let mut survivors = Vec::new();

    for record in records {
        let expired = policy.max_age.is_some_and(|max_age| {
            let age = now.signed_duration_since(record.created_at);
            age.to_std().is_ok_and(|age| age > max_age)
        });
        if expired {
            evicted.push(record.local_path.clone());
        } else {
            survivors.push(record);
        }
    }

    if let Some(max_count) = policy.max_count
        && survivors.len() > max_count
    {
        let excess = survivors.len() - max_count;
        evicted.extend(survivors.iter().take(excess).map(|r| r.local_path.clone()));
    }

    evicted
}
