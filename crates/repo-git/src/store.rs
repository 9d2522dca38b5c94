//! Workspace store: clones into, inspects and prunes the workspace root

use chrono::Utc;
use repo_fs::{Error as FsError, NormalizedPath, WorkspaceRoot, io, normalize_relative};
use uuid::Uuid;

use crate::clone::{CloneOptions, clone_into};
use crate::registry::{self, EvictionPolicy, WorkspaceRecord};
use crate::status::{self, StatusSnapshot};
use crate::{Result, naming};

/// Result of a successful clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonedWorkspace {
    /// Identifier relative to the workspace root, as returned to callers
    pub local_path: String,

    /// Absolute or root-prefixed location on disk
    pub path: NormalizedPath,
}

/// Manages the directory of cloned workspaces.
///
/// Holds no state besides the root; concurrent operations on the same
/// workspace are not coordinated.
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    root: WorkspaceRoot,
    clone_options: CloneOptions,
}

impl WorkspaceStore {
    pub fn new(root: WorkspaceRoot) -> Self {
        Self {
            root,
            clone_options: CloneOptions::default(),
        }
    }

    pub fn with_clone_options(mut self, options: CloneOptions) -> Self {
        self.clone_options = options;
        self
    }

    pub fn root(&self) -> &WorkspaceRoot {
        &self.root
    }

    /// Clone `url` at `branch` into a workspace.
    ///
    /// Without `local_path` the workspace is named after the URL plus a
    /// random 8-hex-digit suffix. An existing directory at the target is
    /// removed first. On failure nothing is left at the target, nor any
    /// parent directory created for it.
    pub fn clone_repo(
        &self,
        url: &str,
        branch: &str,
        local_path: Option<&str>,
    ) -> Result<ClonedWorkspace> {
        let local_path = match local_path {
            Some(explicit) => {
                let cleaned = normalize_relative(explicit)?;
                if cleaned.is_empty() {
                    return Err(FsError::invalid_path(explicit, "workspace path must not be empty").into());
                }
                cleaned
            }
            None => Self::generated_name(url),
        };

        self.root.ensure_exists()?;
        let target = self.root.workspace(&local_path)?;

        if io::remove_tree(&target)? {
            tracing::warn!(workspace = %local_path, "Replacing existing workspace");
        }
        let created = self.first_missing_ancestor(&target);
        if let Some(parent) = target.parent() {
            io::ensure_dir(&parent)?;
        }

        tracing::info!(url = %url, branch = %branch, workspace = %local_path, "Cloning repository");

        if let Err(e) = clone_into(url, branch, &target, self.clone_options) {
            let leftover = created.as_ref().unwrap_or(&target);
            if let Err(cleanup) = io::remove_tree(leftover) {
                tracing::warn!(workspace = %local_path, error = %cleanup, "Failed to clean up after clone failure");
            }
            return Err(e);
        }

        Ok(ClonedWorkspace {
            local_path,
            path: target,
        })
    }

    /// Status snapshot of the workspace `local_path`.
    pub fn status(&self, local_path: &str) -> Result<StatusSnapshot> {
        let path = self.root.workspace(local_path)?;
        status::inspect(&path.to_native())
    }

    /// All workspaces under the root, oldest first.
    pub fn list_workspaces(&self) -> Result<Vec<WorkspaceRecord>> {
        registry::list(&self.root)
    }

    /// Remove the workspaces `policy` selects; returns their identifiers.
    pub fn prune(&self, policy: &EvictionPolicy) -> Result<Vec<String>> {
        let records = self.list_workspaces()?;
        let evicted = registry::select_evictions(&records, policy, Utc::now());

        for local_path in &evicted {
            let target = self.root.workspace(local_path)?;
            io::remove_tree(&target)?;
            self.remove_empty_parents(&target);
            tracing::info!(workspace = %local_path, "Evicted workspace");
        }

        Ok(evicted)
    }

    fn generated_name(url: &str) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}_{}", naming::workspace_name_from_url(url), &suffix[..8])
    }

    /// Highest ancestor of `target` below the root that does not exist yet,
    /// i.e. the directory a clone into `target` starts creating from.
    fn first_missing_ancestor(&self, target: &NormalizedPath) -> Option<NormalizedPath> {
        let root = self.root.path();
        let mut missing = None;
        let mut current = target.parent();
        while let Some(dir) = current {
            if dir == *root || !dir.starts_with(root) || dir.exists() {
                break;
            }
            current = dir.parent();
            missing = Some(dir);
        }
        missing
    }

    /// Remove directories left empty between `target` and the root.
    fn remove_empty_parents(&self, target: &NormalizedPath) {
        let root = self.root.path();
        let mut current = target.parent();
        while let Some(dir) = current {
            if dir == *root || !dir.starts_with(root) {
                break;
            }
            // Fails once a directory still holds other workspaces.
            if std::fs::remove_dir(dir.to_native()).is_err() {
                break;
            }
            current = dir.parent();
        }
    }
}
