//! Constants and enums for workspace filesystem paths.

use std::path::Path;

/// Default directory, relative to the service's working directory, that holds
/// cloned workspaces.
pub const DEFAULT_WORKSPACE_ROOT: &str = "temp_repos";

/// Well-known repository filesystem markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoPath {
    /// The `.git` directory (Git database)
    GitDir,
    /// The `.git` suffix on remote URLs
    GitSuffix,
}

impl RepoPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitDir | Self::GitSuffix => ".git",
        }
    }
}

impl AsRef<Path> for RepoPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for RepoPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
