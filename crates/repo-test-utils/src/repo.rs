//! [`TestOrigin`]: an "upstream" repository that tests clone from.

use std::path::Path;

use git2::Repository;
use tempfile::TempDir;

use crate::git;

/// A temporary repository with history, addressable by `file://` URL.
///
/// # Example
///
/// ```rust,no_run
/// use repo_test_utils::TestOrigin;
///
/// let origin = TestOrigin::new();
/// origin.add_branch("feature");
/// let url = origin.url();
/// ```
pub struct TestOrigin {
    temp_dir: TempDir,
    repo: Repository,
}

impl Default for TestOrigin {
    fn default() -> Self {
        Self::new()
    }
}

impl TestOrigin {
    /// Create a repository on `main` with an initial commit.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("TestOrigin::new: failed to create temp dir");
        let repo = git::real_git_repo_with_commit(temp_dir.path());
        Self { temp_dir, repo }
    }

    /// Work tree of the origin repository.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// URL suitable for cloning.
    pub fn url(&self) -> String {
        git::file_url(self.path())
    }

    /// Commit more files on the current branch.
    pub fn commit(&self, files: &[(&str, &str)], message: &str) {
        git::commit_files(&self.repo, files, message);
    }

    /// Create a branch pointing at the current HEAD commit.
    pub fn add_branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("TestOrigin::add_branch: HEAD has no commit");
        self.repo
            .branch(name, &head, false)
            .unwrap_or_else(|e| panic!("TestOrigin::add_branch: failed to create {name}: {e}"));
    }

    /// Content of a file in the origin work tree.
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path().join(relative))
            .unwrap_or_else(|e| panic!("TestOrigin::read: cannot read {relative}: {e}"))
    }
}
