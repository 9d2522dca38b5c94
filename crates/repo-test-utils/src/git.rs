//! Git repository fixtures.
//!
//! Choose the lowest-realism fixture that satisfies your test's needs.
//! Everything here goes through `git2`, so no `git` binary or user
//! configuration is required.

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Repository, RepositoryInitOptions, Signature};

/// Creates a minimal `.git` directory structure **without** initialising a real
/// git repository.
///
/// Realism level: **FAKE**: directory structure only, no git object store.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_git_dir(path: &Path) {
    fs::create_dir_all(path.join(".git/refs/heads"))
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to create .git: {e}"));
    fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n")
        .unwrap_or_else(|e| panic!("fake_git_dir: failed to write HEAD: {e}"));
}

/// Initialises a real git repository whose unborn HEAD points at `main`.
///
/// Realism level: **REAL**: valid git state, empty history.
///
/// # Panics
/// Panics if `git2::Repository::init_opts` fails.
pub fn real_git_repo(path: &Path) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    Repository::init_opts(path, &opts).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Write `files` into the work tree, stage everything and commit on HEAD.
///
/// # Panics
/// Panics if any filesystem or git operation fails.
pub fn commit_files(repo: &Repository, files: &[(&str, &str)], message: &str) -> git2::Oid {
    let workdir = repo
        .workdir()
        .unwrap_or_else(|| panic!("commit_files: repository has no work tree"));

    for (name, content) in files {
        let file_path = workdir.join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("commit_files: failed to create {}: {e}", parent.display()));
        }
        fs::write(&file_path, content)
            .unwrap_or_else(|e| panic!("commit_files: failed to write {name}: {e}"));
    }

    let mut index = repo.index().expect("commit_files: failed to open index");
    index
        .add_all(["*"], IndexAddOption::DEFAULT, None)
        .expect("commit_files: failed to stage files");
    index.write().expect("commit_files: failed to write index");
    let tree_id = index.write_tree().expect("commit_files: failed to write tree");
    let tree = repo.find_tree(tree_id).expect("commit_files: tree not found");

    let sig = Signature::now("Test User", "test@example.com").expect("commit_files: bad signature");
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().expect("commit_files: HEAD is not a commit")],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap_or_else(|e| panic!("commit_files: commit failed: {e}"))
}

/// Initialises a real repository on `main` with one commit containing a
/// `README.md` and `src/app.py`.
///
/// Realism level: **REAL WITH HISTORY**.
pub fn real_git_repo_with_commit(path: &Path) -> Repository {
    let repo = real_git_repo(path);
    commit_files(
        &repo,
        &[
            ("README.md", "# Demo project\n\nUsed by the test suite.\n"),
            ("src/app.py", "def hello():\n    return \"hello\"\n"),
        ],
        "Initial commit\n",
    );
    repo
}

/// A `file://` URL for a local repository path.
pub fn file_url(path: &Path) -> String {
    let unified = path.to_string_lossy().replace('\\', "/");
    if unified.starts_with('/') {
        format!("file://{unified}")
    } else {
        format!("file:///{unified}")
    }
}
