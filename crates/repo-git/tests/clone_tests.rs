//! Clone behaviour against a local origin repository.

use std::fs;
use std::time::Duration;

use pretty_assertions::assert_eq;
use repo_fs::WorkspaceRoot;
use repo_git::{CloneOptions, Error, WorkspaceStore};
use repo_test_utils::TestOrigin;
use tempfile::TempDir;

fn setup() -> (TempDir, WorkspaceStore, TestOrigin) {
    let temp = TempDir::new().unwrap();
    let store = WorkspaceStore::new(WorkspaceRoot::new(temp.path().join("temp_repos")));
    (temp, store, TestOrigin::new())
}

#[test]
fn test_clone_with_explicit_path_returns_that_path() {
    let (temp, store, origin) = setup();

    let cloned = store.clone_repo(&origin.url(), "main", Some("demo")).unwrap();

    assert_eq!(cloned.local_path, "demo");
    assert!(temp.path().join("temp_repos/demo/.git").is_dir());
    assert_eq!(
        fs::read_to_string(temp.path().join("temp_repos/demo/README.md")).unwrap(),
        origin.read("README.md")
    );
}

#[test]
fn test_clone_explicit_path_is_normalized() {
    let (_temp, store, origin) = setup();
    let cloned = store
        .clone_repo(&origin.url(), "main", Some("./nested//demo/"))
        .unwrap();
    assert_eq!(cloned.local_path, "nested/demo");
    assert!(cloned.path.join(".git").is_dir());
}

#[test]
fn test_clone_without_path_derives_name() {
    let (_temp, store, origin) = setup();
    let expected_stem = repo_git::workspace_name_from_url(&origin.url());

    let cloned = store.clone_repo(&origin.url(), "main", None).unwrap();

    let (stem, suffix) = cloned.local_path.rsplit_once('_').unwrap();
    assert_eq!(stem, expected_stem);
    assert_eq!(suffix.len(), 8);
    assert!(cloned.path.is_dir());
}

#[test]
fn test_clone_checks_out_requested_branch() {
    let (_temp, store, origin) = setup();
    origin.add_branch("feature");

    store.clone_repo(&origin.url(), "feature", Some("feat")).unwrap();

    assert_eq!(store.status("feat").unwrap().branch, "feature");
}

#[test]
fn test_clone_nonexistent_branch_fails_and_leaves_nothing() {
    let (temp, store, origin) = setup();

    let err = store
        .clone_repo(&origin.url(), "no-such-branch", Some("broken"))
        .unwrap_err();

    assert!(matches!(err, Error::CloneFailed { .. }), "got {err:?}");
    assert!(err.to_string().contains("no-such-branch"));
    assert!(!temp.path().join("temp_repos/broken").exists());
}

#[test]
fn test_clone_unreachable_remote_fails() {
    let (temp, store, _origin) = setup();
    let missing = temp.path().join("does-not-exist");
    let url = repo_test_utils::git::file_url(&missing);

    let err = store.clone_repo(&url, "main", Some("gone")).unwrap_err();

    assert!(matches!(err, Error::CloneFailed { .. }), "got {err:?}");
}

#[test]
fn test_clone_replaces_existing_directory() {
    let (temp, store, origin) = setup();
    let target = temp.path().join("temp_repos/demo");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("stale.txt"), "left over").unwrap();

    store.clone_repo(&origin.url(), "main", Some("demo")).unwrap();

    assert!(!target.join("stale.txt").exists());
    assert!(target.join("README.md").is_file());
}

#[test]
fn test_clone_rejects_escaping_local_path() {
    let (temp, store, origin) = setup();

    let err = store
        .clone_repo(&origin.url(), "main", Some("../outside"))
        .unwrap_err();

    assert!(matches!(err, Error::Fs(repo_fs::Error::InvalidPath { .. })), "got {err:?}");
    assert!(!temp.path().join("outside").exists());
}

#[test]
fn test_clone_rejects_empty_local_path() {
    let (_temp, store, origin) = setup();
    let err = store.clone_repo(&origin.url(), "main", Some("./")).unwrap_err();
    assert!(matches!(err, Error::Fs(repo_fs::Error::InvalidPath { .. })));
}

#[test]
fn test_clone_with_generous_timeout_succeeds() {
    let (_temp, store, origin) = setup();
    let store = store.with_clone_options(CloneOptions {
        timeout: Some(Duration::from_secs(120)),
    });
    assert!(store.clone_repo(&origin.url(), "main", Some("timed")).is_ok());
}

#[cfg(unix)]
#[test]
fn test_clone_through_symlinked_parent_is_rejected() {
    use std::os::unix::fs::symlink;

    let (temp, store, origin) = setup();
    store.clone_repo(&origin.url(), "main", Some("ws")).unwrap();
    let outside = TempDir::new().unwrap();
    symlink(outside.path(), temp.path().join("temp_repos/ws/evil")).unwrap();

    let err = store
        .clone_repo(&origin.url(), "main", Some("ws/evil/x"))
        .unwrap_err();

    assert!(
        matches!(err, Error::Fs(repo_fs::Error::InvalidPath { .. })),
        "got {err:?}"
    );
    assert!(!outside.path().join("x").exists());
}

#[test]
fn test_failed_nested_clone_removes_created_parents() {
    let (temp, store, origin) = setup();

    store
        .clone_repo(&origin.url(), "no-such-branch", Some("a/b/c"))
        .unwrap_err();

    assert!(!temp.path().join("temp_repos/a").exists());
    assert!(store.list_workspaces().unwrap().is_empty());
}

#[test]
fn test_failed_nested_clone_keeps_existing_parent() {
    let (temp, store, origin) = setup();
    store.clone_repo(&origin.url(), "main", Some("team/first")).unwrap();

    store
        .clone_repo(&origin.url(), "no-such-branch", Some("team/second"))
        .unwrap_err();

    assert!(temp.path().join("temp_repos/team/first/.git").is_dir());
    assert!(!temp.path().join("temp_repos/team/second").exists());
}
