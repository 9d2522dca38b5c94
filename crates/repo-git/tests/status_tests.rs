//! Status snapshots of cloned workspaces.

use std::fs;

use pretty_assertions::assert_eq;
use repo_fs::WorkspaceRoot;
use repo_git::{Error, StatusSnapshot, WorkspaceStore};
use repo_test_utils::TestOrigin;
use tempfile::TempDir;

fn cloned() -> (TempDir, WorkspaceStore, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let store = WorkspaceStore::new(WorkspaceRoot::new(temp.path().join("temp_repos")));
    let origin = TestOrigin::new();
    origin.commit(&[("docs/guide.md", "guide\n")], "Add guide\n\nWith a body.");
    let cloned = store.clone_repo(&origin.url(), "main", Some("ws")).unwrap();
    let workdir = cloned.path.to_native();
    (temp, store, workdir)
}

#[test]
fn test_clean_clone_is_not_dirty() {
    let (_temp, store, _workdir) = cloned();

    let snapshot = store.status("ws").unwrap();

    assert_eq!(
        snapshot,
        StatusSnapshot {
            branch: "main".into(),
            is_dirty: false,
            uncommitted_changes_count: 0,
            untracked_files_count: 0,
            modified_files: vec![],
            deleted_files: vec![],
            last_commit_message: "Add guide\n\nWith a body.".into(),
        }
    );
}

#[test]
fn test_status_is_idempotent() {
    let (_temp, store, _workdir) = cloned();
    assert_eq!(store.status("ws").unwrap(), store.status("ws").unwrap());
}

#[test]
fn test_modified_deleted_and_untracked() {
    let (_temp, store, workdir) = cloned();
    fs::write(workdir.join("README.md"), "changed\n").unwrap();
    fs::remove_file(workdir.join("docs/guide.md")).unwrap();
    fs::create_dir_all(workdir.join("notes/deep")).unwrap();
    fs::write(workdir.join("notes/deep/todo.txt"), "x").unwrap();
    fs::write(workdir.join("scratch.txt"), "y").unwrap();

    let snapshot = store.status("ws").unwrap();

    assert!(snapshot.is_dirty);
    assert_eq!(snapshot.modified_files, vec!["README.md"]);
    assert_eq!(snapshot.deleted_files, vec!["docs/guide.md"]);
    assert_eq!(snapshot.uncommitted_changes_count, 2);
    assert_eq!(snapshot.untracked_files_count, 2);
}

#[test]
fn test_untracked_only_is_dirty() {
    let (_temp, store, workdir) = cloned();
    fs::write(workdir.join("new.txt"), "new").unwrap();

    let snapshot = store.status("ws").unwrap();

    assert!(snapshot.is_dirty);
    assert_eq!(snapshot.uncommitted_changes_count, 0);
    assert_eq!(snapshot.untracked_files_count, 1);
}

#[test]
fn test_status_of_plain_directory() {
    let (temp, store, _workdir) = cloned();
    fs::create_dir_all(temp.path().join("temp_repos/plain")).unwrap();

    let err = store.status("plain").unwrap_err();
    assert!(matches!(err, Error::NotARepository { .. }), "got {err:?}");
}

#[test]
fn test_status_of_missing_workspace() {
    let (_temp, store, _workdir) = cloned();
    let err = store.status("missing").unwrap_err();
    assert!(matches!(err, Error::NotARepository { .. }), "got {err:?}");
}

#[test]
fn test_detached_head_is_inspection_failure() {
    let (_temp, store, workdir) = cloned();
    let repo = git2::Repository::open(&workdir).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap().id();
    repo.set_head_detached(head).unwrap();

    let err = store.status("ws").unwrap_err();
    assert!(matches!(err, Error::Inspection { .. }), "got {err:?}");
}

#[test]
fn test_status_rejects_traversal() {
    let (_temp, store, _workdir) = cloned();
    let err = store.status("../..").unwrap_err();
    assert!(matches!(err, Error::Fs(repo_fs::Error::InvalidPath { .. })));
}
