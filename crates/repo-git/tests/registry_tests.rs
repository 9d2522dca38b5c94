//! Listing and pruning workspaces on disk.

use std::fs;
use std::time::Duration;

use repo_fs::WorkspaceRoot;
use repo_git::{EvictionPolicy, WorkspaceStore};
use repo_test_utils::TestOrigin;
use tempfile::TempDir;

fn store_with(dirs: &[&str]) -> (TempDir, WorkspaceStore) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("temp_repos");
    for dir in dirs {
        fs::create_dir_all(root.join(dir)).unwrap();
        // Distinct timestamps on filesystems with coarse resolution.
        std::thread::sleep(Duration::from_millis(20));
    }
    (temp, WorkspaceStore::new(WorkspaceRoot::new(root)))
}

#[test]
fn test_list_missing_root_is_empty() {
    let temp = TempDir::new().unwrap();
    let store = WorkspaceStore::new(WorkspaceRoot::new(temp.path().join("never_created")));
    assert!(store.list_workspaces().unwrap().is_empty());
}

#[test]
fn test_list_skips_files_and_flags_repositories() {
    let (temp, store) = store_with(&["first", "second"]);
    let root = temp.path().join("temp_repos");
    fs::write(root.join("stray.txt"), "not a workspace").unwrap();
    repo_test_utils::git::fake_git_dir(&root.join("second"));

    let records = store.list_workspaces().unwrap();

    let names: Vec<_> = records.iter().map(|r| r.local_path.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"first") && names.contains(&"second"));
    let second = records.iter().find(|r| r.local_path == "second").unwrap();
    assert!(second.is_repository);
}

#[test]
fn test_prune_by_count_keeps_newest() {
    let (temp, store) = store_with(&["a", "b", "c"]);
    let before = store.list_workspaces().unwrap();
    let oldest = before[0].local_path.clone();

    let removed = store
        .prune(&EvictionPolicy {
            max_age: None,
            max_count: Some(2),
        })
        .unwrap();

    assert_eq!(removed, vec![oldest.clone()]);
    assert!(!temp.path().join("temp_repos").join(&oldest).exists());
    assert_eq!(store.list_workspaces().unwrap().len(), 2);
}

#[test]
fn test_prune_by_age_zero_removes_all() {
    let (_temp, store) = store_with(&["a", "b"]);
    std::thread::sleep(Duration::from_millis(20));

    let removed = store
        .prune(&EvictionPolicy {
            max_age: Some(Duration::ZERO),
            max_count: None,
        })
        .unwrap();

    assert_eq!(removed.len(), 2);
    assert!(store.list_workspaces().unwrap().is_empty());
}

#[test]
fn test_prune_without_policy_is_noop() {
    let (_temp, store) = store_with(&["a"]);
    assert!(store.prune(&EvictionPolicy::default()).unwrap().is_empty());
    assert_eq!(store.list_workspaces().unwrap().len(), 1);
}

#[test]
fn test_nested_clone_listed_by_its_identifier() {
    let temp = TempDir::new().unwrap();
    let store = WorkspaceStore::new(WorkspaceRoot::new(temp.path().join("temp_repos")));
    let origin = TestOrigin::new();

    let cloned = store.clone_repo(&origin.url(), "main", Some("team/proj")).unwrap();
    fs::create_dir_all(temp.path().join("temp_repos/team/notes")).unwrap();

    let mut listed: Vec<_> = store
        .list_workspaces()
        .unwrap()
        .into_iter()
        .map(|r| (r.local_path, r.is_repository))
        .collect();
    listed.sort();

    assert_eq!(
        listed,
        vec![("team/notes".to_string(), false), (cloned.local_path, true)]
    );
}

#[test]
fn test_prune_nested_workspace_keeps_siblings() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("temp_repos");
    let store = WorkspaceStore::new(WorkspaceRoot::new(root.as_path()));
    let origin = TestOrigin::new();
    store.clone_repo(&origin.url(), "main", Some("team/old")).unwrap();
    std::thread::sleep(Duration::from_millis(20));
    store.clone_repo(&origin.url(), "main", Some("team/new")).unwrap();

    let removed = store
        .prune(&EvictionPolicy {
            max_age: None,
            max_count: Some(1),
        })
        .unwrap();
    assert_eq!(removed, vec!["team/old"]);
    assert!(root.join("team/new/.git").is_dir());

    store
        .prune(&EvictionPolicy {
            max_age: None,
            max_count: Some(0),
        })
        .unwrap();
    assert!(!root.join("team").exists());
    assert!(store.list_workspaces().unwrap().is_empty());
}
