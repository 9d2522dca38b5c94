//! End-to-end flows across the workspace
//!
//! Configuration file -> services on ephemeral ports -> agent tools, with a
//! local origin repository standing in for the remote.

use std::fs;
use std::path::Path;

use axum::Router;
use pretty_assertions::assert_eq;
use repo_agent::{AgentError, GitTools};
use repo_git::WorkspaceStore;
use repo_mcp::{ServiceConfig, git_service};
use repo_test_utils::{TestOrigin, git};
use tempfile::TempDir;
use tokio::net::TcpListener;

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Git service configured from a TOML file whose workspace root lives in `dir`.
async fn git_service_from_file(dir: &Path) -> (ServiceConfig, GitTools) {
    let config_path = dir.join("services.toml");
    let root = dir.join("workspaces");
    fs::write(
        &config_path,
        format!(
            "workspace_root = {:?}\nclone_timeout_secs = 120\n",
            root.to_string_lossy()
        ),
    )
    .unwrap();

    let config = ServiceConfig::load(Some(config_path.as_path())).unwrap();
    let store = WorkspaceStore::new(config.workspace_root()).with_clone_options(config.clone_options());
    let url = spawn(git_service::router(store)).await;
    (config, GitTools::new(&url))
}

#[tokio::test]
async fn test_clone_inspect_and_browse() {
    let temp = TempDir::new().unwrap();
    let (config, tools) = git_service_from_file(temp.path()).await;
    let origin = TestOrigin::new();

    let local_path = tools.clone_repo(&origin.url(), Some("main"), None).await.unwrap();
    assert!(config.workspace_root.join(&local_path).join(".git").is_dir());

    // Status is read-only: asking twice gives the same answer
    let first = tools.get_repo_status(&local_path).await.unwrap();
    let second = tools.get_repo_status(&local_path).await.unwrap();
    assert_eq!(first, second);
    assert!(first.contains("Is dirty: false"));
    assert!(first.contains("Uncommitted changes: 0"));

    let listing = tools.list_repo_contents(&local_path, "").await.unwrap();
    assert!(listing.contains("- .git (directory)"));
    assert!(listing.contains("- README.md (file)"));
    assert!(listing.contains("- src (directory)"));

    let readme = tools.read_file_content(&local_path, "README.md").await.unwrap();
    assert_eq!(readme, origin.read("README.md"));

    let err = tools.read_file_content(&local_path, "src").await.unwrap_err();
    assert!(matches!(err, AgentError::Service { status: 404, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_status_follows_local_work() {
    let temp = TempDir::new().unwrap();
    let (config, tools) = git_service_from_file(temp.path()).await;
    let origin = TestOrigin::new();

    let local_path = tools.clone_repo(&origin.url(), None, Some("work")).await.unwrap();
    let clone_dir = config.workspace_root.join(&local_path);

    fs::remove_file(clone_dir.join("src/app.py")).unwrap();
    fs::write(clone_dir.join("scratch.txt"), "notes\n").unwrap();

    let status = tools.get_repo_status(&local_path).await.unwrap();
    assert!(status.contains("Is dirty: true"));
    assert!(status.contains("Deleted files: [src/app.py]"));
    assert!(status.contains("Untracked files: 1"));

    let repo = git2::Repository::open(&clone_dir).unwrap();
    git::commit_files(&repo, &[("scratch.txt", "notes\n")], "Add scratch notes");

    let status = tools.get_repo_status(&local_path).await.unwrap();
    assert!(status.contains("Untracked files: 0"));
    assert!(status.ends_with("Last commit message: Add scratch notes"));
}

#[tokio::test]
async fn test_reclone_replaces_workspace() {
    let temp = TempDir::new().unwrap();
    let (config, tools) = git_service_from_file(temp.path()).await;
    let origin = TestOrigin::new();

    tools.clone_repo(&origin.url(), None, Some("shared")).await.unwrap();
    let leftover = config.workspace_root.join("shared/leftover.txt");
    fs::write(&leftover, "stale\n").unwrap();

    origin.commit(&[("CHANGELOG.md", "## 0.2\n")], "Release 0.2");
    tools.clone_repo(&origin.url(), None, Some("shared")).await.unwrap();

    assert!(!leftover.exists());
    let changelog = tools.read_file_content("shared", "CHANGELOG.md").await.unwrap();
    assert_eq!(changelog, "## 0.2\n");
}

#[tokio::test]
async fn test_paths_cannot_leave_the_workspace_root() {
    let temp = TempDir::new().unwrap();
    let (_config, tools) = git_service_from_file(temp.path()).await;
    fs::write(temp.path().join("services.secret"), "hunter2\n").unwrap();

    let err = tools
        .read_file_content("../", "services.secret")
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Service { status: 400, .. }), "got {err:?}");

    let err = tools
        .clone_repo("file:///nowhere", None, Some("../escape"))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Service { status: 400, .. }), "got {err:?}");
    assert!(!temp.path().join("escape").exists());
}
