//! Git workspace service
//!
//! Every operation touches git or the filesystem synchronously, so handlers
//! move the work onto the blocking pool.

use std::time::Duration;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use repo_fs::{list_directory, read_file};
use repo_git::{EvictionPolicy, WorkspaceStore};
use tokio::task;

use crate::protocol::{
    CloneRepoRequest, CloneResponse, FileContentRequest, GitHealthResponse, ListContentsRequest,
    ListContentsResponse, PruneRequest, PruneResponse, ReadFileResponse, RepoPathRequest,
    StatusResponse, WorkspacesResponse,
};
use crate::Result;

/// Routes of the git service, all under `/mcp/git`.
pub fn router(store: WorkspaceStore) -> Router {
    Router::new()
        .route("/mcp/git/clone", post(clone_repo))
        .route("/mcp/git/status", post(status))
        .route("/mcp/git/read_file", post(read_file_content))
        .route("/mcp/git/list_contents", post(list_contents))
        .route("/mcp/git/workspaces", get(workspaces))
        .route("/mcp/git/prune", post(prune))
        .route("/mcp/git/health", get(health))
        .with_state(store)
}

async fn clone_repo(
    State(store): State<WorkspaceStore>,
    body: std::result::Result<Json<CloneRepoRequest>, JsonRejection>,
) -> Result<Json<CloneResponse>> {
    let Json(req) = body?;
    tracing::info!(url = %req.repo_url, branch = %req.branch, "Clone requested");

    let cloned = task::spawn_blocking(move || {
        store.clone_repo(&req.repo_url, &req.branch, req.local_path.as_deref())
    })
    .await??;

    Ok(Json(CloneResponse {
        success: true,
        message: format!("Repository cloned successfully to {}", cloned.local_path),
        local_path: cloned.local_path,
    }))
}

async fn status(
    State(store): State<WorkspaceStore>,
    body: std::result::Result<Json<RepoPathRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>> {
    let Json(req) = body?;
    tracing::info!(workspace = %req.repo_local_path, "Status requested");

    let data = task::spawn_blocking(move || store.status(&req.repo_local_path)).await??;

    Ok(Json(StatusResponse {
        success: true,
        message: "Repository status retrieved successfully".to_string(),
        data,
    }))
}

async fn read_file_content(
    State(store): State<WorkspaceStore>,
    body: std::result::Result<Json<FileContentRequest>, JsonRejection>,
) -> Result<Json<ReadFileResponse>> {
    let Json(req) = body?;
    tracing::info!(
        workspace = %req.repo_local_path,
        file = %req.file_path_in_repo,
        "File read requested"
    );

    let content = task::spawn_blocking(move || {
        read_file(store.root(), &req.repo_local_path, &req.file_path_in_repo)
    })
    .await??;

    Ok(Json(ReadFileResponse {
        success: true,
        content,
    }))
}

async fn list_contents(
    State(store): State<WorkspaceStore>,
    body: std::result::Result<Json<ListContentsRequest>, JsonRejection>,
) -> Result<Json<ListContentsResponse>> {
    let Json(req) = body?;
    tracing::info!(
        workspace = %req.repo_local_path,
        path = %req.path_in_repo,
        "Listing requested"
    );

    let contents = task::spawn_blocking(move || {
        list_directory(store.root(), &req.repo_local_path, &req.path_in_repo)
    })
    .await??;

    Ok(Json(ListContentsResponse {
        success: true,
        contents,
    }))
}

async fn workspaces(State(store): State<WorkspaceStore>) -> Result<Json<WorkspacesResponse>> {
    let workspaces = task::spawn_blocking(move || store.list_workspaces()).await??;

    Ok(Json(WorkspacesResponse {
        success: true,
        workspaces,
    }))
}

async fn prune(
    State(store): State<WorkspaceStore>,
    body: std::result::Result<Json<PruneRequest>, JsonRejection>,
) -> Result<Json<PruneResponse>> {
    let Json(req) = body?;
    let policy = EvictionPolicy {
        max_age: req.max_age_secs.map(Duration::from_secs),
        max_count: req.max_count,
    };
    tracing::info!(?policy, "Prune requested");

    let removed = task::spawn_blocking(move || store.prune(&policy)).await??;

    Ok(Json(PruneResponse {
        success: true,
        message: format!("Removed {} workspace(s)", removed.len()),
        removed,
    }))
}

async fn health() -> Json<GitHealthResponse> {
    Json(GitHealthResponse {
        success: true,
        message: "MCP Git Service is running".to_string(),
    })
}
