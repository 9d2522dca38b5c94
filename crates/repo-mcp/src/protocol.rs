//! Request and response bodies of both services.
//!
//! Shared with the HTTP client in `repo-agent`, so responses derive both
//! `Serialize` and `Deserialize`.

use repo_fs::DirEntry;
use repo_git::{StatusSnapshot, WorkspaceRecord};
use repo_lint::StyleIssue;
use serde::{Deserialize, Serialize};

/// Branch cloned when the request names none.
pub const DEFAULT_BRANCH: &str = "main";

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

// ----------------------------------------------------------------------------
// Git service requests
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneRepoRequest {
    pub repo_url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Relative to the workspace root
    #[serde(default)]
    pub local_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoPathRequest {
    pub repo_local_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContentRequest {
    pub repo_local_path: String,
    pub file_path_in_repo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListContentsRequest {
    pub repo_local_path: String,
    #[serde(default)]
    pub path_in_repo: String,
}

/// Eviction policy; omitted limits do not apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PruneRequest {
    #[serde(default)]
    pub max_age_secs: Option<u64>,
    #[serde(default)]
    pub max_count: Option<usize>,
}

// ----------------------------------------------------------------------------
// Git service responses
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneResponse {
    pub success: bool,
    pub message: String,
    pub local_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
    pub data: StatusSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadFileResponse {
    pub success: bool,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListContentsResponse {
    pub success: bool,
    pub contents: Vec<DirEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspacesResponse {
    pub success: bool,
    pub workspaces: Vec<WorkspaceRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PruneResponse {
    pub success: bool,
    pub message: String,
    pub removed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHealthResponse {
    pub success: bool,
    pub message: String,
}

// ----------------------------------------------------------------------------
// Code service
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeContentRequest {
    pub code_content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleAnalysisResponse {
    pub success: bool,
    pub message: String,
    pub feedback: Vec<String>,
    #[serde(default)]
    pub issues: Vec<StyleIssue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeHealthResponse {
    pub status: String,
    pub service: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
