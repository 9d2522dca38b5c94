//! Git service tools

use repo_fs::DirEntry;
use repo_git::StatusSnapshot;
use repo_mcp::protocol::{
    CloneRepoRequest, CloneResponse, DEFAULT_BRANCH, FileContentRequest, GitHealthResponse,
    ListContentsRequest, ListContentsResponse, ReadFileResponse, RepoPathRequest, StatusResponse,
};

use crate::Result;
use crate::client::ServiceClient;

/// Tools backed by the git service.
#[derive(Debug, Clone)]
pub struct GitTools {
    client: ServiceClient,
}

impl GitTools {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            client: ServiceClient::new(http, base_url),
        }
    }

    /// Clone a repository; returns the workspace identifier.
    ///
    /// `branch` defaults to `main`.
    pub async fn clone_repo(
        &self,
        repo_url: &str,
        branch: Option<&str>,
        local_path: Option<&str>,
    ) -> Result<String> {
        let request = CloneRepoRequest {
            repo_url: repo_url.to_string(),
            branch: branch.unwrap_or(DEFAULT_BRANCH).to_string(),
            local_path: local_path.map(str::to_string),
        };
        let response: CloneResponse = self.client.post("/mcp/git/clone", &request).await?;
        Ok(response.local_path)
    }

    /// Status of a workspace as a multi-line summary.
    pub async fn get_repo_status(&self, repo_local_path: &str) -> Result<String> {
        let request = RepoPathRequest {
            repo_local_path: repo_local_path.to_string(),
        };
        let response: StatusResponse = self.client.post("/mcp/git/status", &request).await?;
        Ok(format_status(repo_local_path, &response.data))
    }

    /// Content of one file.
    pub async fn read_file_content(
        &self,
        repo_local_path: &str,
        file_path_in_repo: &str,
    ) -> Result<String> {
        let request = FileContentRequest {
            repo_local_path: repo_local_path.to_string(),
            file_path_in_repo: file_path_in_repo.to_string(),
        };
        let response: ReadFileResponse = self.client.post("/mcp/git/read_file", &request).await?;
        Ok(response.content)
    }

    /// Directory listing as one `- name (type)` line per entry.
    pub async fn list_repo_contents(
        &self,
        repo_local_path: &str,
        path_in_repo: &str,
    ) -> Result<String> {
        let request = ListContentsRequest {
            repo_local_path: repo_local_path.to_string(),
            path_in_repo: path_in_repo.to_string(),
        };
        let response: ListContentsResponse =
            self.client.post("/mcp/git/list_contents", &request).await?;
        Ok(format_listing(repo_local_path, path_in_repo, &response.contents))
    }

    /// Whether the service answers its health check.
    pub async fn health(&self) -> Result<bool> {
        let response: GitHealthResponse = self.client.get("/mcp/git/health").await?;
        Ok(response.success)
    }
}

fn format_list(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

pub(crate) fn format_status(repo_local_path: &str, status: &StatusSnapshot) -> String {
    format!(
        "Repository status for {repo_local_path}:\n\
         Branch: {}\n\
         Is dirty: {}\n\
         Uncommitted changes: {}\n\
         Untracked files: {}\n\
         Modified files: {}\n\
         Deleted files: {}\n\
         Last commit message: {}",
        status.branch,
        status.is_dirty,
        status.uncommitted_changes_count,
        status.untracked_files_count,
        format_list(&status.modified_files),
        format_list(&status.deleted_files),
        status.last_commit_message,
    )
}

pub(crate) fn format_listing(repo_local_path: &str, path_in_repo: &str, entries: &[DirEntry]) -> String {
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| format!("- {} ({})", entry.name, entry.kind))
        .collect();
    format!("Contents of {repo_local_path}/{path_in_repo}:\n{}", lines.join("\n"))
}
