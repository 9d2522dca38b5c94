//! Code analysis service tools

use repo_mcp::protocol::{CodeContentRequest, CodeHealthResponse, StyleAnalysisResponse};

use crate::Result;
use crate::client::ServiceClient;

/// Tools backed by the code analysis service.
#[derive(Debug, Clone)]
pub struct CodeAnalysisTools {
    client: ServiceClient,
}

impl CodeAnalysisTools {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            client: ServiceClient::new(http, base_url),
        }
    }

    /// Style feedback for `code`, one line per finding.
    pub async fn analyse_style(&self, code: &str) -> Result<String> {
        let request = CodeContentRequest {
            code_content: code.to_string(),
        };
        let response: StyleAnalysisResponse =
            self.client.post("/mcp/code/analyse_style", &request).await?;
        Ok(response.feedback.join("\n"))
    }

    /// Whether the service answers its health check.
    pub async fn health(&self) -> Result<bool> {
        let response: CodeHealthResponse = self.client.get("/mcp/code/health").await?;
        Ok(response.status == "ok")
    }
}
