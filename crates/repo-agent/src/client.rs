//! Shared request plumbing

use repo_mcp::protocol::ErrorBody;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{AgentError, Result};

/// Default base URL of the git service.
pub const DEFAULT_GIT_SERVICE_URL: &str = "http://localhost:8000";

/// Default base URL of the code analysis service.
pub const DEFAULT_CODE_SERVICE_URL: &str = "http://localhost:8001";

/// Where the two services live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub git: String,
    pub code: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            git: DEFAULT_GIT_SERVICE_URL.to_string(),
            code: DEFAULT_CODE_SERVICE_URL.to_string(),
        }
    }
}

impl ServiceEndpoints {
    /// Read `MCP_GIT_SERVICE_URL` and `MCP_CODE_SERVICE_URL`, falling back
    /// to the local defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            git: lookup("MCP_GIT_SERVICE_URL").unwrap_or(defaults.git),
            code: lookup("MCP_CODE_SERVICE_URL").unwrap_or(defaults.code),
        }
    }
}

/// JSON client bound to one service's base URL.
#[derive(Debug, Clone)]
pub(crate) struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub(crate) fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    pub(crate) async fn post<B, T>(&self, route: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(route, "Calling service");
        let response = self.http.post(self.url(route)).json(body).send().await?;
        decode(response).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<T> {
        tracing::debug!(route, "Calling service");
        let response = self.http.get(self.url(route)).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let detail = serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|body| body.detail)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
        tracing::warn!(status = status.as_u16(), detail = %detail, "Service call failed");
        return Err(AgentError::Service {
            status: status.as_u16(),
            detail,
        });
    }

    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_fall_back_to_defaults() {
        let endpoints = ServiceEndpoints::from_lookup(|_| None);
        assert_eq!(endpoints, ServiceEndpoints::default());
    }

    #[test]
    fn test_endpoints_from_lookup() {
        let endpoints = ServiceEndpoints::from_lookup(|key| match key {
            "MCP_GIT_SERVICE_URL" => Some("http://git:9000".to_string()),
            _ => None,
        });
        assert_eq!(endpoints.git, "http://git:9000");
        assert_eq!(endpoints.code, DEFAULT_CODE_SERVICE_URL);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ServiceClient::new(reqwest::Client::new(), "http://localhost:8000/");
        assert_eq!(client.url("/mcp/git/health"), "http://localhost:8000/mcp/git/health");
    }
}
