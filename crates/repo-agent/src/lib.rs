//! Agent-facing tools for the MCP services
//!
//! Each tool issues one HTTP request to the git or code analysis service and
//! renders the response as the text an agent reads. Service failures come
//! back as [`AgentError::Service`] carrying the service's `detail`.
//!
//! Base URLs come from `MCP_GIT_SERVICE_URL` and `MCP_CODE_SERVICE_URL`
//! (see [`ServiceEndpoints::from_env`]).

pub mod client;
pub mod code;
pub mod error;
pub mod git;

pub use client::ServiceEndpoints;
pub use code::CodeAnalysisTools;
pub use error::{AgentError, Result};
pub use git::GitTools;
