//! HTTP services for agent tooling
//!
//! Two independent services share this crate:
//!
//! ```text
//! [ Agent / HTTP client ]
//!        | (JSON over HTTP)
//!        v
//! [ repo-mcp: git service (/mcp/git)   code service (/mcp/code) ]
//!        |                                   |
//!        v                                   v
//! [ repo-git + repo-fs ]               [ repo-lint ]
//!        |                                   |
//!        +--> workspace root on disk         +--> flake8 subprocess
//! ```
//!
//! Handlers parse the request, delegate to the library crates, and hand the
//! result to [`Error`] for the single translation into an HTTP status.

pub mod code_service;
pub mod config;
pub mod error;
pub mod git_service;
pub mod protocol;
pub mod server;

pub use config::{CommonArgs, ServiceConfig};
pub use error::{Error, Result};
pub use server::{init_tracing, serve};
