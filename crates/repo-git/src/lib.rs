//! Git layer for the MCP git service
//!
//! Clones repositories into a workspace root, reports their status, and keeps
//! the root from growing without bound.

pub mod clone;
pub mod error;
pub mod naming;
pub mod registry;
pub mod status;
pub mod store;

pub use clone::CloneOptions;
pub use error::{Error, Result};
pub use naming::workspace_name_from_url;
pub use registry::{EvictionPolicy, WorkspaceRecord};
pub use status::{NO_COMMITS_YET, StatusSnapshot};
pub use store::{ClonedWorkspace, WorkspaceStore};
