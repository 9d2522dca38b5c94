//! Filesystem layer for the MCP services
//!
//! Provides normalized path handling, workspace-root containment checks
//! and the read-only file accessor used by the git service.

pub mod access;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod workspace;

pub use access::{DirEntry, EntryKind, list_directory, read_file};
pub use config::ConfigStore;
pub use constants::RepoPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use workspace::{WorkspaceRoot, normalize_relative, resolve_within};
