//! Workspace root and containment checks
//!
//! Every caller-supplied relative path is validated here before it touches
//! the filesystem: absolute paths and `..` segments that climb above the base
//! are rejected, and the deepest existing part of the target is canonicalized
//! so a symlink cannot lead outside the base either.

use std::fs;

use crate::{Error, NormalizedPath, Result, io};

/// The directory that holds every cloned workspace.
///
/// Passed explicitly into each component instead of living in a global, so
/// tests can point it at a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
    root: NormalizedPath,
}

impl WorkspaceRoot {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory itself.
    pub fn path(&self) -> &NormalizedPath {
        &self.root
    }

    /// Create the root directory if it does not exist yet.
    pub fn ensure_exists(&self) -> Result<()> {
        io::ensure_dir(&self.root)
    }

    /// Resolve a workspace identifier (relative to the root) to its directory.
    ///
    /// The identifier must name something strictly below the root.
    pub fn workspace(&self, id: &str) -> Result<NormalizedPath> {
        if normalize_relative(id)?.is_empty() {
            return Err(Error::invalid_path(id, "workspace path must not be empty"));
        }
        resolve_within(&self.root, id)
    }

    /// Resolve `relative` inside the workspace `id`.
    ///
    /// An empty `relative` resolves to the workspace directory itself.
    pub fn resolve_in(&self, id: &str, relative: &str) -> Result<NormalizedPath> {
        let workspace = self.workspace(id)?;
        resolve_within(&workspace, relative)
    }
}

/// Lexically normalize a caller-supplied relative path.
///
/// Returns the cleaned path (possibly empty) or `InvalidPath` when the input
/// is absolute or escapes its base through `..`.
pub fn normalize_relative(input: &str) -> Result<String> {
    let unified = input.replace('\\', "/");

    if unified.starts_with('/') || has_drive_prefix(&unified) {
        return Err(Error::invalid_path(input, "absolute paths are not allowed"));
    }

    let mut stack: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    return Err(Error::invalid_path(input, "path escapes its base directory"));
                }
            }
            other => stack.push(other),
        }
    }

    Ok(stack.join("/"))
}

/// Join `relative` onto `base`, guaranteeing the result stays inside `base`.
pub fn resolve_within(base: &NormalizedPath, relative: &str) -> Result<NormalizedPath> {
    let cleaned = normalize_relative(relative)?;
    let resolved = if cleaned.is_empty() {
        base.clone()
    } else {
        base.join(&cleaned)
    };

    // Lexical containment holds by construction; links are checked on disk.
    check_links(base, &resolved, relative)?;

    Ok(resolved)
}

/// Reject `resolved` when its nearest existing ancestor (itself, if it
/// exists) canonicalizes to somewhere outside `base`.
///
/// A target that does not exist yet is judged by the directory it would be
/// created in, so a symlinked parent cannot redirect writes.
fn check_links(base: &NormalizedPath, resolved: &NormalizedPath, relative: &str) -> Result<()> {
    // Nothing below a missing base can exist yet.
    let Ok(real_base) = dunce::canonicalize(base.to_native()) else {
        return Ok(());
    };

    let native = resolved.to_native();
    let Some(existing) = native
        .ancestors()
        .find(|p| !p.as_os_str().is_empty() && fs::symlink_metadata(p).is_ok())
    else {
        return Ok(());
    };

    // A dangling link cannot be proven to stay inside.
    let escapes = match dunce::canonicalize(existing) {
        Ok(real_target) => !real_target.starts_with(&real_base),
        Err(_) => true,
    };
    if escapes {
        tracing::warn!(
            base = %base,
            path = %relative,
            target = %existing.display(),
            "Rejected path resolving outside its base"
        );
        return Err(Error::invalid_path(
            relative,
            "path resolves outside its base directory",
        ));
    }

    Ok(())
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
