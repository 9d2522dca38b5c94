//! Read-only access to files and directories inside a workspace

use std::fs;
use std::io::ErrorKind;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, WorkspaceRoot};

/// Kind of a directory listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a directory listing, relative to the listed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Read a UTF-8 file from a workspace.
///
/// # Errors
/// - `NotFound` if nothing exists at the resolved path
/// - `NotAFile` if it is a directory
/// - `Access` for any other read failure, including invalid UTF-8
pub fn read_file(root: &WorkspaceRoot, workspace: &str, file_path: &str) -> Result<String> {
    let path = root.resolve_in(workspace, file_path)?;
    let display = display_path(workspace, file_path);

    if !path.exists() {
        return Err(Error::NotFound { path: display });
    }
    if !path.is_file() {
        return Err(Error::NotAFile { path: display });
    }

    fs::read_to_string(path.to_native()).map_err(|source| Error::Access {
        path: display,
        source,
    })
}

/// List a directory inside a workspace.
///
/// Entries are sorted by name so repeated calls and different platforms
/// produce the same order. Symlinks are classified by what they point to.
pub fn list_directory(root: &WorkspaceRoot, workspace: &str, dir_path: &str) -> Result<Vec<DirEntry>> {
    let path = root.resolve_in(workspace, dir_path)?;
    let display = display_path(workspace, dir_path);

    if !path.exists() {
        return Err(Error::NotFound { path: display });
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory { path: display });
    }

    let read_dir = fs::read_dir(path.to_native()).map_err(|source| Error::Access {
        path: display.clone(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| Error::Access {
            path: display.clone(),
            source,
        })?;
        let kind = if entry.path().is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let name = entry.file_name().into_string().map_err(|raw| Error::Access {
            path: display.clone(),
            source: std::io::Error::new(
                ErrorKind::InvalidData,
                format!("entry name is not valid UTF-8: {}", raw.to_string_lossy()),
            ),
        })?;
        entries.push(DirEntry { name, kind });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn display_path(workspace: &str, relative: &str) -> String {
    let relative = relative.trim_matches('/');
    if relative.is_empty() {
        workspace.to_string()
    } else {
        format!("{}/{}", workspace.trim_end_matches('/'), relative)
    }
}
