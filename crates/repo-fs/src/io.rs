//! Thin I/O helpers that attach the offending path to errors

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Create a directory and all of its parents.
pub fn ensure_dir(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::create_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Remove a directory tree if it exists.
///
/// Returns `true` when something was removed.
pub fn remove_tree(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::symlink_metadata(&native_path) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))?;
            Ok(true)
        }
        Ok(_) => {
            fs::remove_file(&native_path).map_err(|e| Error::io(&native_path, e))?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}
