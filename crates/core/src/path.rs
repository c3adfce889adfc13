//! Remote path helpers
//!
//! Remote paths are `/`-separated strings relative to the user's files root.
//! Upload destinations are always directories and carry exactly one trailing
//! slash; helpers here keep that invariant in one place.

use std::path::Path;

use crate::error::{Error, Result};

/// Normalize a destination to a directory path with a trailing slash.
///
/// Appends exactly one `/` when missing; a path that already ends in `/`
/// is returned unchanged, so the operation is idempotent.
pub fn ensure_dir_path(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Join a child name onto a directory path.
pub fn join_dir(dir: &str, child: &str) -> String {
    format!("{}{child}", ensure_dir_path(dir))
}

/// Final component of a remote path, with a `/` suffix for directories.
///
/// This is the name printed in listings, mirroring `ls`.
pub fn entry_name(path: &str, is_dir: bool) -> String {
    let trimmed = path.trim_end_matches('/');
    let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
    if is_dir {
        format!("{name}/")
    } else {
        name.to_string()
    }
}

/// File name of a local path as a UTF-8 string.
///
/// Paths like `..` or `/` have no final component and cannot be uploaded
/// under a remote name.
pub fn local_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidPath(format!("{} has no file name", path.display())))
}
