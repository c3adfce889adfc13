//! FileStore trait definition
//!
//! This trait defines the interface for WebDAV file-storage operations.
//! It decouples the transfer engines from the HTTP client so they can be
//! exercised against a fake server in tests.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Kind of a remote entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A server-reported file or directory descriptor, snapshotted at listing time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Path relative to the user's files root
    pub path: String,

    /// File or directory
    pub kind: EntryKind,

    /// Content length for files; aggregate quota-used bytes for directories
    pub size_bytes: u64,

    /// Last-modified timestamp, in whatever format the server sent it
    pub last_modified: String,
}

impl RemoteEntry {
    /// Create a new RemoteEntry for a file
    pub fn file(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
            size_bytes,
            last_modified: String::new(),
        }
    }

    /// Create a new RemoteEntry for a directory
    pub fn dir(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            size_bytes,
            last_modified: String::new(),
        }
    }

    pub fn with_last_modified(mut self, stamp: impl Into<String>) -> Self {
        self.last_modified = stamp.into();
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Trait for WebDAV file-storage operations
///
/// Implemented by the dav adapter and faked in engine tests. One instance is
/// an authenticated session: connecting performs the login check, and every
/// operation reuses the same credential binding for the life of the run.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Create a remote directory.
    ///
    /// An existing directory surfaces as `Error::Conflict`; attempting to
    /// replace an entry surfaces as `Error::AlreadyExists`.
    async fn mkdir(&self, path: &str) -> Result<()>;

    /// Fetch metadata for a single remote path.
    async fn stat(&self, path: &str) -> Result<RemoteEntry>;

    /// List the immediate children of a remote directory, in server order.
    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>>;

    /// Upload one local file into the remote directory, chunked.
    async fn put_file(&self, remote_dir: &str, local: &Path) -> Result<()>;

    /// Upload a local directory tree into the remote directory, chunked.
    ///
    /// Fails with `Error::AlreadyExists` when the destination already holds
    /// an entry named after the source directory.
    async fn put_directory(&self, remote_dir: &str, local: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_entry_file() {
        let entry = RemoteEntry::file("Documents/notes.txt", 1024);
        assert_eq!(entry.path, "Documents/notes.txt");
        assert_eq!(entry.size_bytes, 1024);
        assert!(!entry.is_dir());
    }

    #[test]
    fn test_remote_entry_dir() {
        let entry = RemoteEntry::dir("Documents/Photos/", 4096);
        assert_eq!(entry.path, "Documents/Photos/");
        assert_eq!(entry.size_bytes, 4096);
        assert!(entry.is_dir());
    }

    #[test]
    fn test_with_last_modified() {
        let entry =
            RemoteEntry::file("a.txt", 1).with_last_modified("Tue, 06 Jan 2026 10:00:00 GMT");
        assert_eq!(entry.last_modified, "Tue, 06 Jan 2026 10:00:00 GMT");
    }
}
