//! ncup-core: Core library for the ncup Nextcloud/WebDAV CLI client
//!
//! This crate provides the core functionality for the ncup CLI, including:
//! - Credential resolution and config-file loading
//! - Remote path normalization
//! - The FileStore trait for server operations
//! - ls-style size formatting and listing rendering
//!
//! This crate is independent of any HTTP implementation, allowing the
//! transfer engines to be tested against a fake server.

pub mod credentials;
pub mod error;
pub mod format;
pub mod path;
pub mod store;

pub use credentials::{resolve as resolve_credentials, Credentials, DEFAULT_CONFIG_FILE};
pub use error::{Error, Result};
pub use format::{list_rows, render_entries, render_rows, sizeof_fmt, ListRow};
pub use path::{ensure_dir_path, entry_name, join_dir, local_file_name};
pub use store::{EntryKind, FileStore, RemoteEntry};
