//! Credential resolution
//!
//! Credentials are a `{url, username, password}` JSON record. They come from
//! the explicit flag triple, an explicit config file, or a default config
//! file sitting next to the executable — first match wins, no mixing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the default credential file, looked up beside the executable
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Server URL and login for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Base URL of the Nextcloud/WebDAV server
    pub url: String,

    /// Login username
    pub username: String,

    /// Login password or app token
    pub password: String,
}

impl Credentials {
    /// Load credentials from a JSON config file.
    ///
    /// A file missing any of the three fields is a fatal configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file {}: {e}", path.display())))
    }

    /// Path of the default config file, next to the running executable.
    pub fn default_path() -> Result<PathBuf> {
        let exe = std::env::current_exe()?;
        let dir = exe
            .parent()
            .ok_or_else(|| Error::Config("cannot determine executable directory".into()))?;
        Ok(dir.join(DEFAULT_CONFIG_FILE))
    }
}

/// Resolve credentials from CLI inputs.
///
/// Precedence: the complete `--server`/`--user`/`--password` triple, then an
/// explicit `--config` file, then the default config file. A partial explicit
/// triple without a config file is rejected rather than silently ignored.
pub fn resolve(
    server: Option<&str>,
    user: Option<&str>,
    password: Option<&str>,
    config_file: Option<&Path>,
) -> Result<Credentials> {
    if let (Some(url), Some(username), Some(password)) = (server, user, password) {
        tracing::debug!("using credentials from command-line flags");
        return Ok(Credentials {
            url: url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        });
    }

    if let Some(path) = config_file {
        tracing::debug!(path = %path.display(), "using credentials from config file");
        return Credentials::load(path);
    }

    if server.is_none() && user.is_none() && password.is_none() {
        let path = Credentials::default_path()?;
        tracing::debug!(path = %path.display(), "using credentials from default config file");
        return Credentials::load(&path);
    }

    Err(Error::Config(
        "incomplete credentials: supply all of --server, --user and --password, \
         or use a config file"
            .into(),
    ))
}
