//! WebDAV client implementation
//!
//! Wraps reqwest and implements the FileStore trait from ncup-core.
//! All requests go to the user's files root
//! (`{server}/remote.php/dav/files/{username}/`) with basic auth.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::{Method, StatusCode};
use tokio::io::AsyncReadExt;
use url::Url;

use ncup_core::{
    ensure_dir_path, join_dir, local_file_name, Credentials, EntryKind, Error, FileStore,
    RemoteEntry, Result,
};

use crate::chunked::{chunk_byte_range, chunk_count, chunk_name, DEFAULT_CHUNK_SIZE};
use crate::xml::{parse_multistatus, DavResponse};

const PROPFIND_BODY: &str = r#"<?xml version="1.0"?>
<d:propfind xmlns:d="DAV:">
  <d:prop>
    <d:resourcetype/>
    <d:getcontentlength/>
    <d:getlastmodified/>
    <d:quota-used-bytes/>
  </d:prop>
</d:propfind>"#;

/// WebDAV client bound to one server and login
pub struct WebDavClient {
    http: reqwest::Client,
    files_root: Url,
    username: String,
    password: String,
    chunk_size: u64,
}

impl WebDavClient {
    /// Build a client for the given credentials without contacting the server.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;

        let mut files_root = Url::parse(&credentials.url)?;
        files_root
            .path_segments_mut()
            .map_err(|_| Error::Config(format!("server URL {} cannot be a base", credentials.url)))?
            .pop_if_empty()
            .extend(["remote.php", "dav", "files", &credentials.username])
            // Trailing slash marks the collection form of the URL.
            .push("");

        Ok(Self {
            http,
            files_root,
            username: credentials.username.clone(),
            password: credentials.password.clone(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Build a client and validate the login eagerly.
    ///
    /// A Depth-0 PROPFIND on the files root fails fast on bad credentials or
    /// an unreachable server, before any transfer logic runs.
    pub async fn connect(credentials: &Credentials) -> Result<Self> {
        let client = Self::new(credentials)?;
        client.propfind("", "0").await?;
        tracing::debug!(url = %client.files_root, "authenticated");
        Ok(client)
    }

    /// Override the chunk size (mainly for tests and tuning).
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Request URL for a remote path, percent-encoding each segment.
    fn url_for(&self, path: &str) -> Result<Url> {
        let mut url = self.files_root.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::Config("server URL cannot be a base".into()))?;
            segments.pop_if_empty();
            for part in path.split('/').filter(|p| !p.is_empty()) {
                segments.push(part);
            }
            if path.ends_with('/') || path.is_empty() {
                segments.push("");
            }
        }
        Ok(url)
    }

    /// Send a request with auth, mapping failure statuses to named outcomes.
    async fn send(&self, request: reqwest::RequestBuilder, path: &str) -> Result<reqwest::Response> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(status_error(status, path))
        }
    }

    async fn propfind(&self, path: &str, depth: &str) -> Result<Vec<DavResponse>> {
        tracing::debug!(path, depth, "PROPFIND");
        let url = self.url_for(path)?;
        let response = self
            .send(
                self.http
                    .request(dav_method("PROPFIND"), url)
                    .header("Depth", depth)
                    .header("Content-Type", "application/xml")
                    .body(PROPFIND_BODY),
                path,
            )
            .await?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        parse_multistatus(&body)
    }

    /// Map a multistatus response onto the core entry model.
    fn to_entry(&self, response: &DavResponse) -> RemoteEntry {
        let path = self.entry_path(&response.href);
        let (kind, size_bytes) = if response.is_collection {
            (EntryKind::Directory, response.quota_used_bytes.unwrap_or(0))
        } else {
            (EntryKind::File, response.content_length.unwrap_or(0))
        };
        RemoteEntry {
            path,
            kind,
            size_bytes,
            last_modified: response.last_modified.clone(),
        }
    }

    /// Decode an href and strip the files-root prefix.
    fn entry_path(&self, href: &str) -> String {
        let decoded = percent_decode_str(href).decode_utf8_lossy().into_owned();
        let root = percent_decode_str(self.files_root.path())
            .decode_utf8_lossy()
            .into_owned();
        decoded
            .strip_prefix(&root)
            .map(str::to_string)
            .unwrap_or(decoded)
    }

    /// Single-request upload for payloads that fit in one chunk.
    async fn put_whole(&self, remote_path: &str, data: Vec<u8>) -> Result<()> {
        let url = self.url_for(remote_path)?;
        self.send(self.http.request(Method::PUT, url).body(data), remote_path)
            .await?;
        Ok(())
    }

    /// Chunked upload: sequential PUTs of bounded pieces, reassembled by the
    /// server once the last one arrives.
    async fn put_chunked(&self, remote_dir: &str, remote_name: &str, local: &Path) -> Result<()> {
        let total = tokio::fs::metadata(local).await?.len();
        let count = chunk_count(total, self.chunk_size);
        let transfer_id = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut file = tokio::fs::File::open(local).await?;
        for index in 0..count {
            let (start, end) = chunk_byte_range(index, self.chunk_size, total);
            let mut buf = vec![0u8; (end - start) as usize];
            file.read_exact(&mut buf).await?;

            let chunk_path = join_dir(remote_dir, &chunk_name(remote_name, transfer_id, count, index));
            tracing::debug!(chunk = index, count, path = %chunk_path, "uploading chunk");
            let url = self.url_for(&chunk_path)?;
            self.send(
                self.http
                    .request(Method::PUT, url)
                    .header("OC-CHUNKED", "1")
                    .header("OC-TOTAL-LENGTH", total.to_string())
                    .body(buf),
                &chunk_path,
            )
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl FileStore for WebDavClient {
    async fn mkdir(&self, path: &str) -> Result<()> {
        let path = ensure_dir_path(path);
        tracing::debug!(path, "MKCOL");
        let url = self.url_for(&path)?;
        self.send(self.http.request(dav_method("MKCOL"), url), &path)
            .await?;
        Ok(())
    }

    async fn stat(&self, path: &str) -> Result<RemoteEntry> {
        let responses = self.propfind(path, "0").await?;
        responses
            .first()
            .map(|r| self.to_entry(r))
            .ok_or_else(|| Error::Protocol(format!("empty multistatus for {path}")))
    }

    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>> {
        let dir = ensure_dir_path(path);
        let responses = self.propfind(&dir, "1").await?;
        let self_path = dir.trim_end_matches('/');
        Ok(responses
            .iter()
            .map(|r| self.to_entry(r))
            .filter(|entry| entry.path.trim_end_matches('/') != self_path)
            .collect())
    }

    async fn put_file(&self, remote_dir: &str, local: &Path) -> Result<()> {
        let name = local_file_name(local)?;
        let total = tokio::fs::metadata(local).await?.len();

        if total <= self.chunk_size {
            let data = tokio::fs::read(local).await?;
            self.put_whole(&join_dir(remote_dir, &name), data).await
        } else {
            self.put_chunked(remote_dir, &name, local).await
        }
    }

    async fn put_directory(&self, remote_dir: &str, local: &Path) -> Result<()> {
        let name = local_file_name(local)?;
        let remote_root = ensure_dir_path(&join_dir(remote_dir, &name));

        // An existing entry under this name surfaces here as AlreadyExists.
        self.mkdir(&remote_root).await?;

        let (dirs, files) = walk_local(local, local)?;
        for relative in dirs {
            self.mkdir(&join_dir(&remote_root, &relative)).await?;
        }
        for (path, relative) in files {
            let target_dir = match relative.rsplit_once('/') {
                Some((parent, _)) => join_dir(&remote_root, &format!("{parent}/")),
                None => remote_root.clone(),
            };
            self.put_file(&target_dir, &path).await?;
        }
        Ok(())
    }
}

/// Collect a directory tree as relative sub-directories and files.
///
/// Parents come before children, so remote collections can be created in
/// returned order.
fn walk_local(dir: &Path, base: &Path) -> std::io::Result<(Vec<String>, Vec<(PathBuf, String)>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let relative = path
            .strip_prefix(base)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        if path.is_dir() {
            dirs.push(format!("{relative}/"));
            let (sub_dirs, sub_files) = walk_local(&path, base)?;
            dirs.extend(sub_dirs);
            files.extend(sub_files);
        } else {
            files.push((path, relative));
        }
    }
    Ok((dirs, files))
}

fn dav_method(name: &str) -> Method {
    Method::from_bytes(name.as_bytes()).expect("valid HTTP method")
}

/// One place decides which statuses are named outcomes.
fn status_error(status: StatusCode, path: &str) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(path.to_string()),
        StatusCode::METHOD_NOT_ALLOWED => Error::AlreadyExists(path.to_string()),
        StatusCode::CONFLICT => Error::Conflict(path.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::Auth(format!("server denied access to {path}"))
        }
        s => Error::Http {
            status: s.as_u16(),
            path: path.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> WebDavClient {
        WebDavClient::new(&Credentials {
            url: "https://cloud.example".into(),
            username: "alice".into(),
            password: "pw".into(),
        })
        .unwrap()
    }

    #[test]
    fn test_files_root_url() {
        let client = test_client();
        assert_eq!(
            client.files_root.as_str(),
            "https://cloud.example/remote.php/dav/files/alice/"
        );
    }

    #[test]
    fn test_files_root_with_base_path() {
        let client = WebDavClient::new(&Credentials {
            url: "https://host.example/nextcloud/".into(),
            username: "bob".into(),
            password: "pw".into(),
        })
        .unwrap();
        assert_eq!(
            client.files_root.as_str(),
            "https://host.example/nextcloud/remote.php/dav/files/bob/"
        );
    }

    #[test]
    fn test_url_for_encodes_segments() {
        let client = test_client();
        let url = client.url_for("Documents/shopping list.txt").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.example/remote.php/dav/files/alice/Documents/shopping%20list.txt"
        );
    }

    #[test]
    fn test_url_for_keeps_directory_form() {
        let client = test_client();
        let url = client.url_for("Documents/Photos/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.example/remote.php/dav/files/alice/Documents/Photos/"
        );
    }

    #[test]
    fn test_entry_path_strips_root_and_decodes() {
        let client = test_client();
        assert_eq!(
            client.entry_path("/remote.php/dav/files/alice/Documents/shopping%20list.txt"),
            "Documents/shopping list.txt"
        );
        assert_eq!(
            client.entry_path("/remote.php/dav/files/alice/Documents/"),
            "Documents/"
        );
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "x"),
            Error::NotFound(_)
        ));
        assert!(matches!(
            status_error(StatusCode::METHOD_NOT_ALLOWED, "x"),
            Error::AlreadyExists(_)
        ));
        assert!(matches!(
            status_error(StatusCode::CONFLICT, "x"),
            Error::Conflict(_)
        ));
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "x"),
            Error::Auth(_)
        ));
        assert!(matches!(
            status_error(StatusCode::INSUFFICIENT_STORAGE, "x"),
            Error::Http { status: 507, .. }
        ));
    }

    #[test]
    fn test_walk_local_orders_parents_first() {
        let dir = tempfile::TempDir::new().unwrap();
        let base = dir.path();
        std::fs::create_dir_all(base.join("a/b")).unwrap();
        std::fs::write(base.join("top.txt"), b"x").unwrap();
        std::fs::write(base.join("a/b/deep.txt"), b"y").unwrap();

        let (dirs, files) = walk_local(base, base).unwrap();
        let a = dirs.iter().position(|d| d == "a/").unwrap();
        let b = dirs.iter().position(|d| d == "a/b/").unwrap();
        assert!(a < b);

        let names: Vec<&str> = files.iter().map(|(_, rel)| rel.as_str()).collect();
        assert!(names.contains(&"top.txt"));
        assert!(names.contains(&"a/b/deep.txt"));
    }
}
