//! ncup-dav: WebDAV adapter for the ncup CLI client
//!
//! This crate provides the implementation of the FileStore trait over
//! HTTP/WebDAV using reqwest. It is the only crate that talks to the
//! network.

pub mod chunked;
pub mod client;
pub mod xml;

pub use client::WebDavClient;
