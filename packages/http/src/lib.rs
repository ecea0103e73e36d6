//! # httpfs-http
//!
//! Client for file stores served over plain HTTP.
//!
//! The server distinguishes directories from files with a custom
//! `is-directory` header and lists a directory as newline-delimited entries,
//! folders ending in `/`. This crate maps filesystem operations onto that
//! convention.
//!
//! ## Client Types
//!
//! ### FileSystemClient
//!
//! Async client, one method per filesystem action:
//!
//! ```ignore
//! use httpfs_core::{CollectingReporter, RemotePath};
//! use httpfs_http::{ClientConfig, FileSystemClient};
//!
//! let client = FileSystemClient::new(&ClientConfig::new("http://localhost:8080", "/tmp/httpfs"))?;
//! let reporter = CollectingReporter::new();
//!
//! client.create_directory(&RemotePath::new("/photos"), Some(&reporter)).await?;
//! client.upload_file(&RemotePath::new("/photos/cat.png"), "cat.png".as_ref(), Some(&reporter)).await?;
//! ```
//!
//! ### Browser
//!
//! Keeps a current remote directory and resolves user-chosen names against it:
//!
//! ```ignore
//! use httpfs_http::Browser;
//!
//! let mut browser = Browser::new(client);
//! browser.refresh(None).await?;
//! browser.navigate("docs/", None).await?;
//! browser.download("guide.md", None).await?; // -> <local_root>/docs/guide.md
//! ```
//!
//! ### BlockingFileSystemClient
//!
//! The same operations for synchronous callers (feature `blocking`).

pub mod browser;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod local;
pub mod types;

#[cfg(feature = "blocking")]
pub mod blocking;

// Re-export main types
pub use browser::Browser;
pub use client::FileSystemClient;
pub use config::{ClientConfig, DownloadMode, HttpFsConfig, UploadPolicy};
pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use local::{DiskStore, LocalStore, MemoryStore};
pub use types::{HttpRequest, HttpResponse, Method};

pub use httpfs_core::{
    CollectingReporter, DirectoryListing, ErrorReporter, Outcome, RemotePath, ResourceKind,
    StatusLine,
};
