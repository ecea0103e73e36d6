//! Blocking facade over [`FileSystemClient`].
//!
//! Each call drives the async operation to completion on a runtime owned by
//! the facade. Do not use it from inside an async context; wrap calls in
//! `tokio::task::spawn_blocking` there.

use std::path::{Path, PathBuf};

use tokio::runtime::Runtime;

use bytes::Bytes;
use httpfs_core::{DirectoryListing, ErrorReporter, Outcome, RemotePath};

use crate::client::FileSystemClient;
use crate::config::HttpFsConfig;
use crate::error::Error;

/// A synchronous file store client
///
/// # Example
///
/// ```ignore
/// use httpfs_core::RemotePath;
/// use httpfs_http::blocking::BlockingFileSystemClient;
/// use httpfs_http::ClientConfig;
///
/// let client = BlockingFileSystemClient::new(&ClientConfig::new("http://localhost:8080", "/tmp"))?;
/// let listing = client.list_directory(&RemotePath::root(), None)?;
/// ```
pub struct BlockingFileSystemClient {
    client: FileSystemClient,
    runtime: Runtime,
}

impl BlockingFileSystemClient {
    pub fn new<C: HttpFsConfig + ?Sized>(config: &C) -> Result<Self, Error> {
        Self::with_client(FileSystemClient::new(config)?)
    }

    /// Wrap an existing async client.
    pub fn with_client(client: FileSystemClient) -> Result<Self, Error> {
        let runtime = Runtime::new()?;
        Ok(Self { client, runtime })
    }

    pub fn client(&self) -> &FileSystemClient {
        &self.client
    }

    pub fn list_directory(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<DirectoryListing>, Error> {
        self.runtime
            .block_on(self.client.list_directory(path, reporter))
    }

    pub fn download_file(
        &self,
        path: &RemotePath,
        to: &Path,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.runtime
            .block_on(self.client.download_file(path, to, reporter))
    }

    pub fn download(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<PathBuf>, Error> {
        self.runtime.block_on(self.client.download(path, reporter))
    }

    pub fn upload_file(
        &self,
        to: &RemotePath,
        from: &Path,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.runtime
            .block_on(self.client.upload_file(to, from, reporter))
    }

    pub fn upload_bytes(
        &self,
        to: &RemotePath,
        bytes: impl Into<Bytes>,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.runtime
            .block_on(self.client.upload_bytes(to, bytes, reporter))
    }

    pub fn create_empty_file(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.runtime
            .block_on(self.client.create_empty_file(path, reporter))
    }

    pub fn create_directory(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.runtime
            .block_on(self.client.create_directory(path, reporter))
    }

    pub fn delete_file(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.runtime.block_on(self.client.delete_file(path, reporter))
    }

    pub fn delete_directory(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.runtime
            .block_on(self.client.delete_directory(path, reporter))
    }

    /// Delete several files, still concurrently, blocking until all finish.
    pub fn delete_files(
        &self,
        paths: &[RemotePath],
        reporter: Option<&dyn ErrorReporter>,
    ) -> Vec<Result<Outcome<()>, Error>> {
        self.runtime
            .block_on(self.client.delete_files(paths, reporter))
    }

    pub fn delete_directories(
        &self,
        paths: &[RemotePath],
        reporter: Option<&dyn ErrorReporter>,
    ) -> Vec<Result<Outcome<()>, Error>> {
        self.runtime
            .block_on(self.client.delete_directories(paths, reporter))
    }
}
