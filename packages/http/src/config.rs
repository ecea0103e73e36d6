//! Client configuration.
//!
//! Where the values come from (files, environment, UI settings) is up to the
//! caller; the client only needs them to exist before it is constructed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Settings a [`FileSystemClient`](crate::FileSystemClient) is built from.
///
/// Only the two roots are required; the rest fall back to the defaults of
/// [`ClientConfig`].
pub trait HttpFsConfig {
    /// Root URL of the remote file store.
    fn server_root(&self) -> &str;

    /// Local directory downloads are written below.
    fn local_root(&self) -> &Path;

    fn timeout(&self) -> Duration {
        Duration::from_secs(default_timeout_secs())
    }

    fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::default()
    }

    fn download_mode(&self) -> DownloadMode {
        DownloadMode::default()
    }

    /// Check the values a client needs before it is built.
    fn validate(&self) -> Result<(), Error> {
        if self.server_root().trim().is_empty() {
            return Err(Error::Config {
                message: "server_root must not be empty".to_string(),
            });
        }
        if self.timeout().is_zero() {
            return Err(Error::Config {
                message: "timeout must be at least one second".to_string(),
            });
        }
        Ok(())
    }
}

/// What an upload does when its create-empty-file step is refused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPolicy {
    /// Send the content `PUT` anyway; the server may still accept it as an
    /// overwrite of an existing file.
    #[default]
    AlwaysPut,
    /// Report the create status and skip the `PUT`.
    AbortOnCreateFailure,
}

/// How downloaded bodies are written locally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadMode {
    /// Write the body byte for byte.
    #[default]
    Raw,
    /// Decode the body as UTF-8, replacing invalid sequences, and write the
    /// resulting text. Not suitable for binary files.
    Text,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Configuration for [`FileSystemClient`](crate::FileSystemClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub server_root: String,
    pub local_root: PathBuf,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout: u64,

    #[serde(default)]
    pub upload_policy: UploadPolicy,

    #[serde(default)]
    pub download_mode: DownloadMode,
}

impl ClientConfig {
    pub fn new(server_root: impl Into<String>, local_root: impl Into<PathBuf>) -> Self {
        Self {
            server_root: server_root.into(),
            local_root: local_root.into(),
            timeout: default_timeout_secs(),
            upload_policy: UploadPolicy::default(),
            download_mode: DownloadMode::default(),
        }
    }

    /// Read a configuration from JSON.
    ///
    /// ```rust
    /// use httpfs_http::{ClientConfig, UploadPolicy};
    ///
    /// let config = ClientConfig::from_json(
    ///     r#"{"server_root": "http://localhost:8080", "local_root": "/tmp/httpfs",
    ///         "upload_policy": "abort_on_create_failure"}"#,
    /// ).unwrap();
    /// assert_eq!(config.upload_policy, UploadPolicy::AbortOnCreateFailure);
    /// assert_eq!(config.timeout, 30);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.as_secs();
        self
    }

    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.upload_policy = policy;
        self
    }

    pub fn with_download_mode(mut self, mode: DownloadMode) -> Self {
        self.download_mode = mode;
        self
    }

}

impl HttpFsConfig for ClientConfig {
    fn server_root(&self) -> &str {
        &self.server_root
    }

    fn local_root(&self) -> &Path {
        &self.local_root
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    fn upload_policy(&self) -> UploadPolicy {
        self.upload_policy
    }

    fn download_mode(&self) -> DownloadMode {
        self.download_mode
    }
}
