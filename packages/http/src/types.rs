use bytes::Bytes;
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use url::Url;

use httpfs_core::{RemotePath, ResourceKind, StatusLine};

/// HTTP methods used by the file store convention
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::POST => http::Method::POST,
            Method::PUT => http::Method::PUT,
            Method::DELETE => http::Method::DELETE,
        }
    }
}

/// A request against the file store.
///
/// `url` is the fully resolved address; `path` is the remote path it was
/// resolved from, kept for logging and test matching.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub path: RemotePath,

    /// Send the directory marker header with this request
    pub directory_marker: bool,

    pub body: Option<Bytes>,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url, path: RemotePath) -> Self {
        Self {
            method,
            url,
            path,
            directory_marker: false,
            body: None,
        }
    }

    /// Mark the request as concerning a resource of `kind`.
    pub fn for_kind(mut self, kind: ResourceKind) -> Self {
        self.directory_marker = kind.carries_marker();
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Response to an [`HttpRequest`]
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,

    pub headers: HeaderMap,

    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            ..Default::default()
        }
    }

    /// What the directory marker says about the resource.
    pub fn kind(&self) -> ResourceKind {
        ResourceKind::from_header_names(self.headers.keys().map(|name| name.as_str()))
    }

    /// Only `200 OK` counts as success for file store operations.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn status_line(&self) -> StatusLine {
        StatusLine::new(self.status, self.status_text.clone())
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
