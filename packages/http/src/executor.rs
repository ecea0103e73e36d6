//! HTTP execution abstraction for testing.
//!
//! This module provides a trait for HTTP execution that can be mocked in tests,
//! avoiding the need for actual network calls.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use httpfs_core::{DIRECTORY_MARKER, DIRECTORY_MARKER_VALUE};

use crate::error::Error;
use crate::types::{HttpRequest, HttpResponse};

/// Trait for executing HTTP requests.
///
/// Implementations can use real HTTP clients or mock responses for testing.
/// An `Err` means no HTTP response was obtained at all; every status code,
/// including errors, is returned as `Ok`.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Production HTTP executor using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Create a new executor with the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, Error> {
        Self::new(Duration::from_secs(30))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let method: http::Method = request.method.into();
        let mut req_builder = self.client.request(method, request.url.clone());

        if request.directory_marker {
            req_builder = req_builder.header(DIRECTORY_MARKER, DIRECTORY_MARKER_VALUE);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header(CONTENT_TYPE, "application/octet-stream")
                .body(body.clone());
        }

        let response = req_builder.send().await?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            status_text,
            headers,
            body,
        })
    }
}
