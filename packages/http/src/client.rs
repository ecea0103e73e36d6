//! The file store client.
//!
//! Each filesystem action maps onto one HTTP method plus the directory marker:
//!
//! ```text
//! list_directory      GET     marker expected in response
//! download_file       GET     marker must be absent from response
//! create_empty_file   POST
//! create_directory    POST    marker sent
//! upload_file         POST, then PUT with the content
//! delete_file         DELETE
//! delete_directory    DELETE  marker sent
//! ```
//!
//! Only `200 OK` is success. Any other status is handed to the optional
//! [`ErrorReporter`] and returned as [`Outcome::Failed`]. A marker that
//! contradicts what list or download expected is raised as
//! [`Error::ProtocolMismatch`] before the status is looked at.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use futures::future::join_all;
use url::Url;

use httpfs_core::{DirectoryListing, ErrorReporter, Outcome, RemotePath, ResourceKind};

use crate::config::{DownloadMode, HttpFsConfig, UploadPolicy};
use crate::error::Error;
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::local::{DiskStore, LocalStore};
use crate::types::{HttpRequest, HttpResponse, Method};

/// Client for an HTTP file store.
///
/// Holds no per-request state: clones share the transport and local store
/// and can be used from several tasks at once.
///
/// # Example
///
/// ```ignore
/// use httpfs_core::RemotePath;
/// use httpfs_http::{ClientConfig, FileSystemClient};
///
/// let client = FileSystemClient::new(&ClientConfig::new("http://localhost:8080", "/tmp/httpfs"))?;
///
/// let report = |code: u16, description: &str| eprintln!("{} {}", code, description);
/// if let Some(listing) = client.list_directory(&RemotePath::root(), Some(&report)).await?.success() {
///     for folder in listing.folders() {
///         println!("{}", folder);
///     }
/// }
/// ```
#[derive(Clone)]
pub struct FileSystemClient {
    base_url: Url,
    local_root: PathBuf,
    executor: Arc<dyn HttpExecutor>,
    local: Arc<dyn LocalStore>,
    upload_policy: UploadPolicy,
    download_mode: DownloadMode,
}

impl FileSystemClient {
    /// Create a client talking HTTP through reqwest and writing to disk.
    pub fn new<C: HttpFsConfig + ?Sized>(config: &C) -> Result<Self, Error> {
        config.validate()?;
        let executor = ReqwestExecutor::new(config.timeout())?;
        Self::with_parts(config, Arc::new(executor), Arc::new(DiskStore))
    }

    /// Create a client with a custom transport and local store.
    pub fn with_parts<C: HttpFsConfig + ?Sized>(
        config: &C,
        executor: Arc<dyn HttpExecutor>,
        local: Arc<dyn LocalStore>,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(config.server_root())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                message: format!("{} cannot be used as a server root", config.server_root()),
            });
        }

        Ok(Self {
            base_url,
            local_root: config.local_root().to_path_buf(),
            executor,
            local,
            upload_policy: config.upload_policy(),
            download_mode: config.download_mode(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn local_root(&self) -> &Path {
        &self.local_root
    }

    /// Build the full URL for a remote path.
    ///
    /// Segments are appended to the server root and percent-encoded; a
    /// trailing `/` on the remote path is kept. `.` and `..` segments are
    /// refused rather than resolved.
    pub fn build_url(&self, path: &RemotePath) -> Result<Url, Error> {
        path.validate()?;
        if path.is_root() {
            return Ok(self.base_url.clone());
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| Error::InvalidUrl {
                message: format!("{} cannot be used as a server root", self.base_url),
            })?;
            segments.pop_if_empty().extend(path.segments());
            if path.has_directory_hint() {
                segments.push("");
            }
        }
        Ok(url)
    }

    /// Where a remote path lands below the local root.
    pub fn local_destination(&self, path: &RemotePath) -> Result<PathBuf, Error> {
        Ok(path.local_path(&self.local_root)?)
    }

    /// List a remote directory.
    ///
    /// Fails with [`Error::ProtocolMismatch`] when the server does not mark
    /// the resource as a directory, whatever the status or body.
    pub async fn list_directory(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<DirectoryListing>, Error> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        expect_kind(path, &response, ResourceKind::Directory)?;

        if !response.is_ok() {
            return Ok(report(path, &response, reporter));
        }

        let listing = if response.body.is_empty() {
            DirectoryListing::empty()
        } else {
            DirectoryListing::parse(&response.text())
        };
        tracing::trace!(
            path = %path,
            folders = listing.folders().len(),
            files = listing.files().len(),
            "listed directory"
        );
        Ok(Outcome::Success(listing))
    }

    /// Download a remote file to the local path `to`.
    ///
    /// Fails with [`Error::ProtocolMismatch`] when the server marks the
    /// resource as a directory, whatever the status. The parent of `to` is
    /// created when missing.
    pub async fn download_file(
        &self,
        path: &RemotePath,
        to: &Path,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        expect_kind(path, &response, ResourceKind::File)?;

        if !response.is_ok() {
            return Ok(report(path, &response, reporter));
        }

        if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.local.ensure_directory_exists(parent).await?;
        }

        match self.download_mode {
            DownloadMode::Raw => self.local.write_all_bytes(to, &response.body).await?,
            DownloadMode::Text => {
                let text = response.text();
                self.local.write_all_bytes(to, text.as_bytes()).await?
            }
        }
        Ok(Outcome::Success(()))
    }

    /// Download a remote file to its mirror location below the local root.
    ///
    /// Returns the local path written.
    pub async fn download(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<PathBuf>, Error> {
        let to = self.local_destination(path)?;
        let outcome = self.download_file(path, &to, reporter).await?;
        Ok(outcome.map(|()| to))
    }

    /// Upload a local file to the remote path `to`.
    pub async fn upload_file(
        &self,
        to: &RemotePath,
        from: &Path,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        let bytes = self.local.read_all_bytes(from).await?;
        self.upload_bytes(to, bytes, reporter).await
    }

    /// Upload `bytes` to the remote path `to`.
    ///
    /// Sends a create-empty-file `POST` whose status is not reported, then a
    /// `PUT` with the content. Only the `PUT` reaches `reporter`, unless the
    /// client's [`UploadPolicy`] stops after a refused `POST`.
    pub async fn upload_bytes(
        &self,
        to: &RemotePath,
        bytes: impl Into<Bytes>,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        if let Outcome::Failed(status) = self.create_empty_file(to, None).await? {
            tracing::warn!(path = %to, status = %status, "create before upload failed");
            if self.upload_policy == UploadPolicy::AbortOnCreateFailure {
                return Ok(Outcome::reported(status, reporter));
            }
        }

        let request = self.request(Method::PUT, to)?.with_body(bytes);
        let response = self.send(request).await?;
        Ok(finish(to, &response, reporter))
    }

    /// Create a zero-length remote file.
    pub async fn create_empty_file(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.mutate(Method::POST, ResourceKind::File, path, reporter)
            .await
    }

    /// Create a remote directory.
    pub async fn create_directory(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.mutate(Method::POST, ResourceKind::Directory, path, reporter)
            .await
    }

    pub async fn delete_file(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.delete(path, ResourceKind::File, reporter).await
    }

    /// Delete a remote directory. What happens to its contents is up to the
    /// server.
    pub async fn delete_directory(
        &self,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.delete(path, ResourceKind::Directory, reporter).await
    }

    pub async fn delete(
        &self,
        path: &RemotePath,
        kind: ResourceKind,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.mutate(Method::DELETE, kind, path, reporter).await
    }

    /// Delete several files concurrently.
    ///
    /// Every deletion runs to completion on its own; one result per path is
    /// returned in input order and failures reach `reporter` independently.
    pub async fn delete_files(
        &self,
        paths: &[RemotePath],
        reporter: Option<&dyn ErrorReporter>,
    ) -> Vec<Result<Outcome<()>, Error>> {
        join_all(paths.iter().map(|path| self.delete_file(path, reporter))).await
    }

    /// Delete several directories concurrently. See [`Self::delete_files`].
    pub async fn delete_directories(
        &self,
        paths: &[RemotePath],
        reporter: Option<&dyn ErrorReporter>,
    ) -> Vec<Result<Outcome<()>, Error>> {
        join_all(paths.iter().map(|path| self.delete_directory(path, reporter))).await
    }

    async fn mutate(
        &self,
        method: Method,
        kind: ResourceKind,
        path: &RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        let request = self.request(method, path)?.for_kind(kind);
        let response = self.send(request).await?;
        Ok(finish(path, &response, reporter))
    }

    fn request(&self, method: Method, path: &RemotePath) -> Result<HttpRequest, Error> {
        Ok(HttpRequest::new(method, self.build_url(path)?, path.clone()))
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        tracing::debug!(
            method = ?request.method,
            url = %request.url,
            directory = request.directory_marker,
            "sending request"
        );
        self.executor.execute(&request).await
    }
}

fn expect_kind(
    path: &RemotePath,
    response: &HttpResponse,
    expected: ResourceKind,
) -> Result<(), Error> {
    let found = response.kind();
    if found != expected {
        return Err(Error::ProtocolMismatch {
            path: path.clone(),
            expected,
            found,
        });
    }
    Ok(())
}

fn finish(
    path: &RemotePath,
    response: &HttpResponse,
    reporter: Option<&dyn ErrorReporter>,
) -> Outcome<()> {
    if response.is_ok() {
        Outcome::Success(())
    } else {
        report(path, response, reporter)
    }
}

fn report<T>(
    path: &RemotePath,
    response: &HttpResponse,
    reporter: Option<&dyn ErrorReporter>,
) -> Outcome<T> {
    tracing::warn!(
        path = %path,
        status = response.status,
        "remote operation failed: {}",
        response.status_text
    );
    Outcome::reported(response.status_line(), reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::executor::mock::MockExecutor;
    use crate::local::MemoryStore;
    use httpfs_core::{CollectingReporter, StatusLine};

    fn client_with(executor: &MockExecutor, local: &MemoryStore) -> FileSystemClient {
        client_with_config(
            ClientConfig::new("http://files.test/root/", "/local"),
            executor,
            local,
        )
    }

    fn client_with_config(
        config: ClientConfig,
        executor: &MockExecutor,
        local: &MemoryStore,
    ) -> FileSystemClient {
        FileSystemClient::with_parts(&config, Arc::new(executor.clone()), Arc::new(local.clone()))
            .unwrap()
    }

    fn path(s: &str) -> RemotePath {
        RemotePath::new(s)
    }

    #[test]
    fn build_url_appends_segments() {
        let client = client_with(&MockExecutor::new(), &MemoryStore::new());

        assert_eq!(
            client.build_url(&path("/docs/readme.md")).unwrap().as_str(),
            "http://files.test/root/docs/readme.md"
        );
        assert_eq!(
            client.build_url(&path("docs/")).unwrap().as_str(),
            "http://files.test/root/docs/"
        );
        assert_eq!(
            client.build_url(&RemotePath::root()).unwrap().as_str(),
            "http://files.test/root/"
        );
        assert_eq!(
            client.build_url(&path("/my file#1.txt")).unwrap().as_str(),
            "http://files.test/root/my%20file%231.txt"
        );
    }

    #[test]
    fn build_url_without_trailing_slash_on_root() {
        let config = ClientConfig::new("http://files.test/root", "/local");
        let client = client_with_config(config, &MockExecutor::new(), &MemoryStore::new());
        assert_eq!(
            client.build_url(&path("a.txt")).unwrap().as_str(),
            "http://files.test/root/a.txt"
        );
    }

    #[test]
    fn rejects_non_base_server_root() {
        let config = ClientConfig::new("mailto:someone@example.com", "/local");
        let result = FileSystemClient::with_parts(
            &config,
            Arc::new(MockExecutor::new()),
            Arc::new(MemoryStore::new()),
        );
        assert!(matches!(result, Err(Error::InvalidUrl { .. })));
    }

    struct Roots {
        server: String,
        local: PathBuf,
    }

    impl HttpFsConfig for Roots {
        fn server_root(&self) -> &str {
            &self.server
        }

        fn local_root(&self) -> &Path {
            &self.local
        }
    }

    #[tokio::test]
    async fn builds_from_any_config_with_two_roots() {
        let roots = Roots {
            server: "http://files.test/share/".to_string(),
            local: PathBuf::from("/mirror"),
        };
        let executor = MockExecutor::new().with_default_response(MockExecutor::file(b"x"));
        let client = FileSystemClient::with_parts(
            &roots,
            Arc::new(executor.clone()),
            Arc::new(MemoryStore::new()),
        )
        .unwrap();

        assert_eq!(client.base_url().as_str(), "http://files.test/share/");
        assert_eq!(client.local_root(), Path::new("/mirror"));

        let written = client.download(&path("/a.txt"), None).await.unwrap();
        assert_eq!(written, Outcome::Success(PathBuf::from("/mirror/a.txt")));
    }

    #[test]
    fn reqwest_client_validates_trait_config() {
        let roots = Roots {
            server: "  ".to_string(),
            local: PathBuf::from("/mirror"),
        };
        assert!(matches!(
            FileSystemClient::new(&roots),
            Err(Error::Config { .. })
        ));
    }

    #[tokio::test]
    async fn list_parses_directory_body() {
        let executor = MockExecutor::new().with_response(
            Method::GET,
            "/",
            MockExecutor::directory("docs/\nreadme.md\n"),
        );
        let client = client_with(&executor, &MemoryStore::new());

        let listing = client
            .list_directory(&RemotePath::root(), None)
            .await
            .unwrap()
            .success()
            .unwrap();

        assert_eq!(listing.folders(), &[path("docs/")]);
        assert_eq!(listing.files(), &[path("readme.md")]);
    }

    #[tokio::test]
    async fn list_with_empty_body_is_empty() {
        let executor =
            MockExecutor::new().with_response(Method::GET, "/empty", MockExecutor::directory(""));
        let client = client_with(&executor, &MemoryStore::new());

        let listing = client
            .list_directory(&path("/empty"), None)
            .await
            .unwrap()
            .success()
            .unwrap();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn list_without_marker_is_mismatch_whatever_the_status() {
        for response in [MockExecutor::file(b"docs/\n"), MockExecutor::not_found()] {
            let executor = MockExecutor::new().with_response(Method::GET, "/a.txt", response);
            let client = client_with(&executor, &MemoryStore::new());
            let reporter = CollectingReporter::new();

            let err = client
                .list_directory(&path("/a.txt"), Some(&reporter))
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                Error::ProtocolMismatch {
                    expected: ResourceKind::Directory,
                    found: ResourceKind::File,
                    ..
                }
            ));
            assert!(reporter.is_empty());
        }
    }

    #[tokio::test]
    async fn list_failure_is_reported() {
        let mut forbidden = MockExecutor::directory("");
        forbidden.status = 403;
        forbidden.status_text = "Forbidden".to_string();
        let executor = MockExecutor::new().with_response(Method::GET, "/secret/", forbidden);
        let client = client_with(&executor, &MemoryStore::new());
        let reporter = CollectingReporter::new();

        let outcome = client
            .list_directory(&path("/secret/"), Some(&reporter))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Failed(StatusLine::new(403, "Forbidden")));
        assert_eq!(reporter.failures(), vec![StatusLine::new(403, "Forbidden")]);
    }

    #[tokio::test]
    async fn download_writes_bytes_and_creates_parent() {
        let body = [0u8, 159, 146, 150, 255];
        let executor =
            MockExecutor::new().with_response(Method::GET, "/docs/a.bin", MockExecutor::file(&body));
        let local = MemoryStore::new();
        let client = client_with(&executor, &local);

        let written = client
            .download(&path("/docs/a.bin"), None)
            .await
            .unwrap()
            .success()
            .unwrap();

        assert_eq!(written, Path::new("/local/docs/a.bin"));
        assert!(local.has_directory(Path::new("/local/docs")));
        assert_eq!(local.file(&written), Some(body.to_vec()));
    }

    #[tokio::test]
    async fn download_in_text_mode_decodes_lossily() {
        let executor = MockExecutor::new().with_response(
            Method::GET,
            "/a.txt",
            MockExecutor::file(b"caf\xc3\xa9\xff"),
        );
        let local = MemoryStore::new();
        let config = ClientConfig::new("http://files.test/", "/local")
            .with_download_mode(DownloadMode::Text);
        let client = client_with_config(config, &executor, &local);

        client
            .download_file(&path("/a.txt"), Path::new("/out/a.txt"), None)
            .await
            .unwrap();

        assert_eq!(
            local.file(Path::new("/out/a.txt")),
            Some("café\u{fffd}".as_bytes().to_vec())
        );
    }

    #[tokio::test]
    async fn download_of_directory_is_mismatch_and_writes_nothing() {
        let mut missing = MockExecutor::directory("");
        missing.status = 404;
        for response in [MockExecutor::directory("a\n"), missing] {
            let executor = MockExecutor::new().with_response(Method::GET, "/docs", response);
            let local = MemoryStore::new();
            let client = client_with(&executor, &local);

            let err = client
                .download_file(&path("/docs"), Path::new("/out/docs"), None)
                .await
                .unwrap_err();

            assert!(err.is_protocol_mismatch());
            assert!(!local.has_directory(Path::new("/out")));
            assert_eq!(local.file(Path::new("/out/docs")), None);
        }
    }

    #[tokio::test]
    async fn download_failure_is_reported_and_writes_nothing() {
        let executor = MockExecutor::new();
        let local = MemoryStore::new();
        let client = client_with(&executor, &local);
        let reporter = CollectingReporter::new();

        let outcome = client
            .download_file(&path("/gone.txt"), Path::new("/out/gone.txt"), Some(&reporter))
            .await
            .unwrap();

        assert!(outcome.is_failed());
        assert_eq!(reporter.failures(), vec![StatusLine::new(404, "Not Found")]);
        assert!(!local.has_directory(Path::new("/out")));
    }

    #[tokio::test]
    async fn download_refuses_escaping_local_root() {
        let executor = MockExecutor::new().with_default_response(MockExecutor::file(b"x"));
        let client = client_with(&executor, &MemoryStore::new());

        let err = client.download(&path("../../etc/passwd"), None).await.unwrap_err();
        assert!(matches!(err, Error::Path(_)));
        assert!(executor.recorded_requests().is_empty());
    }

    #[test]
    fn build_url_refuses_relative_segments() {
        let client = client_with(&MockExecutor::new(), &MemoryStore::new());

        assert!(matches!(
            client.build_url(&path("/docs/../secret.txt")),
            Err(Error::Path(_))
        ));
        assert!(matches!(client.build_url(&path("/a/./b")), Err(Error::Path(_))));
    }

    #[tokio::test]
    async fn relative_segments_send_no_request() {
        let executor = MockExecutor::new().with_default_response(MockExecutor::ok());
        let client = client_with(&executor, &MemoryStore::new());
        let reporter = CollectingReporter::new();
        let escaping = path("/docs/../secret.txt");

        let listed = client.list_directory(&path("/docs/../"), Some(&reporter)).await;
        assert!(matches!(listed, Err(Error::Path(_))));

        let created = client.create_empty_file(&escaping, Some(&reporter)).await;
        assert!(matches!(created, Err(Error::Path(_))));

        let deleted = client.delete_file(&escaping, Some(&reporter)).await;
        assert!(matches!(deleted, Err(Error::Path(_))));

        let uploaded = client
            .upload_bytes(&escaping, b"secret".to_vec(), Some(&reporter))
            .await;
        assert!(matches!(uploaded, Err(Error::Path(_))));

        assert!(executor.recorded_requests().is_empty());
        assert!(reporter.is_empty());
    }

    #[tokio::test]
    async fn mutating_operations_use_method_and_marker() {
        let executor = MockExecutor::new().with_default_response(MockExecutor::ok());
        let client = client_with(&executor, &MemoryStore::new());

        assert!(client.create_empty_file(&path("/a"), None).await.unwrap().is_success());
        assert!(client.create_directory(&path("/b"), None).await.unwrap().is_success());
        assert!(client.delete_file(&path("/c"), None).await.unwrap().is_success());
        assert!(client.delete_directory(&path("/d"), None).await.unwrap().is_success());

        let recorded: Vec<_> = executor
            .recorded_requests()
            .into_iter()
            .map(|r| (r.method, r.path.to_string(), r.directory_marker))
            .collect();
        assert_eq!(
            recorded,
            vec![
                (Method::POST, "/a".to_string(), false),
                (Method::POST, "/b".to_string(), true),
                (Method::DELETE, "/c".to_string(), false),
                (Method::DELETE, "/d".to_string(), true),
            ]
        );
    }

    #[tokio::test]
    async fn mutating_failure_reports_exactly_once() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::error_response(409, "Conflict"));
        let client = client_with(&executor, &MemoryStore::new());
        let target = path("/x");
        let conflict = vec![StatusLine::new(409, "Conflict")];

        let reporter = CollectingReporter::new();
        let outcome = client.create_empty_file(&target, Some(&reporter)).await.unwrap();
        assert!(outcome.is_failed());
        assert_eq!(reporter.failures(), conflict);

        let reporter = CollectingReporter::new();
        let outcome = client.create_directory(&target, Some(&reporter)).await.unwrap();
        assert!(outcome.is_failed());
        assert_eq!(reporter.failures(), conflict);

        let reporter = CollectingReporter::new();
        let outcome = client.delete_file(&target, Some(&reporter)).await.unwrap();
        assert!(outcome.is_failed());
        assert_eq!(reporter.failures(), conflict);

        let reporter = CollectingReporter::new();
        let outcome = client.delete_directory(&target, Some(&reporter)).await.unwrap();
        assert!(outcome.is_failed());
        assert_eq!(reporter.failures(), conflict);

        assert_eq!(executor.recorded_requests().len(), 4);
    }

    #[tokio::test]
    async fn success_does_not_report() {
        let executor = MockExecutor::new().with_default_response(MockExecutor::ok());
        let client = client_with(&executor, &MemoryStore::new());
        let reporter = CollectingReporter::new();

        let _ = client.delete_file(&path("/a"), Some(&reporter)).await.unwrap();
        assert!(reporter.is_empty());
    }

    #[tokio::test]
    async fn upload_posts_then_puts_and_reports_only_put() {
        let executor = MockExecutor::new()
            .with_response(
                Method::POST,
                "/up.bin",
                MockExecutor::error_response(409, "Conflict"),
            )
            .with_response(
                Method::PUT,
                "/up.bin",
                MockExecutor::error_response(507, "Insufficient Storage"),
            );
        let client = client_with(&executor, &MemoryStore::new());
        let reporter = CollectingReporter::new();

        let outcome = client
            .upload_bytes(&path("/up.bin"), vec![1u8, 2, 3], Some(&reporter))
            .await
            .unwrap();

        assert!(outcome.is_failed());
        assert_eq!(
            reporter.failures(),
            vec![StatusLine::new(507, "Insufficient Storage")]
        );

        let recorded = executor.recorded_requests();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].method, Method::POST);
        assert!(recorded[0].body.is_none());
        assert_eq!(recorded[1].method, Method::PUT);
        assert_eq!(recorded[1].body.as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[tokio::test]
    async fn upload_can_stop_after_refused_create() {
        let executor = MockExecutor::new().with_response(
            Method::POST,
            "/up.bin",
            MockExecutor::error_response(403, "Forbidden"),
        );
        let config = ClientConfig::new("http://files.test/", "/local")
            .with_upload_policy(UploadPolicy::AbortOnCreateFailure);
        let client = client_with_config(config, &executor, &MemoryStore::new());
        let reporter = CollectingReporter::new();

        let outcome = client
            .upload_bytes(&path("/up.bin"), Bytes::from_static(b"x"), Some(&reporter))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Failed(StatusLine::new(403, "Forbidden")));
        assert_eq!(reporter.failures(), vec![StatusLine::new(403, "Forbidden")]);
        assert_eq!(executor.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn upload_file_reads_local_bytes() {
        let executor = MockExecutor::new().with_default_response(MockExecutor::ok());
        let local = MemoryStore::new().with_file("/home/me/photo.png", vec![9u8, 8, 7]);
        let client = client_with(&executor, &local);

        let outcome = client
            .upload_file(&path("/pics/photo.png"), Path::new("/home/me/photo.png"), None)
            .await
            .unwrap();

        assert!(outcome.is_success());
        let recorded = executor.recorded_requests();
        assert_eq!(recorded[1].body.as_deref(), Some(&[9u8, 8, 7][..]));
    }

    #[tokio::test]
    async fn upload_of_missing_local_file_sends_nothing() {
        let executor = MockExecutor::new().with_default_response(MockExecutor::ok());
        let client = client_with(&executor, &MemoryStore::new());

        let err = client
            .upload_file(&path("/a"), Path::new("/nope"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(executor.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn batch_delete_continues_past_failure() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::ok())
            .with_response(
                Method::DELETE,
                "/b",
                MockExecutor::error_response(500, "Internal Server Error"),
            );
        let client = client_with(&executor, &MemoryStore::new());
        let reporter = CollectingReporter::new();

        let results = client
            .delete_files(&[path("/a"), path("/b"), path("/c")], Some(&reporter))
            .await;

        let outcomes: Vec<bool> = results
            .into_iter()
            .map(|r| r.unwrap().is_success())
            .collect();
        assert_eq!(outcomes, vec![true, false, true]);
        assert_eq!(
            reporter.failures(),
            vec![StatusLine::new(500, "Internal Server Error")]
        );
        assert_eq!(executor.recorded_requests().len(), 3);
    }

    #[tokio::test]
    async fn batch_delete_directories_sends_marker() {
        let executor = MockExecutor::new().with_default_response(MockExecutor::ok());
        let client = client_with(&executor, &MemoryStore::new());

        let results = client
            .delete_directories(&[path("/x/"), path("/y/")], None)
            .await;

        assert!(results.iter().all(|r| matches!(r, Ok(Outcome::Success(())))));
        assert!(executor
            .recorded_requests()
            .iter()
            .all(|r| r.directory_marker && r.method == Method::DELETE));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let executor = MockExecutor::new().fail_with("connection refused");
        let client = client_with(&executor, &MemoryStore::new());
        let reporter = CollectingReporter::new();

        let err = client
            .delete_file(&path("/a"), Some(&reporter))
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert!(reporter.is_empty());
        assert_eq!(executor.recorded_requests().len(), 1);
    }
}
