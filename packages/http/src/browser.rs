//! Navigation over a remote file store.
//!
//! A [`Browser`] remembers the current remote directory and its last
//! listing. Names picked by a user are resolved against the current
//! directory, and downloads land at `local_root/<current>/<name>`.

use std::path::{Path, PathBuf};

use httpfs_core::{DirectoryListing, ErrorReporter, Outcome, PathError, RemotePath};

use crate::client::FileSystemClient;
use crate::error::Error;

pub struct Browser {
    client: FileSystemClient,
    current: RemotePath,
    listing: DirectoryListing,
}

impl Browser {
    /// Start at the server root with an empty listing.
    pub fn new(client: FileSystemClient) -> Self {
        Self {
            client,
            current: RemotePath::root(),
            listing: DirectoryListing::empty(),
        }
    }

    pub fn client(&self) -> &FileSystemClient {
        &self.client
    }

    pub fn current(&self) -> &RemotePath {
        &self.current
    }

    /// The listing from the last successful refresh or navigation.
    pub fn listing(&self) -> &DirectoryListing {
        &self.listing
    }

    /// Resolve a user-chosen name against the current directory.
    pub fn resolve(&self, name: &str) -> Result<RemotePath, Error> {
        let name = RemotePath::parse(name)?;
        Ok(self.current.join(&name))
    }

    /// Local destination for `name` in the current directory.
    pub fn local_destination(&self, name: &str) -> Result<PathBuf, Error> {
        self.client.local_destination(&self.resolve(name)?)
    }

    /// List the current directory again.
    pub async fn refresh(
        &mut self,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        let current = self.current.clone();
        self.open(current, reporter).await
    }

    /// Enter the folder `name` of the current directory.
    ///
    /// The current directory only changes when the listing succeeds.
    pub async fn navigate(
        &mut self,
        name: &str,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        let target = self.resolve(name)?;
        self.open(target, reporter).await
    }

    /// Go to the parent of the current directory.
    pub async fn go_up(
        &mut self,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        let target = self.current.directory_of();
        self.open(target, reporter).await
    }

    async fn open(
        &mut self,
        target: RemotePath,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        let outcome = self.client.list_directory(&target, reporter).await?;
        Ok(outcome.map(|listing| {
            tracing::debug!(from = %self.current, to = %target, "changed directory");
            self.current = target;
            self.listing = listing;
        }))
    }

    /// Download `name` from the current directory below the local root.
    pub async fn download(
        &self,
        name: &str,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<PathBuf>, Error> {
        let to = self.local_destination(name)?;
        let outcome = self
            .client
            .download_file(&self.resolve(name)?, &to, reporter)
            .await?;
        Ok(outcome.map(|()| to))
    }

    /// Upload a local file into the current directory under its own name.
    ///
    /// A name that would split into several remote segments is refused.
    pub async fn upload(
        &self,
        local_file: &Path,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        let name = local_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::from(PathError::InvalidPath {
                    message: format!("{} has no file name", local_file.display()),
                })
            })?;
        let remote_name = RemotePath::parse(&name)?;
        if remote_name.segments().count() != 1 {
            return Err(PathError::InvalidPath {
                message: format!("{} is not a single remote file name", name),
            }
            .into());
        }
        let to = self.current.join(&remote_name);
        self.client.upload_file(&to, local_file, reporter).await
    }

    pub async fn create_file(
        &self,
        name: &str,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.client
            .create_empty_file(&self.resolve(name)?, reporter)
            .await
    }

    pub async fn create_directory(
        &self,
        name: &str,
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Outcome<()>, Error> {
        self.client
            .create_directory(&self.resolve(name)?, reporter)
            .await
    }

    /// Delete the selected files of the current directory concurrently.
    ///
    /// Fails before sending anything if a name does not resolve.
    pub async fn delete_files(
        &self,
        names: &[&str],
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Vec<Result<Outcome<()>, Error>>, Error> {
        let paths = self.resolve_all(names)?;
        Ok(self.client.delete_files(&paths, reporter).await)
    }

    /// Delete the selected folders of the current directory concurrently.
    pub async fn delete_directories(
        &self,
        names: &[&str],
        reporter: Option<&dyn ErrorReporter>,
    ) -> Result<Vec<Result<Outcome<()>, Error>>, Error> {
        let paths = self.resolve_all(names)?;
        Ok(self.client.delete_directories(&paths, reporter).await)
    }

    fn resolve_all(&self, names: &[&str]) -> Result<Vec<RemotePath>, Error> {
        names.iter().map(|name| self.resolve(name)).collect()
    }
}
