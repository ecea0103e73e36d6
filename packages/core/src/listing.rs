//! Directory listing bodies.
//!
//! A directory `GET` answers with one entry per line. Entries ending in `/`
//! are folders, everything else is a file:
//!
//! ```text
//! docs/
//! readme.md
//! ```

use serde::{Deserialize, Serialize};

use crate::path::RemotePath;

/// Result of listing a remote directory.
///
/// Folder entries keep their trailing `/`, so [`RemotePath::file_name`] and
/// [`RemotePath::directory_of`] treat them the same way as file entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    folders: Vec<RemotePath>,
    files: Vec<RemotePath>,
}

impl DirectoryListing {
    /// A listing with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a raw listing body.
    ///
    /// Lines are split on `\n` and `\r`, blank and whitespace-only lines are
    /// dropped, and the rest are partitioned into folders and files keeping
    /// their input order.
    ///
    /// ```rust
    /// use httpfs_core::DirectoryListing;
    ///
    /// let listing = DirectoryListing::parse("a.txt\nsub/\nb.txt\n");
    /// assert_eq!(listing.folders().len(), 1);
    /// assert_eq!(listing.files().len(), 2);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let (folders, files): (Vec<&str>, Vec<&str>) = raw
            .split(['\r', '\n'])
            .filter(|line| !line.trim().is_empty())
            .partition(|line| line.ends_with('/'));

        DirectoryListing {
            folders: folders.into_iter().map(RemotePath::new).collect(),
            files: files.into_iter().map(RemotePath::new).collect(),
        }
    }

    pub fn folders(&self) -> &[RemotePath] {
        &self.folders
    }

    pub fn files(&self) -> &[RemotePath] {
        &self.files
    }

    /// All entries, folders first.
    pub fn entries(&self) -> impl Iterator<Item = &RemotePath> {
        self.folders.iter().chain(self.files.iter())
    }

    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Split into `(folders, files)`.
    pub fn into_parts(self) -> (Vec<RemotePath>, Vec<RemotePath>) {
        (self.folders, self.files)
    }
}
