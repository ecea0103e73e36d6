//! Remote path type with slash-delimited, normalized segments.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors related to remote path parsing and local path mapping.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment cannot be used to address a remote or local resource.
    #[error("invalid path segment '{segment}' at position {position}: {message}")]
    InvalidSegment {
        segment: String,
        position: usize,
        message: String,
    },
    /// The path string is invalid.
    #[error("invalid path: {message}")]
    InvalidPath { message: String },
}

/// A path on the remote file store, relative to the configured server root.
///
/// The path is kept as a normalized string: backslashes are read as `/` and
/// runs of separators collapse into one. A leading `/` marks a rooted path and
/// a trailing `/` is a directory hint, as produced by directory listings.
/// Whether a path really is a directory is only known to the server.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RemotePath {
    raw: String,
}

impl RemotePath {
    /// Create a path from any string, normalizing separators.
    ///
    /// This never fails; use [`RemotePath::parse`] for input that should be
    /// rejected when it contains `.`/`..` segments or NUL bytes.
    pub fn new(s: impl AsRef<str>) -> Self {
        RemotePath {
            raw: normalize(s.as_ref()),
        }
    }

    /// The server root, `/`.
    pub fn root() -> Self {
        RemotePath {
            raw: "/".to_string(),
        }
    }

    /// Parse a path string, validating its segments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use httpfs_core::RemotePath;
    ///
    /// let path = RemotePath::parse("docs//guide/").unwrap();
    /// assert_eq!(path.as_str(), "docs/guide/");
    ///
    /// assert!(RemotePath::parse("docs/../secret").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.contains('\0') {
            return Err(PathError::InvalidPath {
                message: "contains a NUL byte".to_string(),
            });
        }

        let path = Self::new(s);
        for (i, segment) in path.segments().enumerate() {
            validate_segment(segment, i)?;
        }
        Ok(path)
    }

    /// Append `addition` to this path as new segment(s).
    ///
    /// An empty addition or a root indicator (`/` or `\`) returns this path
    /// unchanged. Otherwise leading separators are trimmed from `addition`
    /// and the two are joined with exactly one `/`.
    ///
    /// ```rust
    /// use httpfs_core::RemotePath;
    ///
    /// let docs = RemotePath::root().combine("docs/");
    /// assert_eq!(docs.as_str(), "/docs/");
    /// assert_eq!(docs.combine("/readme.md").as_str(), "/docs/readme.md");
    /// assert_eq!(docs.combine("/"), docs);
    /// ```
    #[must_use]
    pub fn combine(&self, addition: impl AsRef<str>) -> RemotePath {
        let addition = normalize(addition.as_ref());
        let addition = addition.trim_start_matches('/');
        if addition.is_empty() {
            return self.clone();
        }

        let mut raw = self.raw.clone();
        if !raw.is_empty() && !raw.ends_with('/') {
            raw.push('/');
        }
        raw.push_str(addition);
        RemotePath { raw }
    }

    /// Append another remote path. See [`RemotePath::combine`].
    #[must_use]
    pub fn join(&self, other: &RemotePath) -> RemotePath {
        self.combine(&other.raw)
    }

    /// The parent of this path.
    ///
    /// A trailing `/` is ignored, so `/a/docs/` and `/a/docs` both have the
    /// parent `/a`. The parent of the root is the root; the parent of a
    /// single relative segment is the empty path.
    #[must_use]
    pub fn directory_of(&self) -> RemotePath {
        let trimmed = self.raw.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => RemotePath::root(),
            Some(i) => RemotePath {
                raw: trimmed[..i].to_string(),
            },
            None if self.is_rooted() => RemotePath::root(),
            None => RemotePath::default(),
        }
    }

    /// The last segment of this path, ignoring a trailing `/`.
    ///
    /// Empty for the root and for the empty path.
    pub fn file_name(&self) -> &str {
        let trimmed = self.raw.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or_default()
    }

    /// Iterate over the non-empty segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('/').filter(|s| !s.is_empty())
    }

    /// True for `/` and for the empty path.
    pub fn is_root(&self) -> bool {
        self.segments().next().is_none()
    }

    /// True when the path starts with `/`.
    pub fn is_rooted(&self) -> bool {
        self.raw.starts_with('/')
    }

    /// True when the path ends with `/`, the listing convention for folders.
    pub fn has_directory_hint(&self) -> bool {
        self.raw.ends_with('/')
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Map this path below a local directory root.
    ///
    /// Each segment becomes one component of the returned path. `.` and `..`
    /// segments are refused so the result never escapes `root`.
    pub fn local_path(&self, root: &Path) -> Result<PathBuf, PathError> {
        self.validate()?;
        let mut local = root.to_path_buf();
        local.extend(self.segments());
        Ok(local)
    }

    /// Check every segment the way [`RemotePath::parse`] does.
    ///
    /// Paths built with [`RemotePath::new`] skip validation; anything that
    /// leaves the process should pass through here first.
    pub fn validate(&self) -> Result<(), PathError> {
        self.segments()
            .enumerate()
            .try_for_each(|(i, segment)| validate_segment(segment, i))
    }
}

fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_separator = false;
    for c in s.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' {
            if last_was_separator {
                continue;
            }
            last_was_separator = true;
        } else {
            last_was_separator = false;
        }
        out.push(c);
    }
    out
}

fn validate_segment(segment: &str, position: usize) -> Result<(), PathError> {
    if segment == "." || segment == ".." {
        return Err(PathError::InvalidSegment {
            segment: segment.to_string(),
            position,
            message: "relative segments are not allowed".to_string(),
        });
    }
    if segment.contains('\0') {
        return Err(PathError::InvalidSegment {
            segment: segment.to_string(),
            position,
            message: "contains a NUL byte".to_string(),
        });
    }
    Ok(())
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for RemotePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for RemotePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RemotePath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<RemotePath> for String {
    fn from(path: RemotePath) -> Self {
        path.raw
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

/// Macro for creating validated remote paths from literals.
///
/// # Example
///
/// ```rust
/// use httpfs_core::remote_path;
///
/// let p = remote_path!("/docs/readme.md");
/// assert_eq!(p.file_name(), "readme.md");
/// ```
#[macro_export]
macro_rules! remote_path {
    ($s:expr) => {
        $crate::RemotePath::parse($s).expect("invalid remote path literal")
    };
}
