//! The directory marker convention.
//!
//! The server signals "this resource is a directory" with a custom header
//! whose presence alone carries the meaning. Clients send the same header
//! on requests that concern a directory.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the directory marker header. Compared case-insensitively.
pub const DIRECTORY_MARKER: &str = "is-directory";

/// Value sent with the marker on directory requests. Servers only check
/// for the header's presence.
pub const DIRECTORY_MARKER_VALUE: &str = "pls";

/// What kind of resource a response or request concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Directory,
    File,
}

impl ResourceKind {
    /// Derive the kind from whether the marker header was present.
    pub fn from_marker(present: bool) -> Self {
        if present {
            ResourceKind::Directory
        } else {
            ResourceKind::File
        }
    }

    /// Whether requests for this kind carry the marker header.
    pub fn carries_marker(self) -> bool {
        self == ResourceKind::Directory
    }

    /// Look for the marker among response header names.
    pub fn from_header_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_marker(
            names
                .into_iter()
                .any(|name| name.eq_ignore_ascii_case(DIRECTORY_MARKER)),
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Directory => f.write_str("directory"),
            ResourceKind::File => f.write_str("file"),
        }
    }
}
