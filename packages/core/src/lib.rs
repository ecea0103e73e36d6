//! Core httpfs: the client-side model of an HTTP file store
//!
//! This layer holds the pieces of the wire convention that need no network:
//! - `RemotePath`: normalized slash-delimited remote address
//! - `DirectoryListing`: parsed directory `GET` body
//! - `ResourceKind`: directory-or-file, derived from the marker header
//! - `Outcome` / `ErrorReporter`: how non-success statuses reach the caller
//!
//! # Example
//!
//! ```rust
//! use httpfs_core::{DirectoryListing, RemotePath};
//!
//! let current = RemotePath::root();
//! let listing = DirectoryListing::parse("docs/\nreadme.md\n");
//! let next = current.join(&listing.folders()[0]);
//! assert_eq!(next.as_str(), "/docs/");
//! ```

mod listing;
mod marker;
mod outcome;
mod path;

pub use listing::DirectoryListing;
pub use marker::{ResourceKind, DIRECTORY_MARKER, DIRECTORY_MARKER_VALUE};
pub use outcome::{CollectingReporter, ErrorReporter, Outcome, StatusLine};
pub use path::{PathError, RemotePath};
