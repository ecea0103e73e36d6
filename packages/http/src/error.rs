use httpfs_core::{PathError, RemotePath, ResourceKind};

/// Errors raised by the file store client.
///
/// A non-success HTTP status is not an error: it is reported through an
/// [`ErrorReporter`](httpfs_core::ErrorReporter) and returned as
/// [`Outcome::Failed`](httpfs_core::Outcome::Failed).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The directory marker contradicted the operation: a listing got a
    /// file, or a download got a directory.
    #[error("not a {expected}: server reported {path} as a {found}")]
    ProtocolMismatch {
        path: RemotePath,
        expected: ResourceKind,
        found: ResourceKind,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure from an executor that is not backed by reqwest.
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// True for the directory/file mismatch raised by list and download.
    pub fn is_protocol_mismatch(&self) -> bool {
        matches!(self, Error::ProtocolMismatch { .. })
    }

    /// True when the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_display_names_both_kinds() {
        let err = Error::ProtocolMismatch {
            path: RemotePath::new("/docs"),
            expected: ResourceKind::Directory,
            found: ResourceKind::File,
        };
        assert_eq!(
            err.to_string(),
            "not a directory: server reported /docs as a file"
        );
        assert!(err.is_protocol_mismatch());
        assert!(!err.is_transport());
    }

    #[test]
    fn io_errors_pass_through() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io);
        assert_eq!(err.to_string(), "denied");
        assert!(matches!(err, Error::Io(_)));
    }

    fn origin(err: &Error) -> &'static str {
        match err {
            Error::ProtocolMismatch { .. } => "server",
            Error::Http(_) | Error::Transport { .. } => "transport",
            Error::UrlParse(_) | Error::InvalidUrl { .. } | Error::Path(_) => "address",
            Error::Io(_) => "local",
            Error::Json(_) | Error::Config { .. } => "config",
        }
    }

    #[test]
    fn variants_group_by_origin() {
        let path_err = Error::from(RemotePath::new("/a/..").validate().unwrap_err());
        assert_eq!(origin(&path_err), "address");

        let url_err = Error::from(url::Url::parse("not a url").unwrap_err());
        assert_eq!(origin(&url_err), "address");

        let json_err = Error::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(origin(&json_err), "config");
    }

    #[test]
    fn transport_is_distinct_from_mismatch() {
        let err = Error::Transport {
            message: "connection refused".to_string(),
        };
        assert!(err.is_transport());
        assert!(!err.is_protocol_mismatch());
    }
}
