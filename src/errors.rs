//! Defines application-specific error types.
//!
//! This module provides the `Error` enum, which categorizes the failures that
//! can surface from the viewer: filesystem access, rejected paths, oversized or
//! binary files, upstream fetch failures and configuration mistakes. Recoverable
//! conditions (malformed JSON, a missing search worker, stale results) never show
//! up here; they degrade to a simpler rendering instead.

use thiserror::Error;

/// Errors produced while validating configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An option was given a value outside its accepted range.
    #[error("Invalid value for {option}: {reason}")]
    InvalidValue {
        /// The offending option, as spelled on the command line.
        option: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// The bundle root does not exist or is not a directory.
    #[error("Bundle root '{0}' is not a readable directory")]
    InvalidRoot(String),
}

/// Application-specific errors used throughout `logview`.
#[derive(Error, Debug)]
pub enum Error {
    /// Error occurring during file or directory access (read, metadata).
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// The fetch collaborator failed to deliver a file. The message is the
    /// backend's own and is meant to be shown verbatim.
    #[error("{message}")]
    ContentUnavailable {
        /// The path that was requested.
        path: String,
        /// The backend's message.
        message: String,
    },

    /// The requested path is absolute, empty, or escapes the bundle root.
    #[error("Invalid path '{0}': paths must stay inside the bundle root")]
    InvalidPath(String),

    /// The requested path exists but is not a regular file.
    #[error("Not a file: '{0}'")]
    NotAFile(String),

    /// The file exceeds the configured maximum size.
    #[error("File '{path}' is too large ({size} bytes, limit is {limit} bytes)")]
    FileTooLarge {
        /// The requested path.
        path: String,
        /// Size of the file on disk.
        size: u64,
        /// The configured limit.
        limit: u64,
    },

    /// The file looks like binary data and cannot be rendered as text.
    #[error("File '{0}' appears to be binary and cannot be displayed")]
    BinaryContent(String),

    /// Search was requested while the current file is paginated.
    #[error("Search is unavailable while the file is paginated")]
    SearchDisabled,

    /// An operation needed an open file but none was loaded.
    #[error("No file is currently open")]
    NoFileOpen,

    /// Invalid configuration settings.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A `Result` alias using the crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create an `Error::Io` with path context.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}

impl Error {
    /// Returns `true` when the error means the requested file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io, path::PathBuf};

    #[test]
    fn test_io_error_with_path_helper() {
        let path = PathBuf::from("bundle/app.log");
        let source_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = io_error_with_path(source_error, &path);

        assert!(error.is_not_found());
        match error {
            Error::Io {
                path: error_path,
                source,
            } => {
                assert!(error_path.contains("bundle/app.log"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Error::Io"),
        }

        let denied = io_error_with_path(
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
            "another/path",
        );
        assert!(!denied.is_not_found());
        assert!(denied.to_string().contains("another/path"));
    }

    #[test]
    fn test_content_unavailable_displays_backend_message_verbatim() {
        let error = Error::ContentUnavailable {
            path: "a.log".to_string(),
            message: "backend exploded".to_string(),
        };
        assert_eq!(error.to_string(), "backend exploded");
    }

    #[test]
    fn test_config_error_is_transparent() {
        let error: Error = ConfigError::InvalidValue {
            option: "--page-size".to_string(),
            reason: "must be greater than 0".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Invalid value for --page-size: must be greater than 0"
        );
    }
}
