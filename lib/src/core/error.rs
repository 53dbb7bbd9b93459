//! # gzpack Error Types
//!
//! File: lib/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error type shared by every archiving operation in
//! gzpack. Each failure mode is a distinct, structurally matchable variant so
//! callers (and the dispatcher in `common::archive`) can branch on *what* went
//! wrong rather than comparing error values by identity.
//!
//! ## Architecture
//!
//! - `GzpackError`: a `thiserror` enum with one variant per error kind.
//! - `Result<T>`: alias for `std::result::Result<T, GzpackError>`.
//! - `IoContext`: crate-internal extension trait that wraps `std::io::Error`
//!   values into `GzpackError::Io` with a lazily built context message,
//!   in the spirit of `anyhow::Context::with_context`.
//!
//! The variants fall into two groups:
//! - Fallback signals (`NotAFile`, `NotADirectory`) that the dispatcher
//!   consumes while deciding how to archive a path.
//! - Terminal errors (`NeitherFileNorDirectory`, `Io`, `Config`) that reach
//!   the caller.
//!
//! ## Examples
//!
//! ```rust
//! use gzpack::GzpackError;
//!
//! let mut sink = Vec::new();
//! match gzpack::archive("/definitely/not/here", &mut sink) {
//!     Err(GzpackError::NeitherFileNorDirectory { path }) => {
//!         println!("nothing to archive at {}", path.display());
//!     }
//!     Err(e) => panic!("unexpected error: {e}"),
//!     Ok(()) => panic!("archiving a missing path should fail"),
//! }
//! ```
//!
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for gzpack.
// No PartialEq derive: `io::Error` does not implement it.
#[derive(Error, Debug)]
pub enum GzpackError {
    /// The source path is not (or no longer) a regular file.
    #[error("Path is not a file: {}", .path.display())]
    NotAFile { path: PathBuf },

    /// The source path is not (or no longer) a directory.
    #[error("Path is not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    /// The source path is missing, a special file, or its metadata is unreadable.
    #[error("Path was not recognised as a file or directory: {}", .path.display())]
    NeitherFileNorDirectory { path: PathBuf },

    /// An underlying read, write or metadata operation failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GzpackError {
    /// Wraps an `io::Error` with a description of the operation that failed.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        GzpackError::Io {
            context: context.into(),
            source,
        }
    }

    /// `true` for the file archiver's fallback signal.
    pub fn is_not_a_file(&self) -> bool {
        matches!(self, GzpackError::NotAFile { .. })
    }

    /// `true` for the directory archiver's fallback signal.
    pub fn is_not_a_directory(&self) -> bool {
        matches!(self, GzpackError::NotADirectory { .. })
    }

    /// The kind of the wrapped I/O error, if this is an `Io` error.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            GzpackError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Result alias used by every public gzpack operation.
pub type Result<T> = std::result::Result<T, GzpackError>;

/// Attaches context to `io::Result` values, producing `GzpackError::Io`.
pub(crate) trait IoContext<T> {
    fn io_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|source| GzpackError::io(f(), source))
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let not_a_file = GzpackError::NotAFile {
            path: PathBuf::from("some/dir"),
        };
        assert_eq!(not_a_file.to_string(), "Path is not a file: some/dir");

        let neither = GzpackError::NeitherFileNorDirectory {
            path: PathBuf::from("missing.txt"),
        };
        assert_eq!(
            neither.to_string(),
            "Path was not recognised as a file or directory: missing.txt"
        );

        let config_err = GzpackError::Config("compression level 12 is out of range".into());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: compression level 12 is out of range"
        );
    }

    #[test]
    fn test_io_context_preserves_source() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        let err = result
            .io_context(|| "Failed to open file 'a.txt'")
            .unwrap_err();

        assert_eq!(err.io_kind(), Some(io::ErrorKind::PermissionDenied));
        assert_eq!(err.to_string(), "Failed to open file 'a.txt': nope");
        assert!(err.source().is_some());
        assert!(!err.is_not_a_file());
        assert!(!err.is_not_a_directory());
    }

    #[test]
    fn test_fallback_predicates() {
        let path = PathBuf::from("x");
        assert!(GzpackError::NotAFile { path: path.clone() }.is_not_a_file());
        assert!(GzpackError::NotADirectory { path }.is_not_a_directory());
    }
}
