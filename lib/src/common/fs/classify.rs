//! # gzpack Path Classification
//!
//! File: lib/src/common/fs/classify.rs
//!
//! ## Overview
//!
//! Decides whether a path currently denotes a regular file, a directory, or
//! neither. The archivers use this to reject paths they cannot handle before
//! touching the output sink.
//!
//! Classification never fails. A missing path, unreadable metadata, or a
//! special file (FIFO, socket, device) all classify as `PathKind::Other`;
//! the absence of a positive answer is the signal.
//!
//! Symlinks are followed, so a link to a directory classifies as a directory.
//!
use std::fs;
use std::path::Path;
use tracing::trace;

/// What a source path resolves to on the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// An existing regular file.
    File,
    /// An existing directory.
    Directory,
    /// Missing, unreadable, or a special file.
    Other,
}

/// Classifies `path` by its (symlink-following) metadata.
pub fn classify(path: &Path) -> PathKind {
    let kind = match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => PathKind::File,
        Ok(metadata) if metadata.is_dir() => PathKind::Directory,
        Ok(_) => PathKind::Other,
        Err(e) => {
            // Not an error for the caller: an unreadable path simply isn't usable.
            trace!("Could not read metadata for {:?}: {}", path, e);
            PathKind::Other
        }
    };
    trace!("Classified {:?} as {:?}", path, kind);
    kind
}

/// `true` if `path` is an existing regular file.
pub fn is_file(path: &Path) -> bool {
    classify(path) == PathKind::File
}

/// `true` if `path` is an existing directory.
pub fn is_dir(path: &Path) -> bool {
    classify(path) == PathKind::Directory
}
