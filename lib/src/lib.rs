//! # gzpack
//!
//! File: lib/src/lib.rs
//!
//! ## Overview
//!
//! gzpack writes a filesystem path to a gzip stream:
//! - a regular file becomes a plain gzip stream of its bytes;
//! - a directory becomes a gzipped tarball whose entries are all nested under
//!   a folder named after the directory.
//!
//! Output goes to any `std::io::Write` sink, or straight to a new file.
//!
//! ## Architecture
//!
//! - `core`: error type (`GzpackError`) and options (`ArchiveOptions`).
//! - `common::fs`: path classification.
//! - `common::archive`: the file archiver, the directory archiver, and the
//!   `Archiver` dispatcher that tries one, then the other.
//!
//! The free functions in this module use `ArchiveOptions::default()`; build
//! an [`Archiver`] to choose a compression level or reproducible headers.
//!
//! ## Examples
//!
//! ```rust
//! # use std::fs;
//! # use tempfile::tempdir;
//! # fn main() -> anyhow::Result<()> {
//! # let temp_dir = tempdir()?;
//! # let project = temp_dir.path().join("project");
//! # fs::create_dir(&project)?;
//! # fs::write(project.join("README.md"), "# Project")?;
//! # let output = temp_dir.path().join("project.tar.gz");
//! // Directory -> project.tar.gz containing `project/README.md`.
//! gzpack::archive_to_file(&project, &output)?;
//!
//! // Any writer works as a sink.
//! let mut buffer = Vec::new();
//! gzpack::archive(project.join("README.md"), &mut buffer)?;
//! # Ok(())
//! # }
//! ```
//!
use std::io::Write;
use std::path::Path;

pub mod common;
pub mod core;

pub use crate::common::archive::Archiver;
pub use crate::common::fs::classify::{classify, is_dir, is_file, PathKind};
pub use crate::core::config::{ArchiveOptions, HeaderStyle, MAX_COMPRESSION_LEVEL};
pub use crate::core::error::{GzpackError, Result};

/// Archives `source` (file or directory) into a newly created file at `output`.
///
/// `output` is created or truncated first; if archiving then fails, the
/// partial file is left where it is.
pub fn archive_to_file(source: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    Archiver::default().archive_to_file(source.as_ref(), output.as_ref())
}

/// Archives `source` (file or directory) into `sink`.
///
/// Returns `GzpackError::NeitherFileNorDirectory` if `source` is neither.
pub fn archive<W>(source: impl AsRef<Path>, sink: &mut W) -> Result<()>
where
    W: Write + ?Sized,
{
    Archiver::default().archive(source.as_ref(), sink)
}

/// Gzips the regular file `source` into `sink`.
///
/// Returns `GzpackError::NotAFile` for anything that is not a regular file.
pub fn archive_file<W>(source: impl AsRef<Path>, sink: &mut W) -> Result<()>
where
    W: Write + ?Sized,
{
    Archiver::default().archive_file(source.as_ref(), sink)
}

/// Writes the directory `source` into `sink` as a gzipped tarball.
///
/// Returns `GzpackError::NotADirectory` for anything that is not a directory.
pub fn archive_directory<W>(source: impl AsRef<Path>, sink: &mut W) -> Result<()>
where
    W: Write + ?Sized,
{
    Archiver::default().archive_directory(source.as_ref(), sink)
}
