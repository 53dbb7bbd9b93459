//! # gzpack Archive Module (`common::archive`)
//!
//! File: lib/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module is the main interface for producing gzip output from a path.
//! It aggregates the two archivers and the dispatcher that chooses between
//! them.
//!
//! ## Architecture
//!
//! - **`compression`**: gzip a single regular file (no tar framing).
//! - **`tar`**: walk a directory tree into a gzipped tarball.
//! - **`Archiver`** (this file): holds validated `ArchiveOptions` and runs the
//!   fallback state machine:
//!   1. try the file archiver; success ends the operation;
//!   2. on `NotAFile`, try the directory archiver; success ends it;
//!   3. on `NotADirectory`, fail with `NeitherFileNorDirectory`;
//!   4. any other error from either step propagates unchanged.
//!
//! ## Usage
//!
//! ```rust
//! use gzpack::{ArchiveOptions, Archiver, HeaderStyle};
//! # use std::fs;
//! # use tempfile::tempdir;
//!
//! # fn main() -> anyhow::Result<()> {
//! # let temp_dir = tempdir()?;
//! # let source = temp_dir.path().join("notes.txt");
//! # fs::write(&source, "content")?;
//! let archiver = Archiver::new(
//!     ArchiveOptions::default().with_header_style(HeaderStyle::Deterministic),
//! )?;
//!
//! let mut gz_bytes = Vec::new();
//! archiver.archive(&source, &mut gz_bytes)?;
//! # Ok(())
//! # }
//! ```
//!
pub mod compression;
pub mod tar;

use crate::core::config::{ArchiveOptions, HeaderStyle};
use crate::core::error::{GzpackError, IoContext, Result};
use flate2::write::GzEncoder;
use flate2::GzBuilder;
use std::fs::{File, Metadata};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::UNIX_EPOCH;
use tracing::{debug, info};

/// # Archiver (`Archiver`)
///
/// Entry point for all archiving operations. Cheap to clone; holds nothing
/// but its options, so one instance can serve any number of independent
/// sources and sinks.
#[derive(Debug, Clone, Default)]
pub struct Archiver {
    options: ArchiveOptions,
}

impl Archiver {
    /// Creates an archiver after validating `options`.
    ///
    /// # Errors
    ///
    /// Returns `GzpackError::Config` if the options are out of range.
    pub fn new(options: ArchiveOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    /// # Archive to File (`archive_to_file`)
    ///
    /// Creates (or truncates) `output`, then archives `source` into it via
    /// [`Archiver::archive`]. The output handle is buffered and flushed before
    /// returning.
    ///
    /// On failure the partially written output file is left in place.
    ///
    /// # Errors
    ///
    /// - `GzpackError::Io` if `output` cannot be created or flushed.
    /// - Anything [`Archiver::archive`] returns.
    pub fn archive_to_file(&self, source: &Path, output: &Path) -> Result<()> {
        let file = File::create(output)
            .io_context(|| format!("Failed to create output file '{}'", output.display()))?;
        let mut writer = BufWriter::new(file);

        self.archive(source, &mut writer)?;

        writer
            .flush()
            .io_context(|| format!("Failed to flush output file '{}'", output.display()))?;
        info!("Wrote archive of {:?} to {:?}", source, output);
        Ok(())
    }

    /// # Archive to Writer (`archive`)
    ///
    /// Writes `source` to `sink` as plain gzip if it is a regular file, or as
    /// a gzipped tarball if it is a directory.
    ///
    /// # Errors
    ///
    /// - `GzpackError::NeitherFileNorDirectory` if `source` is neither.
    /// - `GzpackError::Io` from whichever archiver ran.
    pub fn archive<W>(&self, source: &Path, sink: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        match self.archive_file(source, sink) {
            Ok(()) => return Ok(()),
            Err(e) if e.is_not_a_file() => {
                debug!("{:?} is not a file, trying directory archiver", source);
            }
            Err(e) => return Err(e),
        }

        match self.archive_directory(source, sink) {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_a_directory() => Err(GzpackError::NeitherFileNorDirectory {
                path: source.to_path_buf(),
            }),
            Err(e) => Err(e),
        }
    }

    /// Gzips the regular file at `source` into `sink`.
    /// See [`compression::compress_file_to_writer`].
    pub fn archive_file<W>(&self, source: &Path, sink: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        compression::compress_file_to_writer(source, sink, &self.options)
    }

    /// Writes the directory at `source` into `sink` as a gzipped tarball.
    /// See [`tar::create_tar_gz_to_writer`].
    pub fn archive_directory<W>(&self, source: &Path, sink: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        tar::create_tar_gz_to_writer(source, sink, &self.options)
    }
}

/// Builds the gzip layer around `sink`.
///
/// `Deterministic` leaves the gzip MTIME field at 0; `Complete` records the
/// source's modification time (0 if unavailable or past 2106).
pub(crate) fn gzip_encoder<W: Write>(
    sink: W,
    options: &ArchiveOptions,
    source: &Metadata,
) -> GzEncoder<W> {
    let mtime = match options.header_style {
        HeaderStyle::Deterministic => 0,
        HeaderStyle::Complete => source
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .and_then(|d| u32::try_from(d.as_secs()).ok())
            .unwrap_or(0),
    };
    GzBuilder::new()
        .mtime(mtime)
        .write(sink, options.compression())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::fs;
    use std::io::{self, Read};
    use tempfile::tempdir;

    /// A sink that rejects every write.
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_new_rejects_invalid_options() {
        let err = Archiver::new(ArchiveOptions::default().with_compression_level(42)).unwrap_err();
        assert!(matches!(err, GzpackError::Config(_)));
    }

    #[test]
    fn test_archive_dispatches_file_to_plain_gzip() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("plain.txt");
        fs::write(&source, "plain content")?;

        let mut sink = Vec::new();
        Archiver::default().archive(&source, &mut sink)?;

        let mut decoded = String::new();
        GzDecoder::new(sink.as_slice()).read_to_string(&mut decoded)?;
        assert_eq!(decoded, "plain content");
        Ok(())
    }

    #[test]
    fn test_archive_dispatches_directory_to_tarball() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("folder");
        fs::create_dir(&source)?;
        fs::write(source.join("inner.txt"), "inner")?;

        let mut sink = Vec::new();
        Archiver::default().archive(&source, &mut sink)?;

        let mut archive = ::tar::Archive::new(GzDecoder::new(sink.as_slice()));
        let names: Vec<String> = archive
            .entries()?
            .map(|e| -> io::Result<String> { Ok(e?.path()?.to_string_lossy().into_owned()) })
            .collect::<io::Result<_>>()?;
        assert_eq!(names, vec!["folder", "folder/inner.txt"]);
        Ok(())
    }

    #[test]
    fn test_archive_missing_path_is_neither() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let missing = temp_dir.path().join("missing");

        let mut sink = Vec::new();
        let err = Archiver::default().archive(&missing, &mut sink).unwrap_err();

        match err {
            GzpackError::NeitherFileNorDirectory { path } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
        assert!(sink.is_empty());
        Ok(())
    }

    #[test]
    fn test_archive_propagates_io_error_without_fallback() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("data.txt");
        fs::write(&source, "data")?;

        let err = Archiver::default()
            .archive(&source, &mut BrokenSink)
            .unwrap_err();

        assert_eq!(err.io_kind(), Some(io::ErrorKind::BrokenPipe));
        Ok(())
    }

    #[test]
    fn test_archive_to_file_unwritable_output() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let source = temp_dir.path().join("data.txt");
        fs::write(&source, "data")?;
        let output = temp_dir.path().join("no/such/dir/out.gz");

        let err = Archiver::default()
            .archive_to_file(&source, &output)
            .unwrap_err();

        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        Ok(())
    }

    #[test]
    fn test_archive_to_file_leaves_output_on_failure() -> anyhow::Result<()> {
        let temp_dir = tempdir()?;
        let output = temp_dir.path().join("out.gz");

        let err = Archiver::default()
            .archive_to_file(&temp_dir.path().join("missing"), &output)
            .unwrap_err();

        assert!(matches!(err, GzpackError::NeitherFileNorDirectory { .. }));
        assert!(output.exists());
        Ok(())
    }
}
