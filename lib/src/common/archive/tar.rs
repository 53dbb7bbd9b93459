//! # gzpack TAR Archive Operations (`common::archive::tar`)
//!
//! File: lib/src/common/archive/tar.rs
//!
//! ## Overview
//!
//! This module turns a directory tree into a gzipped tarball (`.tar.gz`)
//! written to any `std::io::Write` sink. Every entry in the archive is nested
//! under a single top-level folder named after the source directory, so
//! unpacking `archive(/data/photos)` recreates `photos/...`.
//!
//! ## Architecture
//!
//! The module leverages the `tar` crate for headers and stream framing, the
//! `flate2` crate for gzip compression, and `walkdir` for traversal.
//!
//! - Two framing layers wrap the caller's sink: `tar::Builder<GzEncoder<&mut W>>`.
//! - The tree is walked depth-first, root first, siblings sorted by file
//!   name, without following symlinks.
//! - Each node's header is built from its own metadata (`HeaderStyle` picks
//!   `tar::HeaderMode::Complete` or `Deterministic`), renamed to
//!   `<root base name>/<path relative to root>`, and appended:
//!   - directories: header only;
//!   - regular files: header followed by exactly `size` bytes of content;
//!   - symlinks: a `Symlink` header carrying the link target;
//!   - anything else (FIFOs, sockets, devices): rejected as an I/O error.
//! - After the walk the tar builder is finished (trailing zero blocks), then
//!   the gzip encoder (footer), in that order.
//!
//! The first error aborts the walk. Whatever was already written to the sink
//! stays there.
//!
//! ## Usage
//!
//! ```rust
//! use gzpack::common::archive::tar::create_tar_gz_to_writer;
//! use gzpack::ArchiveOptions;
//! # use std::fs;
//! # use tempfile::tempdir;
//!
//! # fn main() -> anyhow::Result<()> {
//! # let temp_dir = tempdir()?;
//! # fs::write(temp_dir.path().join("file.txt"), "content")?;
//! let mut tar_gz_bytes = Vec::new();
//! create_tar_gz_to_writer(temp_dir.path(), &mut tar_gz_bytes, &ArchiveOptions::default())?;
//!
//! println!("Generated tar.gz archive with size: {} bytes", tar_gz_bytes.len());
//! # Ok(())
//! # }
//! ```
//!
use super::gzip_encoder;
use crate::common::fs::classify::is_dir;
use crate::core::config::ArchiveOptions;
use crate::core::error::{GzpackError, IoContext, Result};
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tar::{EntryType, Header};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Running totals for one archive pass, logged once the walk completes.
#[derive(Debug, Default)]
struct WalkStats {
    entries: u64,
    bytes: u64,
}

/// # Create Gzipped TAR Stream (`create_tar_gz_to_writer`)
///
/// Archives the directory at `source` into `sink` as a gzip-compressed tar
/// stream whose entries are rooted at `source`'s base name.
///
/// ## Arguments
///
/// * `source` - Directory to archive. Symlinks to directories are accepted
///   as the root; symlinks *inside* the tree are stored as links.
/// * `sink` - Destination for the `.tar.gz` bytes. Borrowed; left open.
/// * `options` - Compression level and header style.
///
/// ## Errors
///
/// - `GzpackError::NotADirectory` if `source` is not a directory. Nothing has
///   been written to `sink` in this case.
/// - `GzpackError::Io` if walking the tree, reading metadata or contents,
///   or writing either framing layer fails, or if the tree contains a node
///   type tar cannot represent here (FIFO, socket, device).
pub fn create_tar_gz_to_writer<W>(
    source: &Path,
    sink: &mut W,
    options: &ArchiveOptions,
) -> Result<()>
where
    W: Write + ?Sized,
{
    if !is_dir(source) {
        return Err(GzpackError::NotADirectory {
            path: source.to_path_buf(),
        });
    }

    let root_metadata = fs::metadata(source)
        .io_context(|| format!("Failed to read metadata for '{}'", source.display()))?;
    let root_name = archive_root_name(source);

    // Gzip wraps the caller's sink; tar wraps gzip.
    let encoder = gzip_encoder(sink, options, &root_metadata);
    let mut tar_builder = tar::Builder::new(encoder);
    let mut stats = WalkStats::default();

    let walker = WalkDir::new(source).follow_links(false).sort_by_file_name();
    for entry_result in walker {
        let entry = entry_result.map_err(|e| {
            let context = match e.path() {
                Some(path) => format!("Failed to walk '{}'", path.display()),
                None => format!("Failed to walk '{}'", source.display()),
            };
            GzpackError::io(context, io::Error::from(e))
        })?;
        append_entry(
            &mut tar_builder,
            source,
            root_name.as_deref(),
            &entry,
            options,
            &mut stats,
        )?;
    }

    // Finalize the TAR archive structure (trailing zero blocks), then gzip.
    let encoder = tar_builder
        .into_inner()
        .io_context(|| "Failed to finalize tar archive structure")?;
    encoder
        .finish()
        .io_context(|| "Failed to finish gzip compression stream")?;

    info!(
        "Archived {:?}: {} entries, {} bytes of file content",
        source, stats.entries, stats.bytes
    );
    Ok(())
}

/// # Archive Root Name (`archive_root_name`)
///
/// The folder name every entry is nested under: the last component of
/// `source`. Paths without one (`.`, `..`) fall back to the last component
/// of the canonicalized path. `None` means entries are stored relative to
/// the root with no prefix (only happens for a filesystem root).
fn archive_root_name(source: &Path) -> Option<OsString> {
    if let Some(name) = source.file_name() {
        return Some(name.to_os_string());
    }
    match source.canonicalize() {
        Ok(canonical) => canonical.file_name().map(|n| n.to_os_string()),
        Err(e) => {
            warn!(
                "Could not canonicalize '{}': {}. Entries will not be prefixed.",
                source.display(),
                e
            );
            None
        }
    }
}

/// # Archive Entry Name (`entry_name`)
///
/// Strips the full `root` prefix from `path` and joins the remainder under
/// `root_name`. The root itself maps to `root_name`.
fn entry_name(root: &Path, root_name: Option<&OsStr>, path: &Path) -> Result<PathBuf> {
    let relative = path.strip_prefix(root).map_err(|_| {
        GzpackError::io(
            format!(
                "Walked path '{}' is outside of '{}'",
                path.display(),
                root.display()
            ),
            io::Error::from(io::ErrorKind::InvalidData),
        )
    })?;

    let mut name = PathBuf::new();
    if let Some(root_name) = root_name {
        name.push(root_name);
    }
    // Pushing an empty path would add a trailing separator.
    if !relative.as_os_str().is_empty() {
        name.push(relative);
    }
    Ok(name)
}

/// Writes one walked node (header plus, for files, its body) to the builder.
fn append_entry<W: Write>(
    tar_builder: &mut tar::Builder<W>,
    root: &Path,
    root_name: Option<&OsStr>,
    entry: &DirEntry,
    options: &ArchiveOptions,
    stats: &mut WalkStats,
) -> Result<()> {
    let path = entry.path();
    let name = entry_name(root, root_name, path)?;
    if name.as_os_str().is_empty() {
        debug!("Skipping unnamed root entry for {:?}", path);
        return Ok(());
    }

    let metadata = entry.metadata().map_err(|e| {
        GzpackError::io(
            format!("Failed to read metadata for '{}'", path.display()),
            e.into(),
        )
    })?;

    let mut header = Header::new_gnu();
    header.set_metadata_in_mode(&metadata, options.header_style.tar_mode());

    let file_type = entry.file_type();
    if file_type.is_dir() {
        header.set_entry_type(EntryType::Directory);
        header.set_size(0);
        tar_builder
            .append_data(&mut header, &name, io::empty())
            .io_context(|| {
                format!(
                    "Failed to add directory '{}' to the tar archive",
                    path.display()
                )
            })?;
    } else if file_type.is_file() {
        let size = metadata.len();
        header.set_entry_type(EntryType::Regular);
        header.set_size(size);
        let file = File::open(path)
            .io_context(|| format!("Failed to open file '{}'", path.display()))?;
        tar_builder
            .append_data(&mut header, &name, ExactReader::new(file, size))
            .io_context(|| {
                format!("Failed to add file '{}' to the tar archive", path.display())
            })?;
        stats.bytes += size;
    } else if file_type.is_symlink() {
        let target = fs::read_link(path)
            .io_context(|| format!("Failed to read symlink '{}'", path.display()))?;
        header.set_entry_type(EntryType::Symlink);
        header.set_size(0);
        tar_builder
            .append_link(&mut header, &name, &target)
            .io_context(|| {
                format!(
                    "Failed to add symlink '{}' to the tar archive",
                    path.display()
                )
            })?;
    } else {
        return Err(GzpackError::io(
            format!("Cannot archive special file '{}'", path.display()),
            io::Error::new(io::ErrorKind::Unsupported, "unsupported file type"),
        ));
    }

    stats.entries += 1;
    debug!("Added {:?} as {:?}", path, name);
    Ok(())
}

/// # Exact-Length Reader (`ExactReader`)
///
/// Yields exactly `len` bytes from `inner`. Bytes beyond `len` are ignored;
/// reaching EOF early is an `UnexpectedEof` error. This keeps a file that
/// changes size mid-archive from desynchronizing the tar stream from the
/// size already recorded in its header.
struct ExactReader<R> {
    inner: io::Take<R>,
}

impl<R: Read> ExactReader<R> {
    fn new(inner: R, len: u64) -> Self {
        Self {
            inner: inner.take(len),
        }
    }
}

impl<R: Read> Read for ExactReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() && self.inner.limit() > 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "file shrank by {} bytes while being archived",
                    self.inner.limit()
                ),
            ));
        }
        Ok(n)
    }
}
