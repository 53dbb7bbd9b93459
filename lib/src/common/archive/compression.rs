//! # gzpack Single-File Compression (`common::archive::compression`)
//!
//! File: lib/src/common/archive/compression.rs
//!
//! ## Overview
//!
//! Compresses one regular file into a plain gzip stream (no tar framing).
//! Decompressing the output yields exactly the source file's bytes.
//!
//! ## Architecture
//!
//! - The source path is classified first; anything that is not a regular
//!   file yields `GzpackError::NotAFile` without writing to the sink.
//! - A gzip encoder (see `gzip_encoder` in the parent module) wraps the
//!   caller's sink. Under `HeaderStyle::Deterministic` the gzip mtime field
//!   is fixed at 0, otherwise the source file's modification time is recorded.
//! - The file is streamed through the encoder with `std::io::copy`, then the
//!   encoder is finished so the gzip footer (CRC32 + size) is written before
//!   returning. The sink itself is never closed.
//!
use super::gzip_encoder;
use crate::common::fs::classify::is_file;
use crate::core::config::ArchiveOptions;
use crate::core::error::{GzpackError, IoContext, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// # Compress File to Writer (`compress_file_to_writer`)
///
/// Streams the regular file at `source` through a gzip encoder into `sink`.
///
/// ## Arguments
///
/// * `source` - Path of the file to compress.
/// * `sink` - Destination for the gzip stream. Borrowed; left open on return.
/// * `options` - Compression level and header style.
///
/// ## Errors
///
/// - `GzpackError::NotAFile` if `source` is not a regular file. Nothing has
///   been written to `sink` in this case.
/// - `GzpackError::Io` if opening, reading, or writing fails. The sink may
///   hold a partial stream; no rollback is attempted.
pub fn compress_file_to_writer<W>(
    source: &Path,
    sink: &mut W,
    options: &ArchiveOptions,
) -> Result<()>
where
    W: Write + ?Sized,
{
    if !is_file(source) {
        return Err(GzpackError::NotAFile {
            path: source.to_path_buf(),
        });
    }

    let mut file = File::open(source)
        .io_context(|| format!("Failed to open file '{}'", source.display()))?;

    let metadata = file
        .metadata()
        .io_context(|| format!("Failed to read metadata for '{}'", source.display()))?;
    let mut encoder = gzip_encoder(sink, options, &metadata);

    let copied = io::copy(&mut file, &mut encoder).io_context(|| {
        format!("Failed to compress file '{}'", source.display())
    })?;

    // Footer must be written while the source handle is still held.
    encoder
        .finish()
        .io_context(|| "Failed to finish gzip compression stream")?;
    drop(file);

    debug!(
        "Compressed {} bytes from {:?} (level {})",
        copied, source, options.compression_level
    );
    Ok(())
}
