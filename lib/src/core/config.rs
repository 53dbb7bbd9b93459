//! # gzpack Archive Options
//!
//! File: lib/src/core/config.rs
//!
//! ## Overview
//!
//! This module defines `ArchiveOptions`, the small set of knobs that control
//! how output is encoded. gzpack reads no configuration files of its own; the
//! options derive `serde::Deserialize` so applications that embed gzpack can
//! expose them in their own TOML/JSON configuration.
//!
//! ## Architecture
//!
//! - `ArchiveOptions`: gzip compression level and tar header style.
//! - `HeaderStyle`: maps onto `tar::HeaderMode` and decides whether
//!   filesystem ownership and timestamps are preserved or normalized.
//! - Default value functions provide serde defaults for missing fields, and
//!   unknown fields are rejected (`deny_unknown_fields`).
//! - `ArchiveOptions::validate` checks values serde cannot express.
//!
//! ## Examples
//!
//! ```rust
//! use gzpack::{ArchiveOptions, Archiver, HeaderStyle};
//!
//! # fn main() -> gzpack::Result<()> {
//! let options = ArchiveOptions::default()
//!     .with_compression_level(9)
//!     .with_header_style(HeaderStyle::Deterministic);
//! let archiver = Archiver::new(options)?;
//! assert_eq!(archiver.options().compression_level, 9);
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{GzpackError, Result};
use flate2::Compression;
use serde::Deserialize;

/// Highest gzip compression level accepted by `ArchiveOptions`.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// How much filesystem metadata is copied into tar headers (and the gzip header).
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    /// Preserve mode, ownership and modification times as found on disk.
    #[default]
    Complete,
    /// Normalize ownership, permissions and timestamps for reproducible output.
    Deterministic,
}

impl HeaderStyle {
    pub(crate) fn tar_mode(self) -> tar::HeaderMode {
        match self {
            HeaderStyle::Complete => tar::HeaderMode::Complete,
            HeaderStyle::Deterministic => tar::HeaderMode::Deterministic,
        }
    }
}

/// Options controlling how an `Archiver` encodes its output.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are present
pub struct ArchiveOptions {
    /// Gzip compression level, 0 (store) to 9 (best).
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
    /// Header metadata policy.
    #[serde(default)]
    pub header_style: HeaderStyle,
}

fn default_compression_level() -> u32 {
    Compression::default().level()
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            compression_level: default_compression_level(),
            header_style: HeaderStyle::default(),
        }
    }
}

impl ArchiveOptions {
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_header_style(mut self, style: HeaderStyle) -> Self {
        self.header_style = style;
        self
    }

    /// Checks the options for values that would be rejected by the encoders.
    ///
    /// # Errors
    ///
    /// Returns `GzpackError::Config` if `compression_level` exceeds
    /// `MAX_COMPRESSION_LEVEL`.
    pub fn validate(&self) -> Result<()> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(GzpackError::Config(format!(
                "compression level {} is out of range (0-{})",
                self.compression_level, MAX_COMPRESSION_LEVEL
            )));
        }
        Ok(())
    }

    pub(crate) fn compression(&self) -> Compression {
        Compression::new(self.compression_level)
    }
}
