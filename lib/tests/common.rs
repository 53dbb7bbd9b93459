//! # gzpack Integration Test Common Helpers
//!
//! File: lib/tests/common.rs
//!
//! ## Overview
//!
//! Shared fixtures and decoding helpers for the integration tests in
//! `lib/tests/`. Each test file declares `mod common;` to pull these in.
//!

// Different test files use different helpers.
#![allow(dead_code)]

use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Content written into every fixture file.
pub const FILE_CONTENTS: &str = "Here is some example text";

/// Installs a log subscriber that honours `RUST_LOG` (default `warn`).
/// Safe to call from every test; only the first call takes effect.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

/// Creates `<base>/gzpack-test-file.txt` holding `FILE_CONTENTS`.
pub fn file_to_archive(base: &Path) -> anyhow::Result<PathBuf> {
    let path = base.join("gzpack-test-file.txt");
    fs::write(&path, FILE_CONTENTS)?;
    Ok(path)
}

/// Creates `<base>/gzpack-test-dir/` containing one file holding `FILE_CONTENTS`.
pub fn folder_to_archive(base: &Path) -> anyhow::Result<PathBuf> {
    let dir = base.join("gzpack-test-dir");
    fs::create_dir(&dir)?;
    fs::write(dir.join("gzpack-test-file.txt"), FILE_CONTENTS)?;
    Ok(dir)
}

/// Path for an output archive inside a fresh `out/` directory under `base`.
pub fn output_file_path(base: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let out_dir = base.join("out");
    fs::create_dir_all(&out_dir)?;
    Ok(out_dir.join(name))
}

/// Decompresses a gzip buffer.
pub fn gunzip(bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut decoded = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut decoded)?;
    Ok(decoded)
}

/// Unpacks a `.tar.gz` buffer into `dest`.
pub fn unpack(tar_gz: &[u8], dest: &Path) -> anyhow::Result<()> {
    let mut archive = tar::Archive::new(GzDecoder::new(tar_gz));
    archive.unpack(dest)?;
    Ok(())
}

/// Entry paths of a `.tar.gz` buffer, in archive order, with `/` separators.
pub fn entry_paths(tar_gz: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut archive = tar::Archive::new(GzDecoder::new(tar_gz));
    let mut paths = Vec::new();
    for entry_result in archive.entries()? {
        let entry = entry_result?;
        paths.push(entry.path()?.to_string_lossy().replace('\\', "/"));
    }
    Ok(paths)
}
