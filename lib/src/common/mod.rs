//! # gzpack Common Utilities (`common`)
//!
//! File: lib/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks behind the public API in the crate root:
//!
//! - **`archive`**: the file archiver (`compression`), the directory
//!   archiver (`tar`) and the `Archiver` dispatcher.
//! - **`fs`**: path classification used by the archivers to decide what a
//!   source path is before writing anything.
//!

/// File and directory archivers plus the `Archiver` dispatcher.
pub mod archive;
/// Filesystem helpers (path classification).
pub mod fs;
