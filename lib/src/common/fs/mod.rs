//! # gzpack Filesystem Utilities (`common::fs`)
//!
//! File: lib/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers used by the archivers.
//!
//! - **`classify`**: Decides whether a source path is a regular file, a
//!   directory, or neither (`classify`, `is_file`, `is_dir`).
//!

/// Path classification (`PathKind`, `classify`, `is_file`, `is_dir`).
pub mod classify;
