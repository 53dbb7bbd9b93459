//! # gzpack Core Infrastructure
//!
//! File: lib/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the archiving code:
//! - `config`: `ArchiveOptions` and `HeaderStyle`
//! - `error`: `GzpackError` and the `Result` alias
//!
pub mod config;
pub mod error;
