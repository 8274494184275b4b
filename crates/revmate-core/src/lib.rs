//! Core types, configuration, and error handling for revmate.
//!
//! This crate provides the shared foundation used by the other revmate
//! crates:
//! - [`RevmateError`] — unified error type using `thiserror`
//! - [`RevmateConfig`] — configuration loaded from `.revmate.toml`
//! - Shared types: [`Author`], [`CommitRef`], [`FileChange`], [`LineEdit`],
//!   [`ChangeKind`], [`OutputFormat`]
//! - [`TraceSink`] — the injected line-oriented diagnostic channel

mod config;
mod error;
mod trace;
mod types;

pub use config::{ReportConfig, RevmateConfig, WalkConfig};
pub use error::RevmateError;
pub use trace::{MemoryTrace, NullTrace, StderrTrace, TraceSink};
pub use types::{Author, ChangeKind, CommitRef, FileChange, LineEdit, OutputFormat};

/// A convenience `Result` type for revmate operations.
pub type Result<T> = std::result::Result<T, RevmateError>;
