//! Error types for specification loading.
//!
//! Covers every failure between a file on disk and a ready
//! [`Parser`](pagoda_core::Parser): I/O, decoding, unsupported formats, and
//! structural errors found by validation.

use std::path::PathBuf;

use pagoda_core::ParseError;
use thiserror::Error;

/// Errors that can occur while loading a specification.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON decoding failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML decoding failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file extension names no supported format.
    #[error("unsupported specification format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The decoded specification failed validation.
    #[error("invalid specification: {0}")]
    InvalidSpec(#[from] ParseError),

    /// None of the configured sources exists.
    #[error("no specification sources available")]
    NoSourcesAvailable,
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
