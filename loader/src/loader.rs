//! Specification loading with builder pattern and fallback chains.
//!
//! Provides [`load_spec`] / [`load_parser`] for a single file and
//! [`SpecLoader`] for trying several sources in order.
//!
//! # Loading patterns
//!
//! ```no_run
//! use pagoda_loader::{SpecFormat, SpecLoader, decode, load_spec};
//!
//! // Load a single file; `.json`, `.yaml` and `.yml` are recognized
//! let spec = load_spec("options.json").unwrap();
//!
//! // Decode bytes that are already in memory
//! let spec = decode(br#"{ "usage_info": "[options]" }"#, SpecFormat::Json).unwrap();
//!
//! // Try a user file first, then fall back to an embedded default
//! let spec = SpecLoader::new()
//!     .from_file("options.yaml")
//!     .from_bytes("builtin", SpecFormat::Json, br#"{ "usage_info": "[options]" }"#)
//!     .load()
//!     .unwrap();
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pagoda_core::{Parser, Specification};
use tracing::debug;

use crate::error::{LoadError, Result};

/// Encoding of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// Picks the format from a file extension (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use pagoda_loader::SpecFormat;
    ///
    /// assert_eq!(SpecFormat::from_path("opts.json"), Some(SpecFormat::Json));
    /// assert_eq!(SpecFormat::from_path("opts.YML"), Some(SpecFormat::Yaml));
    /// assert_eq!(SpecFormat::from_path("opts.toml"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Describes where a specification was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// A file whose format follows its extension.
    File(PathBuf),
    /// In-memory bytes, typically embedded with `include_bytes!`.
    Bytes {
        name: String,
        format: SpecFormat,
        bytes: Vec<u8>,
    },
}

impl SpecSource {
    fn load(&self) -> Result<Specification> {
        match self {
            Self::File(path) => load_spec(path),
            Self::Bytes {
                name,
                format,
                bytes,
            } => {
                debug!(source = %name, "Decoding embedded option specification");
                decode(bytes, *format)
            }
        }
    }
}

/// Decodes a specification without validating it.
///
/// # Errors
///
/// Returns [`LoadError::JsonError`] or [`LoadError::YamlError`] when the
/// bytes are not a well-formed document of the expected shape.
pub fn decode(bytes: &[u8], format: SpecFormat) -> Result<Specification> {
    let spec = match format {
        SpecFormat::Json => serde_json::from_slice(bytes)?,
        SpecFormat::Yaml => serde_yaml::from_slice(bytes)?,
    };
    Ok(spec)
}

/// Reads and decodes a specification file.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFormat`] for an unknown extension,
/// [`LoadError::IoError`] if the file cannot be read, or a decoding error.
pub fn load_spec(path: impl AsRef<Path>) -> Result<Specification> {
    let path = path.as_ref();
    let format =
        SpecFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

    debug!(path = %path.display(), ?format, "Loading option specification");
    let bytes = std::fs::read(path)?;
    decode(&bytes, format)
}

/// Reads a specification file and builds a [`Parser`] from it.
///
/// # Errors
///
/// Everything [`load_spec`] returns, plus [`LoadError::InvalidSpec`] when
/// the specification fails validation.
pub fn load_parser(path: impl AsRef<Path>) -> Result<Parser> {
    let spec = load_spec(path)?;
    Ok(Parser::new(spec)?)
}

/// Builder that tries several specification sources in order.
///
/// A file source that does not exist is skipped; any other failure (an
/// unreadable file, a malformed document) stops the chain and is returned,
/// so a broken user file never silently falls back to a default.
///
/// # Example
///
/// ```no_run
/// use pagoda_loader::SpecLoader;
///
/// let (spec, source) = SpecLoader::new()
///     .from_file("./options.json")
///     .from_file("/usr/share/myapp/options.json")
///     .load_with_source()
///     .unwrap();
/// println!("loaded {} options from {source:?}", spec.options.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpecLoader {
    sources: Vec<SpecSource>,
}

impl SpecLoader {
    /// Creates a loader with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file as a source.
    pub fn from_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(SpecSource::File(path.into()));
        self
    }

    /// Adds in-memory bytes as a source.
    pub fn from_bytes(mut self, name: &str, format: SpecFormat, bytes: &[u8]) -> Self {
        self.sources.push(SpecSource::Bytes {
            name: name.to_string(),
            format,
            bytes: bytes.to_vec(),
        });
        self
    }

    pub fn sources(&self) -> &[SpecSource] {
        &self.sources
    }

    /// Loads the first available source.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoSourcesAvailable`] when no source exists, or
    /// the first error that is not a missing file.
    pub fn load(self) -> Result<Specification> {
        self.load_with_source().map(|(spec, _)| spec)
    }

    /// Like [`load`](Self::load), also returning the source that was used.
    pub fn load_with_source(self) -> Result<(Specification, SpecSource)> {
        for source in self.sources {
            match source.load() {
                Ok(spec) => return Ok((spec, source)),
                Err(LoadError::IoError(err)) if err.kind() == ErrorKind::NotFound => {
                    debug!(?source, "Specification source not found, trying next");
                }
                Err(err) => return Err(err),
            }
        }

        Err(LoadError::NoSourcesAvailable)
    }

    /// Loads the first available source and builds a [`Parser`] from it.
    pub fn build_parser(self) -> Result<Parser> {
        let spec = self.load()?;
        Ok(Parser::new(spec)?)
    }
}
