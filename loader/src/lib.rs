//! Loading of option specifications for `pagoda-core`.
//!
//! The core crate works on an in-memory
//! [`Specification`](pagoda_core::Specification); this crate reads one from
//! JSON or YAML, from a file or from bytes, and optionally builds the
//! [`Parser`](pagoda_core::Parser) in the same step.
//!
//! # Quick start
//!
//! ```no_run
//! use pagoda_loader::{SpecLoader, load_parser};
//!
//! // Load a single file; the format follows the extension
//! let parser = load_parser("options.json").unwrap();
//! let result = parser.parse_from(std::env::args_os()).unwrap();
//!
//! // Use the builder for a fallback chain
//! let parser = SpecLoader::new()
//!     .from_file("./options.yaml")
//!     .from_file("/etc/myapp/options.json")
//!     .build_parser()
//!     .unwrap();
//! ```

mod error;
mod loader;

pub use error::{LoadError, Result};
pub use loader::{SpecFormat, SpecLoader, SpecSource, decode, load_parser, load_spec};
