//! Declarative command-line option parsing.
//!
//! Callers describe the accepted options in a [`Specification`] (usually
//! decoded from JSON) and match argument tokens against it:
//!
//! - [`Specification`] / [`OptionDeclaration`]: the decoded description of
//!   usage text, options, and optional subcommand groups.
//! - [`validate_spec`]: structural checks run before any matching.
//! - [`Parser`]: a validated specification with coerced defaults, ready to
//!   match tokens into a [`MatchResult`].
//! - [`MatchResult`]: typed values, the unparsed remainder, the selected
//!   subcommand, and whether help was requested.
//! - [`render_usage`]: usage text for an option set or a group listing.
//!
//! The crate performs no I/O: printing usage and exiting on `--help` are
//! left to the caller.
//!
//! # Example
//!
//! ```
//! use pagoda_core::*;
//!
//! let spec = Specification::from_json(br#"{
//!     "usage_info": "[options] <filename>",
//!     "options": [
//!         { "short_option": "a", "long_option": "all", "description": "list them all",
//!           "type": "bool", "default": "true" },
//!         { "short_option": "b", "long_option": "bar", "description": "this causes trouble",
//!           "type": "float" },
//!         { "short_option": "c", "description": "the name of the thing", "type": "string" }
//!     ]
//! }"#).unwrap();
//!
//! let parser = Parser::new(spec).unwrap();
//! let result = parser.parse(["-a", "--bar=3.5", "notes.txt"]).unwrap();
//!
//! assert!(result.get_bool("all").unwrap());
//! assert_eq!(result.get_float("b").unwrap(), 3.5);
//! assert_eq!(result.remainder(), ["notes.txt"]);
//! assert!(result.value("c").is_err());
//! ```

mod coerce;
mod error;
mod group;
mod index;
mod matcher;
mod result;
mod token;
mod types;
mod usage;
mod validate;

pub use coerce::coerce;
pub use error::{CoercionError, ErrorKind, ParseError};
pub use group::{GroupIndex, check_grouping};
pub use index::{OptionEntry, find_option};
pub use matcher::Parser;
pub use result::{BoundOption, MatchResult};
pub use token::{Token, classify, classify_os};
pub use types::*;
pub use usage::{UsageScope, render_usage};
pub use validate::validate_spec;
