//! Specification type definitions.
//!
//! This module defines the data model a caller hands to the parser: the
//! decoded [`Specification`] with its [`OptionDeclaration`]s, the closed set
//! of [`OptionKind`]s an option can take, and the typed [`Value`] produced
//! once a declaration is matched. The declaration types are designed for
//! deserialization with [`serde`] from JSON (or any other serde format).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Short name of the option injected into every option set.
pub const HELP_SHORT: &str = "h";

/// Long name of the option injected into every option set.
pub const HELP_LONG: &str = "help";

/// Type of value an option accepts.
///
/// # Examples
///
/// ```
/// use pagoda_core::OptionKind;
///
/// assert_eq!(OptionKind::from_tag("float"), Some(OptionKind::Float));
/// assert_eq!(OptionKind::from_tag("Float"), None);
/// assert_eq!(OptionKind::Int.as_str(), "int");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// `true`/`false` switch.
    Bool,
    /// Base-10 signed 64-bit integer.
    Int,
    /// 64-bit floating-point number.
    Float,
    /// Arbitrary text.
    String,
}

impl OptionKind {
    /// Resolves a type tag as written in a specification.
    ///
    /// Tags are case-sensitive; anything outside `bool`, `int`, `float` and
    /// `string` yields `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    /// Returns the tag used for this kind in specifications.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed option value.
///
/// # Examples
///
/// ```
/// use pagoda_core::{OptionKind, Value};
///
/// let value = Value::Float(3.5);
/// assert_eq!(value.kind(), OptionKind::Float);
/// assert_eq!(value.as_float(), Some(3.5));
/// assert_eq!(value.as_int(), None);
/// assert_eq!(value.to_string(), "3.5");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Value of a `bool` option
    Bool(bool),
    /// Value of an `int` option, base-10 and 64-bit
    Int(i64),
    /// Value of a `float` option
    Float(f64),
    /// Value of a `string` option, possibly empty
    String(String),
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Bool(_) => OptionKind::Bool,
            Self::Int(_) => OptionKind::Int,
            Self::Float(_) => OptionKind::Float,
            Self::String(_) => OptionKind::String,
        }
    }

    /// Returns the boolean, or `None` for any other kind.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, or `None` for any other kind.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float, or `None` for any other kind.
    ///
    /// Integers are not widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string, or `None` for any other kind.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Declaration of a single accepted option.
///
/// Names are stored without leading dashes: a declaration with
/// `short_option = "b"` and `long_option = "bar"` matches `-b`, `--b`,
/// `-bar` and `--bar` on the command line.
///
/// The type tag and default are kept as the raw text of the specification;
/// the validator resolves the tag into an [`OptionKind`] and coerces the
/// default before any argument is matched.
///
/// # Examples
///
/// ```
/// use pagoda_core::OptionDeclaration;
///
/// let bar = OptionDeclaration::new(Some("b"), Some("bar"), "float")
///     .with_description("this causes trouble")
///     .with_default("1.5");
/// assert!(bar.matches("b"));
/// assert!(bar.matches("bar"));
/// assert!(!bar.matches("baz"));
/// assert_eq!(bar.canonical_name(), "bar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionDeclaration {
    /// Short name (e.g. "b")
    #[serde(default, alias = "Short_option", skip_serializing_if = "Option::is_none")]
    pub short_option: Option<String>,
    /// Long name (e.g. "bar")
    #[serde(default, alias = "Long_option", skip_serializing_if = "Option::is_none")]
    pub long_option: Option<String>,
    /// Description shown in usage text
    #[serde(default, alias = "Description")]
    pub description: String,
    /// Raw type tag (`bool`, `int`, `float` or `string`)
    #[serde(rename = "type", default, alias = "Type", skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    /// Raw default text, coerced at load time
    #[serde(default, alias = "Default", skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Group (subcommand) this option belongs to
    #[serde(default, alias = "Subcommand", skip_serializing_if = "Option::is_none")]
    pub subcommand: Option<String>,
}

impl OptionDeclaration {
    /// Creates a declaration with the given names and type tag.
    pub fn new(short: Option<&str>, long: Option<&str>, type_tag: &str) -> Self {
        Self {
            short_option: short.map(String::from),
            long_option: long.map(String::from),
            type_tag: Some(type_tag.to_string()),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Adds a default value, given as text.
    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    /// Places the option in a group.
    pub fn in_group(mut self, group: &str) -> Self {
        self.subcommand = Some(group.to_string());
        self
    }

    /// Short name, if present and non-empty.
    pub fn short(&self) -> Option<&str> {
        self.short_option.as_deref().filter(|s| !s.is_empty())
    }

    /// Long name, if present and non-empty.
    pub fn long(&self) -> Option<&str> {
        self.long_option.as_deref().filter(|s| !s.is_empty())
    }

    /// Group tag, if present and non-empty.
    pub fn group(&self) -> Option<&str> {
        self.subcommand.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns the canonical name (long name preferred, falls back to short).
    pub fn canonical_name(&self) -> &str {
        self.long().or(self.short()).unwrap_or("unknown")
    }

    /// Checks whether `name` equals the short or the long name.
    ///
    /// Matching is exact and case-sensitive; empty names never match.
    pub fn matches(&self, name: &str) -> bool {
        !name.is_empty() && (self.short() == Some(name) || self.long() == Some(name))
    }

    pub(crate) fn help() -> Self {
        Self::new(Some(HELP_SHORT), Some(HELP_LONG), "bool")
            .with_description("this message")
            .with_default("true")
    }
}

/// The decoded option specification.
///
/// # Examples
///
/// ```
/// use pagoda_core::Specification;
///
/// let spec = Specification::from_json(br#"{
///     "usage_info": "[options] <filename>",
///     "options": [
///         { "short_option": "a", "long_option": "all", "type": "bool" }
///     ]
/// }"#).unwrap();
/// assert_eq!(spec.usage_info, "[options] <filename>");
/// assert!(spec.find_option("all").is_some());
/// assert!(!spec.is_grouped());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Specification {
    /// Usage line shown after the program name
    #[serde(default, alias = "Usage_info")]
    pub usage_info: String,
    /// Declared options, in declaration order
    #[serde(default, alias = "Options")]
    pub options: Vec<OptionDeclaration>,
    /// Group descriptions as a list of `{ "name": "description" }` objects
    #[serde(default, alias = "Subcommand_info", skip_serializing_if = "Vec::is_empty")]
    pub subcommand_info: Vec<BTreeMap<String, String>>,
}

impl Specification {
    /// Creates an empty specification with the given usage text.
    pub fn new(usage_info: &str) -> Self {
        Self {
            usage_info: usage_info.to_string(),
            ..Default::default()
        }
    }

    /// Decodes a specification from JSON bytes.
    ///
    /// Decoding does not validate; see [`validate_spec`](crate::validate_spec).
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Adds an option.
    pub fn with_option(mut self, option: OptionDeclaration) -> Self {
        self.options.push(option);
        self
    }

    /// Registers a description for a group.
    pub fn with_group_description(mut self, group: &str, description: &str) -> Self {
        let mut entry = BTreeMap::new();
        entry.insert(group.to_string(), description.to_string());
        self.subcommand_info.push(entry);
        self
    }

    /// Finds the first declaration whose short or long name is `name`.
    pub fn find_option(&self, name: &str) -> Option<&OptionDeclaration> {
        self.options.iter().find(|o| o.matches(name))
    }

    /// Whether any declaration carries a group tag.
    pub fn is_grouped(&self) -> bool {
        self.options.iter().any(|o| o.group().is_some())
    }

    /// Returns the registered description of `group`, if any.
    ///
    /// When a group is registered more than once, the first entry wins.
    pub fn group_description(&self, group: &str) -> Option<&str> {
        self.subcommand_info
            .iter()
            .find_map(|entry| entry.get(group))
            .map(String::as_str)
    }
}
