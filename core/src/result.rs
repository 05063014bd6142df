//! The queryable outcome of a successful match.

use std::ffi::OsString;

use serde::{Serialize, Serializer};

use crate::error::ParseError;
use crate::index::OptionEntry;
use crate::{OptionDeclaration, OptionKind, Value};

/// A declaration paired with the value it was bound to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundOption {
    /// Canonical name of the declaration (long name preferred)
    pub name: String,
    pub value: Value,
    #[serde(skip)]
    pub declaration: OptionDeclaration,
    #[serde(skip)]
    help: bool,
}

impl BoundOption {
    pub(crate) fn new(entry: &OptionEntry, value: Value) -> Self {
        Self {
            name: entry.name().to_string(),
            value,
            declaration: entry.declaration.clone(),
            help: entry.is_help(),
        }
    }

    /// Checks the short and long name of the declaration.
    pub fn matches(&self, name: &str) -> bool {
        self.declaration.matches(name)
    }

    /// Whether this is the injected help option.
    pub fn is_help(&self) -> bool {
        self.help
    }
}

/// Bound options, remainder and selected subcommand of one parse.
///
/// Only options that appeared on the command line are bound; a declared
/// option that was never mentioned has no entry even when it has a default.
///
/// # Examples
///
/// ```
/// use pagoda_core::*;
///
/// let spec = Specification::new("[options] <file>")
///     .with_option(OptionDeclaration::new(Some("a"), Some("all"), "bool"))
///     .with_option(OptionDeclaration::new(Some("b"), Some("bar"), "float"));
/// let parser = Parser::new(spec).unwrap();
///
/// let result = parser.parse(["-a", "--bar", "3.5", "extra"]).unwrap();
/// assert_eq!(result.value("a").unwrap(), &Value::Bool(true));
/// assert_eq!(result.get_float("bar").unwrap(), 3.5);
/// assert_eq!(result.remainder(), ["extra"]);
/// assert!(!result.help_requested());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchResult {
    options: Vec<BoundOption>,
    #[serde(serialize_with = "serialize_lossy")]
    remainder: Vec<OsString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subcommand: Option<String>,
    #[serde(skip)]
    grouped: bool,
    help_requested: bool,
}

impl MatchResult {
    pub(crate) fn new(grouped: bool) -> Self {
        Self {
            grouped,
            ..Default::default()
        }
    }

    /// Binds `value` to `entry`, replacing an earlier binding of the same
    /// declaration in place.
    pub(crate) fn bind(&mut self, entry: &OptionEntry, value: Value) {
        let bound = BoundOption::new(entry, value);
        match self
            .options
            .iter_mut()
            .find(|b| b.declaration == bound.declaration && b.help == bound.help)
        {
            Some(existing) => *existing = bound,
            None => self.options.push(bound),
        }
        if entry.is_help() {
            self.help_requested = true;
        }
    }

    pub(crate) fn select_subcommand(&mut self, name: &str) {
        self.subcommand = Some(name.to_string());
    }

    pub(crate) fn set_remainder(&mut self, remainder: Vec<OsString>) {
        self.remainder = remainder;
    }

    /// Returns the value bound to the option named `name` (short or long).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NotFound`] when the option was not bound.
    pub fn value(&self, name: &str) -> Result<&Value, ParseError> {
        self.options
            .iter()
            .find(|b| b.matches(name))
            .map(|b| &b.value)
            .ok_or_else(|| ParseError::NotFound {
                name: name.to_string(),
            })
    }

    /// Whether the option named `name` was bound.
    pub fn contains(&self, name: &str) -> bool {
        self.value(name).is_ok()
    }

    /// Returns the boolean bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NotFound`] when the option was not bound, or
    /// [`ParseError::TypeMismatch`] when it holds another kind.
    pub fn get_bool(&self, name: &str) -> Result<bool, ParseError> {
        let value = self.value(name)?;
        value
            .as_bool()
            .ok_or_else(|| kind_mismatch(name, value, OptionKind::Bool))
    }

    /// Returns the integer bound to `name`; errors as [`get_bool`](Self::get_bool).
    pub fn get_int(&self, name: &str) -> Result<i64, ParseError> {
        let value = self.value(name)?;
        value
            .as_int()
            .ok_or_else(|| kind_mismatch(name, value, OptionKind::Int))
    }

    /// Returns the float bound to `name`; errors as [`get_bool`](Self::get_bool).
    pub fn get_float(&self, name: &str) -> Result<f64, ParseError> {
        let value = self.value(name)?;
        value
            .as_float()
            .ok_or_else(|| kind_mismatch(name, value, OptionKind::Float))
    }

    /// Returns the string bound to `name`; errors as [`get_bool`](Self::get_bool).
    pub fn get_str(&self, name: &str) -> Result<&str, ParseError> {
        let value = self.value(name)?;
        value
            .as_str()
            .ok_or_else(|| kind_mismatch(name, value, OptionKind::String))
    }

    /// Bound options in order of first appearance on the command line.
    pub fn bound(&self) -> &[BoundOption] {
        &self.options
    }

    /// Tokens from the first non-option token to the end, exactly as they
    /// were passed in.
    pub fn remainder(&self) -> &[OsString] {
        &self.remainder
    }

    /// Returns the selected subcommand.
    ///
    /// `Ok(None)` means the specification is grouped but no subcommand was
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NotFound`] when the specification is not grouped.
    pub fn subcommand(&self) -> Result<Option<&str>, ParseError> {
        if !self.grouped {
            return Err(ParseError::NotFound {
                name: "subcommand".to_string(),
            });
        }
        Ok(self.subcommand.as_deref())
    }

    /// Whether the parse ran against a grouped specification.
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// Whether `-h`/`--help` was given.
    pub fn help_requested(&self) -> bool {
        self.help_requested
    }
}

/// Remainder tokens serialize as text; bytes that are not UTF-8 become
/// U+FFFD.
fn serialize_lossy<S>(tokens: &[OsString], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(tokens.iter().map(|token| token.to_string_lossy()))
}

fn kind_mismatch(name: &str, value: &Value, kind: OptionKind) -> ParseError {
    ParseError::TypeMismatch {
        option: name.to_string(),
        value: value.to_string(),
        kind,
    }
}
