//! Resolved option entries and name lookup.

use crate::coerce::coerce;
use crate::error::ParseError;
use crate::{OptionDeclaration, OptionKind, Value};

/// A declaration with its type tag resolved and its default coerced.
///
/// Entries are built once when a [`Parser`](crate::Parser) is created and
/// are read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionEntry {
    pub declaration: OptionDeclaration,
    pub kind: OptionKind,
    pub default: Option<Value>,
    synthetic: bool,
}

impl OptionEntry {
    /// Resolves a declaration that already passed validation.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingType`] or [`ParseError::UnknownType`] for
    /// a bad type tag, and [`ParseError::TypeMismatch`] when the default
    /// does not convert to the declared kind.
    pub fn resolve(declaration: &OptionDeclaration) -> Result<Self, ParseError> {
        let kind = resolve_kind(declaration)?;
        let default = declaration
            .default
            .as_deref()
            .map(|text| coerce(text, kind))
            .transpose()
            .map_err(|err| err.for_option(declaration.canonical_name()))?;

        Ok(Self {
            declaration: declaration.clone(),
            kind,
            default,
            synthetic: false,
        })
    }

    /// The `-h`/`--help` entry injected into every active option set.
    pub fn help() -> Self {
        Self {
            declaration: OptionDeclaration::help(),
            kind: OptionKind::Bool,
            default: Some(Value::Bool(true)),
            synthetic: true,
        }
    }

    /// Whether this is the injected help entry.
    pub fn is_help(&self) -> bool {
        self.synthetic
    }

    pub fn matches(&self, name: &str) -> bool {
        self.declaration.matches(name)
    }

    pub fn name(&self) -> &str {
        self.declaration.canonical_name()
    }
}

/// Resolves the type tag of a declaration.
pub(crate) fn resolve_kind(declaration: &OptionDeclaration) -> Result<OptionKind, ParseError> {
    let tag = declaration
        .type_tag
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ParseError::MissingType {
            option: declaration.canonical_name().to_string(),
        })?;

    OptionKind::from_tag(tag).ok_or_else(|| ParseError::UnknownType {
        option: declaration.canonical_name().to_string(),
        type_tag: tag.to_string(),
    })
}

/// Finds the first entry whose short or long name equals `name`.
///
/// Matching is exact and case-sensitive.
pub fn find_option<'a>(options: &'a [OptionEntry], name: &str) -> Option<&'a OptionEntry> {
    options.iter().find(|entry| entry.matches(name))
}
