//! Error types for specification validation, matching and result queries.

use std::fmt;

use thiserror::Error;

use crate::OptionKind;

/// Errors returned by validation, matching and [`MatchResult`](crate::MatchResult)
/// queries.
///
/// Matching errors carry the usage text of the active option set in their
/// `usage` field so the caller can show it next to the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The specification has no usage text.
    #[error("usage string missing")]
    MissingUsage,
    /// A declaration has neither a short nor a long name.
    #[error("option #{index} needs at least a short or long name")]
    IncompleteOption { index: usize },
    /// A declaration has no type tag.
    #[error("need a type descriptor for option {option}")]
    MissingType { option: String },
    /// A declaration has a type tag outside the recognized set.
    #[error("unknown type {type_tag} for option {option}")]
    UnknownType { option: String, type_tag: String },
    /// Some declarations carry a group tag and others do not.
    #[error("option {option} has no subcommand while others do")]
    InconsistentGrouping { option: String },
    /// Two declarations in the same scope share a name.
    #[error("duplicate option name {name}")]
    DuplicateOption { name: String },
    /// The subcommand token does not name a declared group.
    #[error("unknown subcommand {name}")]
    UnknownGroup { name: String, usage: String },
    /// An option token does not resolve in the active option set.
    #[error("unknown command line option {token}")]
    UnknownOption { token: String, usage: String },
    /// A non-boolean option received no value and has no default.
    #[error("missing value for option {option}")]
    MissingValue { option: String, usage: String },
    /// A supplied or default value failed to convert to the declared kind.
    #[error("cannot convert {value:?} to requested type {kind} for option {option}")]
    TypeMismatch {
        option: String,
        value: String,
        kind: OptionKind,
    },
    /// A queried option or subcommand was never bound.
    #[error("command line option {name} not found")]
    NotFound { name: String },
}

/// Discriminant of a [`ParseError`], for callers that only need the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingUsage,
    IncompleteOption,
    MissingType,
    UnknownType,
    InconsistentGrouping,
    DuplicateOption,
    UnknownGroup,
    UnknownOption,
    MissingValue,
    TypeMismatch,
    NotFound,
}

impl ErrorKind {
    /// Whether this kind describes a malformed specification rather than
    /// bad command-line input.
    pub fn is_spec_error(self) -> bool {
        matches!(
            self,
            Self::MissingUsage
                | Self::IncompleteOption
                | Self::MissingType
                | Self::UnknownType
                | Self::InconsistentGrouping
                | Self::DuplicateOption
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl ParseError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingUsage => ErrorKind::MissingUsage,
            Self::IncompleteOption { .. } => ErrorKind::IncompleteOption,
            Self::MissingType { .. } => ErrorKind::MissingType,
            Self::UnknownType { .. } => ErrorKind::UnknownType,
            Self::InconsistentGrouping { .. } => ErrorKind::InconsistentGrouping,
            Self::DuplicateOption { .. } => ErrorKind::DuplicateOption,
            Self::UnknownGroup { .. } => ErrorKind::UnknownGroup,
            Self::UnknownOption { .. } => ErrorKind::UnknownOption,
            Self::MissingValue { .. } => ErrorKind::MissingValue,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Rendered usage text attached to matching errors.
    pub fn usage(&self) -> Option<&str> {
        match self {
            Self::UnknownGroup { usage, .. }
            | Self::UnknownOption { usage, .. }
            | Self::MissingValue { usage, .. } => Some(usage),
            _ => None,
        }
    }
}

/// Failure to convert text into an [`OptionKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {value:?} to requested type {kind}")]
pub struct CoercionError {
    pub value: String,
    pub kind: OptionKind,
}

impl CoercionError {
    /// Attaches the option name, producing [`ParseError::TypeMismatch`].
    pub fn for_option(self, option: &str) -> ParseError {
        ParseError::TypeMismatch {
            option: option.to_string(),
            value: self.value,
            kind: self.kind,
        }
    }
}
