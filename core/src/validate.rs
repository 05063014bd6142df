//! Specification validation.
//!
//! Checks the structural invariants of a decoded [`Specification`] before
//! any argument is matched. Checks run in a fixed order and stop at the
//! first violation:
//!
//! 1. the usage text is non-empty,
//! 2. every declaration has a short or long name,
//! 3. every declaration has a recognized type tag,
//! 4. group tags are used by all declarations or by none,
//! 5. no name is declared twice within one scope (the whole specification,
//!    or a single group when grouped).
//!
//! # Examples
//!
//! ```
//! use pagoda_core::*;
//!
//! let spec = Specification::new("[options] <file>")
//!     .with_option(OptionDeclaration::new(Some("a"), Some("all"), "bool"));
//! assert!(validate_spec(&spec).is_ok());
//!
//! // Invalid: unknown type tag
//! let bad = Specification::new("[options] <file>")
//!     .with_option(OptionDeclaration::new(Some("a"), None, "boolean"));
//! assert!(matches!(validate_spec(&bad), Err(ParseError::UnknownType { .. })));
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::error::ParseError;
use crate::group::check_grouping;
use crate::index::resolve_kind;
use crate::{OptionDeclaration, Specification};

/// Validates a decoded specification.
///
/// # Errors
///
/// Returns the first violated invariant as a [`ParseError`] of kind
/// `MissingUsage`, `IncompleteOption`, `MissingType`, `UnknownType`,
/// `InconsistentGrouping` or `DuplicateOption`.
pub fn validate_spec(spec: &Specification) -> Result<(), ParseError> {
    if spec.usage_info.is_empty() {
        return Err(ParseError::MissingUsage);
    }

    for (index, option) in spec.options.iter().enumerate() {
        if option.short().is_none() && option.long().is_none() {
            return Err(ParseError::IncompleteOption { index });
        }
    }

    for option in &spec.options {
        resolve_kind(option)?;
    }

    let grouped = check_grouping(&spec.options)?;
    if grouped {
        let mut seen_groups: Vec<&str> = Vec::new();
        for group in spec.options.iter().filter_map(OptionDeclaration::group) {
            if seen_groups.contains(&group) {
                continue;
            }
            seen_groups.push(group);
            check_unique_names(spec.options.iter().filter(|o| o.group() == Some(group)))?;
        }
    } else {
        check_unique_names(spec.options.iter())?;
    }

    debug!(
        options = spec.options.len(),
        grouped, "Validated option specification"
    );
    Ok(())
}

fn check_unique_names<'a>(
    options: impl Iterator<Item = &'a OptionDeclaration>,
) -> Result<(), ParseError> {
    let mut seen = HashSet::new();

    for option in options {
        let names: HashSet<&str> = option.short().into_iter().chain(option.long()).collect();
        for name in names {
            if !seen.insert(name) {
                return Err(ParseError::DuplicateOption {
                    name: name.to_string(),
                });
            }
        }
    }

    Ok(())
}
