//! Classification of raw argument tokens.

use std::ffi::OsStr;

/// A classified argument token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `-name`, `--name`, `-name=value` or `--name=value`.
    Option {
        name: &'a str,
        /// Text after the first `=`, possibly empty.
        inline: Option<&'a str>,
    },
    /// Anything else; starts the remainder.
    NotOption,
}

impl Token<'_> {
    pub fn is_option(&self) -> bool {
        matches!(self, Self::Option { .. })
    }
}

/// Classifies a single argument.
///
/// A token is an option when it starts with `-` and is longer than the
/// lone `-`. One further leading `-` is stripped, and the name runs up to
/// the first `=`.
///
/// # Examples
///
/// ```
/// use pagoda_core::{Token, classify};
///
/// assert_eq!(
///     classify("--bar=3.5"),
///     Token::Option { name: "bar", inline: Some("3.5") }
/// );
/// assert_eq!(classify("-a"), Token::Option { name: "a", inline: None });
/// assert_eq!(classify("-"), Token::NotOption);
/// assert_eq!(classify("file.txt"), Token::NotOption);
/// ```
pub fn classify(token: &str) -> Token<'_> {
    let Some(rest) = token.strip_prefix('-') else {
        return Token::NotOption;
    };
    if rest.is_empty() {
        return Token::NotOption;
    }

    let body = rest.strip_prefix('-').unwrap_or(rest);
    match body.split_once('=') {
        Some((name, value)) => Token::Option {
            name,
            inline: Some(value),
        },
        None => Token::Option {
            name: body,
            inline: None,
        },
    }
}

/// Classifies an OS-encoded argument.
///
/// Tokens that are not valid UTF-8 are never options.
pub fn classify_os(token: &OsStr) -> Token<'_> {
    match token.to_str() {
        Some(s) => classify(s),
        None => Token::NotOption,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_double_dash() {
        assert_eq!(
            classify("-b"),
            Token::Option {
                name: "b",
                inline: None
            }
        );
        assert_eq!(
            classify("--bar"),
            Token::Option {
                name: "bar",
                inline: None
            }
        );
    }

    #[test]
    fn test_inline_value_splits_on_first_equals() {
        assert_eq!(
            classify("--define=a=b"),
            Token::Option {
                name: "define",
                inline: Some("a=b")
            }
        );
        assert_eq!(
            classify("-c="),
            Token::Option {
                name: "c",
                inline: Some("")
            }
        );
    }

    #[test]
    fn test_non_options() {
        assert_eq!(classify(""), Token::NotOption);
        assert_eq!(classify("-"), Token::NotOption);
        assert_eq!(classify("extra"), Token::NotOption);
        assert_eq!(classify("a-b"), Token::NotOption);
    }

    #[test]
    fn test_double_dash_alone_has_empty_name() {
        assert_eq!(
            classify("--"),
            Token::Option {
                name: "",
                inline: None
            }
        );
    }

    #[test]
    fn test_multibyte_names() {
        assert_eq!(
            classify("--größe=3"),
            Token::Option {
                name: "größe",
                inline: Some("3")
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_utf8_is_not_an_option() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"-\xff\xfe");
        assert_eq!(classify_os(raw), Token::NotOption);
        assert!(classify_os(OsStr::new("-a")).is_option());
    }
}
