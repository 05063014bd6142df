//! Matching of argument tokens against a validated specification.
//!
//! A [`Parser`] is built once from a [`Specification`]: the specification is
//! validated, type tags are resolved, defaults are coerced, options are
//! partitioned into groups when group tags are present, and the `-h/--help`
//! option is injected. The parser is immutable afterwards, so one parser can
//! serve any number of [`Parser::parse`] calls, from any number of threads.
//!
//! Matching walks the tokens once:
//!
//! ```text
//! ExpectingSubcommand ──> ScanningOptions ──> CollectingRemainder ──> Done
//!   (grouped only)            │    ^                                  ^
//!                             └────┘ one option (plus its value)      │
//!                             └───────────────── end of input ────────┘
//! ```

use std::ffi::{OsStr, OsString};

use tracing::debug;

use crate::error::ParseError;
use crate::group::GroupIndex;
use crate::index::{OptionEntry, find_option};
use crate::result::MatchResult;
use crate::token::{Token, classify_os};
use crate::usage::{UsageScope, render_usage};
use crate::validate::validate_spec;
use crate::{OptionKind, Specification, Value, coerce};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectingSubcommand,
    ScanningOptions,
    CollectingRemainder,
    Done,
}

/// A validated specification, ready to match arguments.
///
/// # Examples
///
/// ```
/// use pagoda_core::*;
///
/// let spec = Specification::new("[options]")
///     .with_option(OptionDeclaration::new(Some("v"), Some("verbose"), "bool").in_group("general"))
///     .with_option(OptionDeclaration::new(Some("n"), None, "int").in_group("special"));
/// let parser = Parser::new(spec).unwrap();
///
/// let result = parser.parse(["general", "-v"]).unwrap();
/// assert_eq!(result.subcommand().unwrap(), Some("general"));
/// assert!(result.get_bool("verbose").unwrap());
///
/// let err = parser.parse(["special", "-v"]).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnknownOption);
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    spec: Specification,
    options: Vec<OptionEntry>,
    groups: Option<GroupIndex>,
}

impl Parser {
    /// Validates `spec` and prepares it for matching.
    ///
    /// # Errors
    ///
    /// Returns the first structural error found by
    /// [`validate_spec`](crate::validate_spec), or
    /// [`ParseError::TypeMismatch`] when a default does not convert to its
    /// declared type.
    pub fn new(spec: Specification) -> Result<Self, ParseError> {
        validate_spec(&spec)?;

        let mut options = spec
            .options
            .iter()
            .map(OptionEntry::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        let groups = if spec.is_grouped() {
            Some(GroupIndex::build(&options))
        } else {
            options.push(OptionEntry::help());
            None
        };

        Ok(Self {
            spec,
            options,
            groups,
        })
    }

    /// Returns the specification this parser was built from.
    pub fn specification(&self) -> &Specification {
        &self.spec
    }

    /// Resolved options in declaration order.
    ///
    /// For an ungrouped specification this is the active option set and
    /// ends with the help option; a grouped specification keeps its active
    /// sets in [`groups`](Self::groups).
    pub fn options(&self) -> &[OptionEntry] {
        &self.options
    }

    /// Returns the per-group option sets, or `None` when the specification
    /// is not grouped.
    pub fn groups(&self) -> Option<&GroupIndex> {
        self.groups.as_ref()
    }

    /// Whether the first token selects a subcommand.
    pub fn is_grouped(&self) -> bool {
        self.groups.is_some()
    }

    /// Matches `tokens`, which must not include the program name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownGroup`], [`ParseError::UnknownOption`],
    /// [`ParseError::MissingValue`] or [`ParseError::TypeMismatch`]; no
    /// partial result is returned.
    pub fn parse<I, S>(&self, tokens: I) -> Result<MatchResult, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let tokens: Vec<OsString> = tokens
            .into_iter()
            .map(|t| t.as_ref().to_os_string())
            .collect();
        self.run("", &tokens)
    }

    /// Matches a full argument vector such as [`std::env::args_os`].
    ///
    /// The first element is the program name; it is skipped for matching
    /// and used in the usage text attached to errors.
    pub fn parse_from<I, S>(&self, argv: I) -> Result<MatchResult, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut argv = argv.into_iter();
        let program = argv
            .next()
            .map(|p| p.as_ref().to_string_lossy().into_owned())
            .unwrap_or_default();
        let tokens: Vec<OsString> = argv.map(|t| t.as_ref().to_os_string()).collect();
        self.run(&program, &tokens)
    }

    /// Renders usage text for the whole specification or one group.
    ///
    /// For a grouped specification without a known `group`, the text lists
    /// the groups instead of options.
    pub fn usage(&self, program: &str, group: Option<&str>) -> String {
        let usage_info = &self.spec.usage_info;
        let Some(index) = &self.groups else {
            return render_usage(program, usage_info, UsageScope::Options(&self.options));
        };

        if let Some((name, options)) = group.and_then(|g| index.get(g).map(|o| (g, o))) {
            return render_usage(
                program,
                usage_info,
                UsageScope::Group {
                    name,
                    description: self.spec.group_description(name),
                    options,
                },
            );
        }

        let listing: Vec<(&str, Option<&str>)> = index
            .names()
            .map(|name| (name, self.spec.group_description(name)))
            .collect();
        render_usage(program, usage_info, UsageScope::Groups(&listing))
    }

    /// Renders usage text matching the subcommand selected in `result`.
    pub fn usage_for(&self, program: &str, result: &MatchResult) -> String {
        self.usage(program, result.subcommand().ok().flatten())
    }

    fn run(&self, program: &str, tokens: &[OsString]) -> Result<MatchResult, ParseError> {
        debug!(program, tokens = tokens.len(), "Matching arguments");

        let mut matcher = Matcher {
            parser: self,
            program,
            tokens,
            active: &self.options,
            group: None,
            cursor: 0,
            result: MatchResult::new(self.is_grouped()),
        };
        let mut state = if self.is_grouped() && !tokens.is_empty() {
            State::ExpectingSubcommand
        } else {
            State::ScanningOptions
        };

        while state != State::Done {
            state = matcher.step(state)?;
        }

        Ok(matcher.result)
    }
}

/// Cursor over the tokens of a single [`Parser::parse`] call.
struct Matcher<'p, 't> {
    parser: &'p Parser,
    program: &'t str,
    tokens: &'t [OsString],
    active: &'p [OptionEntry],
    group: Option<&'p str>,
    cursor: usize,
    result: MatchResult,
}

impl<'p> Matcher<'p, '_> {
    fn step(&mut self, state: State) -> Result<State, ParseError> {
        match state {
            State::ExpectingSubcommand => self.select_subcommand(),
            State::ScanningOptions => {
                let tokens = self.tokens;
                let Some(token) = tokens.get(self.cursor) else {
                    return Ok(State::Done);
                };
                match classify_os(token) {
                    Token::NotOption => Ok(State::CollectingRemainder),
                    Token::Option { name, inline } => {
                        self.bind_option(name, inline)?;
                        Ok(State::ScanningOptions)
                    }
                }
            }
            State::CollectingRemainder => {
                let remainder = self.tokens[self.cursor..].to_vec();
                debug!(remainder = remainder.len(), "Collected remainder");
                self.cursor = self.tokens.len();
                self.result.set_remainder(remainder);
                Ok(State::Done)
            }
            State::Done => Ok(State::Done),
        }
    }

    fn select_subcommand(&mut self) -> Result<State, ParseError> {
        let parser = self.parser;
        let token = &self.tokens[self.cursor];
        self.cursor += 1;

        if is_help_token(token) {
            debug!("Help requested before subcommand");
            self.result.bind(&OptionEntry::help(), Value::Bool(true));
            return Ok(State::CollectingRemainder);
        }

        let requested = token.to_string_lossy();
        let selected = parser
            .groups
            .as_ref()
            .and_then(|index| index.get_key_value(&requested));
        let Some((name, options)) = selected else {
            return Err(ParseError::UnknownGroup {
                name: requested.into_owned(),
                usage: parser.usage(self.program, None),
            });
        };

        debug!(group = name, "Selected subcommand");
        self.result.select_subcommand(name);
        self.group = Some(name);
        self.active = options;
        Ok(State::ScanningOptions)
    }

    /// Binds the option at the cursor, consuming the following token as its
    /// value when the option takes one and none was given inline.
    fn bind_option(&mut self, name: &str, inline: Option<&str>) -> Result<(), ParseError> {
        let entry: &'p OptionEntry =
            find_option(self.active, name).ok_or_else(|| ParseError::UnknownOption {
                token: self.tokens[self.cursor].to_string_lossy().into_owned(),
                usage: self.usage(),
            })?;
        self.cursor += 1;

        let mut text = inline.map(str::to_string);
        if text.is_none() && entry.kind != OptionKind::Bool {
            if let Some(next) = self.tokens.get(self.cursor) {
                if !classify_os(next).is_option() {
                    text = Some(next.to_string_lossy().into_owned());
                    self.cursor += 1;
                }
            }
        }

        let value = match text {
            Some(text) => coerce(&text, entry.kind).map_err(|err| err.for_option(entry.name()))?,
            None => match &entry.default {
                Some(default) => default.clone(),
                None if entry.kind == OptionKind::Bool => Value::Bool(true),
                None => {
                    return Err(ParseError::MissingValue {
                        option: entry.name().to_string(),
                        usage: self.usage(),
                    });
                }
            },
        };

        debug!(option = entry.name(), value = %value, "Bound option");
        self.result.bind(entry, value);
        Ok(())
    }

    fn usage(&self) -> String {
        self.parser.usage(self.program, self.group)
    }
}

fn is_help_token(token: &OsStr) -> bool {
    match classify_os(token) {
        Token::Option { name, .. } => OptionEntry::help().matches(name),
        Token::NotOption => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, OptionDeclaration};

    fn simple_parser() -> Parser {
        let spec = Specification::new("[options] <filename>")
            .with_option(OptionDeclaration::new(Some("a"), Some("all"), "bool"))
            .with_option(OptionDeclaration::new(Some("b"), Some("bar"), "float"))
            .with_option(
                OptionDeclaration::new(Some("c"), None, "string").with_default("thing"),
            )
            .with_option(OptionDeclaration::new(Some("n"), Some("count"), "int"));
        Parser::new(spec).unwrap()
    }

    fn grouped_parser() -> Parser {
        let spec = Specification::new("[options]")
            .with_option(OptionDeclaration::new(Some("a"), None, "bool").in_group("general"))
            .with_option(OptionDeclaration::new(Some("x"), None, "int").in_group("special"))
            .with_group_description("general", "general things");
        Parser::new(spec).unwrap()
    }

    #[test]
    fn test_bool_and_lookahead_value() {
        let result = simple_parser().parse(["-a", "-b", "3.5", "extra"]).unwrap();

        assert_eq!(result.value("a"), Ok(&Value::Bool(true)));
        assert_eq!(result.value("b"), Ok(&Value::Float(3.5)));
        assert_eq!(result.remainder(), ["extra"]);
    }

    #[test]
    fn test_bool_never_consumes_next_token() {
        let result = simple_parser().parse(["-a", "file"]).unwrap();
        assert_eq!(result.get_bool("all"), Ok(true));
        assert_eq!(result.remainder(), ["file"]);
    }

    #[test]
    fn test_bare_bool_binds_its_default() {
        let spec = Specification::new("[options]")
            .with_option(
                OptionDeclaration::new(Some("q"), Some("quiet"), "bool").with_default("false"),
            )
            .with_option(OptionDeclaration::new(Some("v"), None, "bool"));
        let parser = Parser::new(spec).unwrap();

        let result = parser.parse(["-q", "-v"]).unwrap();
        assert_eq!(result.get_bool("quiet"), Ok(false));
        assert_eq!(result.get_bool("v"), Ok(true));

        let result = parser.parse(["--quiet=true"]).unwrap();
        assert_eq!(result.get_bool("q"), Ok(true));
    }

    #[test]
    fn test_bool_inline_value() {
        let result = simple_parser().parse(["--all=false"]).unwrap();
        assert_eq!(result.get_bool("a"), Ok(false));

        let err = simple_parser().parse(["--all=yes"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_inline_and_split_forms_agree() {
        let parser = simple_parser();
        let inline = parser.parse(["--bar=3.5"]).unwrap();
        let split = parser.parse(["--bar", "3.5"]).unwrap();

        assert_eq!(inline.value("bar"), split.value("bar"));
        assert_eq!(inline, split);
    }

    #[test]
    fn test_missing_value_without_default() {
        let err = simple_parser().parse(["-b"]).unwrap_err();
        assert!(matches!(
            &err,
            ParseError::MissingValue { option, .. } if option == "bar"
        ));
        assert!(err.usage().unwrap().contains("--bar"));
    }

    #[test]
    fn test_lookahead_skips_option_shaped_token() {
        let err = simple_parser().parse(["-b", "-a"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingValue);
    }

    #[test]
    fn test_default_used_when_value_absent() {
        let result = simple_parser().parse(["-c", "-a"]).unwrap();
        assert_eq!(result.get_str("c"), Ok("thing"));

        let result = simple_parser().parse(["-c", "other"]).unwrap();
        assert_eq!(result.get_str("c"), Ok("other"));
    }

    #[test]
    fn test_unmentioned_option_is_not_bound() {
        let result = simple_parser().parse(["-a"]).unwrap();
        assert!(!result.contains("c"));
        assert_eq!(result.bound().len(), 1);
    }

    #[test]
    fn test_empty_inline_value() {
        let result = simple_parser().parse(["-c=", "rest"]).unwrap();
        assert_eq!(result.get_str("c"), Ok(""));
        assert_eq!(result.remainder(), ["rest"]);

        let err = simple_parser().parse(["--count=", "5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_type_mismatch_names_option() {
        let err = simple_parser().parse(["-n", "4.2"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::TypeMismatch {
                option: "count".into(),
                value: "4.2".into(),
                kind: OptionKind::Int,
            }
        );
    }

    #[test]
    fn test_unknown_option_aborts() {
        let err = simple_parser().parse(["-a", "--zzz", "x"]).unwrap_err();
        assert!(matches!(
            &err,
            ParseError::UnknownOption { token, .. } if token == "--zzz"
        ));
    }

    #[test]
    fn test_double_dash_is_unknown() {
        let err = simple_parser().parse(["--", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOption);
    }

    #[test]
    fn test_leading_non_option_starts_remainder() {
        let result = simple_parser().parse(["file", "-a", "--bar", "1"]).unwrap();
        assert!(result.bound().is_empty());
        assert_eq!(result.remainder(), ["file", "-a", "--bar", "1"]);
    }

    #[test]
    fn test_lone_dash_starts_remainder() {
        let result = simple_parser().parse(["-a", "-", "-b"]).unwrap();
        assert_eq!(result.remainder(), ["-", "-b"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_remainder_keeps_raw_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"file\xff.txt");
        let result = simple_parser().parse([OsStr::new("-a"), raw, OsStr::new("x")]).unwrap();

        assert_eq!(result.remainder().len(), 2);
        assert_eq!(result.remainder()[0].as_bytes(), b"file\xff.txt");
        assert_eq!(result.remainder()[1], "x");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["remainder"], serde_json::json!(["file\u{fffd}.txt", "x"]));
    }

    #[test]
    fn test_help_requested() {
        let parser = simple_parser();
        let result = parser.parse(["--help"]).unwrap();
        assert!(result.help_requested());
        assert_eq!(result.get_bool("h"), Ok(true));

        assert!(!parser.parse(["-a"]).unwrap().help_requested());
    }

    #[test]
    fn test_user_declared_h_shadows_help() {
        let spec = Specification::new("[options]")
            .with_option(OptionDeclaration::new(Some("h"), Some("host"), "string"));
        let parser = Parser::new(spec).unwrap();

        let result = parser.parse(["-h", "example.org"]).unwrap();
        assert!(!result.help_requested());
        assert_eq!(result.get_str("host"), Ok("example.org"));

        assert!(parser.parse(["--help"]).unwrap().help_requested());
    }

    #[test]
    fn test_parse_from_skips_program_name() {
        let result = simple_parser().parse_from(["prog", "-a", "x"]).unwrap();
        assert!(result.get_bool("a").unwrap());
        assert_eq!(result.remainder(), ["x"]);

        let err = simple_parser().parse_from(["prog", "-z"]).unwrap_err();
        assert!(err.usage().unwrap().starts_with("Usage: prog [options] <filename>"));
    }

    #[test]
    fn test_grouped_selects_subcommand() {
        let parser = grouped_parser();
        let result = parser.parse(["general", "-a"]).unwrap();

        assert_eq!(result.subcommand(), Ok(Some("general")));
        assert_eq!(result.get_bool("a"), Ok(true));
    }

    #[test]
    fn test_grouped_options_are_scoped() {
        let err = grouped_parser().parse(["special", "-a"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOption);
        assert!(err.usage().unwrap().starts_with("Usage: special [options]"));
    }

    #[test]
    fn test_grouped_unknown_group() {
        let err = grouped_parser().parse(["other", "-a"]).unwrap_err();
        assert!(matches!(
            &err,
            ParseError::UnknownGroup { name, usage } if name == "other" && usage.contains("Subcommands:")
        ));
    }

    #[test]
    fn test_grouped_without_tokens() {
        let result = grouped_parser().parse(Vec::<String>::new()).unwrap();
        assert_eq!(result.subcommand(), Ok(None));
        assert!(result.bound().is_empty());
        assert!(result.remainder().is_empty());
    }

    #[test]
    fn test_grouped_help_in_group_and_before_group() {
        let parser = grouped_parser();

        let result = parser.parse(["special", "-h"]).unwrap();
        assert!(result.help_requested());
        assert_eq!(result.subcommand(), Ok(Some("special")));

        let result = parser.parse(["--help"]).unwrap();
        assert!(result.help_requested());
        assert_eq!(result.subcommand(), Ok(None));
        assert!(parser.usage_for("prog", &result).contains("general things"));
    }

    #[test]
    fn test_grouped_remainder_after_options() {
        let result = grouped_parser().parse(["special", "-x", "3", "a", "b"]).unwrap();
        assert_eq!(result.get_int("x"), Ok(3));
        assert_eq!(result.remainder(), ["a", "b"]);
    }

    #[test]
    fn test_invalid_default_rejected_at_build() {
        let spec = Specification::new("[options]")
            .with_option(OptionDeclaration::new(Some("n"), None, "int").with_default("ten"));
        assert_eq!(
            Parser::new(spec).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = simple_parser();
        let args = ["-a", "--count", "7", "-c", "rest", "-b"];
        assert_eq!(parser.parse(args).unwrap(), parser.parse(args).unwrap());
    }

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Parser>();
    }
}
