//! Usage text rendering.
//!
//! Rendering is pure: callers decide where the text goes.

use std::fmt::Write;

use crate::OptionKind;
use crate::index::OptionEntry;

/// What a usage text describes.
#[derive(Debug, Clone, Copy)]
pub enum UsageScope<'a> {
    /// The options of an ungrouped specification.
    Options(&'a [OptionEntry]),
    /// The options of one selected group.
    Group {
        name: &'a str,
        description: Option<&'a str>,
        options: &'a [OptionEntry],
    },
    /// The groups of a grouped specification, none selected yet.
    /// Each item is a group name and its description.
    Groups(&'a [(&'a str, Option<&'a str>)]),
}

/// Renders usage text.
///
/// # Examples
///
/// ```
/// use pagoda_core::{OptionDeclaration, OptionEntry, UsageScope, render_usage};
///
/// let options = vec![
///     OptionEntry::resolve(
///         &OptionDeclaration::new(Some("b"), Some("bar"), "float")
///             .with_description("this causes trouble")
///             .with_default("1.5"),
///     )
///     .unwrap(),
/// ];
/// let text = render_usage("prog", "[options] <file>", UsageScope::Options(&options));
/// assert!(text.starts_with("Usage: prog [options] <file>\n"));
/// assert!(text.contains("--bar"));
/// assert!(text.contains("[default: 1.5]"));
/// ```
pub fn render_usage(program: &str, usage_info: &str, scope: UsageScope<'_>) -> String {
    let mut out = String::new();

    match scope {
        UsageScope::Options(options) => {
            write_header(&mut out, &[program, usage_info]);
            out.push('\n');
            write_options(&mut out, options);
        }
        UsageScope::Group {
            name,
            description,
            options,
        } => {
            write_header(&mut out, &[program, name, usage_info]);
            if let Some(description) = description.filter(|d| !d.is_empty()) {
                let _ = writeln!(out, "\n{description}");
            }
            out.push('\n');
            write_options(&mut out, options);
        }
        UsageScope::Groups(groups) => {
            write_header(&mut out, &[program, "<subcommand>", usage_info]);
            out.push_str("\nSubcommands:\n");
            let width = groups.iter().map(|(name, _)| name.len()).max().unwrap_or(0) + 2;
            for (name, description) in groups {
                let line = format!("\t{name:<width$}{}", description.unwrap_or(""));
                let _ = writeln!(out, "{}", line.trim_end());
            }
        }
    }

    out
}

fn write_header(out: &mut String, parts: &[&str]) {
    let line = parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "Usage: {line}");
}

fn write_options(out: &mut String, options: &[OptionEntry]) {
    let flags: Vec<(String, String)> = options
        .iter()
        .map(|entry| {
            let decl = &entry.declaration;
            (
                decl.short().map(|s| format!("-{s}")).unwrap_or_default(),
                decl.long().map(|l| format!("--{l}")).unwrap_or_default(),
            )
        })
        .collect();
    let short_width = flags.iter().map(|(s, _)| s.len()).max().unwrap_or(0) + 2;
    let long_width = flags.iter().map(|(_, l)| l.len()).max().unwrap_or(0) + 2;

    for (entry, (short, long)) in options.iter().zip(&flags) {
        let mut line = format!(
            "\t{short:<short_width$}{long:<long_width$}{}",
            entry.declaration.description
        );
        if entry.kind != OptionKind::Bool {
            if let Some(default) = &entry.declaration.default {
                let _ = write!(line, "  [default: {default}]");
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OptionDeclaration;

    fn entry(decl: OptionDeclaration) -> OptionEntry {
        OptionEntry::resolve(&decl).unwrap()
    }

    fn sample_options() -> Vec<OptionEntry> {
        vec![
            entry(
                OptionDeclaration::new(Some("a"), Some("all"), "bool")
                    .with_description("list them all")
                    .with_default("true"),
            ),
            entry(
                OptionDeclaration::new(Some("b"), Some("bar"), "float")
                    .with_description("this causes trouble"),
            ),
            entry(
                OptionDeclaration::new(Some("c"), None, "string")
                    .with_description("the name of the thing")
                    .with_default("thing"),
            ),
            OptionEntry::help(),
        ]
    }

    #[test]
    fn test_render_options() {
        let options = sample_options();
        let text = render_usage("prog", "[options] <filename>", UsageScope::Options(&options));

        let expected = "Usage: prog [options] <filename>\n\
                        \n\
                        \t-a  --all   list them all\n\
                        \t-b  --bar   this causes trouble\n\
                        \t-c          the name of the thing  [default: thing]\n\
                        \t-h  --help  this message\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_bool_defaults_are_not_shown() {
        let options = sample_options();
        let text = render_usage("prog", "x", UsageScope::Options(&options));
        assert!(!text.contains("[default: true]"));
    }

    #[test]
    fn test_render_without_program_name() {
        let text = render_usage("", "[options]", UsageScope::Options(&[]));
        assert_eq!(text, "Usage: [options]\n\n");
    }

    #[test]
    fn test_render_group_listing() {
        let groups = [("general", Some("general things")), ("special", None)];
        let text = render_usage("prog", "[options]", UsageScope::Groups(&groups));

        let expected = "Usage: prog <subcommand> [options]\n\
                        \n\
                        Subcommands:\n\
                        \tgeneral  general things\n\
                        \tspecial\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_selected_group() {
        let options = vec![OptionEntry::help()];
        let text = render_usage(
            "prog",
            "[options]",
            UsageScope::Group {
                name: "general",
                description: Some("general things"),
                options: &options,
            },
        );

        assert_eq!(
            text,
            "Usage: prog general [options]\n\ngeneral things\n\n\t-h  --help  this message\n"
        );
    }
}
