use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use pagoda_core::{MatchResult, ParseError};
use pagoda_loader::{LoadError, load_parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status for unreadable or structurally invalid specifications.
const EXIT_SPEC: i32 = 1;
/// Exit status for arguments the specification rejects.
const EXIT_ARGUMENTS: i32 = 2;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "pagoda")]
#[command(about = "Check option specifications and match arguments against them")]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one or more specification files.
    Check(CheckArgs),
    /// Print the usage text a specification renders.
    Usage(UsageArgs),
    /// Match arguments given after `--` against a specification.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Specification files (.json, .yaml or .yml).
    #[arg(required = true)]
    specs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Specification file.
    spec: PathBuf,
    /// Render the options of one subcommand instead of the listing.
    #[arg(long)]
    subcommand: Option<String>,
    /// Program name shown in the usage line (default: the file stem).
    #[arg(long)]
    program: Option<String>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Specification file.
    spec: PathBuf,
    /// Program name shown in usage text (default: the file stem).
    #[arg(long)]
    program: Option<String>,
    /// Output format for the match result.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to match, after `--`.
    #[arg(last = true)]
    args: Vec<OsString>,
}

/// Why a command failed, and the status to exit with.
#[derive(Debug)]
struct Failure {
    code: i32,
    message: String,
}

impl Failure {
    /// Argument errors carry the usage of the active option set.
    fn arguments(err: ParseError) -> Self {
        let message = match err.usage() {
            Some(usage) => format!("{err}\n\n{}", usage.trim_end()),
            None => err.to_string(),
        };
        Self {
            code: EXIT_ARGUMENTS,
            message,
        }
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self {
            code: EXIT_SPEC,
            message,
        }
    }
}

impl From<LoadError> for Failure {
    fn from(err: LoadError) -> Self {
        err.to_string().into()
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Usage(args) => run_usage(args),
        Command::Parse(args) => run_parse(args),
    };

    if let Err(failure) = result {
        eprintln!("error: {}", failure.message);
        std::process::exit(failure.code);
    }
}

fn init_tracing(debug: bool) {
    let default = if debug {
        "pagoda=debug,pagoda_core=debug,pagoda_loader=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(args: CheckArgs) -> Result<(), Failure> {
    let mut failed = 0usize;

    for path in &args.specs {
        match load_parser(path) {
            Ok(parser) => {
                let options = parser.specification().options.len();
                match parser.groups() {
                    Some(groups) => println!(
                        "{}: ok ({options} option(s) in {} subcommand(s))",
                        path.display(),
                        groups.len()
                    ),
                    None => println!("{}: ok ({options} option(s))", path.display()),
                }
            }
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!(
            "{failed} of {} specification file(s) failed validation",
            args.specs.len()
        )
        .into());
    }
    Ok(())
}

fn run_usage(args: UsageArgs) -> Result<(), Failure> {
    let parser = load_parser(&args.spec)?;
    let program = program_name(args.program, &args.spec);

    if let Some(group) = &args.subcommand {
        let known = parser.groups().is_some_and(|groups| groups.contains(group));
        if !known {
            return Err(format!(
                "'{}' declares no subcommand '{group}'",
                args.spec.display()
            )
            .into());
        }
    }

    print!("{}", parser.usage(&program, args.subcommand.as_deref()));
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), Failure> {
    let parser = load_parser(&args.spec)?;
    let program = program_name(args.program, &args.spec);
    debug!(program = %program, args = args.args.len(), "Parsing arguments");

    let argv = std::iter::once(OsString::from(&program)).chain(args.args);
    let result = parser.parse_from(argv).map_err(Failure::arguments)?;

    if result.help_requested() {
        print!("{}", parser.usage_for(&program, &result));
        return Ok(());
    }

    println!("{}", format_result(&result, args.format)?);
    Ok(())
}

fn format_result(result: &MatchResult, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(result)
            .map_err(|err| format!("Failed to serialize match result: {err}")),
        CliOutputFormat::Yaml => serde_yaml::to_string(result)
            .map(|raw| raw.trim_end().to_string())
            .map_err(|err| format!("Failed to serialize match result: {err}")),
    }
}

fn program_name(explicit: Option<String>, spec: &Path) -> String {
    explicit.unwrap_or_else(|| {
        spec.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}
