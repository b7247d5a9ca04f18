use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use iosample_core::{DecodeReport, HexSource, RawFileSource, decode_source};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan, prelude::*};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("IOSAMPLE_BUILD_COMMIT"),
    ", ",
    env!("IOSAMPLE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "iosample")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for XBee-style IO sample payloads (digital lines, ADC readings, supply voltage).",
    long_about = None,
    after_help = "Examples:\n  iosample decode \"01 02 11 00 02 01\" --stdout\n  iosample decode --input samples.hex -o report.json\n  iosample decode --input sample.bin --raw --stdout --pretty"
)]
struct Cli {
    /// Log decoding details to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode IO samples and generate a versioned JSON report.
    #[command(alias = "parse")]
    #[command(
        after_help = "Each positional argument is one sample in hex (spaces, commas, colons and 0x prefixes allowed).\nHex files hold one sample per line; blank lines and lines starting with '#' are skipped."
    )]
    Decode {
        /// Samples given as hex strings
        #[arg(required_unless_present = "input", conflicts_with = "input")]
        samples: Vec<String>,

        /// Path to a hex sample file (or a binary file with --raw)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Treat the input file as one binary sample
        #[arg(long, requires = "input")]
        raw: bool,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any sample was rejected
        #[arg(long)]
        strict: bool,

        /// List rejected samples after decoding
        #[arg(long)]
        list_rejected: bool,
    },
}

struct DecodeArgs {
    samples: Vec<String>,
    input: Option<PathBuf>,
    raw: bool,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_rejected: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            samples,
            input,
            raw,
            report,
            stdout,
            pretty,
            compact,
            quiet,
            strict,
            list_rejected,
        } => cmd_decode(DecodeArgs {
            samples,
            input,
            raw,
            report,
            stdout,
            pretty,
            compact,
            quiet,
            strict,
            list_rejected,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter_layer = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let format_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let resolved_input = args
        .input
        .as_ref()
        .map(|input| resolve_input_path(input))
        .transpose()?;
    if let Some(input) = resolved_input.as_ref() {
        validate_input_file(input)?;
        if let Some(report) = args.report.as_ref() {
            ensure_report_differs(input, report)?;
        }
    }

    let rep = match resolved_input.as_ref() {
        Some(input) => {
            let label = input.display().to_string();
            tracing::debug!(input = %label, raw = args.raw, "decoding sample file");
            if args.raw {
                let source = RawFileSource::open(input)
                    .with_context(|| format!("Failed to read input file: {label}"))?;
                decode_source(&label, source).context("IO sample decoding failed")?
            } else {
                let source = HexSource::open(input)
                    .with_context(|| format!("Failed to read input file: {label}"))?;
                decode_source(&label, source).context("IO sample decoding failed")?
            }
        }
        None => {
            tracing::debug!(count = args.samples.len(), "decoding sample arguments");
            let source = HexSource::from_lines(&args.samples);
            decode_source("args", source).map_err(|err| {
                CliError::new(
                    format!("invalid sample argument: {err}"),
                    Some("pass each sample as hex bytes, e.g. \"01 02 11 00 02 01\"".to_string()),
                )
            })?
        }
    };
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    if args.stdout {
        print!("{}", json);
    } else {
        let report = args.report.as_ref().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        if let Some(parent) = report.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
        if !args.quiet {
            eprintln!("OK: report written -> {}", report.display());
        }
    }

    if args.list_rejected && !args.quiet {
        print_rejected(&rep);
    }
    if args.strict && !rep.rejected.is_empty() {
        return Err(CliError::new(
            format!("{} sample(s) rejected", rep.rejected.len()),
            Some("use --list-rejected to inspect".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &DecodeReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_rejected(rep: &DecodeReport) {
    eprintln!("Rejected samples:");
    for rejection in &rep.rejected {
        eprintln!("  #{} {}", rejection.origin, rejection.message);
    }
}

/// Reject a report path that names the input file, however either was spelled.
fn ensure_report_differs(input: &Path, report: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let Some(file_name) = report.file_name() else {
        return Err(CliError::new(
            format!("invalid report path: {}", report.display()),
            Some("pass a file path to -o/--report".to_string()),
        ));
    };
    let report_dir = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A missing output directory is created later and cannot hold the input.
    let Ok(report_dir) = fs::canonicalize(report_dir) else {
        return Ok(());
    };
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a hex sample file, or --raw with a binary sample".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a hex sample file, or --raw with a binary sample".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single sample file, or run once per file".to_string();
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        let message = format!(
            "multiple files match pattern '{}' ({} matches); matches: {}{}",
            pattern,
            matches.len(),
            listed,
            more
        );
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
