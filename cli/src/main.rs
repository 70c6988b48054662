//! ecp - Entry Copy
//!
//! Copy exactly one file or symlink, atomically and without clobbering,
//! powered by entcopy.

use clap::{Parser, ValueEnum};
use entcopy::{CopyOptions, CopyOutcome, Copier, Error as EntcopyError, OsFileSystem, Platform};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// ecp - Copy one file or symlink without overwriting anything
///
/// The destination must not exist. Regular files are written to a temporary
/// file and renamed into place; symlinks are re-created with the same target.
///
/// Usage:
///   ecp SOURCE DEST
#[derive(Parser, Debug)]
#[command(name = "ecp", version, about, long_about = None)]
struct Args {
    /// File or symlink to copy
    source: PathBuf,

    /// Path to create (must not exist)
    dest: PathBuf,

    /// Symlink semantics to apply
    #[arg(long, value_enum, default_value = "host")]
    links: LinkMode,

    /// Do not call fsync before committing a file (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LinkMode {
    /// Untyped symlinks
    Unix,
    /// Typed file/dir links, junction fallback for directories
    Windows,
    /// Whatever this system uses
    Host,
}

impl From<LinkMode> for Platform {
    fn from(mode: LinkMode) -> Self {
        match mode {
            LinkMode::Unix => Platform::Unix,
            LinkMode::Windows => Platform::Windows,
            LinkMode::Host => Platform::host(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("{what} path must not be empty")]
    EmptyPath { what: &'static str },

    #[error("{source}")]
    Copy { source: EntcopyError },

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyPath { .. } => "INVALID_INPUT",
            Self::Copy { source } => source.code().as_str(),
            Self::JsonSerialize { .. } => "INTERNAL",
        }
    }

    /// The OS error number behind a pass-through failure, if any.
    fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Copy { source } => source.raw_os_error(),
            _ => None,
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyPath { .. } => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone)]
struct Report {
    source: String,
    destination: String,
    outcome: &'static str,
    kind: Option<&'static str>,
    error_code: Option<&'static str>,
    error_message: Option<String>,
    os_error: Option<i32>,
}

impl Report {
    fn copied(source: &Path, destination: &Path, outcome: &CopyOutcome) -> Self {
        Self {
            source: display_path(source),
            destination: display_path(destination),
            outcome: "copied",
            kind: Some(outcome.kind().as_str()),
            error_code: None,
            error_message: None,
            os_error: None,
        }
    }

    fn failed(source: &Path, destination: &Path, error: &CliError) -> Self {
        Self {
            source: display_path(source),
            destination: display_path(destination),
            outcome: "failed",
            kind: None,
            error_code: Some(error.code()),
            error_message: Some(error.to_string()),
            os_error: error.raw_os_error(),
        }
    }

    fn to_json_value(&self) -> Value {
        json!({
            "source": self.source,
            "destination": self.destination,
            "outcome": self.outcome,
            "kind": self.kind,
            "error_code": self.error_code,
            "error_message": self.error_message,
            "os_error": self.os_error,
        })
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(error) = run(&args).await {
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(error.exit_code());
    }
}

async fn run(args: &Args) -> CliResult<()> {
    if args.source.as_os_str().is_empty() {
        return Err(CliError::EmptyPath { what: "Source" });
    }
    if args.dest.as_os_str().is_empty() {
        return Err(CliError::EmptyPath {
            what: "Destination",
        });
    }

    let platform = Platform::from(args.links);
    let fs = if args.no_sync {
        OsFileSystem::default().without_fsync()
    } else {
        OsFileSystem::default()
    };
    let copier = Copier::new(fs, CopyOptions::default().with_platform(platform));

    tracing::debug!(
        source = %args.source.display(),
        dest = %args.dest.display(),
        links = platform.as_str(),
        fsync = fs.fsync(),
        "starting copy"
    );

    match copier.copy(&args.source, &args.dest).await {
        Ok(outcome) => {
            match args.output {
                OutputMode::Human => print_outcome(&args.dest, &outcome, args.verbose),
                OutputMode::Json => {
                    let report = Report::copied(&args.source, &args.dest, &outcome);
                    print_json_value(&report.to_json_value())?;
                }
            }
            Ok(())
        }
        Err(source) => {
            let error = CliError::Copy { source };
            if args.output == OutputMode::Json {
                let report = Report::failed(&args.source, &args.dest, &error);
                print_json_value(&report.to_json_value())?;
            }
            Err(error)
        }
    }
}

fn print_outcome(dest: &Path, outcome: &CopyOutcome, verbose: bool) {
    match outcome {
        CopyOutcome::File { bytes } => {
            println!("Copied file ({})", format_bytes(*bytes));
        }
        CopyOutcome::Symlink { target, link_type } => match link_type {
            Some(link_type) => println!("Copied {} link -> {}", link_type, target.display()),
            None => println!("Copied symlink -> {}", target.display()),
        },
    }
    if verbose {
        println!("  Destination:    {}", dest.display());
    }
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
