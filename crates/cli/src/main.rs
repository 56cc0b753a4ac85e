// fitdiff CLI - reconcile an inventory against a doctrine item list

mod exit_codes;
mod logging;
mod recon;
mod report;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use fitdiff_config::Settings;
use fitdiff_recon::ReconError;

use exit_codes::{recon_exit_code, EXIT_CONFIG, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "fitdiff")]
#[command(about = "Reconcile held items against a doctrine item list")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Settings file (default: <config dir>/fitdiff/settings.toml)
    #[arg(long, global = true, value_name = "PATH", env = "FITDIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a subject inventory against a reference list
    #[command(after_help = "\
Formats: contents (tab-separated container contents), multibuy, eft.
A side's format falls back to the settings default, then to the file
extension (.tsv = contents, .eft = eft).

Examples:
  fitdiff diff hangar.tsv doctrine.eft
  fitdiff diff fit.txt doctrine.txt -s multibuy -r eft
  fitdiff diff fit.txt doctrine.txt -s multibuy -r eft --table
  fitdiff diff fit.txt doctrine.eft -s multibuy --json --output report.json
  pbpaste | fitdiff diff - doctrine.eft -s multibuy --strict")]
    Diff {
        /// Subject inventory (file path, or - for stdin)
        subject: String,

        /// Reference inventory (file path, or - for stdin)
        reference: String,

        /// Subject format: contents, multibuy, eft
        #[arg(long, short = 's', value_name = "FORMAT")]
        subject_format: Option<String>,

        /// Reference format: contents, multibuy, eft
        #[arg(long, short = 'r', value_name = "FORMAT")]
        reference_format: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run a reconciliation job file
    #[command(after_help = "\
Examples:
  fitdiff run rifter.job.toml
  fitdiff run rifter.job.toml --json
  fitdiff run rifter.job.toml --strict")]
    Run {
        /// Path to the .job.toml file
        job: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Validate a job file without running it
    Validate {
        /// Path to the .job.toml file
        job: PathBuf,
    },

    /// Parse one inventory and print its aggregated item totals
    #[command(after_help = "\
Examples:
  fitdiff parse doctrine.eft
  fitdiff parse fit.txt -f multibuy --json")]
    Parse {
        /// Inventory file (or - for stdin)
        file: String,

        /// Input format: contents, multibuy, eft
        #[arg(long, short = 'f', value_name = "FORMAT")]
        format: Option<String>,

        /// Output JSON object (item -> quantity) instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Clone, Default)]
pub struct OutputArgs {
    /// Output the JSON report to stdout instead of text tables
    #[arg(long)]
    json: bool,

    /// Include the full reconciliation table in text output
    #[arg(long)]
    table: bool,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Exit 1 when any item is missing or extra
    #[arg(long)]
    strict: bool,

    /// Suppress the stderr summary line and info logging
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  fitdiff-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
        "\nformats: contents, multibuy, eft",
    )
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, CliError> {
    let loaded = match path {
        Some(p) => Settings::load_from(p),
        None => Settings::load(),
    };
    loaded.map_err(|e| {
        CliError::config(e.to_string())
            .with_hint(format!("default settings path: {}", Settings::config_path_display()))
    })
}

fn log_level<'a>(cli: &Cli, settings: &'a Settings) -> &'a str {
    let quiet = matches!(
        &cli.command,
        Some(Commands::Diff { output, .. }) | Some(Commands::Run { output, .. }) if output.quiet
    );
    if cli.verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        &settings.log.level
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(cli.config.as_ref())?;
    logging::init_cli_logger(log_level(&cli, &settings))?;

    match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: fitdiff <command> [options]");
            eprintln!("       fitdiff --help for more information");
            Ok(())
        }
        Some(Commands::Diff {
            subject,
            reference,
            subject_format,
            reference_format,
            output,
        }) => recon::cmd_diff(&settings, subject, reference, subject_format, reference_format, output),
        Some(Commands::Run { job, output }) => recon::cmd_run(&settings, job, output),
        Some(Commands::Validate { job }) => recon::cmd_validate(job),
        Some(Commands::Parse { file, format, json }) => recon::cmd_parse(&settings, file, format, json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_IO, msg)
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(EXIT_CONFIG, msg)
    }

    /// Create error from an engine error with the matching exit code.
    pub fn recon(err: ReconError) -> Self {
        let hint = match &err {
            ReconError::UnsupportedFormat(_) => Some("supported formats: contents, multibuy, eft".to_string()),
            ReconError::Parse { expected, .. } => Some(format!("each line should look like: {expected}")),
            _ => None,
        };
        Self { code: recon_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        Self::recon(err)
    }
}
