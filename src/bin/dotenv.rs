use std::ffi::OsString;
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, ExitCode};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dotenvkit::{DEFAULT_PROBE_LEVELS, DotEnvOptions, Encoding, TargetEnv};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Read dotenv files, or run a command with them loaded
#[derive(Debug, Parser)]
#[command(name = "dotenv", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print loader diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the merged variables as KEY=value lines
    Read(LoadArgs),

    /// Load dotenv files and execute a command
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct LoadArgs {
    /// Dotenv file path(s). Repeat or pass comma-separated paths. Defaults to .env
    #[arg(short = 'f', long = "file", value_name = "PATHS", value_delimiter = ',')]
    files: Vec<PathBuf>,

    /// Fail on blank paths and missing files instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Keep the first value of a key and never replace existing variables
    #[arg(long)]
    no_override: bool,

    /// Trim whitespace around values
    #[arg(long)]
    trim: bool,

    /// Search parent directories for .env instead of reading --file paths
    #[arg(
        long,
        value_name = "LEVELS",
        num_args = 0..=1,
        default_missing_value = "4"
    )]
    probe: Option<usize>,

    /// Directory to start probing from. Defaults to the current directory
    #[arg(long, value_name = "DIR")]
    probe_from: Option<PathBuf>,

    /// Encoding label of the dotenv files, e.g. utf-8, utf-16le, latin1
    #[arg(long, value_name = "LABEL", value_parser = parse_encoding)]
    encoding: Option<Encoding>,
}

#[derive(Debug, Args)]
struct RunArgs {
    #[command(flatten)]
    load: LoadArgs,

    /// Command to execute, followed by its arguments
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<OsString>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Read(args) => execute_read(&args),
        Commands::Run(args) => execute_run(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("dotenv: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    // WARN applies only when RUST_LOG is unset; -v forces DEBUG.
    let filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .from_env_lossy();
    let filter = if verbose {
        filter.add_directive(Level::DEBUG.into())
    } else {
        filter
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn parse_encoding(label: &str) -> Result<Encoding, String> {
    Encoding::for_label(label).ok_or_else(|| format!("unknown encoding `{label}`"))
}

impl LoadArgs {
    fn options(&self) -> Result<DotEnvOptions> {
        let mut options = DotEnvOptions::new()
            .with_env_files(&self.files)
            .with_ignore_errors(!self.strict)
            .with_overwrite_existing(!self.no_override)
            .with_trim_values(self.trim);

        if let Some(encoding) = self.encoding {
            options = options.with_encoding(encoding);
        }

        if self.probe.is_some() || self.probe_from.is_some() {
            let start_dir = match &self.probe_from {
                Some(dir) => dir.clone(),
                None => std::env::current_dir().context("failed to resolve current directory")?,
            };
            let levels = self.probe.unwrap_or(DEFAULT_PROBE_LEVELS);
            options = options.with_probe_from(start_dir, levels);
        }

        Ok(options)
    }
}

fn execute_read(args: &LoadArgs) -> Result<ExitCode> {
    let vars = args.options()?.read().context("failed to read dotenv files")?;
    for (key, value) in vars.iter() {
        println!("{}", format_entry(key, value));
    }
    Ok(ExitCode::SUCCESS)
}

fn execute_run(args: RunArgs) -> Result<ExitCode> {
    let Some((program, program_args)) = args.command.split_first() else {
        bail!("missing command after `run`");
    };

    let options = args.load.options()?;
    let before = TargetEnv::snapshot();
    let mut target = before.clone();
    let report = options
        .load_into(&mut target)
        .context("failed to load dotenv files")?;
    tracing::debug!(
        files_read = report.files_read,
        loaded = report.loaded,
        skipped_existing = report.skipped_existing,
        "loaded dotenv files"
    );

    let mut command = Command::new(program);
    command.args(program_args);
    for (key, value) in target.into_memory().unwrap_or_default() {
        if before.get_var(&key).as_deref() != Some(value.as_str()) {
            command.env(key, value);
        }
    }

    execute_command(command, program)
}

#[cfg(unix)]
fn execute_command(mut command: Command, program: &OsString) -> Result<ExitCode> {
    let err = command.exec();
    Err(err).with_context(|| format!("failed to execute `{}`", program.to_string_lossy()))
}

#[cfg(not(unix))]
fn execute_command(mut command: Command, program: &OsString) -> Result<ExitCode> {
    let status = command
        .status()
        .with_context(|| format!("failed to execute `{}`", program.to_string_lossy()))?;
    let code = status.code().unwrap_or(1);
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

/// Render an entry so that parsing the output yields the same pair.
fn format_entry(key: &str, value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value.trim() != value
        || value.contains(['\n', '\r', '"', '\'', '\\', '#']);
    if !needs_quotes {
        return format!("{key}={value}");
    }

    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{key}=\"{escaped}\"")
}
