//! Arena Log Analyzer CLI Application
//!
//! This is the command-line interface for the arena telemetry reporters.
//! It uses the arena-log-analyzer library and adds:
//! - Subcommands for the brain-summary and run-stats reports
//! - Optional TOML configuration
//! - Report rendering (TXT/JSON) to stdout or a file

use anyhow::{Context, Result};
use arena_log_analyzer::{analyze_brain_file, analyze_runs_file, BrainSummary, RunSummary};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

mod config;
mod report;

use config::{AppConfig, OutputFormat};

/// Arena Log Analyzer - Summarize robot arena AI telemetry
#[derive(Parser, Debug)]
#[command(name = "arena-log-cli")]
#[command(about = "Summarize robot arena AI telemetry logs", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tally movement modes, directions, escape causes and stuck events
    Brain {
        /// Brain-summary log (default: reaper_stats.csv)
        file: Option<PathBuf>,

        /// Sentinel tag that marks summary lines
        #[arg(long, value_name = "TAG")]
        tag: Option<String>,

        /// Skip lines whose value lists have the wrong length
        #[arg(long)]
        strict_arity: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Win/loss, K/D, accuracy and cause-of-death statistics
    Runs {
        /// Per-run CSV table (default: reaper_only_stats.csv)
        file: Option<PathBuf>,

        /// Cause-of-death value that means the bot survived
        #[arg(long, value_name = "VALUE")]
        alive_sentinel: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Report format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file for the report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::debug!("Arena Log Analyzer CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using analyzer library v{}", arena_log_analyzer::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    match &args.command {
        Command::Brain {
            file,
            tag,
            strict_arity,
            output,
        } => {
            let path = app_config.brain_file(file.as_deref());
            let analyzer = app_config.brain_analyzer(tag.as_deref(), *strict_arity);
            let totals = analyze_brain_file(&path, &analyzer)
                .with_context(|| format!("Failed to analyze brain-summary log: {:?}", path))?;
            let summary = BrainSummary::from_totals(totals);

            let format = app_config.format(output.format);
            with_sink(output.output.as_deref(), |out| {
                report::write_brain_report(out, format, &summary)
            })
        }
        Command::Runs {
            file,
            alive_sentinel,
            output,
        } => {
            let path = app_config.runs_file(file.as_deref());
            let analyzer = app_config.runs_analyzer(alive_sentinel.as_deref());
            let totals = analyze_runs_file(&path, &analyzer)
                .with_context(|| format!("Failed to analyze run table: {:?}", path))?;
            let summary = RunSummary::from_totals(&totals);

            let format = app_config.format(output.format);
            with_sink(output.output.as_deref(), |out| {
                report::write_run_report(out, format, &summary)
            })
        }
    }
}

/// Run a report writer against stdout or the requested file
fn with_sink<F>(output: Option<&Path>, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            let mut out = BufWriter::new(file);
            write(&mut out).with_context(|| format!("Failed to write report: {:?}", path))?;
            out.flush()?;
            log::info!("Report written to {:?}", path);
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write(&mut out).context("Failed to write report to stdout")?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
