//! nbclean - strip execution state and volatile metadata from notebooks

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use nbclean_cli::{
    clean_stream, display_files, resolve_inputs, rewrite_files, CleanSummary, Config,
};
use std::io;
use tracing_subscriber::EnvFilter;

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Warnings and errors (default)
    Normal,
    /// Per-file progress
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    const fn filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "nbclean",
    about = "Clean notebooks to avoid merge conflicts",
    long_about = "Clean notebooks to avoid merge conflicts.\n\
                  \n\
                  Execution counts are reset, cell metadata is pruned to `hide_input` and\n\
                  notebook metadata to `kernelspec`, `jekyll` and `jupytext`.",
    version
)]
struct Args {
    /// A notebook name or glob to clean (defaults to every notebook under `nbs_path`)
    #[arg(value_name = "FNAME")]
    fname: Option<String>,

    /// Clean all metadata and outputs
    #[arg(long, overrides_with = "no_clear_all")]
    clear_all: bool,

    /// Keep outputs and allowed metadata even if the config sets `clear_all`
    #[arg(long, overrides_with = "clear_all")]
    no_clear_all: bool,

    /// Print the cleaned outputs instead of rewriting the files
    #[arg(long)]
    disp: bool,

    /// Read a notebook from stdin and print the cleaned result (git filter mode)
    #[arg(long)]
    read_input_stream: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Show per-file progress
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

impl Args {
    /// `--clear-all` / `--no-clear-all`, the last one given winning
    const fn clear_all_flag(&self) -> Option<bool> {
        if self.clear_all {
            Some(true)
        } else if self.no_clear_all {
            Some(false)
        } else {
            None
        }
    }
}

fn init_tracing(verbosity: Verbosity) {
    // Logs go to stderr; stdout carries notebook JSON in filter and --disp modes
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter()));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn report(summary: &CleanSummary) -> Result<()> {
    for (path, err) in &summary.failures {
        eprintln!("{} {}: {err:#}", "Error:".red().bold(), path.display());
    }
    if summary.failures.is_empty() {
        return Ok(());
    }
    anyhow::bail!(
        "{} of {} notebooks failed to clean",
        summary.failures.len(),
        summary.total()
    )
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(Verbosity::from_flags(args.quiet, args.verbose));

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config = Config::discover(&cwd)?;
    let clear_all = config.resolve_clear_all(args.clear_all_flag());

    if args.read_input_stream {
        return clean_stream(io::stdin().lock(), io::stdout().lock(), clear_all);
    }

    let nbs_path = config.nbs_path_or(&cwd);
    let paths = resolve_inputs(args.fname.as_deref(), &nbs_path)?;
    if paths.is_empty() {
        tracing::warn!("no notebooks found");
        return Ok(());
    }

    let summary = if args.disp {
        display_files(&paths, clear_all, io::stdout().lock())
    } else {
        rewrite_files(&paths, clear_all)
    };
    tracing::info!(
        cleaned = summary.cleaned,
        failed = summary.failures.len(),
        clear_all,
        "finished cleaning notebooks"
    );
    report(&summary)
}
