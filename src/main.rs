use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use phpantom_lint::{Config, Linter, report};

/// Check PHP files against the Drupal doc comment conventions.
#[derive(Debug, Parser)]
#[command(name = "phpantom-lint", version, about)]
struct Cli {
    /// Files or directories to lint.
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Configuration file (default: nearest phpantom-lint.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Report errors only.
    #[arg(long)]
    no_warnings: bool,

    /// Run only the named sniff (repeatable).
    #[arg(long = "sniff", value_name = "NAME")]
    sniffs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PHPANTOM_LINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Lint and print.  Returns whether any error was reported.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(cli.paths.first().map_or(Path::new("."), PathBuf::as_path))?,
    };
    if cli.no_warnings {
        config.show_warnings = false;
    }
    if !cli.sniffs.is_empty() {
        config.sniffs = cli.sniffs;
    }

    let linter = Linter::new(config)?;
    let reports = linter
        .lint_paths(&cli.paths)
        .context("failed to collect files")?;

    let output = match cli.format {
        Format::Text => report::render_text(&reports),
        Format::Json => report::render_json(&reports).context("failed to render JSON")?,
    };
    print!("{output}");
    if cli.format == Format::Json {
        println!();
    }

    Ok(reports.iter().any(|r| r.error_count() > 0))
}
