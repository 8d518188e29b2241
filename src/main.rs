use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chat_export_localizer::{ArchiveConfig, ArchiveLocalizer, HttpFetcher};

/// Download CDN-hosted images referenced by an exported chat archive and
/// rewrite the HTML to use the local copies.
#[derive(Debug, Parser)]
#[command(name = "chat-export-localizer", version, about)]
struct Cli {
    /// Root directory of the exported archive.
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Configuration file overriding the default archive layout.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("chat-export-localizer error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ArchiveConfig::from_path(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ArchiveConfig::discover(&cli.root),
    };
    let layout = config.into_layout(&cli.root);

    let fetcher = HttpFetcher::new()?;
    let summary = ArchiveLocalizer::new(layout).run(&fetcher)?;

    info!(
        "rewrote {} documents, downloaded {} assets",
        summary.documents.len(),
        summary.downloads.len()
    );
    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
