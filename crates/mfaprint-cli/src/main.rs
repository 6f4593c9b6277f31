//! mfaprint — fingerprint which MFA providers a login page uses.
//!
//! Renders each target in headless Chromium, collects the page content and
//! every referenced script, and matches them against a signature catalog.

mod output;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mfaprint_browser::ChromiumEngine;
use mfaprint_core::InputError;
use mfaprint_scanner::{ScanOptions, ScanOrchestrator, ScanProgress};
use mfaprint_signatures::SignatureCatalog;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "mfaprint",
    version,
    about = "Fingerprint which MFA providers a login page uses"
)]
struct Cli {
    /// Single URL to process
    #[arg(short, long)]
    url: Option<String>,

    /// Input file containing URLs, one per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Signature catalog: TOML mapping of provider name to regex patterns
    #[arg(short, long, default_value = "providers.toml")]
    catalog: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Capture status, headers and script URLs per target
    #[arg(short, long)]
    verbose: bool,

    /// Log level (RUST_LOG takes precedence when set)
    #[arg(long, value_parser = ["trace", "debug", "info", "warn", "error"], default_value = "info")]
    log_level: String,

    /// Navigation timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Maximum simultaneous sessions (0 = unbounded)
    #[arg(long, default_value_t = 0)]
    concurrency: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
}

/// Single URL wins over the input file when both are given.
fn collect_urls(cli: &Cli) -> Result<Vec<String>, InputError> {
    if let Some(url) = &cli.url {
        return Ok(vec![url.clone()]);
    }

    let Some(path) = &cli.input else {
        return Err(InputError::NoTargets);
    };

    let contents =
        std::fs::read_to_string(path).map_err(|source| InputError::UnreadableFile {
            path: path.display().to_string(),
            source,
        })?;

    let urls: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect();

    if urls.is_empty() {
        return Err(InputError::EmptyList {
            path: path.display().to_string(),
        });
    }

    Ok(urls)
}

fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

struct BarProgress(ProgressBar);

impl ScanProgress for BarProgress {
    fn advance(&self) {
        self.0.inc(1);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let urls = collect_urls(&cli)?;
    let catalog = SignatureCatalog::load(&cli.catalog)?;

    let engine = ChromiumEngine::launch()
        .await
        .context("failed to launch browser")?;

    let orchestrator = ScanOrchestrator::new(Arc::new(engine), Arc::new(catalog)).with_options(
        ScanOptions {
            navigation_timeout: Duration::from_secs(cli.timeout),
            verbose: cli.verbose,
            max_concurrent: (cli.concurrency > 0).then_some(cli.concurrency),
        },
    );

    let bar = ProgressBar::new(urls.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    bar.set_message("processing targets");

    let report = orchestrator.scan(&urls, &BarProgress(bar.clone())).await;
    bar.finish_and_clear();

    if let Err(e) = orchestrator.shutdown().await {
        warn!(error = %e, "failed to shut browser down cleanly");
    }

    match cli.output {
        OutputFormat::Json => println!("{}", output::render_json(&report)?),
        OutputFormat::Text => output::print_text(&report, cli.verbose),
    }

    Ok(())
}
