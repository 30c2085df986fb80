use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

use zaitaku_client::{HtmlListingParser, ReqwestFetcher};
use zaitaku_core::retry::RetryingFetcher;
use zaitaku_core::traits::TokioSleeper;
use zaitaku_core::{ScrapeService, ScraperConfig};

#[derive(Parser)]
#[command(
    name = "zaitaku",
    version,
    about = "Collect fully-remote, own-PC job listings into a JSON file"
)]
struct Cli {
    /// Where to write the JSON output
    #[arg(default_value = "remote_jobs.json")]
    output: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("ERROR: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli).await {
        Ok(path) => {
            println!("SUCCESS: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Run failed: {e:#}");
            eprintln!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}

const DEFAULT_LOG_FILTER: &str = "zaitaku=info,zaitaku_core=info,zaitaku_client=info";

/// `RUST_LOG` wins when set; otherwise the workspace crates log at info.
fn log_filter(rust_log: Option<&str>) -> Result<EnvFilter> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid RUST_LOG: {directives}")),
        None => Ok(EnvFilter::new(DEFAULT_LOG_FILTER)),
    }
}

fn init_tracing() -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref())?)
        .with_timer(ChronoLocal::new("%H:%M:%S".to_string()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run(cli: &Cli) -> Result<PathBuf> {
    let config = ScraperConfig::from_env().context("Invalid configuration")?;

    let http = ReqwestFetcher::with_timeout(config.request_timeout)
        .context("Failed to create HTTP client")?;
    let fetcher = RetryingFetcher::new(http, config.retry.clone(), TokioSleeper);
    let parser = HtmlListingParser::new(config.base_url.clone());

    let service = ScrapeService::new(fetcher, parser, TokioSleeper, config.base_url.clone())
        .with_politeness(config.politeness.clone());

    service
        .run(&cli.output)
        .await
        .with_context(|| format!("Failed to save results to {}", cli.output.display()))
}
