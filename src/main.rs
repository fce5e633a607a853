// src/main.rs
// =============================================================================
// This is the entry point of recon-spider.
//
// What happens here:
// 1. Set up logging and parse command-line arguments
// 2. Build and validate the crawl configuration
// 3. Install the Ctrl+C handler (first press: stop and save, second: quit)
// 4. Run the crawl and print / save whatever was collected
// 5. Exit with proper code (0 = crawl ran, 2 = error)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod extract;
mod fetch;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::{CrawlConfig, SearchOrder};
use crawl::Crawler;
use extract::HtmlExtractor;
use fetch::HttpFetcher;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // With a report file the spinner shows progress, so per-page logs are
    // quieted to keep it readable
    let default_level = if cli.output.is_some() { "warn" } else { "info" };
    init_logging(default_level);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so --json output on stdout stays machine-readable.
// RUST_LOG overrides the default level (e.g. RUST_LOG=recon_spider=debug).
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let config = CrawlConfig::from_cli(&cli).context("Invalid configuration")?;

    print_banner(&config, &cli);

    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    let extractor = HtmlExtractor::new(&config.seed, config.excluded.clone());
    let mut crawler = Crawler::new(config, fetcher, extractor);
    if cli.output.is_some() {
        crawler = crawler.with_progress(progress_spinner());
    }

    let cancel = CancellationToken::new();
    install_interrupt_handler(cancel.clone());

    let outcome = crawler.run(&cancel).await;

    if outcome.interrupted {
        eprintln!("\n⚠️  Recon interrupted! Reporting partial results...");
    }

    report::print_outcome(&outcome, cli.json)?;

    if let Some(path) = &cli.output {
        report::write_html_report(path, &crawler.config().seed, &outcome)?;
        eprintln!("💾 Results saved to {}", path.display());
    }

    Ok(0)
}

// First Ctrl+C cancels the crawl so partial results get reported.
// A second Ctrl+C exits immediately.
fn install_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::warn!("could not listen for Ctrl+C; interruption disabled");
            return;
        }
        eprintln!("\nReceived Ctrl+C, finishing in-flight pages...");
        eprintln!("Press Ctrl+C again to force quit");
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nForce quit requested, exiting immediately...");
            std::process::exit(130);
        }
    });
}

// Spinner on stderr: "⠹ [00:00:12] 37 pages  https://example.com/docs"
fn progress_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} [{elapsed_precise}] {pos} pages  {msg}")
    {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_banner(config: &CrawlConfig, cli: &Cli) {
    let order = match config.search_order {
        SearchOrder::BreadthFirst => "breadth-first",
        SearchOrder::DepthFirst => "depth-first",
    };

    eprintln!("🕷️  Starting recon...");
    eprintln!("   url: {}", config.seed);
    eprintln!("   depth limit: {}", config.depth_limit);
    eprintln!("   search order: {}", order);
    eprintln!("   filter extensions: {:?}", config.excluded.suffixes());
    eprintln!("   timeout: {} seconds", config.timeout.as_secs());
    eprintln!("   workers: {}", config.effective_workers());
    if let Some(path) = &cli.output {
        eprintln!("   saving to file: {}", path.display());
    }
}
