// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI only collects raw values. Turning them into a validated
// CrawlConfig happens in config.rs, so the crawl engine never sees clap types.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - Option<T>: For arguments that may be absent (like --output)
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// The whole command line of recon-spider
//
// #[derive(Parser)] tells clap to generate the parsing code
// Doc comments on fields become the --help text
#[derive(Parser, Debug)]
#[command(
    name = "recon-spider",
    version = "0.1.0",
    about = "Web crawler for bug bounty reconnaissance",
    long_about = "recon-spider walks a target site from a seed URL, classifies every link it \
                  finds as internal or external, and collects email addresses, script \
                  references and HTML comments along the way."
)]
pub struct Cli {
    /// Target URL to start crawling from (e.g., https://example.com)
    pub url: String,

    /// Recon depth level (0 = only the seed page)
    #[arg(short, long, default_value_t = 5)]
    pub depth: usize,

    /// Use breadth-first search instead of depth-first
    #[arg(short, long)]
    pub breadth: bool,

    /// Filter out extensions, comma separated (e.g., .jpg,.png,.pdf)
    #[arg(short, long, default_value = "")]
    pub filter: String,

    /// Timeout for each HTTP request, in seconds
    #[arg(short, long, default_value_t = 10)]
    pub timeout: u64,

    /// Save recon results to an HTML file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print results as JSON instead of tables
    #[arg(long)]
    pub json: bool,

    /// Maximum number of concurrent fetches (breadth-first only)
    #[arg(short, long, default_value_t = 8)]
    pub workers: usize,
}
