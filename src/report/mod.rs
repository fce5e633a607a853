// src/report/mod.rs
// =============================================================================
// This module turns a finished (or interrupted) crawl into output.
//
// Submodules:
// - table: Human-readable tables for the terminal
// - html: Standalone HTML report written to disk
//
// JSON output is a direct serde_json dump of CrawlOutcome.
// =============================================================================

mod html;
mod table;

use crate::crawl::CrawlOutcome;
use anyhow::Result;

pub use html::write_html_report;
pub use table::print_tables;

// Prints the outcome either as tables or JSON
pub fn print_outcome(outcome: &CrawlOutcome, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(outcome)?;
        println!("{}", json_output);
    } else {
        print_tables(outcome);
    }
    Ok(())
}
