// src/report/table.rs
// =============================================================================
// Prints crawl results as numbered tables in the terminal.
// =============================================================================

use crate::crawl::CrawlOutcome;
use std::collections::BTreeSet;

const WIDTH: usize = 100;

// Prints every non-empty category, then a summary
pub fn print_tables(outcome: &CrawlOutcome) {
    let report = &outcome.report;

    if report.is_empty() {
        println!("⚠️  Nothing collected from {} page(s)\n", outcome.stats.pages_fetched);
    }

    print_section("INTERNAL LINKS", &report.internal_links);
    print_section("EXTERNAL LINKS", &report.external_links);
    print_section("EMAILS", &report.emails);
    print_section("SCRIPTS", &report.script_refs);
    print_section("COMMENTS", &report.comments);

    if !outcome.stats.pages_failed.is_empty() {
        println!("{:<6} {:<70} {:<22}", "DEPTH", "FAILED PAGE", "REASON");
        println!("{}", "=".repeat(WIDTH));
        for failed in &outcome.stats.pages_failed {
            println!(
                "{:<6} {:<70} {:<22}",
                failed.depth,
                truncate(&failed.url, 67),
                failed.reason
            );
        }
        println!();
    }

    println!("📊 Summary:");
    println!("   📄 Pages fetched: {}", outcome.stats.pages_fetched);
    println!("   ❌ Pages failed: {}", outcome.stats.pages_failed.len());
    println!("   🏠 Internal links: {}", report.internal_links.len());
    println!("   🌐 External links: {}", report.external_links.len());
    println!("   ✉️  Emails: {}", report.emails.len());
    println!("   📜 Scripts: {}", report.script_refs.len());
    println!("   💬 Comments: {}", report.comments.len());
    if outcome.interrupted {
        println!("   ⚠️  Crawl was interrupted, results are partial");
    }
}

fn print_section(title: &str, items: &BTreeSet<String>) {
    if items.is_empty() {
        println!("⚠️  No {} found\n", title.to_lowercase());
        return;
    }

    println!("{:<6} {}", "NO.", title);
    println!("{}", "=".repeat(WIDTH));
    for (i, item) in items.iter().enumerate() {
        // Comments can span lines; keep one row per entry
        let single_line = item.split_whitespace().collect::<Vec<_>>().join(" ");
        println!("{:<6} {}", i + 1, truncate(&single_line, WIDTH - 7));
    }
    println!();
}

// Shortens `text` to at most `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
