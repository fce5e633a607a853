// src/report/html.rs
// =============================================================================
// Writes the crawl results to a standalone HTML file.
//
// The page is self-contained (inline CSS, no scripts) with one numbered
// table per category. Every value that came from a crawled page is escaped
// before it is written, since recon targets control that text.
// =============================================================================

use crate::crawl::CrawlOutcome;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;
use url::Url;

const STYLE: &str = r#"
    body { font-family: "Courier New", Courier, monospace; background-color: #1e1e1e; color: #dcdcdc; }
    h1, h2 { text-align: center; color: #c0c0c0; }
    p.meta { text-align: center; color: #9a9a9a; }
    table { width: 100%; border-collapse: collapse; margin: 20px 0; background-color: #2e2e2e; }
    th, td { border: 1px solid #444; padding: 10px; text-align: left; }
    th { background-color: #3e3e3e; }
    td { color: #f5f5f5; word-break: break-all; }
    a { color: #5ac8fa; text-decoration: none; }
    a:hover { text-decoration: underline; color: #8fbcbb; }
    .internal-links td { color: #b0e0e6; }
    .external-links td { color: #f08080; }
    .warning { text-align: center; color: #f0c674; }
"#;

/// Renders the full report page for a crawl of `seed`.
pub fn render_html(seed: &Url, outcome: &CrawlOutcome) -> String {
    let report = &outcome.report;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Recon Results</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Recon Results</h1>\n");

    let _ = writeln!(
        html,
        "<p class=\"meta\">{} &middot; {} page(s) fetched &middot; {} failed</p>",
        escape(seed.as_str()),
        outcome.stats.pages_fetched,
        outcome.stats.pages_failed.len()
    );
    if outcome.interrupted {
        html.push_str("<p class=\"warning\">Crawl was interrupted; results are partial.</p>\n");
    }

    push_table(&mut html, "Internal Links", "internal-links", &report.internal_links, true);
    push_table(&mut html, "External Links", "external-links", &report.external_links, true);
    push_table(&mut html, "Emails", "emails", &report.emails, false);
    push_table(&mut html, "Scripts", "scripts", &report.script_refs, true);
    push_table(&mut html, "Comments", "comments", &report.comments, false);

    html.push_str("</body>\n</html>\n");
    html
}

/// Renders the report and writes it to `path`.
pub fn write_html_report(path: &Path, seed: &Url, outcome: &CrawlOutcome) -> Result<()> {
    let html = render_html(seed, outcome);
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write HTML report to {}", path.display()))?;
    tracing::info!(path = %path.display(), "report saved");
    Ok(())
}

fn push_table(html: &mut String, title: &str, class: &str, items: &BTreeSet<String>, linked: bool) {
    let _ = writeln!(html, "<h2>{}</h2>", title);
    let _ = writeln!(
        html,
        "<table class=\"{}\">\n<tr><th>No.</th><th>{}</th></tr>",
        class, title
    );
    for (i, item) in items.iter().enumerate() {
        let value = escape(item);
        if linked {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td><a href=\"{}\">{}</a></td></tr>",
                i + 1,
                value,
                value
            );
        } else {
            let _ = writeln!(html, "<tr><td>{}</td><td>{}</td></tr>", i + 1, value);
        }
    }
    html.push_str("</table>\n");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
