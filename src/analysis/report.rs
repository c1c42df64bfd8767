//! Markdown analysis report generation
//!
//! This module generates a human-readable markdown report of a sitemap's
//! content: statistics, date range and the most recent pages.

use crate::analysis::stats::{content_statistics, pages_by_date_range};
use crate::analysis::write_output;
use crate::sitemap::Sitemap;
use chrono::NaiveDate;
use std::path::Path;

/// Maximum number of entries in the recent pages table
pub const RECENT_PAGE_LIMIT: usize = 20;

/// Generates a markdown report and writes it to `output_path`
///
/// # Arguments
///
/// * `sitemap` - The sitemap to analyze
/// * `since` - Optional inclusive lower bound for the recent pages table
/// * `until` - Optional inclusive upper bound for the recent pages table
/// * `output_path` - Path where the markdown file should be written
pub fn write_markdown_report(
    sitemap: &Sitemap,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
    output_path: &Path,
) -> std::io::Result<()> {
    let markdown = format_markdown_report(sitemap, since, until);
    write_output(output_path, &markdown)?;
    tracing::info!("Wrote analysis report to {}", output_path.display());
    Ok(())
}

/// Formats the analysis report as markdown
pub fn format_markdown_report(
    sitemap: &Sitemap,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> String {
    let stats = content_statistics(sitemap);
    let mut md = String::new();

    md.push_str("# Site Analysis Report\n\n");

    md.push_str("## Content Statistics\n\n");
    md.push_str(&format!("- **Total Pages**: {}\n", stats.total_pages));
    md.push_str(&format!("- **Pages with Dates**: {}\n", stats.pages_with_dates));
    md.push_str(&format!("- **Pages with Images**: {}\n", stats.pages_with_images));
    md.push_str(&format!(
        "- **Total Content Length**: {} characters\n\n",
        stats.total_content_length
    ));

    md.push_str("## Date Range\n\n");
    md.push_str(&format!(
        "- **Earliest**: {}\n",
        stats.earliest.as_deref().unwrap_or("N/A")
    ));
    md.push_str(&format!(
        "- **Latest**: {}\n\n",
        stats.latest.as_deref().unwrap_or("N/A")
    ));

    md.push_str("## Recent Pages\n\n");
    if since.is_some() || until.is_some() {
        md.push_str(&format!(
            "Between {} and {}.\n\n",
            since.map_or_else(|| "the beginning".to_string(), |d| d.to_string()),
            until.map_or_else(|| "today".to_string(), |d| d.to_string()),
        ));
    }

    let recent = pages_by_date_range(sitemap, since, until);
    if recent.is_empty() {
        md.push_str("No dated pages.\n");
    } else {
        md.push_str("| Page | Title | Date |\n");
        md.push_str("|------|-------|------|\n");
        for page in recent.iter().take(RECENT_PAGE_LIMIT) {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                page.key,
                page.title.replace('|', "\\|"),
                page.date
            ));
        }
        if recent.len() > RECENT_PAGE_LIMIT {
            md.push_str(&format!(
                "\n... and {} more\n",
                recent.len() - RECENT_PAGE_LIMIT
            ));
        }
    }

    md
}
