//! Link graph analysis and content reporting
//!
//! Everything here is a pure function of a loaded [`Sitemap`]:
//! - Incoming-link counts over resolved internal links
//! - The popularity-ranked page list and its HTML rendering
//! - A DOT export of the raw link graph
//! - Content statistics, keyword search, date-range listings
//! - A markdown analysis report

mod graph;
mod links;
mod rank;
mod report;
pub mod stats;

pub use graph::{graph_dot, sanitize_id};
pub use links::incoming_counts;
pub use rank::{ranked_pages, render_page_list, RankedPage};
pub use report::{format_markdown_report, write_markdown_report, RECENT_PAGE_LIMIT};
pub use stats::{
    content_statistics, find_pages_by_keyword, pages_by_date_range, print_statistics,
    ContentStatistics, DatedPage, SearchHit,
};

use crate::sitemap::Sitemap;
use std::path::Path;

/// Writes `contents` to `path`, creating parent directories as needed
pub(crate) fn write_output(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)
}

/// Ranks the sitemap's pages and writes the HTML page list to `path`
///
/// # Returns
///
/// The number of pages listed
pub fn write_page_list(sitemap: &Sitemap, host: &str, path: &Path) -> std::io::Result<usize> {
    let counts = incoming_counts(sitemap);
    let ranked = ranked_pages(sitemap, &counts);
    write_output(path, &render_page_list(&ranked, host))?;
    tracing::info!("Wrote page list of {} pages to {}", ranked.len(), path.display());
    Ok(ranked.len())
}

/// Writes the DOT graph of the sitemap to `path`
pub fn write_graph(sitemap: &Sitemap, home_key: &str, path: &Path) -> std::io::Result<()> {
    write_output(path, &graph_dot(sitemap, home_key))?;
    tracing::info!("Wrote link graph to {}", path.display());
    Ok(())
}
