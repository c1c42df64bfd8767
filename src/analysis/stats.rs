//! Content statistics, keyword search and date-range listings
//!
//! This module provides functionality for summarizing the content of a
//! sitemap and for finding pages in it.

use crate::sitemap::Sitemap;
use chrono::NaiveDate;

/// Score added when the keyword appears in a page title
const TITLE_HIT_SCORE: usize = 10;

/// Content statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentStatistics {
    /// Total number of pages
    pub total_pages: usize,

    /// Pages carrying a publish date
    pub pages_with_dates: usize,

    /// Pages carrying a representative image
    pub pages_with_images: usize,

    /// Total markdown length in characters
    pub total_content_length: usize,

    /// Earliest publish date
    pub earliest: Option<String>,

    /// Latest publish date
    pub latest: Option<String>,
}

/// A page matching a keyword search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub key: String,
    pub title: String,
    pub score: usize,
}

/// A dated page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedPage {
    pub key: String,
    pub title: String,
    pub date: NaiveDate,
}

/// Computes content statistics for a sitemap
pub fn content_statistics(sitemap: &Sitemap) -> ContentStatistics {
    let mut stats = ContentStatistics {
        total_pages: sitemap.len(),
        ..ContentStatistics::default()
    };

    for (_, page) in sitemap.iter() {
        if let Some(date) = &page.date {
            stats.pages_with_dates += 1;
            // YYYY-MM-DD orders lexicographically
            if stats.earliest.as_ref().map_or(true, |e| date < e) {
                stats.earliest = Some(date.clone());
            }
            if stats.latest.as_ref().map_or(true, |l| date > l) {
                stats.latest = Some(date.clone());
            }
        }

        if page.image.is_some() {
            stats.pages_with_images += 1;
        }

        stats.total_content_length += page.body.chars().count();
    }

    stats
}

/// Finds pages mentioning `keyword`, most relevant first
///
/// Matching is case-insensitive. A title hit scores 10, and every
/// occurrence in the body adds 1. Pages scoring 0 are left out; equal
/// scores keep the sitemap's iteration order.
pub fn find_pages_by_keyword(sitemap: &Sitemap, keyword: &str) -> Vec<SearchHit> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = sitemap
        .iter()
        .filter_map(|(key, page)| {
            let mut score = page.body.to_lowercase().matches(needle.as_str()).count();
            if page.title.to_lowercase().contains(&needle) {
                score += TITLE_HIT_SCORE;
            }

            (score > 0).then(|| SearchHit {
                key: key.to_string(),
                title: page.title.clone(),
                score,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits
}

/// Lists dated pages within the inclusive bounds, newest first
///
/// Either bound may be omitted. Pages whose date does not parse are
/// skipped.
pub fn pages_by_date_range(
    sitemap: &Sitemap,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Vec<DatedPage> {
    let mut pages: Vec<DatedPage> = sitemap
        .iter()
        .filter_map(|(key, page)| {
            let raw = page.date.as_deref()?;
            let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => date,
                Err(e) => {
                    tracing::debug!("Ignoring unparsable date '{}' on {}: {}", raw, key, e);
                    return None;
                }
            };

            if since.is_some_and(|s| date < s) || until.is_some_and(|u| date > u) {
                return None;
            }

            Some(DatedPage {
                key: key.to_string(),
                title: page.title.clone(),
                date,
            })
        })
        .collect();

    pages.sort_by(|a, b| b.date.cmp(&a.date));
    pages
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `digest` - SHA-256 digest of the stored sitemap
pub fn print_statistics(stats: &ContentStatistics, digest: &str) {
    println!("=== Sitemap Statistics ===\n");

    println!("Overview:");
    println!("  Total pages: {}", stats.total_pages);
    println!("  Total content length: {} characters", stats.total_content_length);
    println!();

    println!("Metadata:");
    for (label, count) in [
        ("Pages with dates", stats.pages_with_dates),
        ("Pages with images", stats.pages_with_images),
    ] {
        let percentage = if stats.total_pages > 0 {
            (count as f64 / stats.total_pages as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", label, count, percentage);
    }
    println!();

    println!("Date Range:");
    println!("  Earliest: {}", stats.earliest.as_deref().unwrap_or("N/A"));
    println!("  Latest: {}", stats.latest.as_deref().unwrap_or("N/A"));
    println!();

    println!("Digest: {}", digest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::tests::page;
    use crate::sitemap::PageRecord;

    fn dated(title: &str, body: &str, date: Option<&str>) -> PageRecord {
        let mut record = page(title, &[]);
        record.body = body.to_string();
        record.date = date.map(str::to_string);
        record
    }

    fn sample() -> Sitemap {
        let mut sitemap = Sitemap::new();
        sitemap.insert("a.html", dated("Mattress", "sleep on a mattress", Some("2011-06-02")));
        sitemap.insert("b.html", dated("Kitchen", "Mattress? mattress! MATTRESS.", Some("2009-01-15")));
        sitemap.insert("c.html", dated("Garden", "nothing here", Some("2011-06-02")));
        let mut with_image = dated("Home", "été", None);
        with_image.image = Some("files/a.jpg".to_string());
        sitemap.insert("index.html", with_image);
        sitemap
    }

    #[test]
    fn test_content_statistics() {
        let stats = content_statistics(&sample());

        assert_eq!(stats.total_pages, 4);
        assert_eq!(stats.pages_with_dates, 3);
        assert_eq!(stats.pages_with_images, 1);
        assert_eq!(stats.earliest.as_deref(), Some("2009-01-15"));
        assert_eq!(stats.latest.as_deref(), Some("2011-06-02"));
        assert_eq!(
            stats.total_content_length,
            "sleep on a mattress".len() + "Mattress? mattress! MATTRESS.".len() + "nothing here".len() + 3
        );
    }

    #[test]
    fn test_empty_statistics() {
        let stats = content_statistics(&Sitemap::new());
        assert_eq!(stats, ContentStatistics::default());
    }

    #[test]
    fn test_find_pages_by_keyword() {
        let hits = find_pages_by_keyword(&sample(), "MATTRESS");

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].key, "a.html");
        assert_eq!(hits[0].score, 11);
        assert_eq!(hits[1].key, "b.html");
        assert_eq!(hits[1].score, 3);
    }

    #[test]
    fn test_find_pages_with_blank_keyword() {
        assert!(find_pages_by_keyword(&sample(), "  ").is_empty());
    }

    #[test]
    fn test_pages_by_date_range() {
        let all = pages_by_date_range(&sample(), None, None);
        let keys: Vec<&str> = all.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["a.html", "c.html", "b.html"]);

        let since = NaiveDate::from_ymd_opt(2010, 1, 1);
        let recent = pages_by_date_range(&sample(), since, None);
        assert_eq!(recent.len(), 2);

        let until = NaiveDate::from_ymd_opt(2009, 1, 15);
        let old = pages_by_date_range(&sample(), None, until);
        assert_eq!(old.len(), 1);
        assert_eq!(old[0].key, "b.html");
    }

    #[test]
    fn test_unparsable_dates_are_skipped() {
        let mut sitemap = Sitemap::new();
        sitemap.insert("x.html", dated("X", "", Some("2011-13-45")));
        assert!(pages_by_date_range(&sitemap, None, None).is_empty());
    }
}
