//! Popularity ranking of pages

use crate::render::escape_html;
use crate::sitemap::Sitemap;
use std::collections::BTreeMap;

/// A page in the ranked list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPage {
    pub key: String,
    pub title: String,
    pub incoming: usize,
}

/// Ranks pages by incoming-link count, highest first
///
/// Keys containing `?` are left out. Pages with equal counts keep the
/// sitemap's iteration order.
pub fn ranked_pages(sitemap: &Sitemap, counts: &BTreeMap<String, usize>) -> Vec<RankedPage> {
    let mut ranked: Vec<RankedPage> = sitemap
        .iter()
        .filter(|(key, _)| !key.contains('?'))
        .map(|(key, page)| RankedPage {
            key: key.to_string(),
            title: page.title.clone(),
            incoming: counts.get(key).copied().unwrap_or(0),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.incoming.cmp(&a.incoming));
    ranked
}

/// Public URL path of a page on the live site
fn public_path(key: &str) -> String {
    let path = key.replace(".html", "");
    if path == "index" {
        String::new()
    } else {
        path
    }
}

/// Renders the ranked list as an HTML ordered list
///
/// Each entry links to the page on the live site at `host`, shows its title
/// and its incoming-link count.
pub fn render_page_list(ranked: &[RankedPage], host: &str) -> String {
    let mut html = String::from("<html><head><meta charset='utf-8' /></head><body><ol>\n");

    for page in ranked {
        html.push_str(&format!(
            "<li><a href='https://{}/{}' target='_blank'>{}</a> <small>({})</small></li>\n",
            host,
            public_path(&page.key),
            escape_html(&page.title),
            page.incoming
        ));
    }

    html.push_str("</ol></body></html>\n");
    html
}
