//! Incoming-link counting

use crate::sitemap::Sitemap;
use std::collections::BTreeMap;

/// Counts, for every page, the links from other pages that resolve to it
///
/// Each raw link is resolved against the page it appears on. Links that are
/// external, query-bearing or dead contribute nothing; a target that no link
/// resolves to is absent from the result rather than mapped to zero. Two
/// different raw links on one page that resolve to the same key both count.
pub fn incoming_counts(sitemap: &Sitemap) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();

    for (key, page) in sitemap.iter() {
        for raw in &page.links {
            if let Some(target) = sitemap.resolve_link(raw, key) {
                *counts.entry(target.to_string()).or_insert(0) += 1;
            }
        }
    }

    counts
}
