//! DOT export of the raw link graph

use crate::sitemap::Sitemap;

/// Characters not allowed in a DOT identifier
const DISALLOWED_ID_CHARS: &[char] = &['/', '-', '.', '?', '=', '+', '&', ' '];

/// Turns a page key or link into a DOT-safe identifier
///
/// # Examples
///
/// ```
/// use palimpsest::analysis::sanitize_id;
///
/// assert_eq!(sanitize_id("node/25153.html"), "node_25153_html");
/// ```
pub fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .map(|c| if DISALLOWED_ID_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Edge target for a raw link, or `None` if the link gets no edge
///
/// The bare root link `/` stands for the home page.
fn edge_target<'a>(raw: &'a str, home_key: &'a str) -> Option<&'a str> {
    let link = if raw.trim() == "/" { home_key } else { raw };
    let link = link.strip_prefix('/').unwrap_or(link);

    if link.trim().is_empty() || link.starts_with("http") {
        None
    } else {
        Some(link)
    }
}

/// Renders the sitemap's link graph in DOT format
///
/// Every page becomes a node labelled with its title; every internal raw
/// link becomes an edge. Edges are not resolved against the sitemap.
pub fn graph_dot(sitemap: &Sitemap, home_key: &str) -> String {
    let mut dot = String::from("digraph F {\n");

    for (key, page) in sitemap.iter() {
        let id = sanitize_id(key);
        dot.push_str(&format!("{} [label=\"{}\"];\n", id, page.title.replace('"', "")));

        for raw in &page.links {
            if let Some(target) = edge_target(raw, home_key) {
                dot.push_str(&format!("{} -> {};\n", id, sanitize_id(target)));
            }
        }
    }

    dot.push_str("}\n");
    dot
}
