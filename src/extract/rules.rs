//! Named extraction rules
//!
//! Each rule is a pure function over a parsed document. The mirrored site
//! marks its structure with a handful of CSS classes:
//! - `.node .content`: primary content block (one per article)
//! - `.node .title`: article title inside a multi-article listing
//! - `.node .submitted`: "submitted by ... on YYYY-MM-DD" byline
//! - `.galleries`, `.images`, `.pager`: trailing sections
//!
//! The rules are executed in a fixed order by [`crate::extract::extract_page`].

use crate::extract::markdown::{element_to_markdown, html_to_markdown};
use crate::url::strip_site_prefix;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Strict `YYYY-MM-DD` pattern (ASCII digits only)
static DATE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").ok());

const CONTENT_BLOCK: &str = ".node .content";
const GALLERIES_BLOCK: &str = ".galleries";
const IMAGES_BLOCK: &str = ".images";
const PAGER_BLOCK: &str = ".pager";

/// A piece of page body produced by a section rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Name of the rule that produced the fragment
    pub rule: &'static str,

    /// Markdown rendering of the section
    pub markdown: String,
}

/// A rule producing a trailing body section
pub type SectionRule = fn(&Html) -> Option<Fragment>;

/// Trailing sections appended after the primary content, in order
pub const SECTION_RULES: [(&str, SectionRule); 3] = [
    ("galleries", gallery_section),
    ("images", images_section),
    ("pager", pager_section),
];

/// Body text and representative image of a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryContent {
    pub markdown: String,
    pub image: Option<String>,
}

/// Selects all elements in a document matching a CSS selector
fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Selects the first element in a document matching a CSS selector
fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Selects the first descendant of an element matching a CSS selector
fn select_within<'a>(element: &ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    element.select(&selector).next()
}

/// Extracts the page title
///
/// The site appends its name after a final `" |"` separator
/// (`"Home | pa-f"`). That segment is dropped; a title that consisted of the
/// site name alone becomes `short_name`. Returns `None` if the document has
/// no `<title>` element at all.
pub fn title_rule(document: &Html, short_name: &str) -> Option<String> {
    let element = select_first(document, "title")?;
    let text = element.text().collect::<String>();

    let segments: Vec<&str> = text.split(" |").collect();
    let kept = &segments[..segments.len().saturating_sub(1)];
    let title = kept.join(" |").trim().to_string();

    if title.is_empty() {
        Some(short_name.to_string())
    } else {
        Some(title)
    }
}

/// Returns true if the document has a content, gallery or images block
pub fn has_content_signal(document: &Html) -> bool {
    [CONTENT_BLOCK, GALLERIES_BLOCK, IMAGES_BLOCK]
        .iter()
        .any(|css| select_first(document, css).is_some())
}

/// Returns true if the document has a pager block
pub fn has_pager(document: &Html) -> bool {
    select_first(document, PAGER_BLOCK).is_some()
}

/// Collects the raw anchor targets of a document
///
/// Empty and `mailto:` hrefs are dropped, absolute same-site URLs are
/// reduced to root-relative form, and the result is deduplicated.
pub fn links_rule(document: &Html, host: &str) -> BTreeSet<String> {
    select_all(document, "a")
        .into_iter()
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| !href.is_empty() && !href.starts_with("mailto:"))
        .map(|href| strip_site_prefix(href, host))
        .collect()
}

/// Converts the primary content block(s) to markdown
///
/// Listing pages carry several articles; each contributes its title and
/// content, and no representative image is chosen. A single article page
/// records its only image, if it has exactly one.
pub fn primary_content_rule(document: &Html) -> PrimaryContent {
    let blocks = select_all(document, CONTENT_BLOCK);

    if blocks.len() > 1 {
        let mut parts = Vec::new();
        for node in select_all(document, ".node") {
            if let Some(title) = select_within(&node, ".title") {
                parts.push(element_to_markdown(&title));
            }
            if let Some(content) = select_within(&node, ".content") {
                parts.push(element_to_markdown(&content));
            }
        }

        return PrimaryContent {
            markdown: join_sections(parts),
            image: None,
        };
    }

    match blocks.first() {
        Some(content) => PrimaryContent {
            markdown: element_to_markdown(content),
            image: single_image(content),
        },
        None => PrimaryContent::default(),
    }
}

/// Returns the `src` of the only image in a block
fn single_image(block: &ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse("img").ok()?;
    let mut images = block.select(&selector);

    let first = images.next()?;
    if images.next().is_some() {
        return None;
    }

    let src = first.value().attr("src")?;
    let src = src.strip_prefix("./").unwrap_or(src);
    if src.is_empty() {
        None
    } else {
        Some(src.to_string())
    }
}

/// Gallery listing, without its item counters and "last" markers
pub fn gallery_section(document: &Html) -> Option<Fragment> {
    let gallery = select_first(document, GALLERIES_BLOCK)?;
    let cleaned = strip_decorations(&gallery.html(), ".count, .last");

    Some(Fragment {
        rule: "galleries",
        markdown: html_to_markdown(&cleaned),
    })
}

/// Image listing block
pub fn images_section(document: &Html) -> Option<Fragment> {
    let images = select_first(document, IMAGES_BLOCK)?;
    Some(Fragment {
        rule: "images",
        markdown: element_to_markdown(&images),
    })
}

/// Pagination controls
pub fn pager_section(document: &Html) -> Option<Fragment> {
    let pager = select_first(document, PAGER_BLOCK)?;
    Some(Fragment {
        rule: "pager",
        markdown: element_to_markdown(&pager),
    })
}

/// Removes every element matching `css` from an HTML fragment
fn strip_decorations(html: &str, css: &str) -> String {
    let mut fragment = Html::parse_fragment(html);

    let ids: Vec<_> = match Selector::parse(css) {
        Ok(selector) => fragment.select(&selector).map(|e| e.id()).collect(),
        Err(_) => Vec::new(),
    };

    for id in ids {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }

    fragment.root_element().inner_html()
}

/// Extracts the publish date from the article byline
pub fn date_rule(document: &Html) -> Option<String> {
    let submitted = select_first(document, ".node .submitted")?;
    let text = submitted.text().collect::<String>();
    let pattern = DATE_PATTERN.as_ref()?;

    pattern.find(&text).map(|m| m.as_str().to_string())
}

/// Joins body parts with a blank line between them
pub fn join_sections(parts: Vec<String>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
