//! Page extraction for mirrored HTML files
//!
//! This module turns one mirrored HTML document into a [`PageRecord`]:
//! - Title (site-name suffix removed)
//! - Body as markdown (primary content, then galleries, images and pager)
//! - Publish date and representative image
//! - Raw outbound links
//!
//! Pages that cannot yield a record are routine skips, reported through
//! [`SkipReason`] rather than as errors.

mod markdown;
pub mod rules;
mod skip;

pub use markdown::html_to_markdown;
pub use skip::{skip_reason_for_path, SkipReason};

use crate::config::Config;
use crate::sitemap::PageRecord;
use rules::{
    date_rule, has_content_signal, has_pager, join_sections, links_rule, primary_content_rule,
    title_rule, SECTION_RULES,
};
use scraper::Html;

/// Site identity needed while extracting pages
#[derive(Debug, Clone)]
pub struct ExtractContext {
    /// Host of the original site, used to strip absolute same-site links
    pub host: String,

    /// Title used for pages whose title is only the site name
    pub short_name: String,
}

impl ExtractContext {
    pub fn new(host: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            short_name: short_name.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.site.host, &config.site.short_name)
    }
}

/// Extracts a page record from a parsed document
///
/// # Decision Sequence
///
/// 1. Title: no `<title>` element means [`SkipReason::NoTitle`]
/// 2. Content presence: a content, galleries or images block is required,
///    otherwise [`SkipReason::NoContent`]
/// 3. Links
/// 4. Body and image, then the trailing sections in order
/// 5. Date
///
/// # Example
///
/// ```
/// use palimpsest::extract::{extract_page, ExtractContext};
/// use scraper::Html;
///
/// let html = r#"<html><head><title>Basics | pa-f</title></head><body>
///     <div class="node"><div class="content"><p>Welcome</p></div></div>
/// </body></html>"#;
/// let ctx = ExtractContext::new("pa-f.net", "pa-f");
/// let page = extract_page(&Html::parse_document(html), &ctx).unwrap();
/// assert_eq!(page.title, "Basics");
/// ```
pub fn extract_page(document: &Html, ctx: &ExtractContext) -> Result<PageRecord, SkipReason> {
    let title = title_rule(document, &ctx.short_name).ok_or(SkipReason::NoTitle)?;

    if !has_content_signal(document) {
        if has_pager(document) {
            tracing::warn!("Dropping pager-only page '{}'", title);
        }
        return Err(SkipReason::NoContent);
    }

    let links = links_rule(document, &ctx.host);

    let primary = primary_content_rule(document);
    let mut parts = vec![primary.markdown];
    for (_, rule) in SECTION_RULES {
        if let Some(fragment) = rule(document) {
            parts.push(fragment.markdown);
        }
    }

    let date = date_rule(document);

    Ok(PageRecord {
        title,
        body: join_sections(parts),
        date,
        image: primary.image,
        links,
    })
}

/// Parses raw HTML and extracts a page record
pub fn extract_html(html: &str, ctx: &ExtractContext) -> Result<PageRecord, SkipReason> {
    let document = Html::parse_document(html);
    extract_page(&document, ctx)
}

/// Extracts a page record from raw file bytes and the file's root-relative path
///
/// Applies the path rules before reading anything, then requires the bytes
/// to be UTF-8. The outcome depends only on `path` and `bytes`.
pub fn extract_file(path: &str, bytes: &[u8], ctx: &ExtractContext) -> Result<PageRecord, SkipReason> {
    if let Some(reason) = skip_reason_for_path(path) {
        return Err(reason);
    }

    let html = std::str::from_utf8(bytes).map_err(|_| SkipReason::Undecodable)?;
    extract_html(html, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ExtractContext {
        ExtractContext::new("pa-f.net", "pa-f")
    }

    const ARTICLE: &str = r#"<html><head><title>The mattress | pa-f</title></head><body>
        <div class="node">
          <span class="submitted">Submitted on 2011-06-02</span>
          <div class="content"><h2>Sleeping</h2><p>See <a href="https://pa-f.net/basics.html">basics</a>.</p>
          <img src="./sites/pa-f.net/files/mattress.jpg"></div>
        </div>
        <div class="pager"><a href="../node/2.html">next</a></div>
        <a href="mailto:info@pa-f.net">mail</a>
        </body></html>"#;

    #[test]
    fn test_extract_full_article() {
        let page = extract_html(ARTICLE, &ctx()).unwrap();

        assert_eq!(page.title, "The mattress");
        assert_eq!(page.date.as_deref(), Some("2011-06-02"));
        assert_eq!(page.image.as_deref(), Some("sites/pa-f.net/files/mattress.jpg"));
        assert!(page.links.contains("/basics.html"));
        assert!(page.links.contains("../node/2.html"));
        assert_eq!(page.links.len(), 2);
        assert!(page.body.contains("## Sleeping"));
        assert!(page.body.find("Sleeping").unwrap() < page.body.find("next").unwrap());
    }

    #[test]
    fn test_no_title_is_skipped() {
        let html = r#"<html><body><div class="node"><div class="content">x</div></div></body></html>"#;
        assert_eq!(extract_html(html, &ctx()), Err(SkipReason::NoTitle));
    }

    #[test]
    fn test_no_content_is_skipped() {
        let html = "<html><head><title>Empty | pa-f</title></head><body><p>nothing</p></body></html>";
        assert_eq!(extract_html(html, &ctx()), Err(SkipReason::NoContent));
    }

    #[test]
    fn test_pager_only_is_skipped() {
        let html = r#"<html><head><title>Page 2 | pa-f</title></head><body><div class="pager"><a href="?page=3">3</a></div></body></html>"#;
        assert_eq!(extract_html(html, &ctx()), Err(SkipReason::NoContent));
    }

    #[test]
    fn test_gallery_only_page_has_body() {
        let html = r#"<html><head><title>Galleries | pa-f</title></head><body>
            <div class="galleries"><a href="image/tid/1.html">Summer</a><span class="count">3 images</span></div>
            </body></html>"#;
        let page = extract_html(html, &ctx()).unwrap();
        assert!(page.body.contains("Summer"));
        assert!(!page.body.contains("3 images"));
        assert_eq!(page.image, None);
        assert_eq!(page.date, None);
    }

    #[test]
    fn test_home_title_defaults_to_short_name() {
        let html = r#"<html><head><title>pa-f</title></head><body><div class="images"><img src="a.jpg"></div></body></html>"#;
        let page = extract_html(html, &ctx()).unwrap();
        assert_eq!(page.title, "pa-f");
        assert_eq!(page.image, None);
    }

    #[test]
    fn test_extract_file_applies_path_rules_first() {
        for path in ["a/book/export/x", "b?size=100", "tracker?x=1", "files/y.png"] {
            let result = extract_file(path, ARTICLE.as_bytes(), &ctx());
            assert!(
                matches!(result, Err(reason) if reason.is_path_rule()),
                "{} was not skipped",
                path
            );
        }
    }

    #[test]
    fn test_extract_file_rejects_invalid_utf8() {
        let bytes = [0x3c, 0x68, 0xff, 0xfe, 0x00];
        assert_eq!(
            extract_file("node/1.html", &bytes, &ctx()),
            Err(SkipReason::Undecodable)
        );
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let first = extract_html(ARTICLE, &ctx()).unwrap();
        let second = extract_html(ARTICLE, &ctx()).unwrap();
        assert_eq!(first, second);
    }
}
